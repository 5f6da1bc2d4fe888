use c02asm::config::{output_path, parse_origin};
use c02asm::lexer::Lexer;
use c02asm::{util, Config, Error, Linker, Resolver, Source};
use std::path::PathBuf;
use std::process::exit;

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file (*.asm)
    input: String,

    /// Output file [default: input with .bin extension]
    #[clap(short, long)]
    output: Option<String>,

    /// Address of the first byte of the image
    #[clap(long, value_parser = parse_origin, default_value = "$0600")]
    origin: u16,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,
}

/// Print every diagnostic and quit.
fn fail(errors: &[Error], source: Option<&Source>) -> ! {
    for error in errors {
        error.print_diag(source);
    }
    eprintln!("{} error(s)", errors.len());
    exit(1)
}

fn main() {
    use clap::Parser;

    env_logger::init();
    let args: Args = Args::parse();
    let config = Config::with_origin(args.origin);
    println!("65C02 Assembler by kanade-k-1228");

    println!("1. Read Source");
    let default = output_path(&args.input).unwrap_or_else(|e| fail(&[e], None));
    let output = args.output.clone().map(PathBuf::from).unwrap_or(default);
    println!("  < {}", args.input);
    let source = Source::open(&args.input).unwrap_or_else(|e| fail(&[e], None));

    println!("2. Lex");
    let lexemes = Lexer::new(&source)
        .tokenize()
        .unwrap_or_else(|errors| fail(&errors, Some(&source)));

    println!("3. Resolve Macros, Labels & Addressing Modes");
    let mut resolver = Resolver::new(lexemes);
    let records = resolver
        .resolve()
        .unwrap_or_else(|errors| fail(&errors, Some(&source)));

    println!("4. Link & Generate Binary");
    let image = Linker::new(&config)
        .with_labels(resolver.label_names())
        .link(&records)
        .unwrap_or_else(|errors| fail(&errors, Some(&source)));

    println!("  > {} ({} bytes from ${:04X})", output.display(), image.bytes.len(), image.origin);
    if let Err(e) = std::fs::write(&output, &image.bytes) {
        fail(&[Error::FileWrite(output.display().to_string(), e)], None);
    }

    if args.dump {
        util::print_dump(&source, &image);
    }
}
