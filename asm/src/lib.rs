pub mod config;
pub mod error;
pub mod lexer;
pub mod linker;
pub mod record;
pub mod resolver;
pub mod source;
pub mod token;
pub mod util;

pub use config::Config;
pub use error::{Category, Error, Pos};
pub use linker::{Image, Linker};
pub use resolver::Resolver;
pub use source::Source;

use lexer::Lexer;

/// Lex, resolve and link `source` into a memory image.
pub fn assemble(source: &Source, config: &Config) -> Result<Image, Vec<Error>> {
    let lexemes = Lexer::new(source).tokenize()?;
    let mut resolver = Resolver::new(lexemes);
    let records = resolver.resolve()?;
    Linker::new(config)
        .with_labels(resolver.label_names())
        .link(&records)
}
