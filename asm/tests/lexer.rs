use c02asm::lexer::{Lexer, LineLexer};
use c02asm::token::{LexKind, LexKind::*};
use c02asm::{Error, Pos, Source};

fn assert(code: &str, expects: Vec<(LexKind, &str)>) {
    let lexemes = LineLexer::new(1, code).parse();

    println!(" {code}");
    for lexeme in &lexemes {
        print!("\r\x1b[{}C^", lexeme.pos.col);
    }
    println!();
    for (idx, lexeme) in lexemes.iter().enumerate() {
        println!("{:>2}: {:?} {:?}", idx, lexeme.kind, lexeme.text);
    }

    let actual: Vec<(LexKind, &str)> = lexemes.iter().map(|l| (l.kind, l.text.as_str())).collect();
    assert_eq!(actual, expects);
}

macro_rules! case {
    ($name:ident, $code:expr, $expects:expr) => {
        #[test]
        fn $name() {
            assert($code, $expects);
        }
    };
}

case!(
    instruction,
    "loop: lda #$01 ; load",
    vec![
        (LabelDecl, "loop"),
        (Identifier, "lda"),
        (Hash, "#"),
        (Hex, "$01"),
        (Comment, " load"),
        (Eol, ""),
    ]
);
case!(
    indirect_indexed,
    "STA ($20),Y",
    vec![
        (Identifier, "STA"),
        (LParen, "("),
        (Hex, "$20"),
        (RParen, ")"),
        (Comma, ","),
        (Identifier, "Y"),
        (Eol, ""),
    ]
);
case!(
    code_position,
    "*=$0600",
    vec![(Star, "*"), (Equal, "="), (Hex, "$0600"), (Eol, "")]
);
case!(
    literals,
    "16 $10 %00010000 020 0",
    vec![
        (Dec, "16"),
        (Hex, "$10"),
        (Bin, "%00010000"),
        (Oct, "020"),
        (Oct, "0"),
        (Eol, ""),
    ]
);
case!(
    data,
    ".byte \"Hi\", 1,2",
    vec![
        (Directive, "byte"),
        (Str, "Hi"),
        (Comma, ","),
        (Dec, "1"),
        (Comma, ","),
        (Dec, "2"),
        (Eol, ""),
    ]
);
case!(
    label_halves,
    "LDX #<table",
    vec![
        (Identifier, "LDX"),
        (Hash, "#"),
        (Less, "<"),
        (Identifier, "table"),
        (Eol, ""),
    ]
);
case!(run_together_hex, "$FFX", vec![(Unexpected, "$FFX"), (Eol, "")]);
case!(bad_octal, "LDA 019", vec![(Identifier, "LDA"), (Unexpected, "019"), (Eol, "")]);
case!(octal_then_decimal, "017 8", vec![(Oct, "017"), (Dec, "8"), (Eol, "")]);
case!(empty_hex, "$ 1", vec![(Unexpected, "$"), (Dec, "1"), (Eol, "")]);
case!(empty_bin, "%2", vec![(Unexpected, "%2"), (Eol, "")]);
case!(underscores, "__", vec![(Unexpected, "__"), (Eol, "")]);
case!(empty_directive, ". byte", vec![(Unexpected, "."), (Identifier, "byte"), (Eol, "")]);
case!(blank_string, ".byte \"  \"", vec![(Directive, "byte"), (Unexpected, "\""), (Unexpected, "\""), (Eol, "")]);
case!(unterminated_string, "\"abc", vec![(Unexpected, "\"abc"), (Eol, "")]);
case!(label_glued, "loop:NOP", vec![(Unexpected, "loop:NOP"), (Eol, "")]);
case!(stray_char, "NOP !", vec![(Identifier, "NOP"), (Unexpected, "!"), (Eol, "")]);

#[test]
fn collects_every_error() {
    let source = Source::new("t.asm", "NOP\n  LDA $FFX\n\nJMP @x ; ok\n!! ??\n");
    let errors = Lexer::new(&source).tokenize().unwrap_err();
    for e in &errors {
        println!("{e}");
    }
    let positions: Vec<Pos> = errors.iter().filter_map(|e| e.pos()).collect();
    assert_eq!(
        positions,
        vec![Pos::new(2, 7), Pos::new(4, 5), Pos::new(5, 1), Pos::new(5, 4)]
    );
    assert!(matches!(&errors[0], Error::UnexpectedToken(_, text) if text == "$FFX"));
    assert!(errors.iter().all(|e| e.category() == c02asm::Category::Lexical));
}

#[test]
fn rows_skip_blank_lines() {
    let source = Source::new("t.asm", "\n\n  NOP\n");
    let lexemes = Lexer::new(&source).tokenize().unwrap();
    assert_eq!(lexemes[0].pos, Pos::new(3, 3));
    assert_eq!(lexemes.len(), 2);
}
