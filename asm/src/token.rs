use crate::error::Pos;
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LexKind {
    #[strum(to_string = "IDENTIFIER")]
    Identifier,
    #[strum(to_string = "DIRECTIVE")]
    Directive,
    #[strum(to_string = "STRING")]
    Str,
    #[strum(to_string = "HEX CONSTANT")]
    Hex,
    #[strum(to_string = "BIN CONSTANT")]
    Bin,
    #[strum(to_string = "OCT CONSTANT")]
    Oct,
    #[strum(to_string = "DEC CONSTANT")]
    Dec,
    #[strum(to_string = "LABEL DECLARATION")]
    LabelDecl,
    #[strum(to_string = "COMMENT")]
    Comment,

    // Atoms
    #[strum(to_string = "COMMA")]
    Comma, // ','
    #[strum(to_string = "HASH")]
    Hash, // '#'
    #[strum(to_string = "LEFT PARENTHESIS")]
    LParen, // '('
    #[strum(to_string = "RIGHT PARENTHESIS")]
    RParen, // ')'
    #[strum(to_string = "LESS")]
    Less, // '<'
    #[strum(to_string = "GREATER")]
    Greater, // '>'
    #[strum(to_string = "STAR")]
    Star, // '*'
    #[strum(to_string = "EQUAL")]
    Equal, // '='

    #[strum(to_string = "NEW LINE")]
    Eol,
    #[strum(to_string = "UNEXPECTED")]
    Unexpected,
}

impl LexKind {
    pub fn atom(ch: char) -> Option<Self> {
        use LexKind::*;
        match ch {
            ',' => Some(Comma),
            '#' => Some(Hash),
            '(' => Some(LParen),
            ')' => Some(RParen),
            '<' => Some(Less),
            '>' => Some(Greater),
            '*' => Some(Star),
            '=' => Some(Equal),
            _ => None,
        }
    }
}

/// One lexical unit of a source line.
/// `text` keeps the literal spelling: numbers with their prefix,
/// directives, label declarations and strings without their delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexeme {
    pub kind: LexKind,
    pub text: String,
    pub pos: Pos,
}

impl Lexeme {
    pub fn new(kind: LexKind, text: impl Into<String>, pos: Pos) -> Self {
        Lexeme {
            kind,
            text: text.into(),
            pos,
        }
    }
}
