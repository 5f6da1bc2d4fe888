use crate::error::Pos;
use arch::{Mnemonic, Reg};
use strum::Display;

/// Directive kinds. The payload is filled in once the line's operands are collected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Define,
    Org(Option<u16>),
    Byte(Option<Vec<u8>>),
    Word(Option<Vec<u16>>),
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TokenKind {
    #[strum(to_string = "NUMBER")]
    Number(u32),
    #[strum(to_string = "STRING")]
    Str(String),
    #[strum(to_string = "OPCODE")]
    Opcode(Mnemonic),
    #[strum(to_string = "REGISTER")]
    Register(Reg),
    #[strum(to_string = "DIRECTIVE")]
    Directive(Directive),
    #[strum(to_string = "LABEL DECLARATION")]
    LabelDecl(String, Option<usize>),
    #[strum(to_string = "IDENTIFIER")]
    Ident(String),
    #[strum(to_string = "LABEL CALL")]
    LabelCall(String, Option<usize>),
    #[strum(to_string = "COMMA")]
    Comma,
    #[strum(to_string = "HASH")]
    Hash,
    #[strum(to_string = "LEFT PARENTHESIS")]
    LParen,
    #[strum(to_string = "RIGHT PARENTHESIS")]
    RParen,
    #[strum(to_string = "LESS")]
    Less,
    #[strum(to_string = "GREATER")]
    Greater,
    #[strum(to_string = "EQUAL")]
    Equal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Spelling in the source, kept for diagnostics
    pub text: String,
    pub pos: Pos,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Pos) -> Self {
        Token {
            kind,
            text: text.into(),
            pos,
        }
    }
}

/// Tokens of one source row. `end` is where the row's end-of-line lexeme sat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub row: usize,
    pub tokens: Vec<Token>,
    pub end: Pos,
}

impl Line {
    /// Index of the statement after an optional leading label declaration.
    pub fn head(&self) -> usize {
        match self.tokens.first() {
            Some(Token {
                kind: TokenKind::LabelDecl(..),
                ..
            }) => 1,
            _ => 0,
        }
    }

    /// Kind name and position of the token at `idx`, or of the end of line.
    pub fn found(&self, idx: usize) -> (Pos, String) {
        match self.tokens.get(idx) {
            Some(token) => (token.pos, token.kind.to_string()),
            None => (self.end, "NEW LINE".to_string()),
        }
    }
}
