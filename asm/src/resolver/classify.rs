use super::token::{Directive, Line, Token, TokenKind};
use super::Resolver;
use crate::config::parse_literal;
use crate::error::{Error, Pos};
use crate::token::{LexKind, Lexeme};
use arch::{Mnemonic, Reg};

/// Step 1: one line per row, comments and end-of-line lexemes dropped.
pub(super) fn group(lexemes: Vec<Lexeme>) -> Vec<Vec<Lexeme>> {
    let mut lines: Vec<Vec<Lexeme>> = Vec::new();
    for lexeme in lexemes {
        if lexeme.kind == LexKind::Comment {
            continue;
        }
        match lines.last_mut() {
            Some(line) if line[0].pos.row == lexeme.pos.row => line.push(lexeme),
            _ => lines.push(vec![lexeme]),
        }
    }
    lines
}

impl Resolver {
    /// Step 2: lexemes to tokens.
    pub(super) fn classify(&mut self, lines: Vec<Vec<Lexeme>>) -> Vec<Line> {
        let mut out = Vec::new();
        for lexemes in lines {
            let row = lexemes[0].pos.row;
            let mut end = Pos::new(row, 1);
            let mut tokens = Vec::new();
            for lexeme in lexemes {
                if lexeme.kind == LexKind::Eol {
                    end = lexeme.pos;
                    continue;
                }
                match self.classify_one(&lexeme) {
                    Some(kind) => tokens.push(Token::new(kind, lexeme.text, lexeme.pos)),
                    // The rest of the line can't be interpreted
                    None => break,
                }
            }
            if !tokens.is_empty() {
                out.push(Line { row, tokens, end });
            }
        }
        out
    }

    fn classify_one(&mut self, lexeme: &Lexeme) -> Option<TokenKind> {
        let text = lexeme.text.as_str();
        let kind = match lexeme.kind {
            LexKind::Hex | LexKind::Bin | LexKind::Oct | LexKind::Dec => {
                // Too long for u32 is still out of range
                TokenKind::Number(parse_literal(text).unwrap_or(u32::MAX))
            }
            LexKind::Identifier => {
                if let Ok(op) = Mnemonic::parse(text) {
                    TokenKind::Opcode(op)
                } else if let Ok(reg) = Reg::parse(text) {
                    TokenKind::Register(reg)
                } else {
                    TokenKind::Ident(text.to_string())
                }
            }
            LexKind::Directive => match text.to_ascii_lowercase().as_str() {
                "byte" => TokenKind::Directive(Directive::Byte(None)),
                "word" => TokenKind::Directive(Directive::Word(None)),
                "define" => TokenKind::Directive(Directive::Define),
                _ => {
                    self.error(Error::UnknownDirective(lexeme.pos, format!(".{text}")));
                    return None;
                }
            },
            LexKind::Star => TokenKind::Directive(Directive::Org(None)),
            LexKind::Str => TokenKind::Str(text.to_string()),
            LexKind::LabelDecl => TokenKind::LabelDecl(text.to_string(), None),
            LexKind::Comma => TokenKind::Comma,
            LexKind::Hash => TokenKind::Hash,
            LexKind::LParen => TokenKind::LParen,
            LexKind::RParen => TokenKind::RParen,
            LexKind::Less => TokenKind::Less,
            LexKind::Greater => TokenKind::Greater,
            LexKind::Equal => TokenKind::Equal,
            LexKind::Unexpected => {
                self.error(Error::UnexpectedToken(lexeme.pos, text.to_string()));
                return None;
            }
            LexKind::Comment | LexKind::Eol => return None,
        };
        Some(kind)
    }
}
