use super::token::{Directive, Line, TokenKind};
use super::Resolver;
use crate::error::Error;

const WORD_MAX: u32 = 0xFFFF;

impl Resolver {
    /// Step 3: collect `.define NAME VALUE` lines, delete them,
    /// then turn every identifier into a macro value or a label call.
    pub(super) fn define_macros(&mut self, lines: &mut Vec<Line>) {
        lines.retain(|line| {
            let is_define = matches!(
                line.tokens[0].kind,
                TokenKind::Directive(Directive::Define)
            );
            if is_define {
                self.define(line);
            }
            !is_define
        });

        for line in lines.iter_mut() {
            for token in line.tokens.iter_mut() {
                let TokenKind::Ident(name) = &token.kind else {
                    continue;
                };
                token.kind = match self.macros.get(&name.to_lowercase()) {
                    Some(&value) => TokenKind::Number(value as u32),
                    None => TokenKind::LabelCall(name.clone(), None),
                };
            }
        }
    }

    fn define(&mut self, line: &Line) {
        let Some(TokenKind::Ident(name)) = line.tokens.get(1).map(|t| &t.kind) else {
            self.expected(line, 1, "An IDENTIFIER");
            return;
        };
        let key = name.to_lowercase();

        let value = match line.tokens.get(2) {
            Some(token) => match token.kind {
                TokenKind::Number(value) if value <= WORD_MAX => Some(value as u16),
                TokenKind::Number(_) => {
                    self.error(Error::ConstantOverflow(token.pos, token.text.clone(), WORD_MAX));
                    None
                }
                _ => {
                    self.expected(line, 2, "A NUMBER");
                    None
                }
            },
            None => {
                self.expected(line, 2, "A NUMBER");
                None
            }
        };
        if line.tokens.len() > 3 {
            self.expected(line, 3, "NEW LINE");
        }

        if self.macros.contains_key(&key) {
            self.error(Error::RedefinedMacro(line.tokens[1].pos, name.clone()));
            return;
        }
        log::trace!("macro: {key} = {value:?}");
        // A broken definition still claims its name
        self.macros.insert(key, value.unwrap_or(0));
    }

    /// Step 4: every number must fit in 16 bits.
    pub(super) fn check_numbers(&mut self, lines: &[Line]) {
        for token in lines.iter().flat_map(|line| &line.tokens) {
            if let TokenKind::Number(value) = token.kind {
                if value > WORD_MAX {
                    self.error(Error::ConstantOverflow(token.pos, token.text.clone(), WORD_MAX));
                }
            }
        }
    }
}
