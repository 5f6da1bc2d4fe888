use super::token::{Directive, Line, Token, TokenKind};
use super::Resolver;
use crate::error::Error;

impl Resolver {
    /// Step 5: `* = NUMBER`
    pub(super) fn collect_org(&mut self, lines: &mut [Line]) {
        for line in lines.iter_mut() {
            let head = line.head();
            if !matches!(
                line.tokens.get(head).map(|t| &t.kind),
                Some(TokenKind::Directive(Directive::Org(None)))
            ) {
                continue;
            }

            if !matches!(line.tokens.get(head + 1).map(|t| &t.kind), Some(TokenKind::Equal)) {
                self.expected(line, head + 1, "An EQUAL SIGN");
                continue;
            }
            let addr = match line.tokens.get(head + 2).map(|t| &t.kind) {
                Some(&TokenKind::Number(value)) => u16::try_from(value).ok(),
                _ => {
                    self.expected(line, head + 2, "A NUMBER");
                    continue;
                }
            };
            if line.tokens.len() > head + 3 {
                self.expected(line, head + 3, "NEW LINE");
            }

            // Out of range numbers were reported by the range check
            let Some(addr) = addr else {
                continue;
            };
            line.tokens.truncate(head + 1);
            line.tokens[head].kind = TokenKind::Directive(Directive::Org(Some(addr)));
        }
    }

    /// Step 6: `.byte v, ...` / `.word v, ...`
    pub(super) fn collect_data(&mut self, lines: &mut [Line]) {
        for line in lines.iter_mut() {
            let head = line.head();
            let max = match line.tokens.get(head).map(|t| &t.kind) {
                Some(TokenKind::Directive(Directive::Byte(None))) => 0xFF,
                Some(TokenKind::Directive(Directive::Word(None))) => 0xFFFF,
                _ => continue,
            };

            let Some(values) = self.data_list(line, head + 1, max) else {
                continue;
            };
            line.tokens.truncate(head + 1);
            line.tokens[head].kind = if max == 0xFF {
                TokenKind::Directive(Directive::Byte(Some(
                    values.into_iter().map(|v| v as u8).collect(),
                )))
            } else {
                TokenKind::Directive(Directive::Word(Some(
                    values.into_iter().map(|v| v as u16).collect(),
                )))
            };
        }
    }

    /// Comma separated NUMBER / STRING list starting at `start`, each value at most `max`.
    fn data_list(&mut self, line: &Line, start: usize, max: u32) -> Option<Vec<u32>> {
        let mut values = Vec::new();
        let mut ok = true;
        let mut idx = start;
        loop {
            match line.tokens.get(idx) {
                Some(Token {
                    kind: TokenKind::Number(value),
                    text,
                    pos,
                }) => {
                    // Beyond 16 bits is already reported
                    if *value > max && *value <= 0xFFFF {
                        self.error(Error::ConstantOverflow(*pos, text.clone(), max));
                    }
                    ok &= *value <= max;
                    values.push(*value);
                }
                Some(Token {
                    kind: TokenKind::Str(s),
                    pos,
                    ..
                }) => {
                    for ch in s.chars() {
                        if ch as u32 > max {
                            self.error(Error::ConstantOverflow(*pos, ch.to_string(), max));
                            ok = false;
                        }
                        values.push(ch as u32);
                    }
                }
                _ => {
                    self.expected(line, idx, "A NUMBER or STRING");
                    return None;
                }
            }

            match line.tokens.get(idx + 1).map(|t| &t.kind) {
                None => break,
                Some(TokenKind::Comma) => idx += 2,
                Some(_) => {
                    self.expected(line, idx + 1, "A COMMA or NEW LINE");
                    return None;
                }
            }
        }
        ok.then_some(values)
    }
}
