use crate::error::{Error, Pos};
use crate::source::Source;
use crate::token::{LexKind, Lexeme};
use std::iter::Peekable;
use std::str::CharIndices;

pub struct Lexer<'a> {
    source: &'a Source,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a Source) -> Self {
        Self { source }
    }

    /// Scan every line. All lines are scanned even after an error,
    /// so the error list covers the whole file.
    pub fn tokenize(self) -> Result<Vec<Lexeme>, Vec<Error>> {
        let mut lexemes = Vec::new();
        let mut errors = Vec::new();
        for (row, line) in self.source.lines() {
            for lexeme in LineLexer::new(row, line).parse() {
                if lexeme.kind == LexKind::Unexpected {
                    errors.push(Error::UnexpectedToken(lexeme.pos, lexeme.text.clone()));
                }
                lexemes.push(lexeme);
            }
        }
        log::debug!(
            "lexer: {} lexemes, {} errors in `{}`",
            lexemes.len(),
            errors.len(),
            self.source.name()
        );
        if errors.is_empty() {
            Ok(lexemes)
        } else {
            Err(errors)
        }
    }
}

pub struct LineLexer<'a> {
    line: &'a str,
    iter: Peekable<CharIndices<'a>>,
    row: usize,
}

impl<'a> LineLexer<'a> {
    pub fn new(row: usize, line: &'a str) -> Self {
        Self {
            line,
            iter: line.char_indices().peekable(),
            row,
        }
    }
}

// ----------------------------------------------------------------------------
// Helpers
// ----------------------------------------------------------------------------

fn is_ident_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

impl<'a> LineLexer<'a> {
    fn peek_nth(&self, n: usize) -> Option<(usize, char)> {
        self.iter.clone().nth(n)
    }

    fn consume(&mut self) -> Option<(usize, char)> {
        self.iter.next()
    }

    /// Byte offset of the cursor.
    fn offset(&self) -> usize {
        self.peek_nth(0).map(|(idx, _)| idx).unwrap_or(self.line.len())
    }

    fn pos(&self, idx: usize) -> Pos {
        Pos::new(self.row, self.line[..idx].chars().count() + 1)
    }

    fn consume_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let line: &'a str = self.line;
        let start = self.offset();
        while self.iter.next_if(|&(_, ch)| f(ch)).is_some() {}
        &line[start..self.offset()]
    }

    /// The character after a lexeme must be whitespace, end of line, `;` or one of `extra`.
    fn terminated(&self, extra: &[char]) -> bool {
        match self.peek_nth(0) {
            None => true,
            Some((_, ch)) => ch.is_whitespace() || ch == ';' || extra.contains(&ch),
        }
    }
}

// ----------------------------------------------------------------------------
// Scanner
// ----------------------------------------------------------------------------

impl<'a> LineLexer<'a> {
    pub fn parse(mut self) -> Vec<Lexeme> {
        let mut lexemes = Vec::new();
        loop {
            let Some((idx, ch)) = self.peek_nth(0) else {
                lexemes.push(Lexeme::new(LexKind::Eol, "", self.pos(self.line.len())));
                break;
            };

            if ch.is_whitespace() {
                self.consume();
                continue;
            }

            let pos = self.pos(idx);

            if let Some(kind) = LexKind::atom(ch) {
                self.consume();
                lexemes.push(Lexeme::new(kind, ch, pos));
                continue;
            }

            let snapshot = self.iter.clone();
            let scanned = match ch {
                'a'..='z' | 'A'..='Z' | '_' => self.identifier(),
                '0'..='9' => self.number(),
                ';' => Some(self.comment()),
                '.' => self.directive(),
                '"' => self.string(),
                '$' => self.prefixed(LexKind::Hex, |c| c.is_ascii_hexdigit()),
                '%' => self.prefixed(LexKind::Bin, |c| c == '0' || c == '1'),
                _ => None,
            };

            match scanned {
                Some((kind, text)) => lexemes.push(Lexeme::new(kind, text, pos)),
                None => {
                    // Re-scan the whole lexeme as garbage
                    self.iter = snapshot;
                    let text = self.consume_while(|c| !c.is_whitespace());
                    lexemes.push(Lexeme::new(LexKind::Unexpected, text, pos));
                }
            }
        }
        lexemes
    }

    // label:  or  ident
    fn identifier(&mut self) -> Option<(LexKind, String)> {
        let name = self.consume_while(is_ident_char);
        if name.chars().all(|c| c == '_') {
            return None;
        }
        if let Some((_, ':')) = self.peek_nth(0) {
            self.consume();
            return self
                .terminated(&[])
                .then(|| (LexKind::LabelDecl, name.to_string()));
        }
        self.terminated(&[',', ')'])
            .then(|| (LexKind::Identifier, name.to_string()))
    }

    // 017 (octal) or 123 (decimal)
    fn number(&mut self) -> Option<(LexKind, String)> {
        let kind = match self.peek_nth(0) {
            Some((_, '0')) => LexKind::Oct,
            _ => LexKind::Dec,
        };
        let text = match kind {
            LexKind::Oct => self.consume_while(|c| ('0'..='7').contains(&c)),
            _ => self.consume_while(|c| c.is_ascii_digit()),
        };
        self.terminated(&[',', ')'])
            .then(|| (kind, text.to_string()))
    }

    // $FF, %1010
    fn prefixed(&mut self, kind: LexKind, digit: fn(char) -> bool) -> Option<(LexKind, String)> {
        let start = self.offset();
        self.consume();
        let digits = self.consume_while(digit);
        if digits.is_empty() || !self.terminated(&[',', ')']) {
            return None;
        }
        Some((kind, self.line[start..self.offset()].to_string()))
    }

    // ; comment
    fn comment(&mut self) -> (LexKind, String) {
        self.consume();
        let text = self.consume_while(|_| true);
        (LexKind::Comment, text.to_string())
    }

    // .byte
    fn directive(&mut self) -> Option<(LexKind, String)> {
        self.consume();
        let name = self.consume_while(is_ident_char);
        if name.chars().all(|c| c == '_') || !self.terminated(&[]) {
            return None;
        }
        Some((LexKind::Directive, name.to_string()))
    }

    // "text"
    fn string(&mut self) -> Option<(LexKind, String)> {
        self.consume();
        let text = self.consume_while(|c| c != '"');
        self.consume().filter(|&(_, c)| c == '"')?;
        if text.chars().all(|c| c == ' ' || c == '_') || !self.terminated(&[',']) {
            return None;
        }
        Some((LexKind::Str, text.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(line: &str) -> Vec<LexKind> {
        LineLexer::new(1, line).parse().into_iter().map(|l| l.kind).collect()
    }

    #[test]
    fn test() {
        use LexKind::*;
        assert_eq!(
            kinds("loop: LDA ($10),Y ; load"),
            vec![LabelDecl, Identifier, LParen, Hex, RParen, Comma, Identifier, Comment, Eol]
        );
        assert_eq!(kinds("* = $0600"), vec![Star, Equal, Hex, Eol]);
        assert_eq!(kinds(".byte \"AB\",%01,017,9"), vec![Directive, Str, Comma, Bin, Comma, Oct, Comma, Dec, Eol]);
        assert_eq!(kinds("$FFX"), vec![Unexpected, Eol]);
        assert_eq!(kinds("019"), vec![Unexpected, Eol]);
        assert_eq!(kinds("017 8"), vec![Oct, Dec, Eol]);
        assert_eq!(kinds("___"), vec![Unexpected, Eol]);
        assert_eq!(kinds("\"open"), vec![Unexpected, Eol]);
        assert_eq!(kinds("@ NOP"), vec![Unexpected, Identifier, Eol]);
    }

    #[test]
    fn positions() {
        let lexemes = LineLexer::new(7, "  JMP  loop").parse();
        assert_eq!(lexemes[0].pos, Pos::new(7, 3));
        assert_eq!(lexemes[1].pos, Pos::new(7, 8));
        assert_eq!(lexemes[1].text, "loop");
        assert_eq!(lexemes[2].pos, Pos::new(7, 12));
    }
}
