use super::token::{Directive, Line, TokenKind};
use super::Resolver;
use crate::error::Error;
use arch::{Mnemonic, Reg};

impl Resolver {
    /// Step 7: number label declarations in order, then bind every call to its index.
    pub(super) fn resolve_labels(&mut self, lines: &mut [Line]) {
        for line in lines.iter_mut() {
            let token = &mut line.tokens[0];
            let TokenKind::LabelDecl(name, index) = &mut token.kind else {
                continue;
            };
            // Registers and mnemonics never classify as label calls
            if Reg::parse(name).is_ok() || Mnemonic::parse(name).is_ok() {
                let err = Error::ReservedLabel(token.pos, name.clone());
                self.error(err);
                continue;
            }
            let key = name.to_lowercase();
            match self.labels.get(&key) {
                Some(&first) => {
                    let err = Error::RedefinedLabel(token.pos, name.clone(), first);
                    self.error(err);
                }
                None => {
                    *index = Some(self.labels.len());
                    self.labels.insert(key, line.row);
                }
            }
        }

        for token in lines.iter_mut().flat_map(|line| line.tokens.iter_mut()) {
            let TokenKind::LabelCall(name, index) = &mut token.kind else {
                continue;
            };
            match self.labels.get_index_of(&name.to_lowercase()) {
                Some(idx) => *index = Some(idx),
                None => {
                    let err = Error::UndefinedLabel(token.pos, name.clone());
                    self.error(err);
                }
            }
        }
    }

    /// Step 8: a line starts with a label declaration, a directive or an opcode.
    /// After a label declaration only an opcode or a directive may follow.
    pub(super) fn check_heads(&mut self, lines: &[Line]) {
        for line in lines {
            let first = &line.tokens[0];
            match &first.kind {
                TokenKind::LabelDecl(..) => match line.tokens.get(1).map(|t| &t.kind) {
                    None | Some(TokenKind::Opcode(_)) => {}
                    Some(TokenKind::Directive(dir)) if *dir != Directive::Define => {}
                    Some(_) => self.expected(line, 1, "An OPCODE or DIRECTIVE"),
                },
                TokenKind::Directive(_) | TokenKind::Opcode(_) => {}
                kind => {
                    let err = Error::InvalidLineStart(first.pos, kind.to_string());
                    self.error(err);
                }
            }
        }
    }
}
