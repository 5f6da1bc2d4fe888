use super::addressing;
use super::token::{Directive, Line, TokenKind};
use super::Resolver;
use crate::error::Error;
use crate::record::{Item, Record};
use arch::table;

impl Resolver {
    /// Step 9: one record per statement, plus a label marker for a leading declaration.
    pub(super) fn generate(&mut self, lines: &[Line]) -> Vec<Record> {
        let mut records = Vec::new();
        for line in lines {
            let head = line.head();
            if let TokenKind::LabelDecl(_, Some(idx)) = &line.tokens[0].kind {
                records.push(Record::new(line.tokens[0].pos, Item::Label(*idx)));
            }
            let Some(stmt) = line.tokens.get(head) else {
                continue;
            };

            let item = match &stmt.kind {
                TokenKind::Directive(Directive::Org(Some(addr))) => Item::Org(*addr),
                TokenKind::Directive(Directive::Byte(Some(bytes))) => Item::Bytes(bytes.clone()),
                TokenKind::Directive(Directive::Word(Some(words))) => Item::Words(words.clone()),
                TokenKind::Opcode(op) => {
                    let operands = &line.tokens[head + 1..];
                    let resolved = addressing::resolve(*op, stmt.pos, operands).and_then(
                        |(mode, operand)| {
                            table::encode(*op, mode)
                                .map(|opcode| (mode, opcode, operand))
                                .ok_or(Error::UnavailableAddrMode(stmt.pos, mode, *op))
                        },
                    );
                    match resolved {
                        Ok((mode, opcode, operand)) => Item::Op {
                            mnemonic: *op,
                            mode,
                            opcode,
                            operand,
                        },
                        Err(err) => {
                            self.error(err);
                            continue;
                        }
                    }
                }
                // Directives whose operands failed to collect were reported already
                _ => continue,
            };
            log::trace!("record {}: {:?}", line.row, item);
            records.push(Record::new(stmt.pos, item));
        }
        records
    }
}
