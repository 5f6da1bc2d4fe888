use crate::config::Config;
use crate::error::{self, Error, Pos};
use crate::record::{Half, Item, Operand, Record};
use indexmap::IndexMap;

/// Bytes emitted for one source row, used by the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub row: usize,
    pub addr: u16,
    pub len: usize,
    /// Starts with an opcode byte
    pub code: bool,
}

/// Assembled memory image from `origin` up to the highest written byte.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub origin: u16,
    pub bytes: Vec<u8>,
    pub spans: Vec<Span>,
}

impl Image {
    /// Byte at `addr`, if it lies inside the image.
    pub fn get(&self, addr: u16) -> Option<u8> {
        let offset = addr.checked_sub(self.origin)?;
        self.bytes.get(offset as usize).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatchKind {
    Word,
    Half(Half),
    Relative,
}

#[derive(Debug, Clone, Copy)]
struct Patch {
    addr: u16,
    label: usize,
    kind: PatchKind,
    pos: Pos,
}

pub struct Linker {
    origin: u16,
    names: Vec<String>,
}

impl Linker {
    pub fn new(config: &Config) -> Self {
        Linker {
            origin: config.origin,
            names: Vec::new(),
        }
    }

    /// Label names by index, used in diagnostics.
    pub fn with_labels(mut self, names: Vec<String>) -> Self {
        self.names = names;
        self
    }

    pub fn link(&self, records: &[Record]) -> Result<Image, Vec<Error>> {
        let mut emitter = Emitter::new(self.origin);
        for record in records {
            emitter.record(record);
        }
        log::debug!(
            "linker: pass 1 wrote {} bytes, {} labels, {} patches",
            emitter.bytes.len(),
            emitter.labels.len(),
            emitter.patches.len()
        );

        let mut errors = std::mem::take(&mut emitter.errors);
        errors.extend(emitter.patch(&self.names));
        if !errors.is_empty() {
            return Err(error::sorted(errors));
        }
        Ok(Image {
            origin: self.origin,
            bytes: emitter.bytes,
            spans: emitter.spans,
        })
    }
}

struct Emitter {
    origin: u16,
    /// One past $FFFF once output runs off the end of memory
    cursor: u32,
    bytes: Vec<u8>,
    labels: IndexMap<usize, u16>,
    patches: Vec<Patch>,
    spans: Vec<Span>,
    errors: Vec<Error>,
}

// ----------------------------------------------------------------------------
// Pass 1
// ----------------------------------------------------------------------------

impl Emitter {
    fn new(origin: u16) -> Self {
        Emitter {
            origin,
            cursor: origin as u32,
            bytes: Vec::new(),
            labels: IndexMap::new(),
            patches: Vec::new(),
            spans: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn record(&mut self, record: &Record) {
        let len = record.size();
        let label = matches!(record.item, Item::Label(_));
        if self.cursor + len as u32 > 0x10000 || (label && self.cursor > 0xFFFF) {
            self.errors.push(Error::AddressOverflow(record.pos));
            return;
        }
        let start = self.cursor as u16;
        match &record.item {
            Item::Label(idx) => {
                self.labels.insert(*idx, start);
            }
            Item::Org(addr) => self.cursor = *addr as u32,
            Item::Bytes(bytes) => bytes.iter().for_each(|b| self.byte(*b)),
            Item::Words(words) => words.iter().for_each(|w| self.word(*w)),
            Item::Op {
                opcode, operand, ..
            } => {
                self.byte(*opcode);
                self.operand(*operand, record.pos);
            }
        }
        if len > 0 {
            self.spans.push(Span {
                row: record.pos.row,
                addr: start,
                len,
                code: matches!(record.item, Item::Op { .. }),
            });
        }
    }

    fn operand(&mut self, operand: Operand, pos: Pos) {
        match operand {
            Operand::None => {}
            Operand::Byte(b) => self.byte(b),
            Operand::Word(w) => self.word(w),
            Operand::Label(label) => {
                self.defer(label, PatchKind::Word, pos);
                self.word(0xFFFF);
            }
            Operand::LabelHalf(label, half) => {
                self.defer(label, PatchKind::Half(half), pos);
                self.byte(0xFF);
            }
            Operand::Branch(label) => {
                self.defer(label, PatchKind::Relative, pos);
                self.byte(0x00);
            }
            Operand::BitBranch(zp, label) => {
                self.byte(zp);
                self.defer(label, PatchKind::Relative, pos);
                self.byte(0xFF);
            }
        }
    }

    /// Patch the bytes about to be written at the cursor.
    fn defer(&mut self, label: usize, kind: PatchKind, pos: Pos) {
        self.patches.push(Patch {
            addr: self.cursor as u16,
            label,
            kind,
            pos,
        });
    }

    fn byte(&mut self, b: u8) {
        self.put(self.cursor as u16, b);
        self.cursor += 1;
    }

    fn word(&mut self, w: u16) {
        let [lo, hi] = w.to_le_bytes();
        self.byte(lo);
        self.byte(hi);
    }

    /// Addresses below the origin have no place in the image.
    fn put(&mut self, addr: u16, b: u8) {
        let Some(offset) = addr.checked_sub(self.origin) else {
            log::trace!("linker: dropped write below origin at ${addr:04X}");
            return;
        };
        let offset = offset as usize;
        if self.bytes.len() <= offset {
            self.bytes.resize(offset + 1, 0);
        }
        self.bytes[offset] = b;
    }
}

// ----------------------------------------------------------------------------
// Pass 2
// ----------------------------------------------------------------------------

impl Emitter {
    fn patch(&mut self, names: &[String]) -> Vec<Error> {
        let mut errors = Vec::new();
        for patch in std::mem::take(&mut self.patches) {
            let Some(&target) = self.labels.get(&patch.label) else {
                errors.push(Error::UnresolvedLabel(patch.label));
                continue;
            };
            match patch.kind {
                PatchKind::Word => {
                    let [lo, hi] = target.to_le_bytes();
                    self.put(patch.addr, lo);
                    self.put(patch.addr.wrapping_add(1), hi);
                }
                PatchKind::Half(half) => self.put(patch.addr, half.of(target)),
                PatchKind::Relative => {
                    let disp = target as i32 - (patch.addr as i32 + 1);
                    match i8::try_from(disp) {
                        Ok(d) => self.put(patch.addr, d as u8),
                        Err(_) => {
                            let name = names
                                .get(patch.label)
                                .cloned()
                                .unwrap_or_else(|| format!("#{}", patch.label));
                            errors.push(Error::BranchOutOfRange(patch.pos, name, disp));
                        }
                    }
                }
            }
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch::{table, AddrMode, Mnemonic};

    fn op(row: usize, mnemonic: Mnemonic, mode: AddrMode, operand: Operand) -> Record {
        let opcode = table::encode(mnemonic, mode).unwrap();
        Record::new(
            Pos::new(row, 1),
            Item::Op {
                mnemonic,
                mode,
                opcode,
                operand,
            },
        )
    }

    fn at(row: usize, item: Item) -> Record {
        Record::new(Pos::new(row, 1), item)
    }

    fn link(records: &[Record]) -> Result<Image, Vec<Error>> {
        Linker::new(&Config::default()).link(records)
    }

    #[test]
    fn forward_and_backward_references() {
        use AddrMode::*;
        use Mnemonic::*;
        let records = vec![
            at(1, Item::Label(0)),
            op(1, LDA, Immediate, Operand::LabelHalf(1, Half::High)),
            op(2, JMP, Absolute, Operand::Label(1)),
            op(3, BNE, Relative, Operand::Branch(0)),
            at(4, Item::Label(1)),
            op(4, NOP, Implied, Operand::None),
        ];
        let image = link(&records).unwrap();
        assert_eq!(
            image.bytes,
            vec![0xA9, 0x06, 0x4C, 0x07, 0x06, 0xD0, 0xF9, 0xEA]
        );
        assert_eq!(image.spans.len(), 4);
        assert_eq!(
            image.spans[2],
            Span {
                row: 3,
                addr: 0x0605,
                len: 2,
                code: true
            }
        );
    }

    #[test]
    fn bit_branch() {
        let records = vec![
            at(1, Item::Label(0)),
            op(1, Mnemonic::BBS7, AddrMode::ZeroPageRelative, Operand::BitBranch(0x12, 0)),
        ];
        let image = link(&records).unwrap();
        assert_eq!(image.bytes, vec![0xFF, 0x12, 0xFD]);
    }

    #[test]
    fn org_and_origin() {
        let records = vec![
            at(1, Item::Org(0x0600)),
            at(2, Item::Bytes(vec![1, 2, 3, 4])),
            at(3, Item::Org(0x0601)),
            at(4, Item::Words(vec![0xBEEF])),
            // below the origin: dropped
            at(5, Item::Org(0x05FF)),
            at(6, Item::Bytes(vec![0xAA, 0xBB])),
            at(7, Item::Org(0x0608)),
            at(8, Item::Bytes(vec![0x55])),
        ];
        let image = link(&records).unwrap();
        assert_eq!(image.bytes, vec![0xBB, 0xEF, 0xBE, 4, 0, 0, 0, 0, 0x55]);
        assert_eq!(image.get(0x0608), Some(0x55));
        assert_eq!(image.get(0x0500), None);
    }

    #[test]
    fn branch_out_of_range() {
        let records = vec![
            op(1, Mnemonic::BEQ, AddrMode::Relative, Operand::Branch(0)),
            at(2, Item::Bytes(vec![0; 128])),
            at(3, Item::Label(0)),
            op(3, Mnemonic::NOP, AddrMode::Implied, Operand::None),
        ];
        let errors = Linker::new(&Config::default())
            .with_labels(vec!["far".to_string()])
            .link(&records)
            .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], Error::BranchOutOfRange(pos, name, 128) if pos.row == 1 && name == "far"));

        // exactly 127 bytes ahead is fine
        let records = vec![
            op(1, Mnemonic::BEQ, AddrMode::Relative, Operand::Branch(0)),
            at(2, Item::Bytes(vec![0; 127])),
            at(3, Item::Label(0)),
        ];
        assert_eq!(link(&records).unwrap().bytes[1], 0x7F);
    }

    #[test]
    fn missing_label_is_internal() {
        let records = vec![op(1, Mnemonic::JMP, AddrMode::Absolute, Operand::Label(5))];
        let errors = link(&records).unwrap_err();
        assert!(matches!(errors[0], Error::UnresolvedLabel(5)));
        assert_eq!(errors[0].category(), error::Category::Internal);
    }

    #[test]
    fn address_overflow() {
        use AddrMode::*;
        use Mnemonic::*;
        // last byte lands on $FFFF
        let records = vec![
            at(1, Item::Org(0xFFFD)),
            op(2, JMP, Absolute, Operand::Word(0x1234)),
        ];
        let image = link(&records).unwrap();
        assert_eq!(image.get(0xFFFF), Some(0x12));

        let records = vec![
            at(1, Item::Org(0xFFFE)),
            op(2, JMP, Absolute, Operand::Word(0x1234)),
            at(3, Item::Org(0xFFFF)),
            at(4, Item::Bytes(vec![0xAA])),
            at(5, Item::Label(0)),
            at(6, Item::Words(vec![0xBEEF])),
            at(7, Item::Org(0x0600)),
            op(8, NOP, Implied, Operand::None),
        ];
        let errors = link(&records).unwrap_err();
        let rows: Vec<_> = errors.iter().filter_map(|e| e.pos()).map(|p| p.row).collect();
        assert_eq!(rows, vec![2, 5, 6]);
        assert!(errors.iter().all(|e| matches!(e, Error::AddressOverflow(_))));
        assert_eq!(errors[0].category(), error::Category::Semantic);
    }
}
