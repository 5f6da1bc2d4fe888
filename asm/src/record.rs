use crate::error::Pos;
use arch::{AddrMode, Mnemonic};

/// Which byte of a label address an immediate operand takes (`#<label`, `#>label`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    Low,
    High,
}

impl Half {
    pub fn of(&self, word: u16) -> u8 {
        match self {
            Half::Low => (word & 0xFF) as u8,
            Half::High => (word >> 8) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    None,
    Byte(u8),
    Word(u16),
    /// Absolute address of a label
    Label(usize),
    LabelHalf(usize, Half),
    /// Relative displacement to a label
    Branch(usize),
    /// BBRn/BBSn: zero page byte, then a relative displacement
    BitBranch(u8, usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Item {
    Label(usize),
    Org(u16),
    Bytes(Vec<u8>),
    Words(Vec<u16>),
    Op {
        mnemonic: Mnemonic,
        mode: AddrMode,
        opcode: u8,
        operand: Operand,
    },
}

/// Resolver output, consumed in order by the linker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Position of the statement that produced this record
    pub pos: Pos,
    pub item: Item,
}

impl Record {
    pub fn new(pos: Pos, item: Item) -> Self {
        Record { pos, item }
    }

    /// Number of bytes this record emits.
    pub fn size(&self) -> usize {
        match &self.item {
            Item::Label(_) | Item::Org(_) => 0,
            Item::Bytes(bytes) => bytes.len(),
            Item::Words(words) => words.len() * 2,
            Item::Op { mode, .. } => 1 + mode.operand_len(),
        }
    }
}
