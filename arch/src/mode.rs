use strum::{Display, EnumIter};

/// Operand encoding forms of the 65C02.
/// Display gives the operand notation used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, Display)]
pub enum AddrMode {
    #[strum(to_string = "implied")]
    Implied,
    #[strum(to_string = "stack")]
    Stack,
    #[strum(to_string = "A")]
    Accumulator,
    #[strum(to_string = "#imm")]
    Immediate,
    #[strum(to_string = "zp")]
    ZeroPage,
    #[strum(to_string = "zp,X")]
    ZeroPageX,
    #[strum(to_string = "zp,Y")]
    ZeroPageY,
    #[strum(to_string = "(zp)")]
    ZeroPageIndirect,
    #[strum(to_string = "(zp,X)")]
    ZeroPageIndexedIndirect,
    #[strum(to_string = "(zp),Y")]
    ZeroPageIndirectIndexed,
    #[strum(to_string = "zp,rel")]
    ZeroPageRelative,
    #[strum(to_string = "abs")]
    Absolute,
    #[strum(to_string = "abs,X")]
    AbsoluteX,
    #[strum(to_string = "abs,Y")]
    AbsoluteY,
    #[strum(to_string = "(abs)")]
    AbsoluteIndirect,
    #[strum(to_string = "(abs,X)")]
    AbsoluteIndexedIndirect,
    #[strum(to_string = "rel")]
    Relative,
}

impl AddrMode {
    /// Number of operand bytes following the opcode.
    pub fn operand_len(&self) -> usize {
        use AddrMode::*;
        match self {
            Implied | Stack | Accumulator => 0,
            Immediate | ZeroPage | ZeroPageX | ZeroPageY | ZeroPageIndirect
            | ZeroPageIndexedIndirect | ZeroPageIndirectIndexed | Relative => 1,
            ZeroPageRelative | Absolute | AbsoluteX | AbsoluteY | AbsoluteIndirect
            | AbsoluteIndexedIndirect => 2,
        }
    }
}

#[test]
fn test() {
    assert_eq!(AddrMode::ZeroPageIndirectIndexed.to_string(), "(zp),Y");
    assert_eq!(AddrMode::Absolute.operand_len(), 2);
    assert_eq!(AddrMode::ZeroPageRelative.operand_len(), 2);
    assert_eq!(AddrMode::Stack.operand_len(), 0);
}
