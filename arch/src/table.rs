use crate::{mode::AddrMode, op::Mnemonic};
use bimap::BiMap;
use once_cell::sync::Lazy;

// Build the (mnemonic, mode) <-> opcode pairs
// Example: LDA { Immediate => 0xA9 } -> ((Mnemonic::LDA, AddrMode::Immediate), 0xA9)
macro_rules! table {
    ($($op:ident { $($mode:ident => $code:expr),* $(,)? })*) => {
        vec![$($(((Mnemonic::$op, AddrMode::$mode), $code as u8),)*)*]
    };
}

static OPCODES: Lazy<BiMap<(Mnemonic, AddrMode), u8>> = Lazy::new(|| {
    let entries = table! {
        ADC { Immediate => 0x69, ZeroPage => 0x65, ZeroPageX => 0x75, Absolute => 0x6D, AbsoluteX => 0x7D, AbsoluteY => 0x79,
              ZeroPageIndexedIndirect => 0x61, ZeroPageIndirectIndexed => 0x71, ZeroPageIndirect => 0x72 }
        AND { Immediate => 0x29, ZeroPage => 0x25, ZeroPageX => 0x35, Absolute => 0x2D, AbsoluteX => 0x3D, AbsoluteY => 0x39,
              ZeroPageIndexedIndirect => 0x21, ZeroPageIndirectIndexed => 0x31, ZeroPageIndirect => 0x32 }
        ASL { Accumulator => 0x0A, ZeroPage => 0x06, ZeroPageX => 0x16, Absolute => 0x0E, AbsoluteX => 0x1E }
        BBR0 { ZeroPageRelative => 0x0F }
        BBR1 { ZeroPageRelative => 0x1F }
        BBR2 { ZeroPageRelative => 0x2F }
        BBR3 { ZeroPageRelative => 0x3F }
        BBR4 { ZeroPageRelative => 0x4F }
        BBR5 { ZeroPageRelative => 0x5F }
        BBR6 { ZeroPageRelative => 0x6F }
        BBR7 { ZeroPageRelative => 0x7F }
        BBS0 { ZeroPageRelative => 0x8F }
        BBS1 { ZeroPageRelative => 0x9F }
        BBS2 { ZeroPageRelative => 0xAF }
        BBS3 { ZeroPageRelative => 0xBF }
        BBS4 { ZeroPageRelative => 0xCF }
        BBS5 { ZeroPageRelative => 0xDF }
        BBS6 { ZeroPageRelative => 0xEF }
        BBS7 { ZeroPageRelative => 0xFF }
        BCC { Relative => 0x90 }
        BCS { Relative => 0xB0 }
        BEQ { Relative => 0xF0 }
        BIT { Immediate => 0x89, ZeroPage => 0x24, ZeroPageX => 0x34, Absolute => 0x2C, AbsoluteX => 0x3C }
        BMI { Relative => 0x30 }
        BNE { Relative => 0xD0 }
        BPL { Relative => 0x10 }
        BRA { Relative => 0x80 }
        BRK { Stack => 0x00 }
        BVC { Relative => 0x50 }
        BVS { Relative => 0x70 }
        CLC { Implied => 0x18 }
        CLD { Implied => 0xD8 }
        CLI { Implied => 0x58 }
        CLV { Implied => 0xB8 }
        CMP { Immediate => 0xC9, ZeroPage => 0xC5, ZeroPageX => 0xD5, Absolute => 0xCD, AbsoluteX => 0xDD, AbsoluteY => 0xD9,
              ZeroPageIndexedIndirect => 0xC1, ZeroPageIndirectIndexed => 0xD1, ZeroPageIndirect => 0xD2 }
        CPX { Immediate => 0xE0, ZeroPage => 0xE4, Absolute => 0xEC }
        CPY { Immediate => 0xC0, ZeroPage => 0xC4, Absolute => 0xCC }
        DEC { Accumulator => 0x3A, ZeroPage => 0xC6, ZeroPageX => 0xD6, Absolute => 0xCE, AbsoluteX => 0xDE }
        DEX { Implied => 0xCA }
        DEY { Implied => 0x88 }
        EOR { Immediate => 0x49, ZeroPage => 0x45, ZeroPageX => 0x55, Absolute => 0x4D, AbsoluteX => 0x5D, AbsoluteY => 0x59,
              ZeroPageIndexedIndirect => 0x41, ZeroPageIndirectIndexed => 0x51, ZeroPageIndirect => 0x52 }
        INC { Accumulator => 0x1A, ZeroPage => 0xE6, ZeroPageX => 0xF6, Absolute => 0xEE, AbsoluteX => 0xFE }
        INX { Implied => 0xE8 }
        INY { Implied => 0xC8 }
        JMP { Absolute => 0x4C, AbsoluteIndirect => 0x6C, AbsoluteIndexedIndirect => 0x7C }
        JSR { Absolute => 0x20 }
        LDA { Immediate => 0xA9, ZeroPage => 0xA5, ZeroPageX => 0xB5, Absolute => 0xAD, AbsoluteX => 0xBD, AbsoluteY => 0xB9,
              ZeroPageIndexedIndirect => 0xA1, ZeroPageIndirectIndexed => 0xB1, ZeroPageIndirect => 0xB2 }
        LDX { Immediate => 0xA2, ZeroPage => 0xA6, ZeroPageY => 0xB6, Absolute => 0xAE, AbsoluteY => 0xBE }
        LDY { Immediate => 0xA0, ZeroPage => 0xA4, ZeroPageX => 0xB4, Absolute => 0xAC, AbsoluteX => 0xBC }
        LSR { Accumulator => 0x4A, ZeroPage => 0x46, ZeroPageX => 0x56, Absolute => 0x4E, AbsoluteX => 0x5E }
        NOP { Implied => 0xEA }
        ORA { Immediate => 0x09, ZeroPage => 0x05, ZeroPageX => 0x15, Absolute => 0x0D, AbsoluteX => 0x1D, AbsoluteY => 0x19,
              ZeroPageIndexedIndirect => 0x01, ZeroPageIndirectIndexed => 0x11, ZeroPageIndirect => 0x12 }
        PHA { Stack => 0x48 }
        PHP { Stack => 0x08 }
        PHX { Stack => 0xDA }
        PHY { Stack => 0x5A }
        PLA { Stack => 0x68 }
        PLP { Stack => 0x28 }
        PLX { Stack => 0xFA }
        PLY { Stack => 0x7A }
        RMB0 { ZeroPage => 0x07 }
        RMB1 { ZeroPage => 0x17 }
        RMB2 { ZeroPage => 0x27 }
        RMB3 { ZeroPage => 0x37 }
        RMB4 { ZeroPage => 0x47 }
        RMB5 { ZeroPage => 0x57 }
        RMB6 { ZeroPage => 0x67 }
        RMB7 { ZeroPage => 0x77 }
        ROL { Accumulator => 0x2A, ZeroPage => 0x26, ZeroPageX => 0x36, Absolute => 0x2E, AbsoluteX => 0x3E }
        ROR { Accumulator => 0x6A, ZeroPage => 0x66, ZeroPageX => 0x76, Absolute => 0x6E, AbsoluteX => 0x7E }
        RTI { Stack => 0x40 }
        RTS { Stack => 0x60 }
        SBC { Immediate => 0xE9, ZeroPage => 0xE5, ZeroPageX => 0xF5, Absolute => 0xED, AbsoluteX => 0xFD, AbsoluteY => 0xF9,
              ZeroPageIndexedIndirect => 0xE1, ZeroPageIndirectIndexed => 0xF1, ZeroPageIndirect => 0xF2 }
        SEC { Implied => 0x38 }
        SED { Implied => 0xF8 }
        SEI { Implied => 0x78 }
        SMB0 { ZeroPage => 0x87 }
        SMB1 { ZeroPage => 0x97 }
        SMB2 { ZeroPage => 0xA7 }
        SMB3 { ZeroPage => 0xB7 }
        SMB4 { ZeroPage => 0xC7 }
        SMB5 { ZeroPage => 0xD7 }
        SMB6 { ZeroPage => 0xE7 }
        SMB7 { ZeroPage => 0xF7 }
        STA { ZeroPage => 0x85, ZeroPageX => 0x95, Absolute => 0x8D, AbsoluteX => 0x9D, AbsoluteY => 0x99,
              ZeroPageIndexedIndirect => 0x81, ZeroPageIndirectIndexed => 0x91, ZeroPageIndirect => 0x92 }
        STP { Implied => 0xDB }
        STX { ZeroPage => 0x86, ZeroPageY => 0x96, Absolute => 0x8E }
        STY { ZeroPage => 0x84, ZeroPageX => 0x94, Absolute => 0x8C }
        STZ { ZeroPage => 0x64, ZeroPageX => 0x74, Absolute => 0x9C, AbsoluteX => 0x9E }
        TAX { Implied => 0xAA }
        TAY { Implied => 0xA8 }
        TRB { ZeroPage => 0x14, Absolute => 0x1C }
        TSB { ZeroPage => 0x04, Absolute => 0x0C }
        TSX { Implied => 0xBA }
        TXA { Implied => 0x8A }
        TXS { Implied => 0x9A }
        TYA { Implied => 0x98 }
        WAI { Implied => 0xCB }
    };

    let mut map = BiMap::new();
    for (key, code) in entries {
        map.insert_no_overwrite(key, code)
            .unwrap_or_else(|_| panic!("Duplicated opcode entry: {:?} = 0x{:02X}", key, code));
    }
    map
});

/// Opcode byte for `op` in `mode`, if the 65C02 has that combination.
pub fn encode(op: Mnemonic, mode: AddrMode) -> Option<u8> {
    OPCODES.get_by_left(&(op, mode)).copied()
}

/// Reverse lookup used by listings.
pub fn decode(code: u8) -> Option<(Mnemonic, AddrMode)> {
    OPCODES.get_by_right(&code).copied()
}

/// Every addressing mode `op` accepts, in declaration order of [`AddrMode`].
pub fn modes(op: Mnemonic) -> Vec<AddrMode> {
    use strum::IntoEnumIterator;
    AddrMode::iter()
        .filter(|mode| encode(op, *mode).is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn every_mnemonic_has_a_mode() {
        for op in Mnemonic::iter() {
            assert!(!modes(op).is_empty(), "{op} has no addressing mode");
        }
    }

    #[test]
    fn table_size() {
        // 212 documented opcodes of the WDC 65C02
        assert_eq!(OPCODES.len(), 212);
    }

    #[test]
    fn encode_decode() {
        assert_eq!(encode(Mnemonic::LDA, AddrMode::Immediate), Some(0xA9));
        assert_eq!(encode(Mnemonic::STA, AddrMode::Immediate), None);
        assert_eq!(encode(Mnemonic::JMP, AddrMode::AbsoluteIndexedIndirect), Some(0x7C));
        assert_eq!(decode(0xEA), Some((Mnemonic::NOP, AddrMode::Implied)));
        assert_eq!(decode(0xFF), Some((Mnemonic::BBS7, AddrMode::ZeroPageRelative)));
        assert_eq!(decode(0x02), None);
        for code in 0..=0xFFu8 {
            if let Some((op, mode)) = decode(code) {
                assert_eq!(encode(op, mode), Some(code));
            }
        }
    }
}
