use crate::{mode::AddrMode, op::Mnemonic, table};
use color_print::cformat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inst {
    pub op: Mnemonic,
    pub mode: AddrMode,
}

impl Inst {
    pub fn decode(code: u8) -> Option<Inst> {
        table::decode(code).map(|(op, mode)| Inst { op, mode })
    }
}

impl Inst {
    /// Colored disassembly of one instruction.
    /// `pc` is the address of the opcode byte, `operand` the bytes that follow it.
    pub fn cformat(&self, pc: u16, operand: &[u8]) -> String {
        let byte = |i: usize| operand.get(i).copied().unwrap_or(0);
        let word = || u16::from_le_bytes([byte(0), byte(1)]);
        let branch = |disp: u8, next: u16| next.wrapping_add(disp as i8 as u16);

        use AddrMode::*;
        let arg = match self.mode {
            Implied | Stack => String::new(),
            Accumulator => cformat!("<b>A</>"),
            Immediate => cformat!("<y>#${:02X}</>", byte(0)),
            ZeroPage => cformat!("<y>${:02X}</>", byte(0)),
            ZeroPageX => cformat!("<y>${:02X}</>,<b>X</>", byte(0)),
            ZeroPageY => cformat!("<y>${:02X}</>,<b>Y</>", byte(0)),
            ZeroPageIndirect => cformat!("(<y>${:02X}</>)", byte(0)),
            ZeroPageIndexedIndirect => cformat!("(<y>${:02X}</>,<b>X</>)", byte(0)),
            ZeroPageIndirectIndexed => cformat!("(<y>${:02X}</>),<b>Y</>", byte(0)),
            ZeroPageRelative => cformat!(
                "<y>${:02X}</>,<g>${:04X}</>",
                byte(0),
                branch(byte(1), pc.wrapping_add(3))
            ),
            Absolute => cformat!("<y>${:04X}</>", word()),
            AbsoluteX => cformat!("<y>${:04X}</>,<b>X</>", word()),
            AbsoluteY => cformat!("<y>${:04X}</>,<b>Y</>", word()),
            AbsoluteIndirect => cformat!("(<y>${:04X}</>)", word()),
            AbsoluteIndexedIndirect => cformat!("(<y>${:04X}</>,<b>X</>)", word()),
            Relative => cformat!("<g>${:04X}</>", branch(byte(0), pc.wrapping_add(2))),
        };
        cformat!("<r>{:<5}</>{}", self.op.to_string().to_lowercase(), arg)
    }
}

#[test]
fn test() {
    let inst = Inst::decode(0xB1).unwrap();
    assert_eq!(inst.op, Mnemonic::LDA);
    assert_eq!(inst.mode, AddrMode::ZeroPageIndirectIndexed);
    assert_eq!(Inst::decode(0x03), None);
    println!("{}", inst.cformat(0x0600, &[0x10]));
    println!("{}", Inst::decode(0xD0).unwrap().cformat(0x0600, &[0xFE]));
}
