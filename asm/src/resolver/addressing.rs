use super::token::{Token, TokenKind};
use crate::error::{Error, Pos};
use crate::record::{Half, Operand};
use arch::{table, AddrMode, Mnemonic, Reg};

const BYTE_MAX: u32 = 0xFF;

/// Addressing mode and operand of `op`, given the tokens following it.
///
/// The operand shape gives an ordered list of candidate modes (zero page
/// before absolute, absolute before relative); the first one the mnemonic
/// supports wins.
pub fn resolve(op: Mnemonic, pos: Pos, tokens: &[Token]) -> Result<(AddrMode, Operand), Error> {
    let candidates = candidates(op, pos, tokens)?;
    let supported = table::modes(op);
    candidates
        .iter()
        .find(|(mode, _)| supported.contains(mode))
        .copied()
        .ok_or_else(|| Error::UnavailableAddrMode(pos, candidates[0].0, op))
}

fn candidates(op: Mnemonic, pos: Pos, tokens: &[Token]) -> Result<Vec<(AddrMode, Operand)>, Error> {
    use AddrMode::*;
    use TokenKind::*;

    let kinds: Vec<&TokenKind> = tokens.iter().map(|t| &t.kind).collect();
    let supported = table::modes(op);
    let zp = |n: u32| n <= BYTE_MAX;

    let list = match kinds.as_slice() {
        // implied / stack / accumulator
        [] => vec![
            (Implied, Operand::None),
            (Stack, Operand::None),
            (Accumulator, Operand::None),
        ],
        [Register(Reg::A)] => vec![(Accumulator, Operand::None)],

        // zp, abs, rel
        [Number(_)] if supported.contains(&Relative) => {
            return Err(Error::LiteralBranchTarget(pos, op))
        }
        [Number(n)] => direct(*n, ZeroPage, Absolute),
        [LabelCall(_, Some(idx))] => vec![
            (Absolute, Operand::Label(*idx)),
            (Relative, Operand::Branch(*idx)),
        ],

        // zp,X  abs,X  zp,Y  abs,Y
        [Number(n), Comma, Register(Reg::X)] => direct(*n, ZeroPageX, AbsoluteX),
        [Number(n), Comma, Register(Reg::Y)] => direct(*n, ZeroPageY, AbsoluteY),
        [LabelCall(_, Some(idx)), Comma, Register(Reg::X)] => vec![(AbsoluteX, Operand::Label(*idx))],
        [LabelCall(_, Some(idx)), Comma, Register(Reg::Y)] => vec![(AbsoluteY, Operand::Label(*idx))],

        // zp,rel
        [Number(n), Comma, LabelCall(_, Some(idx))] if zp(*n) => {
            vec![(ZeroPageRelative, Operand::BitBranch(*n as u8, *idx))]
        }
        [Number(_), Comma, Number(_)] if supported.contains(&ZeroPageRelative) => {
            return Err(Error::LiteralBranchTarget(pos, op))
        }

        // #imm
        [Hash, Number(n)] => {
            if !zp(*n) {
                return Err(Error::ConstantOverflow(tokens[1].pos, tokens[1].text.clone(), BYTE_MAX));
            }
            vec![(Immediate, Operand::Byte(*n as u8))]
        }
        [Hash, Less, LabelCall(_, Some(idx))] => vec![(Immediate, Operand::LabelHalf(*idx, Half::Low))],
        [Hash, Greater, LabelCall(_, Some(idx))] => vec![(Immediate, Operand::LabelHalf(*idx, Half::High))],
        [Hash, Less, Number(n)] => vec![(Immediate, Operand::Byte(Half::Low.of(*n as u16)))],
        [Hash, Greater, Number(n)] => vec![(Immediate, Operand::Byte(Half::High.of(*n as u16)))],

        // (zp)  (abs)
        [LParen, Number(n), RParen] => direct(*n, ZeroPageIndirect, AbsoluteIndirect),
        [LParen, LabelCall(_, Some(idx)), RParen] => vec![(AbsoluteIndirect, Operand::Label(*idx))],

        // (zp),Y
        [LParen, Number(n), RParen, Comma, Register(Reg::Y)] if zp(*n) => {
            vec![(ZeroPageIndirectIndexed, Operand::Byte(*n as u8))]
        }

        // (zp,X)  (abs,X)
        [LParen, Number(n), Comma, Register(Reg::X), RParen] => {
            direct(*n, ZeroPageIndexedIndirect, AbsoluteIndexedIndirect)
        }
        [LParen, LabelCall(_, Some(idx)), Comma, Register(Reg::X), RParen] => {
            vec![(AbsoluteIndexedIndirect, Operand::Label(*idx))]
        }

        _ => return Err(Error::UnexpectedAddrMode(pos, op)),
    };
    Ok(list)
}

/// A literal address: zero page form first when it fits in a byte.
fn direct(n: u32, zero_page: AddrMode, absolute: AddrMode) -> Vec<(AddrMode, Operand)> {
    if n <= BYTE_MAX {
        vec![(zero_page, Operand::Byte(n as u8)), (absolute, Operand::Word(n as u16))]
    } else {
        vec![(absolute, Operand::Word(n as u16))]
    }
}
