use crate::source::Source;
use arch::{AddrMode, Mnemonic};
use color_print::ceprintln;
use std::fmt;
use thiserror::Error;

/// Position in the source: 1-based row (physical line number) and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Pos {
    pub row: usize,
    pub col: usize,
}

impl Pos {
    pub fn new(row: usize, col: usize) -> Self {
        Pos { row, col }
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Lexical,
    Semantic,
    Argument,
    Internal,
}

#[derive(Error, Debug)]
pub enum Error {
    // Lexical errors
    #[error("Unexpected token: `{1}`")]
    UnexpectedToken(Pos, String),

    // Semantic errors
    #[error("Unknown directive: `{1}`")]
    UnknownDirective(Pos, String),

    #[error("{1} was expected, but {2} was found")]
    Expected(Pos, &'static str, String),

    #[error("Repeated declaration of macro: `{1}`")]
    RedefinedMacro(Pos, String),

    #[error("Constant `{1}` is greater than 0x{2:X}")]
    ConstantOverflow(Pos, String, u32),

    #[error("Re-defined label: `{1}` (first declared at line {2})")]
    RedefinedLabel(Pos, String, usize),

    #[error("Reserved word can't be a label: `{1}`")]
    ReservedLabel(Pos, String),

    #[error("Non-existent label: `{1}`")]
    UndefinedLabel(Pos, String),

    #[error("Line can start with DIRECTIVE, LABEL DECLARATION, or OPCODE, but {1} was found")]
    InvalidLineStart(Pos, String),

    #[error("Unexpected addressing mode for {1}")]
    UnexpectedAddrMode(Pos, Mnemonic),

    #[error("Unavailable addressing mode `{1}` for {2}")]
    UnavailableAddrMode(Pos, AddrMode, Mnemonic),

    #[error("Branch target of {1} must be a label")]
    LiteralBranchTarget(Pos, Mnemonic),

    #[error("Branch to `{1}` is out of range: {2} bytes (allowed -128 to 127)")]
    BranchOutOfRange(Pos, String, i32),

    #[error("Address overflow: output passes $FFFF")]
    AddressOverflow(Pos),

    // Argument errors
    #[error("Wrong source code file name or extension: `{0}`. Should be [name].asm")]
    WrongExtension(String),

    #[error("Invalid origin: `{0}`")]
    InvalidOrigin(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),

    // Internal errors
    #[error("Label #{0} has no address")]
    UnresolvedLabel(usize),
}

impl Error {
    pub fn category(&self) -> Category {
        use Error::*;
        match self {
            UnexpectedToken(..) => Category::Lexical,
            UnknownDirective(..)
            | Expected(..)
            | RedefinedMacro(..)
            | ConstantOverflow(..)
            | RedefinedLabel(..)
            | ReservedLabel(..)
            | UndefinedLabel(..)
            | InvalidLineStart(..)
            | UnexpectedAddrMode(..)
            | UnavailableAddrMode(..)
            | LiteralBranchTarget(..)
            | BranchOutOfRange(..)
            | AddressOverflow(..) => Category::Semantic,
            WrongExtension(..) | InvalidOrigin(..) | FileOpen(..) | FileWrite(..) => {
                Category::Argument
            }
            UnresolvedLabel(..) => Category::Internal,
        }
    }

    pub fn pos(&self) -> Option<Pos> {
        use Error::*;
        match self {
            UnexpectedToken(pos, ..)
            | UnknownDirective(pos, ..)
            | Expected(pos, ..)
            | RedefinedMacro(pos, ..)
            | ConstantOverflow(pos, ..)
            | RedefinedLabel(pos, ..)
            | ReservedLabel(pos, ..)
            | UndefinedLabel(pos, ..)
            | InvalidLineStart(pos, ..)
            | UnexpectedAddrMode(pos, ..)
            | UnavailableAddrMode(pos, ..)
            | LiteralBranchTarget(pos, ..)
            | BranchOutOfRange(pos, ..)
            | AddressOverflow(pos) => Some(*pos),
            WrongExtension(..) | InvalidOrigin(..) | FileOpen(..) | FileWrite(..)
            | UnresolvedLabel(..) => None,
        }
    }
}

impl Error {
    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, source: Option<&Source>) {
        ceprintln!("<red,bold>error[{}]</>: {}", self.category(), self);

        let (Some(pos), Some(source)) = (self.pos(), source) else {
            return;
        };

        ceprintln!("     <blue>--></> <underline>{}:{}</>", source.name(), pos);
        ceprintln!("      <blue>|</>");
        ceprintln!(" <blue>{:>4} |</> {}", pos.row, source.raw(pos.row).unwrap_or(""));
        ceprintln!(
            "      <blue>|</> {}<red,bold>^</>",
            " ".repeat(pos.col.saturating_sub(1))
        );
    }
}

/// Sort a stage's collected errors by position, keeping insertion order for ties.
pub fn sorted(mut errors: Vec<Error>) -> Vec<Error> {
    errors.sort_by_key(|e| e.pos());
    errors
}
