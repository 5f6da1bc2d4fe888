pub mod inst;
pub mod mode;
pub mod op;
pub mod reg;
pub mod table;

pub use inst::Inst;
pub use mode::AddrMode;
pub use op::Mnemonic;
pub use reg::Reg;
