pub mod alu;
pub mod bits;
pub mod error;
pub mod format;
pub mod hack;
pub mod inst;
pub mod isa;
pub mod reg;

pub use bits::Bits;
pub use error::Error;
pub use format::{Field, Format, Shape};
pub use hack::HACK;
pub use inst::Inst;
pub use isa::Isa;
