//! Stack VM to Hack assembly translator.
//!
//! Each VM command becomes a run of assembly lines preceded by a `// command`
//! trace comment. Comparison and call sites get labels numbered from
//! counters owned by [`CodeGen`], so one generator per linked program keeps
//! them unique.

pub mod codegen;
pub mod command;
pub mod error;
pub mod source;

pub use codegen::CodeGen;
pub use command::{ArithOp, Command, Segment};
pub use error::{Error, LineError};
