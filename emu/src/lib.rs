//! Hack CPU model: 32K words of RAM, registers A and D, and a ROM of
//! decoded instructions.

pub mod error;
pub mod model;

pub use error::Error;
pub use model::State;
