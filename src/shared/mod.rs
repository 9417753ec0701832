//! Cross-cutting types shared by every layer: the error enum, exit codes
//! and the crate-wide `Result` alias.

pub mod error;
mod result;

pub use result::Result;
