//! Conversion core: identity types, locator parsers and relevance analysis.
//!
//! Everything in here is pure and synchronous; I/O lives behind the ports.

pub mod domain;
pub mod parsers;
pub mod services;
