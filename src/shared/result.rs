/// Crate-wide Result alias.
///
/// Ports, adapters and use cases propagate `anyhow::Error` so that typed
/// errors (`SpdxToOsvError`, `ParseError`) can be enriched with context on
/// their way up to `main`.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
