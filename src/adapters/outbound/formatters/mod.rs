/// Formatter adapters for the vulnerability report
mod json_formatter;

pub use json_formatter::JsonFormatter;
