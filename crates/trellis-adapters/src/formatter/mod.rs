//! Report formatter adapters.

pub mod text;

pub use text::TextReportFormatter;
