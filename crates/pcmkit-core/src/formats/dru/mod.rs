//! DRU text report parsing.
//!
//! A DRU report is Windows-1254, tab-delimited text with two sections: one
//! summary row per specimen, then a `Grafik` marker followed by time-series
//! samples keyed by specimen number. Cells are kept as the original text;
//! decimal conventions vary between instrument versions.
//!
//! Marker strings and column positions live in `layout`. Short rows are
//! dropped and reported through `DruWarning`; only an undecodable file is
//! fatal.

pub mod error;
pub mod layout;
pub mod parser;

pub use parser::{DruParser, ParsedDru, decode_dru_bytes, parse_dru};
