//! Instrument file formats.
//!
//! Each format follows the same layered structure:
//! - `layout`: byte offsets, markers and column positions (source of truth)
//! - `reader` / `writer`: bounds-checked byte access
//! - `parser` / `builder`: domain-level decoding and encoding
//! - `error`: fatal errors and locally recovered warnings
//!
//! Nothing here performs I/O; `source` reads and writes files.

pub(crate) mod common;
pub mod dru;
pub mod pcm;
