//! # Simkit Source
//!
//! Source tree utilities for the simulator project: finding C files,
//! counting their lines and normalizing their text in place.
//!
//! ## Pipeline
//!
//! ```text
//! Project root
//!     │
//!     ├──> File Scanner (*.c, *.h)
//!     │      └─> Relative paths, sorted
//!     │
//!     ├──> Line Counter
//!     │      └─> CountReport (descending, with total)
//!     │
//!     └──> Source Normalizer (include rewrite, blank lines)
//!            └─> Files rewritten in place
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use simkit_source::{FileScanner, LineCounter};
//!
//! fn main() -> simkit_source::Result<()> {
//!     let scanner = FileScanner::new(".");
//!     let report = LineCounter::new(&scanner).count()?;
//!     print!("{}", report.render());
//!     Ok(())
//! }
//! ```

mod counter;
mod error;
mod include;
mod normalizer;
mod scanner;

pub use counter::{count_lines, CountReport, LineCounter, LineRecord};
pub use error::{Result, SourceError};
pub use include::{rewrite_include, MarkerPolicy, LOCAL_HEADER_MARKER};
pub use normalizer::{
    blank_whitespace_line, decode_ascii, FormatReport, NormalizerConfig, SkippedFile,
    SourceNormalizer,
};
pub use scanner::{FileScanner, ScanOptions};
