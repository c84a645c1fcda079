//! # Error Taxonomy
//!
//! All diagnostics produced while parsing an mzTab document fall into one of
//! three buckets:
//!
//! 1. **Format errors** — a token fails its declared grammar or type (bad
//!    separator, bad enum literal, bad index syntax, blank where `null` was
//!    expected). Recoverable: the field resolves to absent and parsing
//!    continues.
//! 2. **Logical errors** — a token parses but violates a domain rule
//!    (duplicate accession, out-of-range value, illegal ambiguity,
//!    unresolved reference). Recoverable in the same way.
//! 3. **Fatal conditions** — a duplicate or missing section header, a
//!    section out of order, an unreadable input stream, or error-list
//!    overflow. These are raised as [`MzTabException`] and abort the parse
//!    immediately instead of being recorded.
//!
//! Recoverable diagnostics accumulate in an [`ErrorList`] with a severity
//! fixed at creation; the list filters by a configured minimum level once,
//! at insertion.

mod kind;
mod list;

pub use kind::{Category, ErrorKind, Severity};
pub use list::{ErrorList, MzTabError};

use crate::section::Table;

/// Fatal conditions that abort the current parse.
///
/// Unlike ordinary [`MzTabError`] entries these are not recorded in the
/// error list; they are raised immediately and the caller must treat the
/// parse output as incomplete.
#[derive(Debug, thiserror::Error)]
pub enum MzTabException {
    /// The underlying line stream failed.
    #[error("input could not be read: {0}")]
    Io(#[from] std::io::Error),

    /// A second header line was seen for a section that is already open.
    #[error("line {line}: duplicate {section} header line")]
    DuplicateHeader {
        /// The section whose header was repeated.
        section: Table,
        /// 1-based line number of the offending line.
        line: usize,
    },

    /// A data line was seen before its section's header line.
    #[error("line {line}: {section} data line before the {section} header")]
    DataBeforeHeader {
        /// The section the data line belongs to.
        section: Table,
        /// 1-based line number of the offending line.
        line: usize,
    },

    /// A section header was seen after a later section had already opened.
    #[error("line {line}: {section} section out of order")]
    SectionOutOfOrder {
        /// The section that appeared too late.
        section: Table,
        /// 1-based line number of the offending line.
        line: usize,
    },

    /// A metadata line was seen after the first table section opened.
    #[error("line {line}: metadata line after a table section header")]
    MetadataAfterTable {
        /// 1-based line number of the offending line.
        line: usize,
    },

    /// A mandatory column is missing from a section header line.
    #[error("line {line}: mandatory column '{column}' missing from the {section} header")]
    MissingColumn {
        /// The section whose header is incomplete.
        section: Table,
        /// Name of the missing stable column.
        column: String,
        /// 1-based line number of the header line.
        line: usize,
    },

    /// The configured error cap was reached; the file is too malformed to
    /// keep going.
    #[error("line {line}: accumulated error cap of {cap} reached")]
    ErrorOverflow {
        /// The configured maximum number of retained errors.
        cap: usize,
        /// 1-based line number at which the cap was hit.
        line: usize,
    },
}
