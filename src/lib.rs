//! # mzTab - Parsing, Validation and Modelling of mzTab Result Files
//!
//! `mztab` is a validating parser and data model for the mzTab format:
//! tab-delimited mass-spectrometry result files composed of a metadata block
//! plus up to four optional tabular sections (protein, peptide, PSM, small
//! molecule).
//!
//! ## Key Features
//!
//! - **Error accumulation over early abort**: recoverable format and logic
//!   violations are collected per line into a severity-filtered error list;
//!   only structural failures (duplicate or missing section headers,
//!   out-of-order sections, unreadable input) abort a parse.
//!
//! - **Dynamic column schemas**: each section's schema is resolved from its
//!   header line against the metadata registry, covering indexed columns
//!   (`best_search_engine_score[n]`, `protein_abundance_assay[n]`, …) and
//!   free-form `opt_` columns.
//!
//! - **Order-independent headers**: a position mapping reconciles physical
//!   column order with the canonical logical schema, so data cells are
//!   always interpreted by logical meaning, not physical index.
//!
//! - **Typed metadata keys**: `element[index]-property[subindex]` keys are
//!   tokenized and dispatched exhaustively at compile time, not through
//!   string-keyed reflection.
//!
//! ## Quick Start
//!
//! ```rust
//! use mztab::parser::{parse_str, ParserConfig};
//! use mztab::section::Table;
//!
//! let document = "\
//! MTD\tmzTab-version\t1.0.0
//! MTD\tmzTab-mode\tSummary
//! MTD\tmzTab-type\tIdentification
//! MTD\tprotein_search_engine_score[1]\t[MS, MS:1001171, Mascot:score, ]
//! PRH\taccession\tdescription\ttaxid\tspecies\tdatabase\tdatabase_version\tsearch_engine\tbest_search_engine_score[1]\tambiguity_members\tmodifications
//! PRT\tP12345\tAspartate aminotransferase\t10116\tRattus norvegicus (Rat)\tUniProtKB\t2011_11\t[MS, MS:1001207, Mascot, ]\t50\tnull\t3-MOD:00412
//! ";
//!
//! let file = parse_str(document, ParserConfig::default())?;
//! assert_eq!(file.metadata.version.as_deref(), Some("1.0.0"));
//! assert_eq!(file.records(Table::Protein).len(), 1);
//! assert!(file.errors.is_empty());
//! # Ok::<(), mztab::parser::ParseFailure>(())
//! ```
//!
//! ## Architecture
//!
//! The library is organized into the following modules:
//!
//! - [`errors`]: the error taxonomy, severity model and error list
//! - [`metadata`]: the metadata data model and registry
//! - [`schema`]: per-section column schema resolution and position mapping
//! - [`record`]: table records and row-level value types
//! - [`parser`]: the line parsers and the file-level state machine
//! - [`section`]: section tags and line prefixes
//! - [`controlled_vocabulary`]: read-only CV reference tables
//!
//! ## Line Grammar
//!
//! | Prefix | Role |
//! |--------|------|
//! | `MTD` | Metadata key-value line |
//! | `COM` | Comment |
//! | `PRH` / `PRT` | Protein header / data |
//! | `PEH` / `PEP` | Peptide header / data |
//! | `PSH` / `PSM` | PSM header / data |
//! | `SMH` / `SML` | Small molecule header / data |
//!
//! Metadata lines must precede all table sections; table sections, when
//! present, appear in the order above, each with exactly one header line
//! before its data lines.

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod controlled_vocabulary;
pub mod errors;
pub mod metadata;
pub mod parser;
pub mod record;
pub mod schema;
pub mod section;

mod util;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::controlled_vocabulary::{labels, terms};
    pub use crate::errors::{Category, ErrorKind, ErrorList, MzTabError, MzTabException, Severity};
    pub use crate::metadata::{
        Assay, Contact, CvEntry, CvParam, IndexedMap, Instrument, Metadata, Mode, MsRun, MzTabType,
        Param, Publication, Sample, Software, StudyVariable, UserParam,
    };
    pub use crate::parser::{
        parse_mztab_file, parse_reader, parse_str, MzTabFile, MzTabParser, ParseFailure,
        ParserConfig, TableData,
    };
    pub use crate::record::{Modification, Record, Reliability, SpectraRef, Value};
    pub use crate::schema::{ColumnFactory, DataKind, MzTabColumn, PositionMapping};
    pub use crate::section::Table;
}
