//! # Line Parsers & File State Machine
//!
//! Parsing proceeds strictly top-down, one line at a time: the state machine
//! dispatches each raw line by its prefix to the metadata line parser or the
//! appropriate section's record parser, mutating the shared [`crate::metadata::Metadata`]
//! and accumulating diagnostics in the shared [`crate::errors::ErrorList`].
//! Each line is fully parsed, including all validation side effects, before
//! the next line is read, because record validation depends on metadata
//! mutated by earlier lines and on state accumulated within the current
//! section.
//!
//! All parse state is local to one [`MzTabParser`]; two files are parsed
//! with two independent parsers and no synchronization.

mod file;
mod key;
mod metadata;
mod row;


pub use file::{
    parse_mztab_file, parse_reader, parse_str, MzTabFile, MzTabParser, ParseFailure, ParserConfig,
    TableData,
};
pub use key::{parse_key, KeyError, MetadataKey};
pub use row::RowParser;
