//! # Metadata Model
//!
//! The metadata block of an mzTab document is a key-value header addressed
//! with `element[index]-property[subindex]` keys. This module holds the data
//! model for that block: the [`Param`] value type, the insertion-ordered
//! [`IndexedMap`] used for every id-addressed collection, the entity structs
//! (instruments, samples, assays, ms-runs, …), and the [`Metadata`] root
//! aggregate that acts as the registry the rest of the parser validates
//! against.
//!
//! The model is constructed in two ways:
//!
//! 1. By the metadata line parser, one mutation per `MTD` line, with lazy
//!    creation of indexed elements on first reference to a sub-property.
//! 2. Directly through this API by alternative producers (e.g. a converter
//!    from another result format) that build an already-valid model.

mod element;
mod entities;
mod error;
mod mztab;
mod param;

#[cfg(test)]
mod tests;

pub use element::{DuplicateId, ElementKind, IndexedMap};
pub use entities::{
    Assay, Contact, CvEntry, Instrument, ModDefinition, MsRun, Publication, PublicationItem,
    PublicationKind, Sample, Software, StudyVariable,
};
pub use error::MetadataError;
pub use mztab::{ColUnit, Metadata, Mode, MzTabType};
pub use param::{CvParam, Param, ParamParseError, UserParam};
