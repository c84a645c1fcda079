//! # Column Schema Resolution
//!
//! Each table section of an mzTab document declares its columns in a header
//! line. The schema of a section is not fixed: beyond the mandatory stable
//! columns it contains indexed columns parameterized by metadata element ids
//! (`best_search_engine_score[n]`, `search_engine_score[n]_ms_run[m]`,
//! `protein_abundance_assay[n]`, …) and free-form `opt_` columns.
//!
//! The [`ColumnFactory`] resolves a header line against the per-section
//! stable-column tables and the metadata registry into an ordered logical
//! schema; the [`PositionMapping`] then reconciles the physical column order
//! of the header with that schema so columns may be declared in any order
//! while data rows are always interpreted by logical meaning.
//!
//! ## Logical positions
//!
//! Every column gets a logical position string that is unique within its
//! section schema and independent of physical order: the two-digit canonical
//! order of the stable column, with the ids of indexed columns appended
//! (`08_1`, `09_1_2`) and `opt_` columns keyed under `99_` plus their
//! header.

mod columns;
mod factory;
mod position;

#[cfg(test)]
mod tests;

pub use columns::{DataKind, MzTabColumn};
pub use factory::ColumnFactory;
pub use position::PositionMapping;

pub(crate) use columns::{stable_columns, ColumnDef, Indexing};
