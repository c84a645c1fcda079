use serde::{Deserialize, Serialize};

use crate::metadata::ElementKind;
use crate::section::Table;

/// The declared data kind of a column, driving the per-cell parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataKind {
    /// Free text.
    Text,
    /// An integer.
    Integer,
    /// A floating point value.
    Double,
    /// A floating point value constrained to `[0, 1]` or NaN.
    Fraction,
    /// A single parameter.
    Param,
    /// A `|`-separated parameter list.
    ParamList,
    /// A delimited string list with the given separator.
    StringList(char),
    /// A delimited numeric list with the given separator.
    DoubleList(char),
    /// A `,`-separated modification list.
    ModificationList,
    /// A `|`-separated spectra reference list.
    SpectraRefList,
    /// A reliability rating (`1`/`2`/`3`).
    Reliability,
    /// A boolean (`0`/`1`).
    Boolean,
    /// A URI.
    Uri,
    /// A free-form `opt_` column without type constraint.
    Opt,
}

/// One resolved column of a section schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MzTabColumn {
    /// The stable column name, or the full header for `opt_` columns.
    pub name: String,
    /// The header token as it appeared in the header line.
    pub header: String,
    /// Schema-unique logical position, independent of physical order.
    pub logical_position: String,
    /// Data kind driving the per-cell parser.
    pub kind: DataKind,
    /// Whether the column is optional in the section.
    pub optional: bool,
    /// The indexed metadata element owning this column, if any.
    pub element: Option<(ElementKind, u32)>,
}

/// How a stable column is parameterized by metadata element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Indexing {
    /// A plain `name` token.
    None,
    /// `name[n]` where `n` is a search-engine-score definition.
    Score,
    /// `name[n]_ms_run[m]`.
    ScoreMsRun,
    /// `name_ms_run[n]`.
    MsRun,
    /// `name[n]` where `n` is an assay.
    Assay,
    /// `name[n]` where `n` is a study variable.
    StudyVariable,
}

/// A stable column definition: name, canonical order, kind, and indexing
/// shape.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnDef {
    pub name: &'static str,
    pub order: u8,
    pub kind: DataKind,
    pub optional: bool,
    pub indexing: Indexing,
}

const fn col(name: &'static str, order: u8, kind: DataKind) -> ColumnDef {
    ColumnDef {
        name,
        order,
        kind,
        optional: false,
        indexing: Indexing::None,
    }
}

const fn opt_col(name: &'static str, order: u8, kind: DataKind) -> ColumnDef {
    ColumnDef {
        name,
        order,
        kind,
        optional: true,
        indexing: Indexing::None,
    }
}

const fn indexed(name: &'static str, order: u8, kind: DataKind, indexing: Indexing) -> ColumnDef {
    ColumnDef {
        name,
        order,
        kind,
        optional: true,
        indexing,
    }
}

const PROTEIN_COLUMNS: &[ColumnDef] = &[
    col("accession", 1, DataKind::Text),
    col("description", 2, DataKind::Text),
    col("taxid", 3, DataKind::Integer),
    col("species", 4, DataKind::Text),
    col("database", 5, DataKind::Text),
    col("database_version", 6, DataKind::Text),
    col("search_engine", 7, DataKind::ParamList),
    indexed("best_search_engine_score", 8, DataKind::Double, Indexing::Score),
    indexed("search_engine_score", 9, DataKind::Double, Indexing::ScoreMsRun),
    opt_col("reliability", 10, DataKind::Reliability),
    indexed("num_psms", 11, DataKind::Integer, Indexing::MsRun),
    indexed("num_peptides_distinct", 12, DataKind::Integer, Indexing::MsRun),
    indexed("num_peptides_unique", 13, DataKind::Integer, Indexing::MsRun),
    col("ambiguity_members", 14, DataKind::StringList(',')),
    col("modifications", 15, DataKind::ModificationList),
    opt_col("uri", 16, DataKind::Uri),
    opt_col("go_terms", 17, DataKind::StringList('|')),
    opt_col("protein_coverage", 18, DataKind::Fraction),
    indexed("protein_abundance_assay", 19, DataKind::Double, Indexing::Assay),
    indexed(
        "protein_abundance_study_variable",
        20,
        DataKind::Double,
        Indexing::StudyVariable,
    ),
    indexed(
        "protein_abundance_stdev_study_variable",
        21,
        DataKind::Double,
        Indexing::StudyVariable,
    ),
    indexed(
        "protein_abundance_std_error_study_variable",
        22,
        DataKind::Double,
        Indexing::StudyVariable,
    ),
];

const PEPTIDE_COLUMNS: &[ColumnDef] = &[
    col("sequence", 1, DataKind::Text),
    col("accession", 2, DataKind::Text),
    col("unique", 3, DataKind::Boolean),
    col("database", 4, DataKind::Text),
    col("database_version", 5, DataKind::Text),
    col("search_engine", 6, DataKind::ParamList),
    indexed("best_search_engine_score", 7, DataKind::Double, Indexing::Score),
    indexed("search_engine_score", 8, DataKind::Double, Indexing::ScoreMsRun),
    opt_col("reliability", 9, DataKind::Reliability),
    col("modifications", 10, DataKind::ModificationList),
    col("retention_time", 11, DataKind::DoubleList('|')),
    col("retention_time_window", 12, DataKind::DoubleList('|')),
    col("charge", 13, DataKind::Integer),
    col("mass_to_charge", 14, DataKind::Double),
    opt_col("uri", 15, DataKind::Uri),
    col("spectra_ref", 16, DataKind::SpectraRefList),
    indexed("peptide_abundance_assay", 17, DataKind::Double, Indexing::Assay),
    indexed(
        "peptide_abundance_study_variable",
        18,
        DataKind::Double,
        Indexing::StudyVariable,
    ),
    indexed(
        "peptide_abundance_stdev_study_variable",
        19,
        DataKind::Double,
        Indexing::StudyVariable,
    ),
    indexed(
        "peptide_abundance_std_error_study_variable",
        20,
        DataKind::Double,
        Indexing::StudyVariable,
    ),
];

const PSM_COLUMNS: &[ColumnDef] = &[
    col("sequence", 1, DataKind::Text),
    col("PSM_ID", 2, DataKind::Integer),
    col("accession", 3, DataKind::Text),
    col("unique", 4, DataKind::Boolean),
    col("database", 5, DataKind::Text),
    col("database_version", 6, DataKind::Text),
    col("search_engine", 7, DataKind::ParamList),
    indexed("search_engine_score", 8, DataKind::Double, Indexing::Score),
    opt_col("reliability", 9, DataKind::Reliability),
    col("modifications", 10, DataKind::ModificationList),
    col("retention_time", 11, DataKind::DoubleList('|')),
    col("charge", 12, DataKind::Integer),
    col("exp_mass_to_charge", 13, DataKind::Double),
    col("calc_mass_to_charge", 14, DataKind::Double),
    opt_col("uri", 15, DataKind::Uri),
    col("spectra_ref", 16, DataKind::SpectraRefList),
    col("pre", 17, DataKind::Text),
    col("post", 18, DataKind::Text),
    col("start", 19, DataKind::Integer),
    col("end", 20, DataKind::Integer),
];

const SMALL_MOLECULE_COLUMNS: &[ColumnDef] = &[
    col("identifier", 1, DataKind::StringList('|')),
    col("chemical_formula", 2, DataKind::Text),
    col("smiles", 3, DataKind::StringList('|')),
    col("inchi_key", 4, DataKind::StringList('|')),
    col("description", 5, DataKind::Text),
    col("exp_mass_to_charge", 6, DataKind::Double),
    col("calc_mass_to_charge", 7, DataKind::Double),
    col("charge", 8, DataKind::Integer),
    col("retention_time", 9, DataKind::DoubleList('|')),
    col("taxid", 10, DataKind::Integer),
    col("species", 11, DataKind::Text),
    col("database", 12, DataKind::Text),
    col("database_version", 13, DataKind::Text),
    opt_col("reliability", 14, DataKind::Reliability),
    opt_col("uri", 15, DataKind::Uri),
    col("spectra_ref", 16, DataKind::SpectraRefList),
    col("search_engine", 17, DataKind::ParamList),
    indexed("best_search_engine_score", 18, DataKind::Double, Indexing::Score),
    col("modifications", 19, DataKind::ModificationList),
    indexed(
        "smallmolecule_abundance_assay",
        20,
        DataKind::Double,
        Indexing::Assay,
    ),
    indexed(
        "smallmolecule_abundance_study_variable",
        21,
        DataKind::Double,
        Indexing::StudyVariable,
    ),
    indexed(
        "smallmolecule_abundance_stdev_study_variable",
        22,
        DataKind::Double,
        Indexing::StudyVariable,
    ),
    indexed(
        "smallmolecule_abundance_std_error_study_variable",
        23,
        DataKind::Double,
        Indexing::StudyVariable,
    ),
];

/// The stable column definitions of `table` in canonical order.
pub(crate) fn stable_columns(table: Table) -> &'static [ColumnDef] {
    match table {
        Table::Protein => PROTEIN_COLUMNS,
        Table::Peptide => PEPTIDE_COLUMNS,
        Table::Psm => PSM_COLUMNS,
        Table::SmallMolecule => SMALL_MOLECULE_COLUMNS,
    }
}
