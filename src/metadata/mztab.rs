use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::section::Table;

use super::{
    Assay, Contact, CvEntry, Instrument, IndexedMap, MetadataError, ModDefinition, MsRun, Param,
    Publication, Sample, Software, StudyVariable,
};

/// The `mzTab-mode` of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Full per-run detail.
    Complete,
    /// Summarized results only.
    Summary,
}

impl FromStr for Mode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Complete" => Ok(Mode::Complete),
            "Summary" => Ok(Mode::Summary),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Complete => "Complete",
            Mode::Summary => "Summary",
        })
    }
}

/// The `mzTab-type` of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MzTabType {
    /// Quantification results.
    Quantification,
    /// Identification results.
    Identification,
}

impl FromStr for MzTabType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Quantification" => Ok(MzTabType::Quantification),
            "Identification" => Ok(MzTabType::Identification),
            _ => Err(()),
        }
    }
}

impl fmt::Display for MzTabType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MzTabType::Quantification => "Quantification",
            MzTabType::Identification => "Identification",
        })
    }
}

/// A resolved per-section column-unit override: the named column's values are
/// expressed in the unit given by the parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColUnit {
    /// Name of the column the unit applies to.
    pub column: String,
    /// The unit as a CV parameter.
    pub param: Param,
}

/// The root aggregate of the metadata block: every indexed-element
/// collection, the scalar description fields, and the per-section
/// column-unit overrides.
///
/// A `Metadata` lives for exactly one file parse; it is never shared across
/// parses. Indexed collections enforce id uniqueness on insertion and keep
/// declaration order for iteration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// `mzTab-version`.
    pub version: Option<String>,
    /// `mzTab-mode`.
    pub mode: Option<Mode>,
    /// `mzTab-type`.
    pub mztab_type: Option<MzTabType>,
    /// `mzTab-ID`.
    pub mztab_id: Option<String>,
    /// `title`.
    pub title: Option<String>,
    /// `description`.
    pub description: Option<String>,

    /// `sample_processing[n]`: ordered processing steps, each a `|`-separated
    /// parameter list.
    pub sample_processing: IndexedMap<Vec<Param>>,
    /// `instrument[n]`.
    pub instruments: IndexedMap<Instrument>,
    /// `software[n]`.
    pub software: IndexedMap<Software>,
    /// `protein_search_engine_score[n]`.
    pub protein_search_engine_scores: IndexedMap<Param>,
    /// `peptide_search_engine_score[n]`.
    pub peptide_search_engine_scores: IndexedMap<Param>,
    /// `psm_search_engine_score[n]`.
    pub psm_search_engine_scores: IndexedMap<Param>,
    /// `smallmolecule_search_engine_score[n]`.
    pub smallmolecule_search_engine_scores: IndexedMap<Param>,
    /// `false_discovery_rate`: a `|`-separated parameter list.
    pub false_discovery_rate: Vec<Param>,
    /// `publication[n]`.
    pub publications: IndexedMap<Publication>,
    /// `contact[n]`.
    pub contacts: IndexedMap<Contact>,
    /// `uri` lines in declaration order.
    pub uris: Vec<String>,
    /// `fixed_mod[n]`.
    pub fixed_mods: IndexedMap<ModDefinition>,
    /// `variable_mod[n]`.
    pub variable_mods: IndexedMap<ModDefinition>,
    /// `quantification_method`.
    pub quantification_method: Option<Param>,
    /// `protein-quantification_unit`.
    pub protein_quantification_unit: Option<Param>,
    /// `peptide-quantification_unit`.
    pub peptide_quantification_unit: Option<Param>,
    /// `small_molecule-quantification_unit`.
    pub small_molecule_quantification_unit: Option<Param>,
    /// `ms_run[n]`.
    pub ms_runs: IndexedMap<MsRun>,
    /// `custom` lines in declaration order.
    pub custom: Vec<Param>,
    /// `sample[n]`.
    pub samples: IndexedMap<Sample>,
    /// `assay[n]`.
    pub assays: IndexedMap<Assay>,
    /// `study_variable[n]`.
    pub study_variables: IndexedMap<StudyVariable>,
    /// `cv[n]`.
    pub cvs: IndexedMap<CvEntry>,

    /// Raw `colunit-<section>` value strings per section, recorded before the
    /// section header exists.
    colunit_strings: [Vec<String>; 4],
    /// Column-unit overrides per section, resolved once the section header
    /// has been parsed.
    colunits: [Vec<ColUnit>; 4],
}

impl Metadata {
    /// Create an empty metadata block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sample under `id`.
    pub fn add_sample(&mut self, id: u32, sample: Sample) -> Result<(), MetadataError> {
        self.samples
            .insert(id, sample)
            .map_err(|e| MetadataError::duplicate("sample", e))
    }

    /// Register an assay under `id`.
    pub fn add_assay(&mut self, id: u32, assay: Assay) -> Result<(), MetadataError> {
        self.assays
            .insert(id, assay)
            .map_err(|e| MetadataError::duplicate("assay", e))
    }

    /// Register an ms-run under `id`.
    pub fn add_ms_run(&mut self, id: u32, ms_run: MsRun) -> Result<(), MetadataError> {
        self.ms_runs
            .insert(id, ms_run)
            .map_err(|e| MetadataError::duplicate("ms_run", e))
    }

    /// Register a study variable under `id`.
    pub fn add_study_variable(
        &mut self,
        id: u32,
        study_variable: StudyVariable,
    ) -> Result<(), MetadataError> {
        self.study_variables
            .insert(id, study_variable)
            .map_err(|e| MetadataError::duplicate("study_variable", e))
    }

    /// The search-engine-score definitions declared for `table`.
    pub fn search_engine_scores(&self, table: Table) -> &IndexedMap<Param> {
        match table {
            Table::Protein => &self.protein_search_engine_scores,
            Table::Peptide => &self.peptide_search_engine_scores,
            Table::Psm => &self.psm_search_engine_scores,
            Table::SmallMolecule => &self.smallmolecule_search_engine_scores,
        }
    }

    /// Mutable access to the search-engine-score definitions for `table`.
    pub fn search_engine_scores_mut(&mut self, table: Table) -> &mut IndexedMap<Param> {
        match table {
            Table::Protein => &mut self.protein_search_engine_scores,
            Table::Peptide => &mut self.peptide_search_engine_scores,
            Table::Psm => &mut self.psm_search_engine_scores,
            Table::SmallMolecule => &mut self.smallmolecule_search_engine_scores,
        }
    }

    /// Record a raw `colunit-<section>` value string, before the section
    /// schema is known.
    pub fn add_colunit_string(&mut self, table: Table, value: impl Into<String>) {
        self.colunit_strings[table.order()].push(value.into());
    }

    /// The raw `colunit` value strings recorded for `table`.
    pub fn colunit_strings(&self, table: Table) -> &[String] {
        &self.colunit_strings[table.order()]
    }

    /// Record a resolved column-unit override for `table`.
    pub fn add_colunit(&mut self, table: Table, colunit: ColUnit) {
        self.colunits[table.order()].push(colunit);
    }

    /// The resolved column-unit overrides for `table`.
    pub fn colunits(&self, table: Table) -> &[ColUnit] {
        &self.colunits[table.order()]
    }
}
