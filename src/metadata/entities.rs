//! Entity structs for every indexed metadata element.
//!
//! All fields are optional: elements come into existence on the first
//! reference to any of their sub-properties, so a freshly created entity is
//! fully empty and fills in as further metadata lines arrive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{IndexedMap, Param};

/// An MS instrument (`instrument[n]-name/-source/-analyzer[m]/-detector`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Instrument name.
    pub name: Option<Param>,
    /// Ion source.
    pub source: Option<Param>,
    /// Mass analyzers, numbered `analyzer[m]`.
    pub analyzers: IndexedMap<Param>,
    /// Detector type.
    pub detector: Option<Param>,
}

/// A piece of analysis software (`software[n]` plus `software[n]-setting[m]`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Software {
    /// The software as a parameter; its value slot carries the version.
    pub param: Option<Param>,
    /// Free-text settings, numbered `setting[m]`.
    pub settings: IndexedMap<String>,
}

/// A biological sample (`sample[n]-...`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Species, numbered `species[m]`.
    pub species: IndexedMap<Param>,
    /// Tissues, numbered `tissue[m]`.
    pub tissues: IndexedMap<Param>,
    /// Cell types, numbered `cell_type[m]`.
    pub cell_types: IndexedMap<Param>,
    /// Diseases, numbered `disease[m]`.
    pub diseases: IndexedMap<Param>,
    /// Free-text description.
    pub description: Option<String>,
    /// Custom annotations, numbered `custom[m]`.
    pub custom: IndexedMap<Param>,
}

/// An external spectra file the results derive from (`ms_run[n]-...`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MsRun {
    /// File format.
    pub format: Option<Param>,
    /// Location URL.
    pub location: Option<String>,
    /// Native spectrum id format.
    pub id_format: Option<Param>,
    /// Fragmentation method.
    pub fragmentation_method: Option<Param>,
    /// File hash.
    pub hash: Option<String>,
    /// Hash method.
    pub hash_method: Option<Param>,
}

/// A modification declaration (`fixed_mod[n]`, `variable_mod[n]`, or
/// `assay[n]-quantification_mod[m]`), with optional site and position
/// restrictions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModDefinition {
    /// The modification as a CV parameter.
    pub param: Option<Param>,
    /// Site restriction, e.g. `M` or `N-term`.
    pub site: Option<String>,
    /// Position restriction, e.g. `Protein C-term` or `Anywhere`.
    pub position: Option<String>,
}

/// One quantified channel (`assay[n]-...`). Sample and ms-run back-references
/// are stored as ids resolved through the registry on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assay {
    /// Quantification reagent, e.g. an iTRAQ label.
    pub quantification_reagent: Option<Param>,
    /// Referenced `sample[n]` id, set only when the reference resolved.
    pub sample_id: Option<u32>,
    /// Referenced `ms_run[n]` id, set only when the reference resolved.
    pub ms_run_id: Option<u32>,
    /// Label-based quantification modifications, numbered
    /// `quantification_mod[m]`.
    pub quantification_mods: IndexedMap<ModDefinition>,
}

/// A study variable grouping assays and samples
/// (`study_variable[n]-...`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StudyVariable {
    /// Free-text description.
    pub description: Option<String>,
    /// Referenced `sample[n]` ids in declaration order.
    pub sample_ids: Vec<u32>,
    /// Referenced `assay[n]` ids in declaration order.
    pub assay_ids: Vec<u32>,
}

/// A contact person (`contact[n]-...`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Contact name.
    pub name: Option<String>,
    /// Affiliation.
    pub affiliation: Option<String>,
    /// E-mail address.
    pub email: Option<String>,
}

/// Whether a publication item is a PubMed id or a DOI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PublicationKind {
    /// A `pubmed:` item.
    PubMed,
    /// A `doi:` item.
    Doi,
}

impl PublicationKind {
    fn prefix(self) -> &'static str {
        match self {
            PublicationKind::PubMed => "pubmed",
            PublicationKind::Doi => "doi",
        }
    }
}

/// One `pubmed:`/`doi:` item of a publication line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationItem {
    /// Item kind.
    pub kind: PublicationKind,
    /// The id following the prefix.
    pub accession: String,
}

impl FromStr for PublicationItem {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, accession) = s.split_once(':').ok_or(())?;
        let kind = match prefix.trim() {
            "pubmed" => PublicationKind::PubMed,
            "doi" => PublicationKind::Doi,
            _ => return Err(()),
        };
        let accession = accession.trim();
        if accession.is_empty() {
            return Err(());
        }
        Ok(PublicationItem {
            kind,
            accession: accession.to_string(),
        })
    }
}

impl fmt::Display for PublicationItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.prefix(), self.accession)
    }
}

/// A publication (`publication[n]`), a `|`-separated item list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    /// Items in declaration order.
    pub items: Vec<PublicationItem>,
}

/// A controlled vocabulary declaration (`cv[n]-...`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvEntry {
    /// Short label, e.g. `MS`.
    pub label: Option<String>,
    /// Full vocabulary name.
    pub full_name: Option<String>,
    /// Version string.
    pub version: Option<String>,
    /// Source URL.
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn publication_items() {
        let item: PublicationItem = "pubmed:21063943".parse().unwrap();
        assert_eq!(item.kind, PublicationKind::PubMed);
        assert_eq!(item.accession, "21063943");
        assert_eq!(item.to_string(), "pubmed:21063943");

        let item: PublicationItem = "doi:10.1007/978-1-60761-987-1_6".parse().unwrap();
        assert_eq!(item.kind, PublicationKind::Doi);

        assert!("isbn:12345".parse::<PublicationItem>().is_err());
        assert!("pubmed:".parse::<PublicationItem>().is_err());
    }
}
