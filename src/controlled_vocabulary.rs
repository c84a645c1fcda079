//! # Controlled Vocabulary Reference Data
//!
//! Constant tables for the controlled vocabularies an mzTab document refers
//! to. The core never mutates these; they are read-only reference data used
//! to classify modification accessions and to build CV parameters
//! programmatically.
//!
//! ## Reference
//! - PSI-MS OBO: https://raw.githubusercontent.com/HUPO-PSI/psi-ms-CV/master/psi-ms.obo
//! - PSI-MOD / UNIMOD: the two vocabularies the format expects protein and
//!   peptide modifications to be drawn from.

/// Labels of the vocabularies commonly referenced from mzTab metadata.
pub mod labels {
    /// HUPO-PSI mass spectrometry CV.
    pub const MS: &str = "MS";
    /// PSI-MOD protein modification CV.
    pub const MOD: &str = "MOD";
    /// UNIMOD modification database.
    pub const UNIMOD: &str = "UNIMOD";
    /// PRIDE internal CV.
    pub const PRIDE: &str = "PRIDE";
    /// Unit ontology.
    pub const UO: &str = "UO";
    /// Sample processing / separation CV.
    pub const SEP: &str = "SEP";
    /// NCBI taxonomy as used by PRIDE.
    pub const NEWT: &str = "NEWT";
}

/// Accession prefixes that identify a modification entry's origin. Only the
/// first two are controlled vocabularies; the rest are in-line conventions
/// defined by the format itself.
pub const MODIFICATION_PREFIXES: [&str; 5] = ["UNIMOD", "MOD", "CHEMMOD", "SUBST", "NEUTRAL_LOSS"];

/// Whether `prefix` names one of the two vocabularies protein and peptide
/// modifications should be drawn from (UNIMOD or PSI-MOD).
pub fn is_modification_vocabulary(prefix: &str) -> bool {
    prefix == labels::UNIMOD || prefix == labels::MOD
}

/// CV accessions whose qualified `opt_` columns carry boolean values
/// (`0`/`1` on the wire).
pub const BOOLEAN_CV_ACCESSIONS: [&str; 1] = ["MS:1002217"];

/// Whether a CV-qualified optional column with this accession is
/// boolean-valued.
pub fn is_boolean_cv_accession(accession: &str) -> bool {
    BOOLEAN_CV_ACCESSIONS.contains(&accession)
}

/// Constructors for a handful of frequently used CV parameters.
pub mod terms {
    use crate::metadata::Param;

    /// MS:1001207 - Mascot.
    pub fn mascot() -> Param {
        Param::cv("MS", "MS:1001207", "Mascot", None)
    }

    /// MS:1001171 - Mascot:score.
    pub fn mascot_score() -> Param {
        Param::cv("MS", "MS:1001171", "Mascot:score", None)
    }

    /// MS:1001251 - Trypsin.
    pub fn trypsin() -> Param {
        Param::cv("MS", "MS:1001251", "Trypsin", None)
    }

    /// MS:1000584 - mzML file.
    pub fn mzml_file() -> Param {
        Param::cv("MS", "MS:1000584", "mzML file", None)
    }
}
