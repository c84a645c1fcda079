use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a diagnostic, ordered `Info < Warn < Error`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub enum Severity {
    /// Informational; never affects the parsed value.
    Info,
    /// Suspicious but tolerated input.
    Warn,
    /// The affected field was rejected.
    #[default]
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Info => "Info",
            Severity::Warn => "Warn",
            Severity::Error => "Error",
        })
    }
}

/// Broad category of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// A token failed its declared grammar or type.
    Format,
    /// A token parsed but violated a domain rule.
    Logical,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Format => "Format",
            Category::Logical => "Logical",
        })
    }
}

/// Every recoverable diagnostic the parser can emit.
///
/// Each kind carries a fixed category, a fixed severity and a stable numeric
/// code (`1xxx` for format errors, `2xxx` for logical errors) so callers can
/// match on diagnostics programmatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    // ---- format errors -------------------------------------------------
    /// Unrecognized line prefix.
    LinePrefix,
    /// The number of data cells does not match the header.
    CountMatch,
    /// A bracketed index is malformed or not a positive integer.
    IndexedElement,
    /// A metadata line does not have the three-field `MTD\tkey\tvalue` shape.
    MtdLine,
    /// A metadata key names an unknown element or property.
    MtdDefineLabel,
    /// A parameter is not of the form `[label, accession, name, value]`.
    Param,
    /// An element of a `|`-separated parameter list is malformed.
    ParamList,
    /// A publication entry is not a `pubmed:`/`doi:` item list.
    Publication,
    /// A URI value is malformed.
    Uri,
    /// A `colunit` value is not of the form `column=param`.
    ColUnit,
    /// An integer field failed to parse.
    Integer,
    /// A floating point field failed to parse.
    Double,
    /// An element of a delimited string list is malformed.
    StringList,
    /// An element of a delimited numeric list failed to parse.
    DoubleList,
    /// A modification entry failed to parse.
    Modification,
    /// A spectra reference is not of the form `ms_run[n]:nativeID`.
    SpectraRef,
    /// A boolean field holds something other than the literals `0`/`1`.
    MzBoolean,
    /// A reliability field holds something other than `1`, `2` or `3`.
    Reliability,
    /// A header token matches no stable column of the section.
    StableColumn,
    /// An abundance column header is malformed.
    AbundanceColumn,
    /// An `opt_ms_run[n]_...` or `opt_assay[n]_...` column header is malformed.
    MsRunOptionalColumn,
    /// An `opt_..._cv_...` column header carries a malformed CV accession.
    OptionalCvParamColumn,
    /// A `search_engine_score[n]` column header is malformed.
    SearchEngineScoreColumn,
    /// A cell is blank; absence must be spelled `null`.
    EmptyCell,
    /// Two header tokens resolve to the same logical position.
    DuplicateColumn,
    /// `mzTab-mode` is neither `Complete` nor `Summary`.
    MzTabMode,
    /// `mzTab-type` is neither `Quantification` nor `Identification`.
    MzTabType,

    // ---- logical errors ------------------------------------------------
    /// `null` used in a non-nullable identifying field.
    NotNull,
    /// A scalar metadata field was set more than once; last write wins.
    DuplicationDefine,
    /// An accession already seen earlier in the protein section.
    DuplicationAccession,
    /// A reference to an element id that is not registered.
    UnresolvedReference,
    /// Positional ambiguity in a modification at protein granularity.
    AmbiguityMod,
    /// A modification accession outside the UNIMOD/PSI-MOD convention.
    ChemMods,
    /// A coverage-style fraction outside `[0, 1]`.
    ProteinCoverage,
    /// A software parameter without a version string in its value slot.
    SoftwareVersion,
    /// A `colunit` override names a column absent from the section header.
    ColUnitColumn,
}

impl ErrorKind {
    /// The category this kind belongs to.
    pub fn category(self) -> Category {
        if self.code() < 2000 {
            Category::Format
        } else {
            Category::Logical
        }
    }

    /// The fixed severity of this kind.
    pub fn severity(self) -> Severity {
        match self {
            ErrorKind::DuplicationDefine => Severity::Info,
            ErrorKind::AmbiguityMod
            | ErrorKind::ChemMods
            | ErrorKind::SoftwareVersion
            | ErrorKind::EmptyCell => Severity::Warn,
            _ => Severity::Error,
        }
    }

    /// The stable numeric code of this kind.
    pub fn code(self) -> u32 {
        match self {
            ErrorKind::LinePrefix => 1001,
            ErrorKind::CountMatch => 1002,
            ErrorKind::IndexedElement => 1003,
            ErrorKind::MtdLine => 1004,
            ErrorKind::MtdDefineLabel => 1005,
            ErrorKind::Param => 1006,
            ErrorKind::ParamList => 1007,
            ErrorKind::Publication => 1008,
            ErrorKind::Uri => 1009,
            ErrorKind::ColUnit => 1010,
            ErrorKind::Integer => 1011,
            ErrorKind::Double => 1012,
            ErrorKind::StringList => 1013,
            ErrorKind::DoubleList => 1014,
            ErrorKind::Modification => 1015,
            ErrorKind::SpectraRef => 1016,
            ErrorKind::MzBoolean => 1017,
            ErrorKind::Reliability => 1018,
            ErrorKind::StableColumn => 1019,
            ErrorKind::AbundanceColumn => 1020,
            ErrorKind::MsRunOptionalColumn => 1021,
            ErrorKind::OptionalCvParamColumn => 1022,
            ErrorKind::SearchEngineScoreColumn => 1023,
            ErrorKind::EmptyCell => 1024,
            ErrorKind::DuplicateColumn => 1025,
            ErrorKind::MzTabMode => 1026,
            ErrorKind::MzTabType => 1027,

            ErrorKind::NotNull => 2001,
            ErrorKind::DuplicationDefine => 2002,
            ErrorKind::DuplicationAccession => 2003,
            ErrorKind::UnresolvedReference => 2004,
            ErrorKind::AmbiguityMod => 2005,
            ErrorKind::ChemMods => 2006,
            ErrorKind::ProteinCoverage => 2007,
            ErrorKind::SoftwareVersion => 2008,
            ErrorKind::ColUnitColumn => 2009,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
    }

    #[test]
    fn categories_follow_code_ranges() {
        assert_eq!(ErrorKind::MzBoolean.category(), Category::Format);
        assert_eq!(ErrorKind::DuplicationAccession.category(), Category::Logical);
        assert_eq!(ErrorKind::ChemMods.category(), Category::Logical);
    }

    #[test]
    fn fixed_severities() {
        assert_eq!(ErrorKind::DuplicationDefine.severity(), Severity::Info);
        assert_eq!(ErrorKind::ChemMods.severity(), Severity::Warn);
        assert_eq!(ErrorKind::NotNull.severity(), Severity::Error);
    }
}
