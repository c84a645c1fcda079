//! # mzTab Sections
//!
//! An mzTab document is divided into a metadata block followed by up to four
//! tab-separated table sections. Every physical line starts with a three-letter
//! prefix naming the section and line role:
//!
//! | Prefix | Meaning |
//! |--------|---------|
//! | `MTD` | Metadata line |
//! | `COM` | Comment line |
//! | `PRH` / `PRT` | Protein header / data |
//! | `PEH` / `PEP` | Peptide header / data |
//! | `PSH` / `PSM` | PSM header / data |
//! | `SMH` / `SML` | Small molecule header / data |
//!
//! Table sections, when present, must appear in the order protein, peptide,
//! PSM, small molecule; each has at most one header line which must precede
//! all of its data lines.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four tabular sections of an mzTab document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Table {
    /// The protein section (`PRH`/`PRT`).
    Protein,
    /// The peptide section (`PEH`/`PEP`).
    Peptide,
    /// The PSM (peptide spectrum match) section (`PSH`/`PSM`).
    Psm,
    /// The small molecule section (`SMH`/`SML`).
    SmallMolecule,
}

impl Table {
    /// All table sections in their mandated document order.
    pub const ALL: [Table; 4] = [
        Table::Protein,
        Table::Peptide,
        Table::Psm,
        Table::SmallMolecule,
    ];

    /// The header line prefix of this section.
    pub fn header_prefix(self) -> &'static str {
        match self {
            Table::Protein => "PRH",
            Table::Peptide => "PEH",
            Table::Psm => "PSH",
            Table::SmallMolecule => "SMH",
        }
    }

    /// The data line prefix of this section.
    pub fn data_prefix(self) -> &'static str {
        match self {
            Table::Protein => "PRT",
            Table::Peptide => "PEP",
            Table::Psm => "PSM",
            Table::SmallMolecule => "SML",
        }
    }

    /// The position of this section in the mandated document order.
    pub fn order(self) -> usize {
        self as usize
    }

    /// The section name used in metadata keys such as `colunit-protein`.
    pub fn name(self) -> &'static str {
        match self {
            Table::Protein => "protein",
            Table::Peptide => "peptide",
            Table::Psm => "psm",
            Table::SmallMolecule => "small_molecule",
        }
    }

    /// Resolve a `colunit-*` section name back to the table section.
    pub fn from_name(name: &str) -> Option<Table> {
        Table::ALL.into_iter().find(|t| t.name() == name)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The role of one physical line, derived from its prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A `MTD` metadata line.
    Metadata,
    /// A `COM` comment line.
    Comment,
    /// A table section header line (`PRH`, `PEH`, `PSH`, `SMH`).
    Header(Table),
    /// A table section data line (`PRT`, `PEP`, `PSM`, `SML`).
    Data(Table),
}

impl LineKind {
    /// Classify a line prefix token. Returns `None` for unknown prefixes.
    pub fn from_prefix(prefix: &str) -> Option<LineKind> {
        match prefix {
            "MTD" => Some(LineKind::Metadata),
            "COM" => Some(LineKind::Comment),
            _ => Table::ALL.into_iter().find_map(|t| {
                if prefix == t.header_prefix() {
                    Some(LineKind::Header(t))
                } else if prefix == t.data_prefix() {
                    Some(LineKind::Data(t))
                } else {
                    None
                }
            }),
        }
    }
}
