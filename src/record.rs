//! # Table Records
//!
//! One [`Record`] per data row: an ordered mapping from logical column
//! position to a parsed cell value, or absent where the cell was `null` or
//! failed validation. Records are built even when individual cells fail, so
//! a single pass over a file yields both the partial data and a complete
//! diagnostic set; the error list tells the caller which cells were
//! rejected.
//!
//! This module also defines the cell value types with row-level grammar:
//! [`Reliability`], [`Modification`] and [`SpectraRef`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::controlled_vocabulary::MODIFICATION_PREFIXES;
use crate::metadata::Param;
use crate::schema::{DataKind, MzTabColumn};
use crate::section::Table;
use crate::util::{format_double, split_outside_brackets};

/// The closed three-level confidence rating of an identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reliability {
    /// Token `1`.
    High,
    /// Token `2`.
    Medium,
    /// Token `3`.
    Poor,
}

impl Reliability {
    /// Parse the literal tokens `1`, `2`, `3`. Anything else is rejected.
    pub fn from_token(token: &str) -> Option<Reliability> {
        match token {
            "1" => Some(Reliability::High),
            "2" => Some(Reliability::Medium),
            "3" => Some(Reliability::Poor),
            _ => None,
        }
    }
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Reliability::High => "1",
            Reliability::Medium => "2",
            Reliability::Poor => "3",
        })
    }
}

/// One candidate position of a modification, with its optional qualifying
/// parameter (e.g. a localisation probability).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationPosition {
    /// 1-based position; 0 denotes an N-terminal modification.
    pub position: u32,
    /// Optional qualifying parameter.
    pub param: Option<Param>,
}

/// A modification entry from a `modifications` cell:
/// `{position}{[param]}(|...)-PREFIX:accession`.
///
/// Several `|`-delimited positions before one accession report positional
/// ambiguity, which is legal at peptide/PSM granularity only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modification {
    /// Candidate positions in declaration order; empty when the entry does
    /// not carry a position (e.g. a bare `CHEMMOD:`).
    pub positions: Vec<ModificationPosition>,
    /// The accession prefix, one of [`MODIFICATION_PREFIXES`].
    pub prefix: String,
    /// The accession following the prefix.
    pub accession: String,
}

impl Modification {
    /// Whether this entry reports more than one candidate position.
    pub fn is_ambiguous(&self) -> bool {
        self.positions.len() > 1
    }
}

/// Reasons a modification entry failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModificationParseError {
    /// No known accession prefix found in the entry.
    #[error("no UNIMOD/MOD/CHEMMOD/SUBST/NEUTRAL_LOSS accession found")]
    UnknownPrefix,
    /// A position token is not a non-negative integer.
    #[error("modification position '{0}' is not a number")]
    BadPosition(String),
    /// A position's qualifying parameter is malformed.
    #[error("malformed position parameter: {0}")]
    BadParam(String),
    /// The accession following the prefix is empty.
    #[error("empty modification accession")]
    EmptyAccession,
}

/// Locate the accession prefix in a modification entry: a known prefix
/// followed by `:`, at the start of the entry or right after a `-`.
fn find_prefix(s: &str) -> Option<(usize, &'static str)> {
    for prefix in MODIFICATION_PREFIXES {
        let needle = format!("{prefix}:");
        let mut from = 0;
        while let Some(rel) = s[from..].find(&needle) {
            let at = from + rel;
            if at == 0 || s.as_bytes()[at - 1] == b'-' {
                return Some((at, prefix));
            }
            from = at + needle.len();
        }
    }
    None
}

impl FromStr for Modification {
    type Err = ModificationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (at, prefix) = find_prefix(s).ok_or(ModificationParseError::UnknownPrefix)?;

        let accession = &s[at + prefix.len() + 1..];
        if accession.is_empty() {
            return Err(ModificationParseError::EmptyAccession);
        }

        let mut positions = Vec::new();
        if at > 0 {
            let position_part = &s[..at - 1];
            for token in split_outside_brackets(position_part, '|') {
                let token = token.trim();
                let digits_end = token
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(token.len());
                let position: u32 = token[..digits_end]
                    .parse()
                    .map_err(|_| ModificationParseError::BadPosition(token.to_string()))?;
                let rest = token[digits_end..].trim();
                let param = if rest.is_empty() {
                    None
                } else {
                    Some(
                        rest.parse::<Param>()
                            .map_err(|e| ModificationParseError::BadParam(e.to_string()))?,
                    )
                };
                positions.push(ModificationPosition { position, param });
            }
        }

        Ok(Modification {
            positions,
            prefix: prefix.to_string(),
            accession: accession.to_string(),
        })
    }
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pos) in self.positions.iter().enumerate() {
            if i > 0 {
                f.write_str("|")?;
            }
            write!(f, "{}", pos.position)?;
            if let Some(param) = &pos.param {
                write!(f, "{param}")?;
            }
        }
        if !self.positions.is_empty() {
            f.write_str("-")?;
        }
        write!(f, "{}:{}", self.prefix, self.accession)
    }
}

/// A reference into an external spectra file: `ms_run[n]:nativeID`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpectraRef {
    /// The referenced `ms_run[n]` id.
    pub ms_run: u32,
    /// The native spectrum identifier, e.g. `index=5`.
    pub reference: String,
}

impl FromStr for SpectraRef {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.trim().strip_prefix("ms_run[").ok_or(())?;
        let (id, rest) = rest.split_once(']').ok_or(())?;
        let ms_run: u32 = id.parse().map_err(|_| ())?;
        if ms_run == 0 {
            return Err(());
        }
        let reference = rest.strip_prefix(':').ok_or(())?;
        if reference.is_empty() {
            return Err(());
        }
        Ok(SpectraRef {
            ms_run,
            reference: reference.to_string(),
        })
    }
}

impl fmt::Display for SpectraRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ms_run[{}]:{}", self.ms_run, self.reference)
    }
}

/// A parsed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// A plain string.
    Text(String),
    /// An integer.
    Integer(i64),
    /// A floating point value (NaN and infinities included).
    Double(f64),
    /// A single parameter.
    Param(Param),
    /// A `|`-separated parameter list.
    ParamList(Vec<Param>),
    /// A delimited string list.
    StringList(Vec<String>),
    /// A delimited numeric list.
    DoubleList(Vec<f64>),
    /// A `,`-separated modification list; empty means explicitly unmodified.
    Modifications(Vec<Modification>),
    /// A `|`-separated spectra reference list.
    SpectraRefs(Vec<SpectraRef>),
    /// A reliability rating.
    Reliability(Reliability),
    /// A boolean, spelled `0`/`1` on the wire.
    Boolean(bool),
    /// A URI.
    Uri(String),
}

impl Value {
    /// Serialize this value back into its cell token. The column's data kind
    /// supplies the list separator where one is needed.
    pub fn to_token(&self, kind: DataKind) -> String {
        match self {
            Value::Text(s) | Value::Uri(s) => s.clone(),
            Value::Integer(i) => i.to_string(),
            Value::Double(d) => format_double(*d),
            Value::Param(p) => p.to_string(),
            Value::ParamList(list) => list
                .iter()
                .map(Param::to_string)
                .collect::<Vec<_>>()
                .join("|"),
            Value::StringList(list) => {
                let sep = match kind {
                    DataKind::StringList(sep) => sep,
                    _ => ',',
                };
                list.join(&sep.to_string())
            }
            Value::DoubleList(list) => {
                let sep = match kind {
                    DataKind::DoubleList(sep) => sep,
                    _ => '|',
                };
                list.iter()
                    .map(|d| format_double(*d))
                    .collect::<Vec<_>>()
                    .join(&sep.to_string())
            }
            Value::Modifications(list) => {
                if list.is_empty() {
                    "0".to_string()
                } else {
                    list.iter()
                        .map(Modification::to_string)
                        .collect::<Vec<_>>()
                        .join(",")
                }
            }
            Value::SpectraRefs(list) => list
                .iter()
                .map(SpectraRef::to_string)
                .collect::<Vec<_>>()
                .join("|"),
            Value::Reliability(r) => r.to_string(),
            Value::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
        }
    }
}

/// One parsed data row: the cells of the row keyed by logical column
/// position, in schema order.
///
/// Absent entries (`None`) cover both explicit `null` cells and cells
/// rejected by validation; consult the error list to tell them apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    table: Table,
    fields: Vec<(String, Option<Value>)>,
}

impl Record {
    /// Create an empty record for `table`.
    pub fn new(table: Table) -> Self {
        Self {
            table,
            fields: Vec::new(),
        }
    }

    /// The section this record belongs to.
    pub fn table(&self) -> Table {
        self.table
    }

    /// Append a cell under its logical position.
    pub fn push(&mut self, logical_position: impl Into<String>, value: Option<Value>) {
        self.fields.push((logical_position.into(), value));
    }

    /// Look up a cell by logical position.
    pub fn get(&self, logical_position: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(pos, _)| pos == logical_position)
            .and_then(|(_, v)| v.as_ref())
    }

    /// Whether the cell at `logical_position` is present in the record but
    /// absent (null or rejected).
    pub fn is_absent(&self, logical_position: &str) -> bool {
        self.fields
            .iter()
            .any(|(pos, v)| pos == logical_position && v.is_none())
    }

    /// Iterate `(logical_position, value)` pairs in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.fields
            .iter()
            .map(|(pos, v)| (pos.as_str(), v.as_ref()))
    }

    /// Number of cells in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no cells.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Serialize the record back into a data line against the columns it was
    /// parsed with, spelling absent cells `null`.
    pub fn to_data_line(&self, columns: &[MzTabColumn]) -> String {
        let mut line = self.table.data_prefix().to_string();
        for (pos, value) in &self.fields {
            line.push('\t');
            let kind = columns
                .iter()
                .find(|c| &c.logical_position == pos)
                .map(|c| c.kind)
                .unwrap_or(DataKind::Text);
            match value {
                Some(v) => line.push_str(&v.to_token(kind)),
                None => line.push_str("null"),
            }
        }
        line
    }
}
