use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A parameter drawn from a controlled vocabulary:
/// `[label, accession, name, value]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CvParam {
    /// The CV label, e.g. `MS`.
    pub label: String,
    /// The CV accession, e.g. `MS:1001207`.
    pub accession: String,
    /// The term name.
    pub name: String,
    /// Optional value attached to the term.
    pub value: Option<String>,
}

/// A free-form user parameter: only a name and an optional value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserParam {
    /// The parameter name.
    pub name: String,
    /// Optional value.
    pub value: Option<String>,
}

/// A controlled-vocabulary or user parameter. Immutable once constructed;
/// equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Param {
    /// A controlled-vocabulary parameter.
    Cv(CvParam),
    /// A free-form user parameter.
    User(UserParam),
}

impl Param {
    /// Construct a CV parameter.
    pub fn cv(
        label: impl Into<String>,
        accession: impl Into<String>,
        name: impl Into<String>,
        value: Option<&str>,
    ) -> Self {
        Param::Cv(CvParam {
            label: label.into(),
            accession: accession.into(),
            name: name.into(),
            value: value.map(str::to_string),
        })
    }

    /// Construct a user parameter.
    pub fn user(name: impl Into<String>, value: Option<&str>) -> Self {
        Param::User(UserParam {
            name: name.into(),
            value: value.map(str::to_string),
        })
    }

    /// The term name.
    pub fn name(&self) -> &str {
        match self {
            Param::Cv(p) => &p.name,
            Param::User(p) => &p.name,
        }
    }

    /// The attached value, if any.
    pub fn value(&self) -> Option<&str> {
        match self {
            Param::Cv(p) => p.value.as_deref(),
            Param::User(p) => p.value.as_deref(),
        }
    }

    /// The CV accession; `None` for user parameters.
    pub fn accession(&self) -> Option<&str> {
        match self {
            Param::Cv(p) => Some(&p.accession),
            Param::User(_) => None,
        }
    }
}

/// Reasons a parameter token failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamParseError {
    /// The token is not enclosed by square brackets.
    #[error("parameter is not enclosed by square brackets")]
    NotBracketed,
    /// Fewer than four comma-separated fields inside the brackets.
    #[error("parameter does not have four comma-separated fields")]
    TooFewFields,
    /// The name field is empty.
    #[error("parameter name is empty")]
    EmptyName,
}

/// Split the inside of a parameter on commas, honoring a double-quoted name
/// field so names containing commas survive.
fn split_param_fields(inner: &str) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0usize;
    for (i, c) in inner.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    fields.push(&inner[start..]);
    fields
}

impl FromStr for Param {
    type Err = ParamParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or(ParamParseError::NotBracketed)?;

        let fields = split_param_fields(inner);
        if fields.len() < 4 {
            return Err(ParamParseError::TooFewFields);
        }

        let label = fields[0].trim();
        let accession = fields[1].trim();
        let name = fields[2].trim().trim_matches('"').trim();
        // The value field takes everything after the third comma.
        let value = fields[3..].join(",");
        let value = value.trim();
        let value = (!value.is_empty()).then(|| value.to_string());

        if name.is_empty() {
            return Err(ParamParseError::EmptyName);
        }

        if label.is_empty() && accession.is_empty() {
            Ok(Param::User(UserParam {
                name: name.to_string(),
                value,
            }))
        } else {
            Ok(Param::Cv(CvParam {
                label: label.to_string(),
                accession: accession.to_string(),
                name: name.to_string(),
                value,
            }))
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let quote = |name: &str| {
            if name.contains(',') {
                format!("\"{name}\"")
            } else {
                name.to_string()
            }
        };
        match self {
            Param::Cv(p) => write!(
                f,
                "[{}, {}, {}, {}]",
                p.label,
                p.accession,
                quote(&p.name),
                p.value.as_deref().unwrap_or_default()
            ),
            Param::User(p) => write!(
                f,
                "[, , {}, {}]",
                quote(&p.name),
                p.value.as_deref().unwrap_or_default()
            ),
        }
    }
}
