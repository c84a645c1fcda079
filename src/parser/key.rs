use std::fmt;

/// A tokenized metadata key: `element[index]-property[subindex]-subproperty`.
///
/// Examples:
///
/// | Key | element | index | property | property_index | sub_property |
/// |-----|---------|-------|----------|----------------|--------------|
/// | `mzTab-version` | `mzTab` | - | `version` | - | - |
/// | `sample_processing[12]` | `sample_processing` | 12 | - | - | - |
/// | `instrument[1]-analyzer[2]` | `instrument` | 1 | `analyzer` | 2 | - |
/// | `assay[2]-quantification_mod[1]-site` | `assay` | 2 | `quantification_mod` | 1 | `site` |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataKey<'a> {
    /// The element token.
    pub element: &'a str,
    /// The element index, if bracketed.
    pub index: Option<u32>,
    /// The property token following the first `-`.
    pub property: Option<&'a str>,
    /// The property sub-index, if bracketed.
    pub property_index: Option<u32>,
    /// A second-level property, e.g. the `site` of a quantification mod.
    pub sub_property: Option<&'a str>,
}

/// Reasons a metadata key failed to tokenize.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The key is empty.
    #[error("empty metadata key")]
    Empty,
    /// A bracketed index is not a positive integer.
    #[error("index '{0}' is not a positive integer")]
    BadIndex(String),
    /// Bracket syntax is malformed.
    #[error("malformed bracket syntax in '{0}'")]
    BadBrackets(String),
}

/// Parse one `name[index]` segment; returns the name, the optional index and
/// whatever follows the segment (empty or starting with `-`).
fn parse_segment(s: &str) -> Result<(&str, Option<u32>, &str), KeyError> {
    let name_end = s.find(|c: char| c == '[' || c == '-').unwrap_or(s.len());
    let name = &s[..name_end];
    if name.is_empty() {
        return Err(KeyError::Empty);
    }
    let rest = &s[name_end..];

    if let Some(rest) = rest.strip_prefix('[') {
        let (index, rest) = rest
            .split_once(']')
            .ok_or_else(|| KeyError::BadBrackets(s.to_string()))?;
        let index: u32 = index
            .trim()
            .parse()
            .map_err(|_| KeyError::BadIndex(index.to_string()))?;
        if index == 0 {
            return Err(KeyError::BadIndex(index.to_string()));
        }
        if !rest.is_empty() && !rest.starts_with('-') {
            return Err(KeyError::BadBrackets(s.to_string()));
        }
        Ok((name, Some(index), rest))
    } else {
        Ok((name, None, rest))
    }
}

/// Tokenize a metadata key against the grammar
/// `element[index]?(-property[subindex]?(-subproperty)?)?`.
pub fn parse_key(key: &str) -> Result<MetadataKey<'_>, KeyError> {
    let key = key.trim();
    if key.is_empty() {
        return Err(KeyError::Empty);
    }

    let (element, index, rest) = parse_segment(key)?;
    let mut parsed = MetadataKey {
        element,
        index,
        property: None,
        property_index: None,
        sub_property: None,
    };

    if let Some(rest) = rest.strip_prefix('-') {
        let (property, property_index, rest) = parse_segment(rest)?;
        parsed.property = Some(property);
        parsed.property_index = property_index;

        if let Some(rest) = rest.strip_prefix('-') {
            if rest.is_empty() || rest.contains(|c: char| c == '[' || c == ']') {
                return Err(KeyError::BadBrackets(key.to_string()));
            }
            parsed.sub_property = Some(rest);
        }
    }

    Ok(parsed)
}

impl fmt::Display for MetadataKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.element)?;
        if let Some(i) = self.index {
            write!(f, "[{i}]")?;
        }
        if let Some(p) = self.property {
            write!(f, "-{p}")?;
            if let Some(i) = self.property_index {
                write!(f, "[{i}]")?;
            }
        }
        if let Some(s) = self.sub_property {
            write!(f, "-{s}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_scalar_keys() {
        let k = parse_key("title").unwrap();
        assert_eq!(k.element, "title");
        assert_eq!(k.index, None);
        assert_eq!(k.property, None);
    }

    #[test]
    fn dashed_scalar_keys() {
        let k = parse_key("mzTab-version").unwrap();
        assert_eq!(k.element, "mzTab");
        assert_eq!(k.property, Some("version"));
    }

    #[test]
    fn indexed_element() {
        let k = parse_key("sample_processing[12]").unwrap();
        assert_eq!(k.element, "sample_processing");
        assert_eq!(k.index, Some(12));
        assert_eq!(k.property, None);
    }

    #[test]
    fn indexed_property() {
        let k = parse_key("instrument[1]-analyzer[2]").unwrap();
        assert_eq!(k.element, "instrument");
        assert_eq!(k.index, Some(1));
        assert_eq!(k.property, Some("analyzer"));
        assert_eq!(k.property_index, Some(2));
    }

    #[test]
    fn two_level_property() {
        let k = parse_key("assay[2]-quantification_mod[1]-site").unwrap();
        assert_eq!(k.element, "assay");
        assert_eq!(k.index, Some(2));
        assert_eq!(k.property, Some("quantification_mod"));
        assert_eq!(k.property_index, Some(1));
        assert_eq!(k.sub_property, Some("site"));
    }

    #[test]
    fn rejects_malformed_keys() {
        assert!(matches!(parse_key(""), Err(KeyError::Empty)));
        assert!(matches!(
            parse_key("instrument[1-name"),
            Err(KeyError::BadBrackets(_))
        ));
        assert!(matches!(
            parse_key("instrument[zero]-name"),
            Err(KeyError::BadIndex(_))
        ));
        assert!(matches!(
            parse_key("instrument[0]-name"),
            Err(KeyError::BadIndex(_))
        ));
        assert!(matches!(
            parse_key("instrument[1]name"),
            Err(KeyError::BadBrackets(_))
        ));
    }

    #[test]
    fn display_roundtrip() {
        for key in [
            "mzTab-version",
            "sample_processing[12]",
            "instrument[1]-analyzer[2]",
            "assay[2]-quantification_mod[1]-site",
        ] {
            assert_eq!(parse_key(key).unwrap().to_string(), key);
        }
    }
}
