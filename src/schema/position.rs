use super::ColumnFactory;

/// The physical-to-logical reconciliation of one header line.
///
/// Header columns may be declared in any physical order; data rows are
/// interpreted through this mapping so each cell lands on its logical
/// column. Built once per section header and reused for every data row of
/// that section.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionMapping {
    /// For each physical column index, the logical position it maps to.
    /// `None` marks header tokens the factory rejected; their cells are
    /// skipped (the factory already reported them).
    mapping: Vec<Option<String>>,
}

impl PositionMapping {
    /// Map the physical token order of a header line onto `factory`'s
    /// logical schema.
    pub fn new(factory: &ColumnFactory, tokens: &[&str]) -> Self {
        let mapping = tokens
            .iter()
            .map(|token| {
                factory
                    .find_by_header(token.trim())
                    .map(|c| c.logical_position.clone())
            })
            .collect();
        Self { mapping }
    }

    /// The logical position of the `physical`-th column, if that header
    /// token resolved.
    pub fn logical(&self, physical: usize) -> Option<&str> {
        self.mapping.get(physical).and_then(|m| m.as_deref())
    }

    /// Number of physical columns covered by the mapping.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Whether the mapping covers no columns.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    /// Whether every physical token resolved to a logical position; when
    /// false the header token set did not exactly match the schema's set.
    pub fn is_exact(&self) -> bool {
        self.mapping.iter().all(Option::is_some)
    }
}
