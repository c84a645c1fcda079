use super::DuplicateId;

/// Errors from direct mutation of the metadata registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MetadataError {
    /// An indexed element id was registered twice in the same collection.
    #[error("{element}[{id}] is already defined")]
    DuplicateElement {
        /// The element collection name, e.g. `sample`.
        element: &'static str,
        /// The repeated id.
        id: u32,
    },
}

impl MetadataError {
    pub(crate) fn duplicate(element: &'static str, err: DuplicateId) -> Self {
        MetadataError::DuplicateElement {
            element,
            id: err.0,
        }
    }
}
