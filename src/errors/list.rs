use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Category, ErrorKind, MzTabException, Severity};

/// One recoverable diagnostic: what went wrong, where, and a human-readable
/// detail string.
///
/// The severity is fixed by the kind at creation and never changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MzTabError {
    /// The typed kind of this diagnostic.
    pub kind: ErrorKind,
    /// 1-based line number of the offending line.
    pub line: usize,
    /// Free-text detail.
    pub message: String,
}

impl MzTabError {
    /// Create a diagnostic for `kind` at `line`.
    pub fn new(kind: ErrorKind, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            line,
            message: message.into(),
        }
    }

    /// The severity fixed by this diagnostic's kind.
    pub fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// The category fixed by this diagnostic's kind.
    pub fn category(&self) -> Category {
        self.kind.category()
    }

    /// The stable numeric code of this diagnostic's kind.
    pub fn code(&self) -> u32 {
        self.kind.code()
    }
}

impl fmt::Display for MzTabError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}-{}] {} at line {}: {}",
            self.category(),
            self.code(),
            self.severity(),
            self.line,
            self.message
        )
    }
}

/// The accumulated diagnostics of one parse run.
///
/// The list is configured with a minimum reporting level; [`ErrorList::add`]
/// discards entries below that level at insertion time and never
/// retroactively promotes or demotes anything. A configurable cap bounds the
/// total number of retained entries: once reached, the parse is aborted with
/// [`MzTabException::ErrorOverflow`] rather than grinding through a hopeless
/// file.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorList {
    errors: Vec<MzTabError>,
    min_level: Severity,
    max_errors: usize,
}

impl ErrorList {
    /// Default cap on retained entries.
    pub const DEFAULT_MAX_ERRORS: usize = 500;

    /// Create a list retaining diagnostics at `min_level` or above, bounded
    /// by `max_errors` entries.
    pub fn new(min_level: Severity, max_errors: usize) -> Self {
        Self {
            errors: Vec::new(),
            min_level,
            max_errors,
        }
    }

    /// The configured minimum reporting level.
    pub fn min_level(&self) -> Severity {
        self.min_level
    }

    /// Record a diagnostic. Entries below the configured minimum level are
    /// discarded; reaching the cap raises the fatal overflow condition.
    pub fn add(&mut self, error: MzTabError) -> Result<(), MzTabException> {
        if error.severity() < self.min_level {
            log::debug!("suppressed below {}: {}", self.min_level, error);
            return Ok(());
        }
        if self.errors.len() >= self.max_errors {
            return Err(MzTabException::ErrorOverflow {
                cap: self.max_errors,
                line: error.line,
            });
        }
        log::debug!("{error}");
        self.errors.push(error);
        Ok(())
    }

    /// Number of retained diagnostics.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether no diagnostics were retained.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Retained diagnostics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &MzTabError> {
        self.errors.iter()
    }

    /// The `idx`-th retained diagnostic.
    pub fn get(&self, idx: usize) -> Option<&MzTabError> {
        self.errors.get(idx)
    }

    /// The most recently retained diagnostic.
    pub fn last(&self) -> Option<&MzTabError> {
        self.errors.last()
    }

    /// All retained diagnostics with the given stable code.
    pub fn by_code(&self, code: u32) -> impl Iterator<Item = &MzTabError> {
        self.errors.iter().filter(move |e| e.code() == code)
    }

    /// Whether at least one diagnostic of `kind` was retained.
    pub fn contains(&self, kind: ErrorKind) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    /// Render the retained diagnostics as a JSON array of structured records.
    pub fn to_json(&self) -> serde_json::Result<String> {
        #[derive(Serialize)]
        struct ErrorRecord<'a> {
            code: u32,
            category: Category,
            severity: Severity,
            line: usize,
            message: &'a str,
        }

        let records: Vec<ErrorRecord<'_>> = self
            .errors
            .iter()
            .map(|e| ErrorRecord {
                code: e.code(),
                category: e.category(),
                severity: e.severity(),
                line: e.line,
                message: &e.message,
            })
            .collect();
        serde_json::to_string_pretty(&records)
    }
}

impl Default for ErrorList {
    fn default() -> Self {
        Self::new(Severity::Error, Self::DEFAULT_MAX_ERRORS)
    }
}

impl fmt::Display for ErrorList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{error}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_at_insertion() {
        let mut list = ErrorList::new(Severity::Error, 10);
        list.add(MzTabError::new(ErrorKind::ChemMods, 3, "warn-level"))
            .unwrap();
        list.add(MzTabError::new(ErrorKind::MzBoolean, 4, "error-level"))
            .unwrap();

        assert_eq!(list.len(), 1);
        assert_eq!(list.get(0).unwrap().kind, ErrorKind::MzBoolean);
    }

    #[test]
    fn warn_level_list_keeps_warnings() {
        let mut list = ErrorList::new(Severity::Warn, 10);
        list.add(MzTabError::new(ErrorKind::ChemMods, 3, "kept"))
            .unwrap();
        list.add(MzTabError::new(ErrorKind::DuplicationDefine, 4, "dropped"))
            .unwrap();

        assert_eq!(list.len(), 1);
        assert!(list.contains(ErrorKind::ChemMods));
    }

    #[test]
    fn overflow_is_fatal() {
        let mut list = ErrorList::new(Severity::Error, 2);
        for line in 1..=2 {
            list.add(MzTabError::new(ErrorKind::Double, line, "bad"))
                .unwrap();
        }
        let err = list
            .add(MzTabError::new(ErrorKind::Double, 3, "bad"))
            .unwrap_err();
        assert!(matches!(err, MzTabException::ErrorOverflow { cap: 2, line: 3 }));
    }

    #[test]
    fn lookup_by_code() {
        let mut list = ErrorList::default();
        list.add(MzTabError::new(ErrorKind::Reliability, 9, "bad value"))
            .unwrap();
        assert_eq!(list.by_code(1018).count(), 1);
        assert_eq!(list.by_code(1017).count(), 0);
    }

    #[test]
    fn renders_structured_records() {
        let mut list = ErrorList::default();
        list.add(MzTabError::new(ErrorKind::NotNull, 2, "accession is null"))
            .unwrap();
        let json = list.to_json().unwrap();
        assert!(json.contains("\"code\": 2001"));
        assert!(json.contains("\"line\": 2"));
    }
}
