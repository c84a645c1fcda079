use crate::controlled_vocabulary::is_boolean_cv_accession;
use crate::errors::{ErrorKind, ErrorList, MzTabError, MzTabException};
use crate::metadata::{ElementKind, Metadata};
use crate::section::Table;

use super::{stable_columns, ColumnDef, DataKind, Indexing, MzTabColumn};

/// The resolved logical schema of one table section, built from its header
/// line and the metadata registry.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFactory {
    table: Table,
    columns: Vec<MzTabColumn>,
}

impl ColumnFactory {
    /// Resolve a header line's tokens (without the `PRH`-style prefix)
    /// into an ordered logical schema.
    ///
    /// Indexed columns are validated against the registry: an unknown id is
    /// a logical error and drops the column. Unrecognized non-`opt_` tokens
    /// and duplicate logical positions are format errors. A missing
    /// mandatory column is fatal for the section.
    pub fn from_header(
        table: Table,
        tokens: &[&str],
        metadata: &Metadata,
        line: usize,
        errors: &mut ErrorList,
    ) -> Result<Self, MzTabException> {
        let mut columns: Vec<MzTabColumn> = Vec::with_capacity(tokens.len());

        for token in tokens {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }

            let resolved = if let Some(rest) = token.strip_prefix("opt_") {
                resolve_opt_column(token, rest, metadata, line, errors)?
            } else {
                resolve_stable_column(table, token, metadata, line, errors)?
            };

            let Some(column) = resolved else { continue };

            if columns
                .iter()
                .any(|c| c.logical_position == column.logical_position)
            {
                errors.add(MzTabError::new(
                    ErrorKind::DuplicateColumn,
                    line,
                    format!("column '{token}' appears more than once in the {table} header"),
                ))?;
                continue;
            }
            columns.push(column);
        }

        // Every non-indexed mandatory column must have been seen.
        for def in stable_columns(table) {
            if !def.optional
                && def.indexing == Indexing::None
                && !columns.iter().any(|c| c.name == def.name)
            {
                return Err(MzTabException::MissingColumn {
                    section: table,
                    column: def.name.to_string(),
                    line,
                });
            }
        }

        log::debug!(
            "resolved {} header into {} logical columns",
            table,
            columns.len()
        );
        Ok(Self { table, columns })
    }

    /// The section this schema belongs to.
    pub fn table(&self) -> Table {
        self.table
    }

    /// The resolved columns in header order.
    pub fn columns(&self) -> &[MzTabColumn] {
        &self.columns
    }

    /// Look up a column by its header token.
    pub fn find_by_header(&self, header: &str) -> Option<&MzTabColumn> {
        self.columns.iter().find(|c| c.header == header)
    }

    /// Look up a column by its logical position.
    pub fn find_by_position(&self, logical_position: &str) -> Option<&MzTabColumn> {
        self.columns
            .iter()
            .find(|c| c.logical_position == logical_position)
    }
}

/// Parse `name[n]` against a definition prefix; returns the id.
fn parse_single_index<'a>(token: &'a str, name: &str) -> Option<(u32, &'a str)> {
    let rest = token.strip_prefix(name)?.strip_prefix('[')?;
    let (id, rest) = rest.split_once(']')?;
    let id: u32 = id.parse().ok()?;
    (id > 0).then_some((id, rest))
}

fn column_from_def(def: &ColumnDef, header: &str, element: Option<(ElementKind, u32)>, logical_position: String) -> MzTabColumn {
    MzTabColumn {
        name: def.name.to_string(),
        header: header.to_string(),
        logical_position,
        kind: def.kind,
        optional: def.optional,
        element,
    }
}

/// Match one non-`opt_` header token against the stable column table.
fn resolve_stable_column(
    table: Table,
    token: &str,
    metadata: &Metadata,
    line: usize,
    errors: &mut ErrorList,
) -> Result<Option<MzTabColumn>, MzTabException> {
    for def in stable_columns(table) {
        match def.indexing {
            Indexing::None => {
                if token == def.name {
                    return Ok(Some(column_from_def(
                        def,
                        token,
                        None,
                        format!("{:02}", def.order),
                    )));
                }
            }
            Indexing::Score => {
                if token.starts_with(def.name) && !token.contains("_ms_run[") {
                    let Some((id, rest)) = parse_single_index(token, def.name) else {
                        if token[def.name.len()..].starts_with('[') {
                            errors.add(MzTabError::new(
                                ErrorKind::SearchEngineScoreColumn,
                                line,
                                format!("malformed score column '{token}'"),
                            ))?;
                            return Ok(None);
                        }
                        continue;
                    };
                    if !rest.is_empty() {
                        continue;
                    }
                    if !metadata.search_engine_scores(table).contains(id) {
                        errors.add(MzTabError::new(
                            ErrorKind::UnresolvedReference,
                            line,
                            format!(
                                "column '{token}' references an undeclared {} search engine score [{id}]",
                                table
                            ),
                        ))?;
                        return Ok(None);
                    }
                    return Ok(Some(column_from_def(
                        def,
                        token,
                        Some((ElementKind::SearchEngineScore, id)),
                        format!("{:02}_{id}", def.order),
                    )));
                }
            }
            Indexing::ScoreMsRun => {
                if token.starts_with(def.name) && token.contains("_ms_run[") {
                    let Some((score_id, rest)) = parse_single_index(token, def.name) else {
                        continue;
                    };
                    let Some((run_id, rest)) = parse_single_index(rest, "_ms_run") else {
                        errors.add(MzTabError::new(
                            ErrorKind::SearchEngineScoreColumn,
                            line,
                            format!("malformed per-run score column '{token}'"),
                        ))?;
                        return Ok(None);
                    };
                    if !rest.is_empty() {
                        continue;
                    }
                    if !metadata.search_engine_scores(table).contains(score_id) {
                        errors.add(MzTabError::new(
                            ErrorKind::UnresolvedReference,
                            line,
                            format!(
                                "column '{token}' references an undeclared {table} search engine score [{score_id}]"
                            ),
                        ))?;
                        return Ok(None);
                    }
                    if !metadata.ms_runs.contains(run_id) {
                        errors.add(MzTabError::new(
                            ErrorKind::UnresolvedReference,
                            line,
                            format!("column '{token}' references undeclared ms_run[{run_id}]"),
                        ))?;
                        return Ok(None);
                    }
                    return Ok(Some(column_from_def(
                        def,
                        token,
                        Some((ElementKind::MsRun, run_id)),
                        format!("{:02}_{score_id}_{run_id}", def.order),
                    )));
                }
            }
            Indexing::MsRun => {
                let prefix = format!("{}_ms_run", def.name);
                if token.starts_with(&prefix) {
                    let Some((id, rest)) = parse_single_index(token, &prefix) else {
                        continue;
                    };
                    if !rest.is_empty() {
                        continue;
                    }
                    if !metadata.ms_runs.contains(id) {
                        errors.add(MzTabError::new(
                            ErrorKind::UnresolvedReference,
                            line,
                            format!("column '{token}' references undeclared ms_run[{id}]"),
                        ))?;
                        return Ok(None);
                    }
                    return Ok(Some(column_from_def(
                        def,
                        token,
                        Some((ElementKind::MsRun, id)),
                        format!("{:02}_{id}", def.order),
                    )));
                }
            }
            Indexing::Assay | Indexing::StudyVariable => {
                if token.starts_with(def.name) {
                    let Some((id, rest)) = parse_single_index(token, def.name) else {
                        if token[def.name.len()..].starts_with('[') {
                            errors.add(MzTabError::new(
                                ErrorKind::AbundanceColumn,
                                line,
                                format!("malformed abundance column '{token}'"),
                            ))?;
                            return Ok(None);
                        }
                        continue;
                    };
                    if !rest.is_empty() {
                        continue;
                    }
                    let (kind, known) = if def.indexing == Indexing::Assay {
                        (ElementKind::Assay, metadata.assays.contains(id))
                    } else {
                        (ElementKind::StudyVariable, metadata.study_variables.contains(id))
                    };
                    if !known {
                        errors.add(MzTabError::new(
                            ErrorKind::UnresolvedReference,
                            line,
                            format!("column '{token}' references undeclared {kind}[{id}]"),
                        ))?;
                        return Ok(None);
                    }
                    return Ok(Some(column_from_def(
                        def,
                        token,
                        Some((kind, id)),
                        format!("{:02}_{id}", def.order),
                    )));
                }
            }
        }
    }

    errors.add(MzTabError::new(
        ErrorKind::StableColumn,
        line,
        format!("'{token}' is not a column of the {table} section"),
    ))?;
    Ok(None)
}

/// Resolve an `opt_{global|assay[n]|ms_run[n]|study_variable[n]}_{name}`
/// column, with optional `cv_{accession}_{name}` qualification.
fn resolve_opt_column(
    token: &str,
    rest: &str,
    metadata: &Metadata,
    line: usize,
    errors: &mut ErrorList,
) -> Result<Option<MzTabColumn>, MzTabException> {
    let (element, name) = if let Some(name) = rest.strip_prefix("global_") {
        (None, name)
    } else if let Some((id, tail)) = parse_single_index(rest, "assay") {
        let Some(name) = tail.strip_prefix('_') else {
            return malformed_opt(token, line, errors);
        };
        if !metadata.assays.contains(id) {
            return unresolved_opt(token, ElementKind::Assay, id, line, errors);
        }
        (Some((ElementKind::Assay, id)), name)
    } else if let Some((id, tail)) = parse_single_index(rest, "ms_run") {
        let Some(name) = tail.strip_prefix('_') else {
            return malformed_opt(token, line, errors);
        };
        if !metadata.ms_runs.contains(id) {
            return unresolved_opt(token, ElementKind::MsRun, id, line, errors);
        }
        (Some((ElementKind::MsRun, id)), name)
    } else if let Some((id, tail)) = parse_single_index(rest, "study_variable") {
        let Some(name) = tail.strip_prefix('_') else {
            return malformed_opt(token, line, errors);
        };
        if !metadata.study_variables.contains(id) {
            return unresolved_opt(token, ElementKind::StudyVariable, id, line, errors);
        }
        (Some((ElementKind::StudyVariable, id)), name)
    } else {
        return malformed_opt(token, line, errors);
    };

    if name.is_empty() {
        return malformed_opt(token, line, errors);
    }

    // CV-qualified names carry an accession: cv_MS:1002217_decoy_peptide.
    let kind = if let Some(cv_rest) = name.strip_prefix("cv_") {
        let Some((accession, cv_name)) = cv_rest.split_once('_') else {
            errors.add(MzTabError::new(
                ErrorKind::OptionalCvParamColumn,
                line,
                format!("'{token}' does not follow cv_ACCESSION_name"),
            ))?;
            return Ok(None);
        };
        if accession.is_empty() || cv_name.is_empty() {
            errors.add(MzTabError::new(
                ErrorKind::OptionalCvParamColumn,
                line,
                format!("'{token}' does not follow cv_ACCESSION_name"),
            ))?;
            return Ok(None);
        }
        if is_boolean_cv_accession(accession) {
            DataKind::Boolean
        } else {
            DataKind::Opt
        }
    } else {
        DataKind::Opt
    };

    Ok(Some(MzTabColumn {
        name: token.to_string(),
        header: token.to_string(),
        logical_position: format!("99_{token}"),
        kind,
        optional: true,
        element,
    }))
}

fn malformed_opt(
    token: &str,
    line: usize,
    errors: &mut ErrorList,
) -> Result<Option<MzTabColumn>, MzTabException> {
    errors.add(MzTabError::new(
        ErrorKind::MsRunOptionalColumn,
        line,
        format!("'{token}' does not follow opt_{{global|assay[n]|ms_run[n]|study_variable[n]}}_name"),
    ))?;
    Ok(None)
}

fn unresolved_opt(
    token: &str,
    kind: ElementKind,
    id: u32,
    line: usize,
    errors: &mut ErrorList,
) -> Result<Option<MzTabColumn>, MzTabException> {
    errors.add(MzTabError::new(
        ErrorKind::UnresolvedReference,
        line,
        format!("column '{token}' references undeclared {kind}[{id}]"),
    ))?;
    Ok(None)
}
