//! The record line parser: parses one data line against a section's schema
//! and position mapping, running per-cell format checks and section-scoped
//! logical rules. A row always yields a [`Record`]; rejected cells resolve
//! to absent and the error list tells the caller which ones.

use std::collections::HashSet;

use crate::errors::{ErrorKind, ErrorList, MzTabError, MzTabException};
use crate::metadata::Metadata;
use crate::record::{Modification, Record, Reliability, SpectraRef, Value};
use crate::schema::{ColumnFactory, DataKind, MzTabColumn, PositionMapping};
use crate::section::Table;
use crate::util::{parse_double, split_outside_brackets};

type Fatal = Result<(), MzTabException>;

/// Parses the data lines of one table section, carrying the row-spanning
/// state (the set of accessions already seen in the protein section).
#[derive(Debug)]
pub struct RowParser {
    table: Table,
    seen_accessions: HashSet<String>,
}

impl RowParser {
    /// Create a row parser for `table`.
    pub fn new(table: Table) -> Self {
        Self {
            table,
            seen_accessions: HashSet::new(),
        }
    }

    /// Parse one data line. The cell count must match the header; a mismatch
    /// is reported and the overlapping cells are still parsed.
    pub fn parse(
        &mut self,
        line_number: usize,
        line: &str,
        factory: &ColumnFactory,
        mapping: &PositionMapping,
        metadata: &Metadata,
        errors: &mut ErrorList,
    ) -> Result<Record, MzTabException> {
        let cells: Vec<&str> = line.split('\t').collect();
        let data = &cells[1..];

        if data.len() != mapping.len() {
            errors.add(MzTabError::new(
                ErrorKind::CountMatch,
                line_number,
                format!(
                    "{} data line has {} cells but the header declared {} columns",
                    self.table,
                    data.len(),
                    mapping.len()
                ),
            ))?;
        }

        let mut record = Record::new(self.table);
        for (physical, raw) in data.iter().enumerate() {
            let Some(logical) = mapping.logical(physical) else {
                continue;
            };
            let Some(column) = factory.find_by_position(logical) else {
                continue;
            };
            let value = self.check_cell(column, raw, line_number, metadata, errors)?;
            record.push(logical, value);
        }
        Ok(record)
    }

    /// Run the per-cell format check and the section-scoped logical rules
    /// for one cell.
    fn check_cell(
        &mut self,
        column: &MzTabColumn,
        raw: &str,
        line: usize,
        metadata: &Metadata,
        errors: &mut ErrorList,
    ) -> Result<Option<Value>, MzTabException> {
        let raw = raw.trim();

        if raw.is_empty() {
            errors.add(MzTabError::new(
                ErrorKind::EmptyCell,
                line,
                format!("cell '{}' is blank; absence must be spelled null", column.header),
            ))?;
            return Ok(None);
        }

        // The literal token "null" (case-sensitive) is an explicit absent
        // value, except in non-nullable identifying fields.
        if raw == "null" {
            if self.is_accession_column(column) {
                errors.add(MzTabError::new(
                    ErrorKind::NotNull,
                    line,
                    format!("'{}' must not be null", column.header),
                ))?;
            }
            return Ok(None);
        }

        match column.kind {
            DataKind::Text | DataKind::Opt => {
                if self.is_accession_column(column) {
                    return self.check_protein_accession(raw, line, errors);
                }
                Ok(Some(Value::Text(raw.to_string())))
            }
            DataKind::Integer => match raw.parse::<i64>() {
                Ok(i) => Ok(Some(Value::Integer(i))),
                Err(_) => {
                    self.cell_error(ErrorKind::Integer, column, raw, line, errors)?;
                    Ok(None)
                }
            },
            DataKind::Double => match parse_double(raw) {
                Some(d) => Ok(Some(Value::Double(d))),
                None => {
                    self.cell_error(ErrorKind::Double, column, raw, line, errors)?;
                    Ok(None)
                }
            },
            DataKind::Fraction => match parse_double(raw) {
                Some(d) if d.is_nan() || (0.0..=1.0).contains(&d) => Ok(Some(Value::Double(d))),
                Some(d) => {
                    errors.add(MzTabError::new(
                        ErrorKind::ProteinCoverage,
                        line,
                        format!("'{}' value {d} is outside [0, 1]", column.header),
                    ))?;
                    Ok(None)
                }
                None => {
                    self.cell_error(ErrorKind::Double, column, raw, line, errors)?;
                    Ok(None)
                }
            },
            DataKind::Param => match raw.parse() {
                Ok(p) => Ok(Some(Value::Param(p))),
                Err(e) => {
                    self.cell_error_with(ErrorKind::Param, column, raw, line, errors, &e)?;
                    Ok(None)
                }
            },
            DataKind::ParamList => {
                let mut params = Vec::new();
                for token in split_outside_brackets(raw, '|') {
                    match token.trim().parse() {
                        Ok(p) => params.push(p),
                        Err(e) => {
                            self.cell_error_with(
                                ErrorKind::ParamList,
                                column,
                                token,
                                line,
                                errors,
                                &e,
                            )?;
                            return Ok(None);
                        }
                    }
                }
                Ok(Some(Value::ParamList(params)))
            }
            DataKind::StringList(sep) => {
                let mut items = Vec::new();
                for token in split_outside_brackets(raw, sep) {
                    let token = token.trim();
                    if token.is_empty() {
                        self.cell_error(ErrorKind::StringList, column, raw, line, errors)?;
                        return Ok(None);
                    }
                    items.push(token.to_string());
                }
                Ok(Some(Value::StringList(items)))
            }
            DataKind::DoubleList(sep) => {
                let mut items = Vec::new();
                for token in raw.split(sep) {
                    match parse_double(token.trim()) {
                        Some(d) => items.push(d),
                        None => {
                            self.cell_error(ErrorKind::DoubleList, column, raw, line, errors)?;
                            return Ok(None);
                        }
                    }
                }
                Ok(Some(Value::DoubleList(items)))
            }
            DataKind::ModificationList => self.check_modifications(raw, line, errors),
            DataKind::SpectraRefList => {
                let mut refs = Vec::new();
                for token in raw.split('|') {
                    let Ok(r) = token.trim().parse::<SpectraRef>() else {
                        self.cell_error(ErrorKind::SpectraRef, column, token, line, errors)?;
                        return Ok(None);
                    };
                    if !metadata.ms_runs.contains(r.ms_run) {
                        errors.add(MzTabError::new(
                            ErrorKind::UnresolvedReference,
                            line,
                            format!("'{token}' references undeclared ms_run[{}]", r.ms_run),
                        ))?;
                        return Ok(None);
                    }
                    refs.push(r);
                }
                Ok(Some(Value::SpectraRefs(refs)))
            }
            DataKind::Reliability => match Reliability::from_token(raw) {
                Some(r) => Ok(Some(Value::Reliability(r))),
                None => {
                    self.cell_error(ErrorKind::Reliability, column, raw, line, errors)?;
                    Ok(None)
                }
            },
            DataKind::Boolean => match raw {
                "0" => Ok(Some(Value::Boolean(false))),
                "1" => Ok(Some(Value::Boolean(true))),
                _ => {
                    self.cell_error(ErrorKind::MzBoolean, column, raw, line, errors)?;
                    Ok(None)
                }
            },
            DataKind::Uri => {
                if raw.contains(':') {
                    Ok(Some(Value::Uri(raw.to_string())))
                } else {
                    self.cell_error(ErrorKind::Uri, column, raw, line, errors)?;
                    Ok(None)
                }
            }
        }
    }

    /// First occurrence of a protein accession is accepted; a repeat on a
    /// later row is rejected, not re-added.
    fn check_protein_accession(
        &mut self,
        raw: &str,
        line: usize,
        errors: &mut ErrorList,
    ) -> Result<Option<Value>, MzTabException> {
        if !self.seen_accessions.insert(raw.to_string()) {
            errors.add(MzTabError::new(
                ErrorKind::DuplicationAccession,
                line,
                format!("accession '{raw}' already appeared earlier in the protein section"),
            ))?;
            return Ok(None);
        }
        Ok(Some(Value::Text(raw.to_string())))
    }

    /// Parse a modification list and apply the granularity rules: positional
    /// ambiguity is illegal at protein granularity, and protein/peptide
    /// modifications should be drawn from UNIMOD or PSI-MOD.
    fn check_modifications(
        &self,
        raw: &str,
        line: usize,
        errors: &mut ErrorList,
    ) -> Result<Option<Value>, MzTabException> {
        // "0" means the software determined there are no modifications.
        if raw == "0" {
            return Ok(Some(Value::Modifications(Vec::new())));
        }

        let mut mods = Vec::new();
        for token in split_outside_brackets(raw, ',') {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            match token.parse::<Modification>() {
                Ok(m) => mods.push(m),
                Err(e) => {
                    errors.add(MzTabError::new(
                        ErrorKind::Modification,
                        line,
                        format!("'{token}': {e}"),
                    ))?;
                    return Ok(None);
                }
            }
        }

        for m in &mods {
            if self.table == Table::Protein && m.is_ambiguous() {
                errors.add(MzTabError::new(
                    ErrorKind::AmbiguityMod,
                    line,
                    format!("'{m}' reports ambiguous positions at protein granularity"),
                ))?;
            }
            if matches!(self.table, Table::Protein | Table::Peptide) && m.prefix == "CHEMMOD" {
                errors.add(MzTabError::new(
                    ErrorKind::ChemMods,
                    line,
                    format!("'{m}' is outside the UNIMOD/PSI-MOD convention"),
                ))?;
            }
        }

        Ok(Some(Value::Modifications(mods)))
    }

    fn is_accession_column(&self, column: &MzTabColumn) -> bool {
        column.name == "accession" && self.table == Table::Protein
    }

    fn cell_error(
        &self,
        kind: ErrorKind,
        column: &MzTabColumn,
        raw: &str,
        line: usize,
        errors: &mut ErrorList,
    ) -> Fatal {
        errors.add(MzTabError::new(
            kind,
            line,
            format!("'{}' cell holds invalid value '{raw}'", column.header),
        ))
    }

    fn cell_error_with(
        &self,
        kind: ErrorKind,
        column: &MzTabColumn,
        raw: &str,
        line: usize,
        errors: &mut ErrorList,
        detail: &dyn std::fmt::Display,
    ) -> Fatal {
        errors.add(MzTabError::new(
            kind,
            line,
            format!("'{}' cell holds invalid value '{raw}': {detail}", column.header),
        ))
    }
}
