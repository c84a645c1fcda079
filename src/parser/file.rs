//! The file-level state machine: drives sequential consumption of lines,
//! enforcing section ordering and single-header-per-section, and assembles
//! the parse output.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use flate2::bufread::GzDecoder;

use crate::errors::{ErrorKind, ErrorList, MzTabError, MzTabException, Severity};
use crate::metadata::{ColUnit, Metadata};
use crate::record::Record;
use crate::schema::{ColumnFactory, PositionMapping};
use crate::section::{LineKind, Table};

use super::metadata::parse_mtd_line;
use super::row::RowParser;

/// Configuration of one parse run.
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    /// Minimum severity retained in the error list.
    pub min_level: Severity,
    /// Cap on retained errors; reaching it aborts the parse.
    pub max_errors: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            min_level: Severity::Error,
            max_errors: ErrorList::DEFAULT_MAX_ERRORS,
        }
    }
}

/// One parsed table section: its resolved schema, the physical-to-logical
/// mapping of its header, and its records in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableData {
    /// The resolved logical schema.
    pub columns: ColumnFactory,
    /// The header's position mapping.
    pub mapping: PositionMapping,
    /// Parsed records in file order.
    pub records: Vec<Record>,
}

/// The output of one parse run: the populated metadata, the comments, the
/// per-section schemas and records, and the accumulated diagnostics.
#[derive(Debug)]
pub struct MzTabFile {
    /// The populated metadata block.
    pub metadata: Metadata,
    /// `COM` lines with their line numbers.
    pub comments: Vec<(usize, String)>,
    sections: [Option<TableData>; 4],
    /// Diagnostics retained at the configured minimum severity.
    pub errors: ErrorList,
}

impl MzTabFile {
    /// The parsed data of `table`, if the section was present.
    pub fn section(&self, table: Table) -> Option<&TableData> {
        self.sections[table.order()].as_ref()
    }

    /// The records of `table`; empty if the section was absent.
    pub fn records(&self, table: Table) -> &[Record] {
        self.section(table).map_or(&[], |s| &s.records)
    }
}

/// A fatal condition together with the diagnostics accumulated up to it.
/// The parse output is incomplete and unusable.
#[derive(Debug, thiserror::Error)]
#[error("{exception}")]
pub struct ParseFailure {
    /// The fatal condition that aborted the parse.
    pub exception: MzTabException,
    /// Diagnostics accumulated before the abort.
    pub errors: ErrorList,
}

struct TableSlot {
    factory: ColumnFactory,
    mapping: PositionMapping,
    rows: RowParser,
    records: Vec<Record>,
}

/// The line-by-line mzTab parser.
///
/// Feed physical lines in order through [`MzTabParser::parse_line`]; fatal
/// conditions surface as errors and abort the run, recoverable diagnostics
/// accumulate. [`MzTabParser::finish`] assembles the output.
pub struct MzTabParser {
    metadata: Metadata,
    comments: Vec<(usize, String)>,
    errors: ErrorList,
    slots: [Option<TableSlot>; 4],
    open: Option<Table>,
}

impl MzTabParser {
    /// Create a parser with `config`.
    pub fn new(config: ParserConfig) -> Self {
        Self {
            metadata: Metadata::new(),
            comments: Vec::new(),
            errors: ErrorList::new(config.min_level, config.max_errors),
            slots: [None, None, None, None],
            open: None,
        }
    }

    /// The metadata accumulated so far.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// The diagnostics accumulated so far.
    pub fn errors(&self) -> &ErrorList {
        &self.errors
    }

    /// Consume one physical line. Blank lines are skipped; a fatal condition
    /// aborts the parse.
    pub fn parse_line(&mut self, line_number: usize, line: &str) -> Result<(), MzTabException> {
        if line.trim().is_empty() {
            return Ok(());
        }
        let prefix = line.split('\t').next().unwrap_or_default().trim();

        match LineKind::from_prefix(prefix) {
            None => self.errors.add(MzTabError::new(
                ErrorKind::LinePrefix,
                line_number,
                format!("unrecognized line prefix '{prefix}'"),
            )),
            Some(LineKind::Comment) => {
                let text = line.split_once('\t').map_or("", |(_, rest)| rest.trim());
                self.comments.push((line_number, text.to_string()));
                Ok(())
            }
            Some(LineKind::Metadata) => {
                if self.open.is_some() {
                    return Err(MzTabException::MetadataAfterTable { line: line_number });
                }
                parse_mtd_line(line_number, line, &mut self.metadata, &mut self.errors)
            }
            Some(LineKind::Header(table)) => self.open_section(table, line_number, line),
            Some(LineKind::Data(table)) => self.data_line(table, line_number, line),
        }
    }

    fn open_section(
        &mut self,
        table: Table,
        line_number: usize,
        line: &str,
    ) -> Result<(), MzTabException> {
        if self.slots[table.order()].is_some() {
            return Err(MzTabException::DuplicateHeader {
                section: table,
                line: line_number,
            });
        }
        if let Some(open) = self.open {
            if open.order() >= table.order() {
                return Err(MzTabException::SectionOutOfOrder {
                    section: table,
                    line: line_number,
                });
            }
        }

        let tokens: Vec<&str> = line.split('\t').skip(1).map(str::trim).collect();
        let factory = ColumnFactory::from_header(
            table,
            &tokens,
            &self.metadata,
            line_number,
            &mut self.errors,
        )?;
        let mapping = PositionMapping::new(&factory, &tokens);
        self.resolve_colunits(table, &factory, line_number)?;

        self.slots[table.order()] = Some(TableSlot {
            rows: RowParser::new(table),
            factory,
            mapping,
            records: Vec::new(),
        });
        self.open = Some(table);
        log::debug!("opened {table} section at line {line_number}");
        Ok(())
    }

    /// Validate the `colunit` declarations recorded for `table` against its
    /// freshly resolved schema.
    fn resolve_colunits(
        &mut self,
        table: Table,
        factory: &ColumnFactory,
        line_number: usize,
    ) -> Result<(), MzTabException> {
        for raw in self.metadata.colunit_strings(table).to_vec() {
            let Some((column, param)) = raw.split_once('=') else {
                self.errors.add(MzTabError::new(
                    ErrorKind::ColUnit,
                    line_number,
                    format!("'{raw}' is not of the form column=param"),
                ))?;
                continue;
            };
            let column = column.trim();
            if factory
                .columns()
                .iter()
                .all(|c| c.name != column && c.header != column)
            {
                self.errors.add(MzTabError::new(
                    ErrorKind::ColUnitColumn,
                    line_number,
                    format!("colunit column '{column}' is not part of the {table} header"),
                ))?;
                continue;
            }
            match param.trim().parse() {
                Ok(param) => self.metadata.add_colunit(
                    table,
                    ColUnit {
                        column: column.to_string(),
                        param,
                    },
                ),
                Err(e) => {
                    self.errors.add(MzTabError::new(
                        ErrorKind::ColUnit,
                        line_number,
                        format!("colunit parameter for '{column}': {e}"),
                    ))?;
                }
            }
        }
        Ok(())
    }

    fn data_line(
        &mut self,
        table: Table,
        line_number: usize,
        line: &str,
    ) -> Result<(), MzTabException> {
        if self.slots[table.order()].is_none() {
            return Err(MzTabException::DataBeforeHeader {
                section: table,
                line: line_number,
            });
        }
        if self.open != Some(table) {
            return Err(MzTabException::SectionOutOfOrder {
                section: table,
                line: line_number,
            });
        }

        let Self {
            slots,
            metadata,
            errors,
            ..
        } = self;
        if let Some(slot) = slots[table.order()].as_mut() {
            let record = slot.rows.parse(
                line_number,
                line,
                &slot.factory,
                &slot.mapping,
                metadata,
                errors,
            )?;
            slot.records.push(record);
        }
        Ok(())
    }

    /// Assemble the parse output.
    pub fn finish(self) -> MzTabFile {
        MzTabFile {
            metadata: self.metadata,
            comments: self.comments,
            sections: self.slots.map(|slot| {
                slot.map(|s| TableData {
                    columns: s.factory,
                    mapping: s.mapping,
                    records: s.records,
                })
            }),
            errors: self.errors,
        }
    }
}

/// Parse an mzTab document from any buffered line stream.
pub fn parse_reader<R: BufRead>(reader: R, config: ParserConfig) -> Result<MzTabFile, ParseFailure> {
    let mut parser = MzTabParser::new(config);
    for (i, line) in reader.lines().enumerate() {
        let line_number = i + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                return Err(ParseFailure {
                    exception: MzTabException::Io(e),
                    errors: parser.errors,
                });
            }
        };
        if let Err(exception) = parser.parse_line(line_number, &line) {
            return Err(ParseFailure {
                exception,
                errors: parser.errors,
            });
        }
    }
    Ok(parser.finish())
}

/// Parse an mzTab document held in memory.
pub fn parse_str(input: &str, config: ParserConfig) -> Result<MzTabFile, ParseFailure> {
    parse_reader(input.as_bytes(), config)
}

/// Parse an mzTab file from disk, transparently decompressing `.gz` input.
pub fn parse_mztab_file(path: impl AsRef<Path>) -> anyhow::Result<MzTabFile> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
    let reader = BufReader::new(file);

    let result = if path
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
    {
        parse_reader(BufReader::new(GzDecoder::new(reader)), ParserConfig::default())
    } else {
        parse_reader(reader, ParserConfig::default())
    };
    result.with_context(|| format!("failed to parse {}", path.display()))
}
