//! The `MTD` line parser: tokenizes one metadata key, dispatches to a typed
//! value parser, mutates the shared [`Metadata`], and accumulates
//! diagnostics. A malformed line never aborts the parse; the line is skipped
//! and processing continues.

use crate::errors::{ErrorKind, ErrorList, MzTabError, MzTabException};
use crate::metadata::{
    Contact, CvEntry, Instrument, Metadata, ModDefinition, MsRun, Param, Publication,
    PublicationItem, Sample, Software, StudyVariable,
};
use crate::section::Table;
use crate::util::split_outside_brackets;

use super::key::{parse_key, KeyError, MetadataKey};

type Fatal = Result<(), MzTabException>;

fn emit(errors: &mut ErrorList, kind: ErrorKind, line: usize, message: String) -> Fatal {
    errors.add(MzTabError::new(kind, line, message))
}

/// Parse one metadata value as a single parameter.
fn param_value(
    value: &str,
    line: usize,
    errors: &mut ErrorList,
) -> Result<Option<Param>, MzTabException> {
    match value.parse::<Param>() {
        Ok(p) => Ok(Some(p)),
        Err(e) => {
            emit(errors, ErrorKind::Param, line, format!("'{value}': {e}"))?;
            Ok(None)
        }
    }
}

/// Parse one metadata value as a `|`-separated parameter list.
fn param_list_value(
    value: &str,
    line: usize,
    errors: &mut ErrorList,
) -> Result<Option<Vec<Param>>, MzTabException> {
    let mut params = Vec::new();
    for token in split_outside_brackets(value, '|') {
        match token.trim().parse::<Param>() {
            Ok(p) => params.push(p),
            Err(e) => {
                emit(errors, ErrorKind::ParamList, line, format!("'{token}': {e}"))?;
                return Ok(None);
            }
        }
    }
    Ok(Some(params))
}

/// Parse a reference value such as `sample[2]` and check the referenced id
/// is already registered; unresolved references are reported and yield
/// `None`, leaving the reference unset.
fn reference_value(
    value: &str,
    element: &str,
    registered: impl Fn(u32) -> bool,
    line: usize,
    errors: &mut ErrorList,
) -> Result<Option<u32>, MzTabException> {
    let key = match parse_key(value) {
        Ok(k) => k,
        Err(e) => {
            emit(errors, ErrorKind::MtdDefineLabel, line, format!("'{value}': {e}"))?;
            return Ok(None);
        }
    };
    let (Some(id), true, None) = (key.index, key.element == element, key.property) else {
        emit(
            errors,
            ErrorKind::MtdDefineLabel,
            line,
            format!("'{value}' is not a {element}[n] reference"),
        )?;
        return Ok(None);
    };
    if !registered(id) {
        emit(
            errors,
            ErrorKind::UnresolvedReference,
            line,
            format!("{element}[{id}] is not declared"),
        )?;
        return Ok(None);
    }
    Ok(Some(id))
}

/// Set a scalar slot, recording an informational diagnostic when an earlier
/// value is overwritten (last write wins).
fn set_scalar<T>(
    slot: &mut Option<T>,
    value: T,
    key: &MetadataKey<'_>,
    line: usize,
    errors: &mut ErrorList,
) -> Fatal {
    if slot.is_some() {
        emit(
            errors,
            ErrorKind::DuplicationDefine,
            line,
            format!("'{key}' was already set; the new value wins"),
        )?;
    }
    *slot = Some(value);
    Ok(())
}

fn unknown_key(key: &MetadataKey<'_>, line: usize, errors: &mut ErrorList) -> Fatal {
    emit(
        errors,
        ErrorKind::MtdDefineLabel,
        line,
        format!("unknown metadata key '{key}'"),
    )
}

/// Parse one `MTD` line into `metadata`.
pub fn parse_mtd_line(
    line_number: usize,
    line: &str,
    metadata: &mut Metadata,
    errors: &mut ErrorList,
) -> Fatal {
    let parts: Vec<&str> = line.split('\t').map(str::trim).collect();
    if parts.len() != 3 || parts[2].is_empty() {
        return emit(
            errors,
            ErrorKind::MtdLine,
            line_number,
            "a metadata line must be 'MTD<tab>key<tab>value'".to_string(),
        );
    }
    let (raw_key, value) = (parts[1], parts[2]);

    let key = match parse_key(raw_key) {
        Ok(k) => k,
        Err(e) => {
            let kind = match e {
                KeyError::Empty => ErrorKind::MtdDefineLabel,
                KeyError::BadIndex(_) | KeyError::BadBrackets(_) => ErrorKind::IndexedElement,
            };
            return emit(errors, kind, line_number, format!("'{raw_key}': {e}"));
        }
    };

    dispatch(&key, value, line_number, metadata, errors)
}

fn dispatch(
    key: &MetadataKey<'_>,
    value: &str,
    line: usize,
    metadata: &mut Metadata,
    errors: &mut ErrorList,
) -> Fatal {
    match (key.element, key.index, key.property) {
        // -- the mzTab description block ---------------------------------
        ("mzTab", None, Some("version")) => {
            set_scalar(&mut metadata.version, value.to_string(), key, line, errors)
        }
        ("mzTab", None, Some("mode")) => match value.parse() {
            Ok(mode) => set_scalar(&mut metadata.mode, mode, key, line, errors),
            Err(()) => emit(
                errors,
                ErrorKind::MzTabMode,
                line,
                format!("'{value}' is neither 'Complete' nor 'Summary'"),
            ),
        },
        ("mzTab", None, Some("type")) => match value.parse() {
            Ok(t) => set_scalar(&mut metadata.mztab_type, t, key, line, errors),
            Err(()) => emit(
                errors,
                ErrorKind::MzTabType,
                line,
                format!("'{value}' is neither 'Quantification' nor 'Identification'"),
            ),
        },
        ("mzTab", None, Some("ID")) => {
            set_scalar(&mut metadata.mztab_id, value.to_string(), key, line, errors)
        }
        ("title", None, None) => {
            set_scalar(&mut metadata.title, value.to_string(), key, line, errors)
        }
        ("description", None, None) => {
            set_scalar(&mut metadata.description, value.to_string(), key, line, errors)
        }

        // -- indexed collections with a direct value ---------------------
        ("sample_processing", Some(id), None) => {
            if let Some(params) = param_list_value(value, line, errors)? {
                if metadata.sample_processing.set(id, params) {
                    emit(
                        errors,
                        ErrorKind::DuplicationDefine,
                        line,
                        format!("'{key}' was already set; the new value wins"),
                    )?;
                }
            }
            Ok(())
        }
        ("protein_search_engine_score", Some(id), None)
        | ("peptide_search_engine_score", Some(id), None)
        | ("psm_search_engine_score", Some(id), None)
        | ("smallmolecule_search_engine_score", Some(id), None) => {
            let table = match key.element {
                "protein_search_engine_score" => Table::Protein,
                "peptide_search_engine_score" => Table::Peptide,
                "psm_search_engine_score" => Table::Psm,
                _ => Table::SmallMolecule,
            };
            if let Some(param) = param_value(value, line, errors)? {
                if metadata.search_engine_scores_mut(table).set(id, param) {
                    emit(
                        errors,
                        ErrorKind::DuplicationDefine,
                        line,
                        format!("'{key}' was already set; the new value wins"),
                    )?;
                }
            }
            Ok(())
        }
        ("false_discovery_rate", None, None) => {
            if let Some(params) = param_list_value(value, line, errors)? {
                if !metadata.false_discovery_rate.is_empty() {
                    emit(
                        errors,
                        ErrorKind::DuplicationDefine,
                        line,
                        "'false_discovery_rate' was already set; the new value wins".to_string(),
                    )?;
                }
                metadata.false_discovery_rate = params;
            }
            Ok(())
        }
        ("publication", Some(id), None) => {
            let mut items = Vec::new();
            for token in value.split('|') {
                match token.trim().parse::<PublicationItem>() {
                    Ok(item) => items.push(item),
                    Err(()) => {
                        return emit(
                            errors,
                            ErrorKind::Publication,
                            line,
                            format!("'{token}' is not a pubmed:/doi: item"),
                        );
                    }
                }
            }
            metadata.publications.set(id, Publication { items });
            Ok(())
        }

        // -- instruments -------------------------------------------------
        ("instrument", Some(id), Some(prop)) => {
            let Some(param) = param_value(value, line, errors)? else {
                return Ok(());
            };
            let instrument = metadata
                .instruments
                .get_or_insert_with(id, Instrument::default);
            match (prop, key.property_index) {
                ("name", None) => instrument.name = Some(param),
                ("source", None) => instrument.source = Some(param),
                ("detector", None) => instrument.detector = Some(param),
                ("analyzer", Some(sub)) => {
                    instrument.analyzers.set(sub, param);
                }
                _ => return unknown_key(key, line, errors),
            }
            Ok(())
        }

        // -- software ----------------------------------------------------
        ("software", Some(id), None) => {
            if let Some(param) = param_value(value, line, errors)? {
                if param.value().is_none() {
                    emit(
                        errors,
                        ErrorKind::SoftwareVersion,
                        line,
                        format!("'{key}' does not carry a version in its value slot"),
                    )?;
                }
                metadata
                    .software
                    .get_or_insert_with(id, Software::default)
                    .param = Some(param);
            }
            Ok(())
        }
        ("software", Some(id), Some("setting")) => {
            let Some(sub) = key.property_index else {
                return unknown_key(key, line, errors);
            };
            metadata
                .software
                .get_or_insert_with(id, Software::default)
                .settings
                .set(sub, value.to_string());
            Ok(())
        }

        // -- contacts ----------------------------------------------------
        ("contact", Some(id), Some(prop)) => {
            let contact = metadata.contacts.get_or_insert_with(id, Contact::default);
            match prop {
                "name" => contact.name = Some(value.to_string()),
                "affiliation" => contact.affiliation = Some(value.to_string()),
                "email" => contact.email = Some(value.to_string()),
                _ => return unknown_key(key, line, errors),
            }
            Ok(())
        }

        // -- uris and custom annotations ---------------------------------
        ("uri", None, None) => {
            if !value.contains(':') {
                emit(errors, ErrorKind::Uri, line, format!("'{value}' is not a URI"))?;
            } else {
                metadata.uris.push(value.to_string());
            }
            Ok(())
        }
        ("custom", None, None) => {
            if let Some(param) = param_value(value, line, errors)? {
                metadata.custom.push(param);
            }
            Ok(())
        }

        // -- modification declarations -----------------------------------
        ("fixed_mod", Some(id), prop) | ("variable_mod", Some(id), prop) => {
            let map = if key.element == "fixed_mod" {
                &mut metadata.fixed_mods
            } else {
                &mut metadata.variable_mods
            };
            let def = map.get_or_insert_with(id, ModDefinition::default);
            match prop {
                None => {
                    if let Some(param) = param_value(value, line, errors)? {
                        def.param = Some(param);
                    }
                }
                Some("site") => def.site = Some(value.to_string()),
                Some("position") => def.position = Some(value.to_string()),
                Some(_) => return unknown_key(key, line, errors),
            }
            Ok(())
        }

        // -- quantification ----------------------------------------------
        ("quantification_method", None, None) => {
            if let Some(param) = param_value(value, line, errors)? {
                set_scalar(&mut metadata.quantification_method, param, key, line, errors)?;
            }
            Ok(())
        }
        ("protein", None, Some("quantification_unit")) => {
            if let Some(param) = param_value(value, line, errors)? {
                set_scalar(
                    &mut metadata.protein_quantification_unit,
                    param,
                    key,
                    line,
                    errors,
                )?;
            }
            Ok(())
        }
        ("peptide", None, Some("quantification_unit")) => {
            if let Some(param) = param_value(value, line, errors)? {
                set_scalar(
                    &mut metadata.peptide_quantification_unit,
                    param,
                    key,
                    line,
                    errors,
                )?;
            }
            Ok(())
        }
        ("small_molecule", None, Some("quantification_unit")) => {
            if let Some(param) = param_value(value, line, errors)? {
                set_scalar(
                    &mut metadata.small_molecule_quantification_unit,
                    param,
                    key,
                    line,
                    errors,
                )?;
            }
            Ok(())
        }

        // -- ms runs -----------------------------------------------------
        ("ms_run", Some(id), Some(prop)) => {
            let run = metadata.ms_runs.get_or_insert_with(id, MsRun::default);
            match prop {
                "location" => {
                    if value.contains(':') {
                        run.location = Some(value.to_string());
                    } else {
                        emit(
                            errors,
                            ErrorKind::Uri,
                            line,
                            format!("'{value}' is not a location URL"),
                        )?;
                    }
                }
                "hash" => run.hash = Some(value.to_string()),
                "format" | "id_format" | "fragmentation_method" | "hash_method" => {
                    if let Some(param) = param_value(value, line, errors)? {
                        match prop {
                            "format" => run.format = Some(param),
                            "id_format" => run.id_format = Some(param),
                            "fragmentation_method" => run.fragmentation_method = Some(param),
                            _ => run.hash_method = Some(param),
                        }
                    }
                }
                _ => return unknown_key(key, line, errors),
            }
            Ok(())
        }

        // -- samples -----------------------------------------------------
        ("sample", Some(id), Some(prop)) => {
            let sample = metadata.samples.get_or_insert_with(id, Sample::default);
            match (prop, key.property_index) {
                ("description", None) => {
                    sample.description = Some(value.to_string());
                    Ok(())
                }
                ("species", Some(sub))
                | ("tissue", Some(sub))
                | ("cell_type", Some(sub))
                | ("disease", Some(sub))
                | ("custom", Some(sub)) => {
                    if let Some(param) = param_value(value, line, errors)? {
                        let map = match prop {
                            "species" => &mut sample.species,
                            "tissue" => &mut sample.tissues,
                            "cell_type" => &mut sample.cell_types,
                            "disease" => &mut sample.diseases,
                            _ => &mut sample.custom,
                        };
                        map.set(sub, param);
                    }
                    Ok(())
                }
                _ => unknown_key(key, line, errors),
            }
        }

        // -- assays ------------------------------------------------------
        ("assay", Some(id), Some(prop)) => match (prop, key.property_index, key.sub_property) {
            ("quantification_reagent", None, None) => {
                if let Some(param) = param_value(value, line, errors)? {
                    metadata
                        .assays
                        .get_or_insert_with(id, Default::default)
                        .quantification_reagent = Some(param);
                }
                Ok(())
            }
            ("sample_ref", None, None) => {
                let resolved = reference_value(
                    value,
                    "sample",
                    |i| metadata.samples.contains(i),
                    line,
                    errors,
                )?;
                // The assay exists from this reference on, resolved or not.
                let assay = metadata.assays.get_or_insert_with(id, Default::default);
                if let Some(sample_id) = resolved {
                    assay.sample_id = Some(sample_id);
                }
                Ok(())
            }
            ("ms_run_ref", None, None) => {
                let resolved = reference_value(
                    value,
                    "ms_run",
                    |i| metadata.ms_runs.contains(i),
                    line,
                    errors,
                )?;
                let assay = metadata.assays.get_or_insert_with(id, Default::default);
                if let Some(run_id) = resolved {
                    assay.ms_run_id = Some(run_id);
                }
                Ok(())
            }
            ("quantification_mod", Some(sub), sub_prop) => {
                let assay = metadata.assays.get_or_insert_with(id, Default::default);
                let def = assay
                    .quantification_mods
                    .get_or_insert_with(sub, ModDefinition::default);
                match sub_prop {
                    None => {
                        if let Some(param) = param_value(value, line, errors)? {
                            def.param = Some(param);
                        }
                        Ok(())
                    }
                    Some("site") => {
                        def.site = Some(value.to_string());
                        Ok(())
                    }
                    Some("position") => {
                        def.position = Some(value.to_string());
                        Ok(())
                    }
                    Some(_) => unknown_key(key, line, errors),
                }
            }
            _ => unknown_key(key, line, errors),
        },

        // -- study variables ---------------------------------------------
        ("study_variable", Some(id), Some(prop)) => match prop {
            "description" => {
                metadata
                    .study_variables
                    .get_or_insert_with(id, StudyVariable::default)
                    .description = Some(value.to_string());
                Ok(())
            }
            "sample_refs" | "assay_refs" => {
                let samples = prop == "sample_refs";
                let element = if samples { "sample" } else { "assay" };
                let mut resolved = Vec::new();
                for token in value.split(',') {
                    let known = |i| {
                        if samples {
                            metadata.samples.contains(i)
                        } else {
                            metadata.assays.contains(i)
                        }
                    };
                    if let Some(ref_id) =
                        reference_value(token.trim(), element, known, line, errors)?
                    {
                        resolved.push(ref_id);
                    }
                }
                let sv = metadata
                    .study_variables
                    .get_or_insert_with(id, StudyVariable::default);
                if samples {
                    sv.sample_ids = resolved;
                } else {
                    sv.assay_ids = resolved;
                }
                Ok(())
            }
            _ => unknown_key(key, line, errors),
        },

        // -- controlled vocabularies -------------------------------------
        ("cv", Some(id), Some(prop)) => {
            let cv = metadata.cvs.get_or_insert_with(id, CvEntry::default);
            match prop {
                "label" => cv.label = Some(value.to_string()),
                "full_name" => cv.full_name = Some(value.to_string()),
                "version" => cv.version = Some(value.to_string()),
                "url" => cv.url = Some(value.to_string()),
                _ => return unknown_key(key, line, errors),
            }
            Ok(())
        }

        // -- column units ------------------------------------------------
        ("colunit", None, Some(section)) => match Table::from_name(section) {
            Some(table) => {
                metadata.add_colunit_string(table, value);
                Ok(())
            }
            None => unknown_key(key, line, errors),
        },

        _ => unknown_key(key, line, errors),
    }
}
