use super::*;
use crate::controlled_vocabulary::terms;
use crate::errors::{ErrorKind, ErrorList, MzTabException, Severity};
use crate::metadata::{Assay, ElementKind, Metadata, MsRun, StudyVariable};
use crate::section::Table;

fn scored_metadata() -> Metadata {
    let mut metadata = Metadata::new();
    metadata
        .search_engine_scores_mut(Table::Protein)
        .insert(1, terms::mascot_score())
        .unwrap();
    metadata.add_ms_run(1, MsRun::default()).unwrap();
    metadata.add_ms_run(2, MsRun::default()).unwrap();
    metadata.add_assay(1, Assay::default()).unwrap();
    metadata.add_assay(2, Assay::default()).unwrap();
    metadata
        .add_study_variable(1, StudyVariable::default())
        .unwrap();
    metadata
}

const PROTEIN_HEADER: &[&str] = &[
    "accession",
    "description",
    "taxid",
    "species",
    "database",
    "database_version",
    "search_engine",
    "best_search_engine_score[1]",
    "search_engine_score[1]_ms_run[1]",
    "search_engine_score[1]_ms_run[2]",
    "reliability",
    "num_psms_ms_run[1]",
    "num_peptides_distinct_ms_run[1]",
    "num_peptides_unique_ms_run[1]",
    "ambiguity_members",
    "modifications",
    "uri",
    "go_terms",
    "protein_coverage",
    "protein_abundance_assay[1]",
    "protein_abundance_assay[2]",
    "protein_abundance_study_variable[1]",
    "protein_abundance_stdev_study_variable[1]",
    "protein_abundance_std_error_study_variable[1]",
    "opt_assay[1]_my_value",
    "opt_global_cv_MS:1002217_decoy_peptide",
];

#[test]
fn resolves_full_protein_header() {
    let metadata = scored_metadata();
    let mut errors = ErrorList::default();
    let factory =
        ColumnFactory::from_header(Table::Protein, PROTEIN_HEADER, &metadata, 1, &mut errors)
            .unwrap();

    assert!(errors.is_empty(), "{errors}");
    assert_eq!(factory.columns().len(), PROTEIN_HEADER.len());

    let accession = factory.find_by_header("accession").unwrap();
    assert_eq!(accession.logical_position, "01");
    assert_eq!(accession.kind, DataKind::Text);

    let per_run = factory
        .find_by_header("search_engine_score[1]_ms_run[2]")
        .unwrap();
    assert_eq!(per_run.logical_position, "09_1_2");
    assert_eq!(per_run.element, Some((ElementKind::MsRun, 2)));

    let decoy = factory
        .find_by_header("opt_global_cv_MS:1002217_decoy_peptide")
        .unwrap();
    assert_eq!(decoy.kind, DataKind::Boolean);

    let custom = factory.find_by_header("opt_assay[1]_my_value").unwrap();
    assert_eq!(custom.kind, DataKind::Opt);
    assert_eq!(custom.element, Some((ElementKind::Assay, 1)));
}

#[test]
fn schema_is_permutation_invariant() {
    let metadata = scored_metadata();
    let mut errors = ErrorList::default();
    let forward =
        ColumnFactory::from_header(Table::Protein, PROTEIN_HEADER, &metadata, 1, &mut errors)
            .unwrap();

    let mut reversed: Vec<&str> = PROTEIN_HEADER.to_vec();
    reversed.reverse();
    let backward =
        ColumnFactory::from_header(Table::Protein, &reversed, &metadata, 1, &mut errors).unwrap();

    assert!(errors.is_empty());
    for column in forward.columns() {
        let other = backward
            .find_by_position(&column.logical_position)
            .expect("column missing after permutation");
        assert_eq!(column, other);
    }
}

#[test]
fn missing_mandatory_column_is_fatal() {
    let metadata = scored_metadata();
    let mut errors = ErrorList::default();
    let header: Vec<&str> = PROTEIN_HEADER
        .iter()
        .copied()
        .filter(|t| *t != "accession")
        .collect();

    let err = ColumnFactory::from_header(Table::Protein, &header, &metadata, 1, &mut errors)
        .unwrap_err();
    assert!(matches!(
        err,
        MzTabException::MissingColumn { section: Table::Protein, ref column, .. } if column == "accession"
    ));
}

#[test]
fn unknown_score_id_drops_column() {
    let metadata = scored_metadata();
    let mut errors = ErrorList::new(Severity::Warn, 100);
    let mut header: Vec<&str> = PROTEIN_HEADER.to_vec();
    header.push("best_search_engine_score[7]");

    let factory =
        ColumnFactory::from_header(Table::Protein, &header, &metadata, 1, &mut errors).unwrap();

    assert!(errors.contains(ErrorKind::UnresolvedReference));
    assert!(factory.find_by_header("best_search_engine_score[7]").is_none());
}

#[test]
fn unknown_token_is_format_error() {
    let metadata = scored_metadata();
    let mut errors = ErrorList::default();
    let mut header: Vec<&str> = PROTEIN_HEADER.to_vec();
    header.push("no_such_column");

    let factory =
        ColumnFactory::from_header(Table::Protein, &header, &metadata, 1, &mut errors).unwrap();

    assert!(errors.contains(ErrorKind::StableColumn));
    assert_eq!(factory.columns().len(), PROTEIN_HEADER.len());
}

#[test]
fn duplicate_columns_are_rejected() {
    let metadata = scored_metadata();
    let mut errors = ErrorList::default();
    let mut header: Vec<&str> = PROTEIN_HEADER.to_vec();
    header.push("accession");

    let factory =
        ColumnFactory::from_header(Table::Protein, &header, &metadata, 1, &mut errors).unwrap();

    assert!(errors.contains(ErrorKind::DuplicateColumn));
    assert_eq!(
        factory
            .columns()
            .iter()
            .filter(|c| c.name == "accession")
            .count(),
        1
    );
}

#[test]
fn position_mapping_follows_physical_order() {
    let metadata = scored_metadata();
    let mut errors = ErrorList::default();

    let mut shuffled: Vec<&str> = PROTEIN_HEADER.to_vec();
    shuffled.swap(0, 7);
    shuffled.swap(3, 15);

    let factory =
        ColumnFactory::from_header(Table::Protein, &shuffled, &metadata, 1, &mut errors).unwrap();
    let mapping = PositionMapping::new(&factory, &shuffled);

    assert!(mapping.is_exact());
    assert_eq!(mapping.logical(0), Some("08_1"));
    assert_eq!(mapping.logical(7), Some("01"));
    assert_eq!(mapping.logical(3), Some("15"));
}

#[test]
fn rejected_tokens_leave_mapping_gaps() {
    let metadata = scored_metadata();
    let mut errors = ErrorList::default();
    let mut header: Vec<&str> = PROTEIN_HEADER.to_vec();
    header.push("no_such_column");

    let factory =
        ColumnFactory::from_header(Table::Protein, &header, &metadata, 1, &mut errors).unwrap();
    let mapping = PositionMapping::new(&factory, &header);

    assert!(!mapping.is_exact());
    assert_eq!(mapping.logical(header.len() - 1), None);
}

#[test]
fn psm_score_column_has_no_run_index() {
    let mut metadata = Metadata::new();
    metadata
        .search_engine_scores_mut(Table::Psm)
        .insert(2, terms::mascot_score())
        .unwrap();
    let mut errors = ErrorList::default();

    let header = [
        "sequence",
        "PSM_ID",
        "accession",
        "unique",
        "database",
        "database_version",
        "search_engine",
        "search_engine_score[2]",
        "modifications",
        "retention_time",
        "charge",
        "exp_mass_to_charge",
        "calc_mass_to_charge",
        "spectra_ref",
        "pre",
        "post",
        "start",
        "end",
    ];
    let factory =
        ColumnFactory::from_header(Table::Psm, &header, &metadata, 1, &mut errors).unwrap();

    assert!(errors.is_empty(), "{errors}");
    let score = factory.find_by_header("search_engine_score[2]").unwrap();
    assert_eq!(score.logical_position, "08_2");
    assert_eq!(score.element, Some((ElementKind::SearchEngineScore, 2)));
}
