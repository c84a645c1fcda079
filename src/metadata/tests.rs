use super::*;
use crate::section::Table;

#[test]
fn registry_rejects_duplicate_ids() {
    let mut metadata = Metadata::new();
    metadata.add_sample(1, Sample::default()).unwrap();
    let err = metadata.add_sample(1, Sample::default()).unwrap_err();
    assert_eq!(
        err,
        MetadataError::DuplicateElement {
            element: "sample",
            id: 1
        }
    );
    assert_eq!(metadata.samples.len(), 1);
}

#[test]
fn lazy_elements_share_one_entry_per_id() {
    let mut metadata = Metadata::new();
    metadata
        .contacts
        .get_or_insert_with(11, Contact::default)
        .name = Some("James D. Watson".to_string());
    metadata
        .contacts
        .get_or_insert_with(11, Contact::default)
        .affiliation = Some("Cambridge University, UK".to_string());
    metadata
        .contacts
        .get_or_insert_with(2, Contact::default)
        .affiliation = Some("Cambridge University, UK".to_string());

    assert_eq!(metadata.contacts.len(), 2);
    let contact = metadata.contacts.get(11).unwrap();
    assert_eq!(contact.name.as_deref(), Some("James D. Watson"));
    assert_eq!(contact.affiliation.as_deref(), Some("Cambridge University, UK"));
}

#[test]
fn search_engine_scores_are_per_section() {
    let mut metadata = Metadata::new();
    metadata
        .search_engine_scores_mut(Table::Protein)
        .insert(1, crate::controlled_vocabulary::terms::mascot_score())
        .unwrap();

    assert_eq!(metadata.search_engine_scores(Table::Protein).len(), 1);
    assert!(metadata.search_engine_scores(Table::Psm).is_empty());
}

#[test]
fn colunit_strings_are_kept_per_section() {
    let mut metadata = Metadata::new();
    metadata.add_colunit_string(
        Table::Protein,
        "reliability=[MS, MS:00001231, PeptideProphet:Score, ]",
    );
    assert_eq!(metadata.colunit_strings(Table::Protein).len(), 1);
    assert!(metadata.colunit_strings(Table::Peptide).is_empty());
}

#[test]
fn mode_and_type_literals() {
    assert_eq!("Complete".parse::<Mode>(), Ok(Mode::Complete));
    assert_eq!("Summary".parse::<Mode>(), Ok(Mode::Summary));
    assert!("complete".parse::<Mode>().is_err());
    assert_eq!(
        "Quantification".parse::<MzTabType>(),
        Ok(MzTabType::Quantification)
    );
    assert_eq!(
        "Identification".parse::<MzTabType>(),
        Ok(MzTabType::Identification)
    );
}
