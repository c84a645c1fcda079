//! Property: column schema resolution is permutation-invariant. Supplying
//! the same header tokens in any physical order yields the same logical
//! schema, and data rows produce identical records.

use proptest::prelude::*;

use mztab::parser::{parse_str, ParserConfig};
use mztab::section::Table;

const MTD_BLOCK: &str = "\
MTD\tmzTab-version\t1.0.0
MTD\tmzTab-mode\tComplete
MTD\tmzTab-type\tIdentification
MTD\tprotein_search_engine_score[1]\t[MS, MS:1001171, Mascot:score, ]
MTD\tms_run[1]-location\tfile:///data/run1.mzML
MTD\tassay[1]-quantification_reagent\t[PRIDE, PRIDE:0000114, iTRAQ reagent, 114]
";

/// Header tokens paired with one row's cell values.
const COLUMNS: &[(&str, &str)] = &[
    ("accession", "P12345"),
    ("description", "Aspartate aminotransferase"),
    ("taxid", "10116"),
    ("species", "Rattus norvegicus (Rat)"),
    ("database", "UniProtKB"),
    ("database_version", "2011_11"),
    ("search_engine", "[MS, MS:1001207, Mascot, ]"),
    ("best_search_engine_score[1]", "50"),
    ("search_engine_score[1]_ms_run[1]", "47.5"),
    ("reliability", "1"),
    ("num_psms_ms_run[1]", "4"),
    ("ambiguity_members", "P12347,P12348"),
    ("modifications", "3-MOD:00412"),
    ("protein_coverage", "0.4"),
    ("protein_abundance_assay[1]", "0.2"),
    ("opt_global_note", "free text"),
];

fn document(order: &[usize]) -> String {
    let header: Vec<&str> = order.iter().map(|&i| COLUMNS[i].0).collect();
    let cells: Vec<&str> = order.iter().map(|&i| COLUMNS[i].1).collect();
    format!(
        "{MTD_BLOCK}PRH\t{}\nPRT\t{}\n",
        header.join("\t"),
        cells.join("\t")
    )
}

proptest! {
    #[test]
    fn schema_and_records_are_order_independent(
        order in Just((0..COLUMNS.len()).collect::<Vec<_>>()).prop_shuffle()
    ) {
        let canonical = parse_str(
            &document(&(0..COLUMNS.len()).collect::<Vec<_>>()),
            ParserConfig::default(),
        )
        .unwrap();
        let shuffled = parse_str(&document(&order), ParserConfig::default()).unwrap();

        prop_assert!(canonical.errors.is_empty(), "{}", canonical.errors);
        prop_assert!(shuffled.errors.is_empty(), "{}", shuffled.errors);

        let canonical_section = canonical.section(Table::Protein).unwrap();
        let shuffled_section = shuffled.section(Table::Protein).unwrap();

        // Same logical schema, independent of physical order.
        for column in canonical_section.columns.columns() {
            let other = shuffled_section
                .columns
                .find_by_position(&column.logical_position);
            prop_assert_eq!(Some(column), other);
        }

        // Every cell lands on the same logical position.
        let canonical_record = &canonical_section.records[0];
        let shuffled_record = &shuffled_section.records[0];
        for (position, value) in canonical_record.iter() {
            prop_assert_eq!(value, shuffled_record.get(position));
        }
        prop_assert_eq!(canonical_record.len(), shuffled_record.len());
    }
}
