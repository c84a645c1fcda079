//! End-to-end parse of a document exercising all four table sections,
//! plus the on-disk entry point with gzip input.

use std::io::Write;

use mztab::errors::Severity;
use mztab::parser::{parse_mztab_file, parse_str, ParserConfig};
use mztab::record::Value;
use mztab::section::Table;

fn full_document() -> String {
    let mut doc = String::new();
    for line in [
        "COM\tgenerated by the integration suite",
        "MTD\tmzTab-version\t1.0.0",
        "MTD\tmzTab-mode\tComplete",
        "MTD\tmzTab-type\tIdentification",
        "MTD\ttitle\tIntegration test set",
        "MTD\tprotein_search_engine_score[1]\t[MS, MS:1001171, Mascot:score, ]",
        "MTD\tpeptide_search_engine_score[1]\t[MS, MS:1001171, Mascot:score, ]",
        "MTD\tpsm_search_engine_score[1]\t[MS, MS:1001330, X!Tandem:expect, ]",
        "MTD\tsmallmolecule_search_engine_score[1]\t[MS, MS:1001171, Mascot:score, ]",
        "MTD\tms_run[1]-location\tfile:///data/batch7/run1.mzML",
        "MTD\tfixed_mod[1]\t[UNIMOD, UNIMOD:4, Carbamidomethyl, ]",
        "MTD\tvariable_mod[1]\t[UNIMOD, UNIMOD:35, Oxidation, ]",
    ] {
        doc.push_str(line);
        doc.push('\n');
    }

    doc.push_str(concat!(
        "PRH\taccession\tdescription\ttaxid\tspecies\tdatabase\tdatabase_version",
        "\tsearch_engine\tbest_search_engine_score[1]\tambiguity_members\tmodifications\n",
    ));
    doc.push_str(concat!(
        "PRT\tP12345\tAspartate aminotransferase\t10116\tRattus norvegicus (Rat)\tUniProtKB",
        "\t2011_11\t[MS, MS:1001207, Mascot, ]\t50\tnull\t3-MOD:00412\n",
    ));
    doc.push_str(concat!(
        "PRT\tP12347\tAnother protein\t10116\tRattus norvegicus (Rat)\tUniProtKB",
        "\t2011_11\t[MS, MS:1001207, Mascot, ]\t41.2\tnull\t0\n",
    ));

    doc.push_str(concat!(
        "PEH\tsequence\taccession\tunique\tdatabase\tdatabase_version\tsearch_engine",
        "\tbest_search_engine_score[1]\tmodifications\tretention_time\tretention_time_window",
        "\tcharge\tmass_to_charge\tspectra_ref\n",
    ));
    doc.push_str(concat!(
        "PEP\tNILNELFQR\tP12345\t0\tUniProtKB\t2011_11\t[MS, MS:1001207, Mascot, ]\t30.3",
        "\t3-MOD:00412\t20.8\t19.2|22.5\t2\t545.79\tms_run[1]:index=5\n",
    ));

    doc.push_str(concat!(
        "PSH\tsequence\tPSM_ID\taccession\tunique\tdatabase\tdatabase_version\tsearch_engine",
        "\tsearch_engine_score[1]\tmodifications\tretention_time\tcharge\texp_mass_to_charge",
        "\tcalc_mass_to_charge\tspectra_ref\tpre\tpost\tstart\tend\n",
    ));
    doc.push_str(concat!(
        "PSM\tNILNELFQR\t1\tP12345\t0\tUniProtKB\t2011_11\t[MS, MS:1001207, Mascot, ]\t0.002",
        "\t3|4-MOD:00412\t20.8\t2\t545.79\t545.80\tms_run[1]:index=5\tK\tD\t45\t57\n",
    ));

    doc.push_str(concat!(
        "SMH\tidentifier\tchemical_formula\tsmiles\tinchi_key\tdescription\texp_mass_to_charge",
        "\tcalc_mass_to_charge\tcharge\tretention_time\ttaxid\tspecies\tdatabase\tdatabase_version",
        "\tspectra_ref\tsearch_engine\tbest_search_engine_score[1]\tmodifications\n",
    ));
    doc.push_str(concat!(
        "SML\tCID:00027395\tC17H20N4O2\tC1=CC=C(C=C1)CCCC2=CC=CC=C2N\tQFFGVLORLPOAEC-SNVBAGLBSA-N",
        "\tan analyte\t299.15\t299.15\t1\t20.7\t9606\tHomo sapiens\tHMDB\t3.3",
        "\tms_run[1]:index=7\t[MS, MS:1001207, Mascot, ]\t50\tCHEMMOD:+59.04\n",
    ));

    doc
}

#[test]
fn parses_all_four_sections() {
    let file = parse_str(&full_document(), ParserConfig::default()).unwrap();

    assert!(file.errors.is_empty(), "{}", file.errors);
    assert_eq!(file.comments.len(), 1);
    assert_eq!(file.metadata.title.as_deref(), Some("Integration test set"));
    assert_eq!(file.metadata.fixed_mods.len(), 1);
    assert_eq!(file.metadata.variable_mods.len(), 1);

    assert_eq!(file.records(Table::Protein).len(), 2);
    assert_eq!(file.records(Table::Peptide).len(), 1);
    assert_eq!(file.records(Table::Psm).len(), 1);
    assert_eq!(file.records(Table::SmallMolecule).len(), 1);

    // Peptide retention time window is an ordered numeric list.
    let peptide = &file.records(Table::Peptide)[0];
    match peptide.get("12") {
        Some(Value::DoubleList(window)) => assert_eq!(window, &vec![19.2, 22.5]),
        other => panic!("expected a retention time window, got {other:?}"),
    }

    // Ambiguity is legal at PSM granularity.
    let psm = &file.records(Table::Psm)[0];
    match psm.get("10") {
        Some(Value::Modifications(mods)) => assert!(mods[0].is_ambiguous()),
        other => panic!("expected modifications, got {other:?}"),
    }

    // The spectra reference resolved against ms_run[1].
    match psm.get("16") {
        Some(Value::SpectraRefs(refs)) => {
            assert_eq!(refs.len(), 1);
            assert_eq!(refs[0].ms_run, 1);
            assert_eq!(refs[0].reference, "index=5");
        }
        other => panic!("expected spectra refs, got {other:?}"),
    }

    // A CHEMMOD accession in the small molecule section is not flagged.
    let small = &file.records(Table::SmallMolecule)[0];
    match small.get("19") {
        Some(Value::Modifications(mods)) => assert_eq!(mods[0].prefix, "CHEMMOD"),
        other => panic!("expected modifications, got {other:?}"),
    }
}

#[test]
fn warn_level_diagnostics_stay_hidden_at_the_default_level() {
    // The PSM row carries a peptide-level CHEMMOD in the peptide section,
    // which is only a warning; the default Error-level list must not show it.
    let mut doc = full_document();
    doc = doc.replace(
        "PEP\tNILNELFQR\tP12345\t0\tUniProtKB\t2011_11\t[MS, MS:1001207, Mascot, ]\t30.3\t3-MOD:00412",
        "PEP\tNILNELFQR\tP12345\t0\tUniProtKB\t2011_11\t[MS, MS:1001207, Mascot, ]\t30.3\tCHEMMOD:+57.02",
    );

    let silent = parse_str(&doc, ParserConfig::default()).unwrap();
    assert!(silent.errors.is_empty(), "{}", silent.errors);

    let verbose = parse_str(
        &doc,
        ParserConfig {
            min_level: Severity::Warn,
            max_errors: 500,
        },
    )
    .unwrap();
    assert_eq!(verbose.errors.len(), 1);
}

#[test]
fn error_list_renders_structured_records() {
    let mut doc = full_document();
    doc = doc.replace("\t50\tnull\t3-MOD:00412", "\tfifty\tnull\t3-MOD:00412");
    let file = parse_str(&doc, ParserConfig::default()).unwrap();

    assert!(!file.errors.is_empty());
    let json = file.errors.to_json().unwrap();
    assert!(json.contains("\"code\""));
    assert!(json.contains("\"severity\""));
}

#[test]
fn reads_plain_and_gzipped_files_from_disk() {
    let doc = full_document();
    let dir = std::env::temp_dir();
    let pid = std::process::id();

    let plain = dir.join(format!("mztab-test-{pid}.mztab"));
    std::fs::write(&plain, &doc).unwrap();
    let file = parse_mztab_file(&plain).unwrap();
    assert_eq!(file.records(Table::Protein).len(), 2);
    std::fs::remove_file(&plain).ok();

    let gz = dir.join(format!("mztab-test-{pid}.mztab.gz"));
    let mut encoder =
        flate2::write::GzEncoder::new(std::fs::File::create(&gz).unwrap(), flate2::Compression::default());
    encoder.write_all(doc.as_bytes()).unwrap();
    encoder.finish().unwrap();
    let file = parse_mztab_file(&gz).unwrap();
    assert_eq!(file.records(Table::Protein).len(), 2);
    std::fs::remove_file(&gz).ok();
}

#[test]
fn failure_carries_the_accumulated_diagnostics() {
    let mut doc = full_document();
    // Corrupt a cell to accumulate an error, then break the structure.
    doc = doc.replace("\t50\tnull\t3-MOD:00412", "\tfifty\tnull\t3-MOD:00412");
    doc.push_str("MTD\tmzTab-ID\tTOO_LATE\n");

    let failure = parse_str(&doc, ParserConfig::default()).unwrap_err();
    assert!(!failure.errors.is_empty());
}
