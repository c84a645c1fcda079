use criterion::{black_box, criterion_group, criterion_main, Criterion};

use mztab::parser::{parse_str, ParserConfig};

fn synthetic_document(rows: usize) -> String {
    let mut doc = String::from(
        "MTD\tmzTab-version\t1.0.0\n\
         MTD\tmzTab-mode\tComplete\n\
         MTD\tmzTab-type\tIdentification\n\
         MTD\tprotein_search_engine_score[1]\t[MS, MS:1001171, Mascot:score, ]\n\
         MTD\tms_run[1]-location\tfile:///data/run1.mzML\n\
         PRH\taccession\tdescription\ttaxid\tspecies\tdatabase\tdatabase_version\t\
         search_engine\tbest_search_engine_score[1]\tsearch_engine_score[1]_ms_run[1]\t\
         ambiguity_members\tmodifications\tprotein_coverage\n",
    );
    for i in 0..rows {
        doc.push_str(&format!(
            "PRT\tP{i:05}\tSynthetic protein {i}\t9606\tHomo sapiens\tUniProtKB\t2023_01\t\
             [MS, MS:1001207, Mascot, ]\t{score}\t{score}\tnull\t3-MOD:00412\t0.42\n",
            score = 20.0 + (i % 80) as f64,
        ));
    }
    doc
}

fn bench_parse(c: &mut Criterion) {
    let doc = synthetic_document(2_000);

    c.bench_function("parse_protein_2k_rows", |b| {
        b.iter(|| {
            let file = parse_str(black_box(&doc), ParserConfig::default()).unwrap();
            black_box(file.records(mztab::section::Table::Protein).len())
        })
    });
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
