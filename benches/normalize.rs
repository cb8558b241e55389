//! Benchmarks for the normalization pass.
//!
//! Run with: cargo bench

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};

use doctree::{NormalizeConfig, normalize, read_xml, write_xml};

/// A document with `sections` API sections, each holding a description
/// whose body mixes prose, nested lists and a table.
fn generate_xml(sections: usize) -> String {
    let mut xml = String::from("<document source=\"index.rst\">");
    for i in 0..sections {
        xml.push_str(&format!(
            "<section ids=\"s{i}\"><title>Section {i}</title>\
             <desc><desc_signature><desc_name>func_{i}</desc_name></desc_signature>\
             <desc_content>\
             <paragraph>Takes <literal>x</literal> and returns\
             <bullet_list><list_item><paragraph>one<enumerated_list>\
             <list_item><paragraph>nested</paragraph></list_item>\
             </enumerated_list></paragraph></list_item></bullet_list>\
             trailing text</paragraph>\
             <table><tgroup cols=\"2\"><colspec colwidth=\"auto\"/><colspec colwidth=\"40\"/>\
             <tbody><row><entry><paragraph>a</paragraph></entry>\
             <entry><paragraph>b</paragraph></entry></row></tbody></tgroup></table>\
             </desc_content></desc></section>"
        ));
    }
    xml.push_str("</document>");
    xml
}

fn bench_read(c: &mut Criterion) {
    let xml = generate_xml(200);
    c.bench_function("read_xml", |b| {
        b.iter(|| read_xml(&xml).unwrap());
    });
}

fn bench_normalize(c: &mut Criterion) {
    let doc = read_xml(&generate_xml(200)).unwrap();
    let config = NormalizeConfig::quiet();

    c.bench_function("normalize", |b| {
        b.iter_batched(
            || doc.clone(),
            |mut doc| normalize(&mut doc, &config).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

fn bench_write(c: &mut Criterion) {
    let mut doc = read_xml(&generate_xml(200)).unwrap();
    normalize(&mut doc, &NormalizeConfig::quiet()).unwrap();

    c.bench_function("write_xml", |b| {
        b.iter(|| write_xml(&doc));
    });
}

criterion_group!(benches, bench_read, bench_normalize, bench_write);
criterion_main!(benches);
