use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use marks_analysis::export::{to_csv_bytes, to_xlsx_bytes};
use marks_analysis::ingestion::csv::load_csv_from_bytes;
use marks_analysis::processing::{
    aggregate, filter, summarize, FilterCriteria, MissingPolicy, SchemaConfig, SubjectColumns,
};

const SUBJECTS: [&str; 5] = ["Math", "Science", "English", "History", "Art"];

fn synthetic_sheet(rows: usize) -> String {
    let mut out = format!("StudentID,Name,Class,Section,{}\n", SUBJECTS.join(","));
    for i in 0..rows {
        out.push_str(&format!(
            "{},Student {},{},{}",
            i + 1,
            i + 1,
            9 + i % 4,
            ["A", "B", "C"][i % 3]
        ));
        for (s, _) in SUBJECTS.iter().enumerate() {
            // Every 17th score is blank.
            if (i + s) % 17 == 0 {
                out.push(',');
            } else {
                out.push_str(&format!(",{}", (i * 31 + s * 7) % 101));
            }
        }
        out.push('\n');
    }
    out
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    for rows in [100usize, 10_000] {
        let text = synthetic_sheet(rows);
        let raw = load_csv_from_bytes(text.as_bytes()).expect("load synthetic sheet");
        let subjects =
            SubjectColumns::detect(&raw.schema, &SchemaConfig::default()).expect("subjects");
        let graded = aggregate(&raw, &subjects, MissingPolicy::ZeroFill);
        let criteria = FilterCriteria::default()
            .with_class("10")
            .with_min_percent(40.0)
            .with_top_n(10);

        group.bench_with_input(BenchmarkId::new("load_csv", rows), &text, |b, text| {
            b.iter(|| load_csv_from_bytes(black_box(text.as_bytes())).expect("load"))
        });
        group.bench_with_input(BenchmarkId::new("aggregate", rows), &raw, |b, raw| {
            b.iter(|| aggregate(black_box(raw), &subjects, MissingPolicy::SkipMissing))
        });
        group.bench_with_input(BenchmarkId::new("filter", rows), &graded, |b, graded| {
            b.iter(|| filter(black_box(graded), &criteria))
        });
        group.bench_with_input(BenchmarkId::new("summarize", rows), &graded, |b, graded| {
            b.iter(|| summarize(black_box(graded)))
        });
        group.bench_with_input(BenchmarkId::new("export_csv", rows), &graded, |b, graded| {
            b.iter(|| to_csv_bytes(black_box(graded)).expect("csv"))
        });
        group.bench_with_input(BenchmarkId::new("export_xlsx", rows), &graded, |b, graded| {
            b.iter(|| to_xlsx_bytes(black_box(graded)).expect("xlsx"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
