use criterion::{black_box, criterion_group, criterion_main, Criterion};
use simprint_hash::Xxh3WindowHasher;
use simprint_index::{ComparisonOrder, WinnowingIndex};
use simprint_pipeline::{MemoryFileStore, PassConfig, Pipeline, SourceFile, Submission, WhitespacePreprocessor};
use simprint_span::{FileId, PassName, SubmissionId};
use simprint_winnow::{winnow, PreprocessedStream, WinnowConfig};

const WORDS: &str = "the quick brown fox jumps over the lazy dog while the sleepy cat watches from the window ";

fn synthetic_text(repeats: usize) -> String {
    WORDS.repeat(repeats)
}

fn char_stream(text: &str) -> PreprocessedStream {
    PreprocessedStream::ByChar(text.char_indices().collect())
}

fn winnow_bench(c: &mut Criterion) {
    let text = synthetic_text(400);
    let cfg = WinnowConfig::new(25, 35).unwrap();
    let hasher = Xxh3WindowHasher::default();

    c.bench_function("winnow_synthetic_text", |b| {
        b.iter(|| {
            let spans = winnow(FileId(0), char_stream(black_box(&text)), &cfg, &hasher);
            black_box(spans);
        });
    });
}

fn index_compare_bench(c: &mut Criterion) {
    let text_a = synthetic_text(400);
    let text_b = synthetic_text(400) + "a completely different tail that shares nothing else ";
    let cfg = WinnowConfig::new(25, 35).unwrap();
    let hasher = Xxh3WindowHasher::default();

    let spans_a = winnow(FileId(0), char_stream(&text_a), &cfg, &hasher);
    let spans_b = winnow(FileId(1), char_stream(&text_b), &cfg, &hasher);
    let index_a = WinnowingIndex::build(25, spans_a, SubmissionId(1));
    let index_b = WinnowingIndex::build(25, spans_b, SubmissionId(2));

    c.bench_function("index_compare_synthetic", |b| {
        b.iter(|| {
            let (pairs, matches) = index_a
                .compare(&index_b, 10, ComparisonOrder::Disjoint { self_is_lower: true })
                .expect("compatible k");
            black_box((pairs, matches));
        });
    });
}

fn end_to_end_bench(c: &mut Criterion) {
    let store = MemoryFileStore::new()
        .with_file(FileId(0), synthetic_text(200))
        .with_file(FileId(1), synthetic_text(200));
    let preprocessor = WhitespacePreprocessor::new("bench");
    let pipeline = Pipeline::new(Xxh3WindowHasher::default());
    let cfg = PassConfig {
        pass_name: PassName::from("bench"),
        k: 25,
        t: 35,
        by_span: false,
        top_n: 10,
        parallel: false,
    };
    let corpus = vec![
        Submission {
            id: SubmissionId(1),
            files: vec![SourceFile {
                file_id: FileId(0),
                path: "a.txt".into(),
            }],
        },
        Submission {
            id: SubmissionId(2),
            files: vec![SourceFile {
                file_id: FileId(1),
                path: "b.txt".into(),
            }],
        },
    ];

    c.bench_function("run_pass_two_submissions", |b| {
        b.iter(|| {
            let outcome = pipeline
                .run_pass(&store, &preprocessor, &cfg, black_box(&corpus), &[], None)
                .expect("bench pass succeeds");
            black_box(outcome);
        });
    });
}

criterion_group!(pipeline_benches, winnow_bench, index_compare_bench, end_to_end_bench);
criterion_main!(pipeline_benches);
