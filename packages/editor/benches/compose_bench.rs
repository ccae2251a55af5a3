use chrono::Utc;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use vellum_editor::{apply_revision_to_all_leaves, compact_history, compose, OverrideTable};
use vellum_model::{LeafAddress, Module, Revision, RevisionId, RichContent, Section, Track};

/// `revisions` revisions of `sections` sections with 8 modules each; module
/// content changes every third revision
fn catalog_track(revisions: u64, sections: usize) -> Track<RichContent> {
    Track::new(
        (1..=revisions)
            .map(|seq| Revision {
                id: RevisionId::new(format!("rev-{}", seq)),
                seq,
                created_at: Utc::now(),
                payload: RichContent {
                    sections: (0..sections)
                        .map(|s| Section {
                            section_type: format!("section-{}", s).as_str().into(),
                            modules: (0..8)
                                .map(|m| Module {
                                    headline: format!("Module {} v{}", m, seq / 3),
                                    body: "Lorem ipsum dolor sit amet".to_string(),
                                    images: vec![],
                                })
                                .collect(),
                        })
                        .collect(),
                },
            })
            .collect(),
    )
}

fn compose_without_overrides(c: &mut Criterion) {
    let track = catalog_track(50, 6);
    let live = RevisionId::from("rev-40");
    let table = OverrideTable::new();

    c.bench_function("compose_without_overrides", |b| {
        b.iter(|| compose(black_box(&track), black_box(&table), Some(&live)))
    });
}

fn compose_fully_overridden(c: &mut Criterion) {
    let track = catalog_track(50, 6);
    let live = RevisionId::from("rev-40");
    let mut table = OverrideTable::new();
    apply_revision_to_all_leaves(&track, &mut table, &RevisionId::from("rev-7"), Some(&live));

    c.bench_function("compose_fully_overridden", |b| {
        b.iter(|| compose(black_box(&track), black_box(&table), Some(&live)))
    });
}

fn compact_long_history(c: &mut Criterion) {
    let track = catalog_track(500, 4);
    let leaf = LeafAddress::new("section-2", 5);

    c.bench_function("compact_long_history", |b| {
        b.iter(|| compact_history(black_box(&track), black_box(&leaf)))
    });
}

criterion_group!(
    benches,
    compose_without_overrides,
    compose_fully_overridden,
    compact_long_history
);
criterion_main!(benches);
