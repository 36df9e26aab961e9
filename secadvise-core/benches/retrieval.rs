use criterion::{Criterion, criterion_group, criterion_main};
use secadvise_core::{ContextRetriever, KnowledgeBase, ScoringRule};
use std::hint::black_box;
use std::sync::Arc;

fn bench_retrieval(c: &mut Criterion) {
    let knowledge = Arc::new(KnowledgeBase::security());
    let weighted = ContextRetriever::new(knowledge.clone());
    let simple = ContextRetriever::new(knowledge).with_rule(ScoringRule::Simple);

    c.bench_function("retrieve_weighted_top3", |b| {
        b.iter(|| weighted.retrieve(black_box("How do I prevent SQL injection attacks?"), black_box(3)));
    });

    c.bench_function("retrieve_simple_top3", |b| {
        b.iter(|| simple.retrieve(black_box("How do I prevent SQL injection attacks?"), black_box(3)));
    });

    c.bench_function("rank_no_match", |b| {
        b.iter(|| weighted.rank(black_box("machine learning datasets")));
    });
}

criterion_group!(benches, bench_retrieval);
criterion_main!(benches);
