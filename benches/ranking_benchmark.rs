use criterion::{black_box, criterion_group, criterion_main, Criterion};
use movie_engine::{
    core::Candidate,
    ranking::{RankOptions, Ranker, TfidfRanker},
};

const WORDS: &[&str] = &[
    "dark", "knight", "star", "wars", "lost", "city", "night", "love", "story", "return",
    "king", "space", "blood", "river", "ghost", "summer",
];

fn create_test_candidates(count: usize) -> Vec<Candidate> {
    (0..count)
        .map(|i| {
            let title = format!(
                "{} {} {}",
                WORDS[i % WORDS.len()],
                WORDS[(i * 7 + 3) % WORDS.len()],
                i
            );
            Candidate::new(i.to_string(), title)
        })
        .collect()
}

fn bench_tfidf_ranking(c: &mut Criterion) {
    let ranker = TfidfRanker::new();
    let options = RankOptions::default().excluding_top_match();

    let candidates_20 = create_test_candidates(20);
    let candidates_100 = create_test_candidates(100);
    let candidates_1000 = create_test_candidates(1000);

    c.bench_function("tfidf_rank_20", |b| {
        b.iter(|| black_box(ranker.rank("dark knight", &candidates_20, &options).unwrap()));
    });

    c.bench_function("tfidf_rank_100", |b| {
        b.iter(|| black_box(ranker.rank("lost city of love", &candidates_100, &options).unwrap()));
    });

    c.bench_function("tfidf_rank_1000", |b| {
        b.iter(|| black_box(ranker.rank("star wars return", &candidates_1000, &options).unwrap()));
    });
}

criterion_group!(benches, bench_tfidf_ranking);
criterion_main!(benches);
