// Benchmarks of the view functions over a corpus-sized store
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use genrescope_core::view;
use genrescope_core::{
    BookId, DataStore, Genre, MetadataRecord, ProjectionRecord, ScoreRecord, Session, TopWords,
    WordCoefficient, DEFAULT_AUTHOR, DEFAULT_BOOK_ID,
};

fn build_store(books: u64) -> DataStore {
    let author = |i: u64| {
        if i % 50 == 0 {
            DEFAULT_AUTHOR.to_string()
        } else {
            format!("Author {}", i % 900)
        }
    };
    let ids: Vec<BookId> = std::iter::once(DEFAULT_BOOK_ID)
        .chain((1..books).map(BookId))
        .collect();

    let metadata = ids
        .iter()
        .map(|&id| {
            MetadataRecord::new(
                id,
                format!("Title {}", id),
                author(id.0),
                format!("{}", 1880 + id.0 % 120),
                "Adventure|Romance",
            )
        })
        .collect();
    let scores = ids
        .iter()
        .map(|&id| {
            let mut raw = [0.0; Genre::COUNT];
            for (i, value) in raw.iter_mut().enumerate() {
                *value = ((id.0 as f64) * 0.37 + i as f64).sin() * 4.0;
            }
            ScoreRecord::from_log_odds(id, raw)
        })
        .collect();
    let projection = ids
        .iter()
        .map(|&id| ProjectionRecord {
            id,
            x: (id.0 as f64).cos() * 50.0,
            y: (id.0 as f64).sin() * 50.0,
            genre: Genre::ALL[(id.0 % 12) as usize].to_string(),
            title: format!("Title {}", id),
            author: author(id.0),
            date: format!("{}", 1880 + id.0 % 120),
        })
        .collect();
    let top_words = Genre::ALL
        .iter()
        .map(|&genre| {
            let words = TopWords {
                positive: (0..100)
                    .map(|i| WordCoefficient(format!("w{}", i), 3.0 - i as f64 * 0.01))
                    .collect(),
                negative: (0..100)
                    .map(|i| WordCoefficient(format!("n{}", i), -3.0 + i as f64 * 0.01))
                    .collect(),
            };
            (genre, words)
        })
        .collect();

    DataStore::new(projection, metadata, scores, top_words).unwrap()
}

fn benchmark_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("views");

    for size in [1_000u64, 10_000].iter() {
        let store = build_store(*size);

        group.bench_with_input(BenchmarkId::new("author_books", size), &store, |b, store| {
            b.iter(|| view::author_books(store, black_box(DEFAULT_AUTHOR)))
        });

        group.bench_with_input(BenchmarkId::new("confidence_series", size), &store, |b, store| {
            b.iter(|| view::confidence_series(store, black_box(DEFAULT_BOOK_ID)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("genre_word_table", size), &store, |b, store| {
            b.iter(|| view::genre_word_table(store, black_box("detective and mystery"), 15).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("scatter_plot", size), &store, |b, store| {
            b.iter(|| view::scatter_plot(black_box(store)))
        });
    }

    group.finish();
}

fn benchmark_session(c: &mut Criterion) {
    let store = build_store(10_000);
    let mut session = Session::new(&store).unwrap();

    c.bench_function("session_select_book", |b| {
        let mut id = 1u64;
        b.iter(|| {
            id = id % 9_999 + 1;
            session.select_book(&store, Some(BookId(id))).unwrap()
        })
    });
}

criterion_group!(benches, benchmark_views, benchmark_session);
criterion_main!(benches);
