use criterion::{black_box, criterion_group, criterion_main, Criterion};
use user_search_engine::{rank_users, RankOptions, UserRecord};

fn create_test_candidates(count: usize) -> Vec<UserRecord> {
    (0..count)
        .map(|i| {
            let mut record = UserRecord::new(format!("u{}", i));
            record.display_name = Some(format!("Test User {}", i));
            record.email = Some(format!("t.user{}@example.com", i));
            record.handle = Some(format!("test_user_{}", i));
            record
        })
        .collect()
}

fn bench_rank_users(c: &mut Criterion) {
    let options = RankOptions::default();

    let candidates_10 = create_test_candidates(10);
    let candidates_50 = create_test_candidates(50);
    let candidates_100 = create_test_candidates(100);

    c.bench_function("rank_users_10", |b| {
        b.iter(|| black_box(rank_users(&candidates_10, "test user 5", &options)));
    });

    c.bench_function("rank_users_50", |b| {
        b.iter(|| black_box(rank_users(&candidates_50, "test user 25", &options)));
    });

    c.bench_function("rank_users_100", |b| {
        b.iter(|| black_box(rank_users(&candidates_100, "test user 50", &options)));
    });
}

fn bench_query_shapes(c: &mut Criterion) {
    let options = RankOptions::default();
    let candidates = create_test_candidates(100);

    c.bench_function("rank_users_handle_query", |b| {
        b.iter(|| black_box(rank_users(&candidates, "@test_user_50", &options)));
    });

    c.bench_function("rank_users_email_query", |b| {
        b.iter(|| black_box(rank_users(&candidates, "t.user50@example.com", &options)));
    });

    c.bench_function("rank_users_dotted_query", |b| {
        b.iter(|| black_box(rank_users(&candidates, "t.user50", &options)));
    });
}

criterion_group!(benches, bench_rank_users, bench_query_shapes);
criterion_main!(benches);
