use user_search_engine::{rank_users, RankOptions, UserRecord};

fn user(id: &str, name: Option<&str>, email: Option<&str>, handle: Option<&str>) -> UserRecord {
    let mut record = UserRecord::new(id);
    record.display_name = name.map(str::to_string);
    record.email = email.map(str::to_string);
    record.handle = handle.map(str::to_string);
    record
}

fn roster() -> Vec<UserRecord> {
    vec![
        user("u1", Some("Alice Ivanova"), Some("a.ivanova@example.com"), Some("alice_iv")),
        user("u2", Some("Bob Petrov"), Some("b.petrov@example.com"), Some("bob_p")),
        user("u3", Some("Charlie Sidorov"), Some("c.sidorov@example.com"), Some("charlie_s")),
        user("u4", Some("Diana Kuznetsova"), Some("d.kuznetsova@example.com"), Some("diana_k")),
        user("u5", Some("Eve Smirnova"), Some("e.smirnova@example.com"), Some("eve_sm")),
    ]
}

fn options(limit: usize, min_score: f64) -> RankOptions {
    RankOptions { limit, min_score }
}

#[test]
fn test_empty_candidates() {
    assert!(rank_users(&[], "alice", &RankOptions::default()).is_empty());
}

#[test]
fn test_no_match() {
    let results = rank_users(&roster(), "zzzzzzzzz", &options(10, 90.0));
    assert!(results.is_empty());
}

#[test]
fn test_exact_name() {
    let results = rank_users(&roster(), "Alice Ivanova", &options(10, 20.0));
    assert_eq!(results[0].user.id, "u1");
    assert_eq!(results[0].name_score, 100.0);
}

#[test]
fn test_partial_name() {
    let results = rank_users(&roster(), "Bob", &options(10, 20.0));
    assert_eq!(results[0].user.id, "u2");
}

#[test]
fn test_name_case_insensitive() {
    let upper = rank_users(&roster(), "CHARLIE SIDOROV", &options(10, 20.0));
    let lower = rank_users(&roster(), "charlie sidorov", &options(10, 20.0));

    assert_eq!(upper[0].user.id, "u3");
    assert_eq!(upper[0].score, lower[0].score);
}

#[test]
fn test_exact_email() {
    let results = rank_users(&roster(), "a.ivanova@example.com", &RankOptions::default());
    assert_eq!(results[0].user.id, "u1");
    assert_eq!(results[0].email_score, 100.0);
}

#[test]
fn test_email_prefix() {
    let results = rank_users(&roster(), "b.petrov@", &options(10, 30.0));
    assert_eq!(results[0].user.id, "u2");
    // Prefix override must yield exactly 95, not a lower fuzzy value
    assert_eq!(results[0].email_score, 95.0);
}

#[test]
fn test_dot_pattern_weights_email() {
    let results = rank_users(&roster(), "a.ivanova", &options(10, 30.0));
    assert_eq!(results[0].user.id, "u1");
    assert!(results[0].email_score > results[0].name_score);
}

#[test]
fn test_handle_exact() {
    let results = rank_users(&roster(), "@alice_iv", &RankOptions::default());
    assert_eq!(results[0].user.id, "u1");
    assert_eq!(results[0].handle_score, 100.0);
}

#[test]
fn test_handle_partial() {
    let results = rank_users(&roster(), "@bob_p", &RankOptions::default());
    assert_eq!(results[0].user.id, "u2");
}

#[test]
fn test_handle_weight() {
    let results = rank_users(&roster(), "@diana_k", &RankOptions::default());
    let best = &results[0];
    assert_eq!(best.user.id, "u4");
    assert!(best.score >= 0.8 * best.handle_score);
}

#[test]
fn test_limit() {
    let results = rank_users(&roster(), "example", &options(2, 0.0));
    assert!(results.len() <= 2);
}

#[test]
fn test_min_score_filters() {
    let results = rank_users(&roster(), "xyz_nomatch_123", &options(10, 99.0));
    assert!(results.is_empty());
}

#[test]
fn test_scores_descending() {
    let results = rank_users(&roster(), "Petrov", &options(10, 0.0));
    assert!(!results.is_empty());
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_scores_stay_in_bounds() {
    for query in ["Alice", "@alice_iv", "a.ivanova@example.com", "a.ivanova", "x"] {
        for result in rank_users(&roster(), query, &options(10, 0.0)) {
            assert!((0.0..=100.0).contains(&result.score));
            assert!((0.0..=100.0).contains(&result.name_score));
            assert!((0.0..=100.0).contains(&result.email_score));
            assert!((0.0..=100.0).contains(&result.handle_score));
        }
    }
}

#[test]
fn test_no_handle_field() {
    let solo = vec![user("u1", Some("Only Name"), Some("only@example.com"), None)];
    let results = rank_users(&solo, "Only Name", &options(10, 20.0));
    assert!(!results.is_empty());
    assert_eq!(results[0].handle_score, 0.0);
}

#[test]
fn test_no_name_no_email() {
    let solo = vec![user("u1", None, None, Some("solo_tg"))];
    let results = rank_users(&solo, "@solo_tg", &RankOptions::default());
    assert!(!results.is_empty());
    assert_eq!(results[0].name_score, 0.0);
    assert_eq!(results[0].email_score, 0.0);
}

#[test]
fn test_threshold_above_maximum_keeps_only_exact_overrides() {
    // 100.0 is only reachable through the exact-match overrides; with the
    // threshold above 100 even those are filtered
    let results = rank_users(&roster(), "a.ivanova@example.com", &options(10, 100.1));
    assert!(results.is_empty());

    let exact = rank_users(&roster(), "a.ivanova@example.com", &options(10, 100.0));
    assert_eq!(exact.len(), 1);
    assert_eq!(exact[0].user.id, "u1");
}
