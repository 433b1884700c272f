use std::sync::Arc;
use user_search_engine::directory::{SqliteDirectory, UserDirectory};
use user_search_engine::{SearchRequest, SearchResultType, UserRecord, UserSearchEngine};

fn user(id: &str, name: Option<&str>, email: Option<&str>, handle: Option<&str>) -> UserRecord {
    let mut record = UserRecord::new(id);
    record.display_name = name.map(str::to_string);
    record.email = email.map(str::to_string);
    record.handle = handle.map(str::to_string);
    record
}

async fn seeded_directory() -> Arc<SqliteDirectory> {
    let directory = Arc::new(SqliteDirectory::new(":memory:").await.unwrap());

    let roster = vec![
        user("u1", Some("Alice Ivanova"), Some("a.ivanova@example.com"), Some("alice_iv")),
        user("u2", Some("Bob Petrov"), Some("b.petrov@example.com"), Some("bob_p")),
        user("u3", Some("Charlie Sidorov"), Some("c.sidorov@example.com"), Some("charlie_s")),
        user("u4", Some("Diana Kuznetsova"), Some("d.kuznetsova@example.com"), Some("diana_k")),
    ];
    for record in &roster {
        directory.upsert(record).await.unwrap();
    }

    directory
}

#[tokio::test]
async fn test_suggest_end_to_end() {
    let engine = UserSearchEngine::new(seeded_directory().await);

    let response = engine.suggest(SearchRequest::new("alice")).await.unwrap();

    assert!(!response.is_empty());
    assert_eq!(response.best().unwrap().user.id, "u1");
    assert_eq!(response.directory, "sqlite");
    assert!(response.candidates_considered >= 1);
    assert!(response.latency_ms >= 0.0);
}

#[tokio::test]
async fn test_suggest_exact_handle() {
    let engine = UserSearchEngine::new(seeded_directory().await);

    let response = engine.suggest(SearchRequest::new("@diana_k")).await.unwrap();

    let best = response.best().unwrap();
    assert_eq!(best.user.id, "u4");
    assert_eq!(best.handle_score, 100.0);
    assert_eq!(response.result_type, SearchResultType::Exact);
}

#[tokio::test]
async fn test_suggest_no_match_is_a_valid_outcome() {
    let engine = UserSearchEngine::new(seeded_directory().await);

    let response = engine
        .suggest(SearchRequest::new("qqqqqqqqqq"))
        .await
        .unwrap();

    assert!(response.is_empty());
    assert_eq!(response.result_type, SearchResultType::Empty);
}

#[tokio::test]
async fn test_suggest_respects_limit() {
    let engine = UserSearchEngine::new(seeded_directory().await);

    let request = SearchRequest {
        query: "example".to_string(),
        limit: 2,
        min_score: 0.0,
    };
    let response = engine.suggest(request).await.unwrap();

    assert!(response.matches.len() <= 2);
    assert!(response.candidates_considered >= 4);
}

#[tokio::test]
async fn test_get_user() {
    let engine = UserSearchEngine::new(seeded_directory().await);

    let fetched = engine.get_user("u2").await.unwrap().unwrap();
    assert_eq!(fetched.display_name.as_deref(), Some("Bob Petrov"));

    assert!(engine.get_user("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_directory_stats_through_engine() {
    let engine = UserSearchEngine::new(seeded_directory().await);

    let stats = engine.directory_stats().await.unwrap();
    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.with_email, 4);
    assert_eq!(stats.with_handle, 4);
}

#[tokio::test]
async fn test_directory_is_available() {
    let directory = seeded_directory().await;
    assert!(directory.is_available().await);
    assert_eq!(directory.name(), "sqlite");
}
