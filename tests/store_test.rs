use msg_stream_rust::models::NewClassifiedMessage;
use msg_stream_rust::{classify, Category, MessageStore};
use tempfile::TempDir;

fn new_record(content: &str) -> NewClassifiedMessage {
    NewClassifiedMessage {
        content: content.to_string(),
        author: None,
        keyword: None,
        length: content.chars().count() as i64,
        category: classify(content),
    }
}

#[test]
fn test_empty_store_reports_all_categories_as_zero() {
    let dir = TempDir::new().expect("temp dir");
    let store = MessageStore::new(&dir.path().join("test.db")).expect("create store");

    let counts = store.count_by_category().expect("count");
    assert_eq!(counts.get(Category::Short), 0);
    assert_eq!(counts.get(Category::Medium), 0);
    assert_eq!(counts.get(Category::Long), 0);
    assert_eq!(counts.total(), 0);
}

#[test]
fn test_counts_match_appended_categories() {
    let dir = TempDir::new().expect("temp dir");
    let store = MessageStore::new(&dir.path().join("test.db")).expect("create store");

    // Lengths 5, 30, 75: one record per category
    store.append(new_record(&"a".repeat(5))).expect("append short");
    store.append(new_record(&"b".repeat(30))).expect("append medium");
    store.append(new_record(&"c".repeat(75))).expect("append long");

    let counts = store.count_by_category().expect("count");
    assert_eq!(counts.get(Category::Short), 1);
    assert_eq!(counts.get(Category::Medium), 1);
    assert_eq!(counts.get(Category::Long), 1);
}

#[test]
fn test_append_returns_monotonic_ids_and_stored_fields() {
    let dir = TempDir::new().expect("temp dir");
    let store = MessageStore::new(&dir.path().join("test.db")).expect("create store");

    let first = store.append(new_record("hi")).expect("append");
    let second = store.append(new_record("a slightly longer message")).expect("append");

    assert!(first.id < second.id);
    assert_eq!(first.content, "hi");
    assert_eq!(first.length, 2);
    assert_eq!(first.category, Category::Short);
    assert_eq!(second.category, Category::Medium);
}

#[test]
fn test_initialization_is_idempotent() {
    let dir = TempDir::new().expect("temp dir");
    let db_path = dir.path().join("test.db");

    {
        let store = MessageStore::new(&db_path).expect("create store");
        store.append(new_record("survivor")).expect("append");
    }

    // Reopening must re-run migrations without wiping existing data
    let store = MessageStore::new(&db_path).expect("reopen store");
    let messages = store.all_messages().expect("fetch");
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].content, "survivor");
}

#[test]
fn test_optional_author_and_keyword_round_trip() {
    let dir = TempDir::new().expect("temp dir");
    let store = MessageStore::new(&dir.path().join("test.db")).expect("create store");

    let mut record = new_record("I have a dream.");
    record.author = Some("Martin Luther King Jr.".to_string());
    record.keyword = Some("dream".to_string());
    store.append(record).expect("append");

    let messages = store.all_messages().expect("fetch");
    assert_eq!(messages[0].author.as_deref(), Some("Martin Luther King Jr."));
    assert_eq!(messages[0].keyword.as_deref(), Some("dream"));
    assert_eq!(messages[0].length, 15);
}

#[test]
fn test_configured_pool_size_is_applied() {
    let dir = TempDir::new().expect("temp dir");
    let store = MessageStore::with_max_connections(&dir.path().join("test.db"), 2)
        .expect("create store");

    // Hold every pooled connection; a further non-blocking checkout must fail
    let _first = store.get_connection().expect("first connection");
    let _second = store.get_connection().expect("second connection");
    assert!(
        store.try_connection().is_none(),
        "pool must be capped at the configured size"
    );

    drop(_first);
    assert!(store.try_connection().is_some());
}

#[test]
fn test_total_messages() {
    let dir = TempDir::new().expect("temp dir");
    let store = MessageStore::new(&dir.path().join("test.db")).expect("create store");

    assert_eq!(store.total_messages().expect("total"), 0);
    store.append(new_record("one")).expect("append");
    store.append(new_record("two")).expect("append");
    assert_eq!(store.total_messages().expect("total"), 2);
}
