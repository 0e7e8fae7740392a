//! Table Tests
//!
//! Tests verify:
//! - Upsert semantics of put
//! - Replace only touches existing ids
//! - Removal and counting

use tablestore::{Record, Table};

fn named(name: &str) -> Record {
    Record::new().with("name", name)
}

#[test]
fn test_new_table_is_empty() {
    let table = Table::new();
    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
    assert_eq!(table.ids().count(), 0);

    assert!(Table::with_capacity(128).is_empty());
}

#[test]
fn test_put_and_get() {
    let mut table = Table::new();

    assert_eq!(table.put("1".into(), named("Alice")), None);

    assert_eq!(table.get("1"), Some(&named("Alice")));
    assert!(table.contains("1"));
    assert_eq!(table.get("2"), None);
}

#[test]
fn test_put_overwrites_and_returns_previous() {
    let mut table = Table::new();
    table.put("1".into(), named("Alice"));

    let previous = table.put("1".into(), named("Bob"));

    assert_eq!(previous, Some(named("Alice")));
    assert_eq!(table.get("1"), Some(&named("Bob")));
    assert_eq!(table.len(), 1);
}

#[test]
fn test_replace_existing() {
    let mut table = Table::new();
    table.put("1".into(), named("Alice"));

    assert_eq!(table.replace("1", named("Alicia")), Some(named("Alice")));
    assert_eq!(table.get("1"), Some(&named("Alicia")));
}

#[test]
fn test_replace_missing_leaves_table_untouched() {
    let mut table = Table::new();
    table.put("1".into(), named("Alice"));

    assert_eq!(table.replace("2", named("Bob")), None);
    assert_eq!(table.len(), 1);
    assert!(!table.contains("2"));
}

#[test]
fn test_remove() {
    let mut table = Table::new();
    table.put("1".into(), named("Alice"));

    assert_eq!(table.remove("1"), Some(named("Alice")));
    assert_eq!(table.remove("1"), None);
    assert!(table.is_empty());
}

#[test]
fn test_ids() {
    let mut table = Table::new();
    for id in ["c", "a", "b"] {
        table.put(id.to_string(), Record::new());
    }

    let mut ids: Vec<&str> = table.ids().collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["a", "b", "c"]);
}
