//! Concurrency tests for Store
//!
//! Tests verify:
//! - Concurrent writers on distinct ids lose no updates
//! - Concurrent readers on an unchanging table see identical results
//! - Racing writers on one id leave exactly one of the written records
//! - Readers never observe a partially written record
//! - Table creation races stay idempotent

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

use tablestore::{Record, Store};

const THREADS: usize = 8;
const PER_THREAD: usize = 200;

fn record_for(worker: usize, i: usize) -> Record {
    Record::new()
        .with("worker", worker as i64)
        .with("seq", i as i64)
        .with("label", format!("t{}-{}", worker, i))
}

// =============================================================================
// Writer Tests
// =============================================================================

#[test]
fn test_concurrent_inserts_distinct_ids() {
    let store = Store::new();
    store.create_table("items");

    crossbeam::scope(|s| {
        for t in 0..THREADS {
            let store = &store;
            s.spawn(move |_| {
                for i in 0..PER_THREAD {
                    store
                        .insert("items", format!("{}-{}", t, i), record_for(t, i))
                        .unwrap();
                }
            });
        }
    })
    .unwrap();

    assert_eq!(store.record_count("items").unwrap(), THREADS * PER_THREAD);
    for t in 0..THREADS {
        for i in 0..PER_THREAD {
            let record = store.retrieve("items", &format!("{}-{}", t, i)).unwrap();
            assert_eq!(record, record_for(t, i));
        }
    }
}

#[test]
fn test_concurrent_insert_update_delete_distinct_ids() {
    let store = Store::new();
    store.create_table("items");

    crossbeam::scope(|s| {
        for t in 0..THREADS {
            let store = &store;
            s.spawn(move |_| {
                for i in 0..PER_THREAD {
                    let id = format!("{}-{}", t, i);
                    store.insert("items", id.clone(), record_for(t, i)).unwrap();
                    store
                        .update("items", &id, record_for(t, i + PER_THREAD))
                        .unwrap();
                    // Every other record is removed again
                    if i % 2 == 1 {
                        store.delete("items", &id).unwrap();
                    }
                }
            });
        }
    })
    .unwrap();

    assert_eq!(store.record_count("items").unwrap(), THREADS * PER_THREAD / 2);
    for t in 0..THREADS {
        for i in 0..PER_THREAD {
            let id = format!("{}-{}", t, i);
            if i % 2 == 1 {
                assert!(store.retrieve("items", &id).unwrap_err().is_record_not_found());
            } else {
                assert_eq!(
                    store.retrieve("items", &id).unwrap(),
                    record_for(t, i + PER_THREAD)
                );
            }
        }
    }
}

#[test]
fn test_racing_writers_on_same_id_last_writer_wins() {
    let store = Store::new();
    store.create_table("items");
    store.insert("items", "hot", record_for(0, 0)).unwrap();

    crossbeam::scope(|s| {
        for t in 0..THREADS {
            let store = &store;
            s.spawn(move |_| {
                for i in 0..PER_THREAD {
                    if i % 2 == 0 {
                        store.insert("items", "hot", record_for(t, i)).unwrap();
                    } else {
                        store.update("items", "hot", record_for(t, i)).unwrap();
                    }
                }
            });
        }
    })
    .unwrap();

    // The survivor must be exactly one of the written records
    let survivor = store.retrieve("items", "hot").unwrap();
    let t = survivor.get("worker").and_then(|v| v.as_i64()).unwrap() as usize;
    let i = survivor.get("seq").and_then(|v| v.as_i64()).unwrap() as usize;
    assert_eq!(survivor, record_for(t, i));
    assert_eq!(store.record_count("items").unwrap(), 1);
}

// =============================================================================
// Reader Tests
// =============================================================================

#[test]
fn test_concurrent_readers_see_identical_results() {
    let store = Arc::new(Store::new());
    store.create_table("items");
    for i in 0..PER_THREAD {
        store.insert("items", i.to_string(), record_for(0, i)).unwrap();
    }

    // All readers start together so their lookups overlap
    let barrier = Arc::new(Barrier::new(THREADS));
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let store = Arc::clone(&store);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..PER_THREAD)
                    .map(|i| store.retrieve("items", &i.to_string()).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let results: Vec<Vec<Record>> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let expected: Vec<Record> = (0..PER_THREAD).map(|i| record_for(0, i)).collect();
    for result in &results {
        assert_eq!(result, &expected);
    }
}

#[test]
fn test_readers_never_see_partial_records() {
    let store = Store::new();
    store.create_table("items");
    store.insert("items", "pair", pair(0)).unwrap();

    let reads = AtomicUsize::new(0);

    crossbeam::scope(|s| {
        let store = &store;
        let reads = &reads;

        s.spawn(move |_| {
            for n in 1..=500 {
                store.update("items", "pair", pair(n)).unwrap();
            }
        });

        for _ in 0..4 {
            s.spawn(move |_| {
                for _ in 0..500 {
                    let record = store.retrieve("items", "pair").unwrap();
                    // Both fields come from the same write
                    assert_eq!(record.get("a"), record.get("b"));
                    reads.fetch_add(1, Ordering::Relaxed);
                }
            });
        }
    })
    .unwrap();

    assert_eq!(reads.load(Ordering::Relaxed), 2000);
    assert_eq!(store.retrieve("items", "pair").unwrap(), pair(500));
}

fn pair(n: i64) -> Record {
    Record::new().with("a", n).with("b", n)
}

// =============================================================================
// Table Registry Tests
// =============================================================================

#[test]
fn test_concurrent_create_table_is_idempotent() {
    let store = Store::new();
    store.create_table("shared");
    store.insert("shared", "keep", Record::new()).unwrap();

    crossbeam::scope(|s| {
        for t in 0..THREADS {
            let store = &store;
            s.spawn(move |_| {
                store.create_table("shared");
                store.create_table(format!("own-{}", t));
            });
        }
    })
    .unwrap();

    assert!(store.contains("shared", "keep").unwrap());
    assert_eq!(store.table_names().len(), THREADS + 1);
}

#[test]
fn test_store_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Store>();
}
