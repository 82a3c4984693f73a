//! Integration tests driving the binding the way a benchmark worker does.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use common::storage::in_memory::InMemoryStorage;
use common::{Record, Storage};
use kv::{Binding, KvBinding, KvClient, SCAN_INDEX, ScanSequence, Status};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn setup_binding(use_secondary_index: bool) -> (KvBinding, Arc<InMemoryStorage>) {
    init_tracing();
    let storage = Arc::new(InMemoryStorage::new());
    let client = if use_secondary_index {
        KvClient::with_scan_sequence(storage.clone(), Arc::new(ScanSequence::new()))
    } else {
        KvClient::new(storage.clone())
    };
    (KvBinding::new(client), storage)
}

fn read(binding: &KvBinding, table: &str, key: &str) -> (Status, Record) {
    let mut result = Record::new();
    let status = binding.read(table, key, None, &mut result);
    (status, result)
}

#[test]
fn test_insert_update_read_person() {
    // Setup
    let (binding, _) = setup_binding(false);
    let person = Record::from_iter([("first_name", "Dave"), ("last_name", "Parfitt")]);

    // Insert and read back
    assert_eq!(binding.insert("people", "person1", &person), Status::Ok);
    let (status, result) = read(&binding, "people", "person1");
    assert_eq!(status, Status::Ok);
    assert_eq!(result, person);

    // Add a field and read back
    let update = Record::from_iter([("twitter", "@metadave")]);
    assert_eq!(binding.update("people", "person1", &update), Status::Ok);
    let (status, result) = read(&binding, "people", "person1");
    assert_eq!(status, Status::Ok);
    assert_eq!(
        result,
        Record::from_iter([
            ("first_name", "Dave"),
            ("last_name", "Parfitt"),
            ("twitter", "@metadave"),
        ])
    );
}

#[test]
fn test_update_missing_key_is_silent_success() {
    // Setup
    let (binding, storage) = setup_binding(true);

    // Update a key that was never inserted
    let status = binding.update("people", "ghost", &Record::from_iter([("a", "1")]));
    assert_eq!(status, Status::Ok);

    // Nothing was created
    let (status, result) = read(&binding, "people", "ghost");
    assert_eq!(status, Status::NotFound);
    assert!(result.is_empty());
    assert_eq!(storage.len("people").unwrap(), 0);
}

#[test]
fn test_delete_then_read_not_found() {
    // Setup
    let (binding, _) = setup_binding(false);
    binding.insert("t", "k", &Record::from_iter([("f", "v")]));

    // Delete and read
    assert_eq!(binding.delete("t", "k"), Status::Ok);
    let (status, _) = read(&binding, "t", "k");
    assert_eq!(status, Status::NotFound);
}

#[test]
fn test_scan_returns_inserted_records() {
    // Setup
    let (binding, _) = setup_binding(true);
    let records: Vec<Record> = (0..5)
        .map(|i| {
            Record::from_iter([
                ("field0", format!("a{}", i)),
                ("field1", format!("b{}", i)),
            ])
        })
        .collect();
    for (i, record) in records.iter().enumerate() {
        assert_eq!(
            binding.insert("usertable", &format!("user{}", i), record),
            Status::Ok
        );
    }

    // Scan from the first key
    let mut result = Vec::new();
    let status = binding.scan("usertable", "user0", 5, None, &mut result);

    // Same records, in insertion order since nothing interleaved
    assert_eq!(status, Status::Ok);
    assert_eq!(result, records);
}

#[test]
fn test_scan_projects_fields() {
    // Setup
    let (binding, _) = setup_binding(true);
    for i in 0..3 {
        binding.insert(
            "t",
            &format!("k{}", i),
            &Record::from_iter([("keep", format!("{}", i)), ("drop", "x".to_string())]),
        );
    }
    let fields: HashSet<String> = ["keep".to_string()].into();

    // Scan with a projection
    let mut result = Vec::new();
    let status = binding.scan("t", "k0", 3, Some(&fields), &mut result);

    // Only the requested field is returned
    assert_eq!(status, Status::Ok);
    assert_eq!(result.len(), 3);
    assert!(result.iter().all(|r| r.len() == 1 && r.contains("keep")));
}

#[test]
fn test_scan_missing_start_key_fails() {
    // Setup
    let (binding, _) = setup_binding(true);

    // Scan from a key that does not exist
    let mut result = Vec::new();
    let status = binding.scan("t", "missing", 5, None, &mut result);

    assert_eq!(status, Status::Error);
    assert_eq!(status.code(), -1);
    assert!(result.is_empty());
}

#[test]
fn test_update_keeps_record_scannable() {
    // Setup
    let (binding, storage) = setup_binding(true);
    for i in 0..3 {
        binding.insert("t", &format!("k{}", i), &Record::from_iter([("v", "old")]));
    }
    let before = storage.fetch("t", "k1").unwrap().unwrap().indexes;

    // Update the middle record
    assert_eq!(
        binding.update("t", "k1", &Record::from_iter([("v", "new")])),
        Status::Ok
    );

    // The scan index survived and the record still appears in scans
    let after = storage.fetch("t", "k1").unwrap().unwrap().indexes;
    assert_eq!(before, after);
    let mut result = Vec::new();
    assert_eq!(binding.scan("t", "k0", 3, None, &mut result), Status::Ok);
    assert_eq!(result.len(), 3);
    assert_eq!(result[1], Record::from_iter([("v", "new")]));
}

#[test]
fn test_concurrent_workers_share_scan_sequence() {
    // Setup: one gateway and one sequence, a binding per worker
    init_tracing();
    let storage = Arc::new(InMemoryStorage::new());
    let sequence = Arc::new(ScanSequence::new());
    let workers = 4;
    let inserts = 25;

    thread::scope(|s| {
        for w in 0..workers {
            let binding = KvBinding::new(KvClient::with_scan_sequence(
                storage.clone(),
                sequence.clone(),
            ));
            s.spawn(move || {
                for i in 0..inserts {
                    let status = binding.insert(
                        "t",
                        &format!("w{}-{:02}", w, i),
                        &Record::from_iter([("w", w.to_string())]),
                    );
                    assert_eq!(status, Status::Ok);
                }
            });
        }
    });

    // Every insert got a distinct value, increasing per worker
    let mut seen = HashSet::new();
    for w in 0..workers {
        let mut last = None;
        for i in 0..inserts {
            let object = storage
                .fetch("t", &format!("w{}-{:02}", w, i))
                .unwrap()
                .unwrap();
            let idx = object.indexes.first(SCAN_INDEX).unwrap();
            assert!(last.is_none_or(|prev| prev < idx));
            last = Some(idx);
            assert!(seen.insert(idx));
        }
    }
    assert_eq!(sequence.peek(), (workers * inserts) as u64);
}

struct UnusedConnector;

impl common::Connector for UnusedConnector {
    fn connect(
        &self,
        address: &common::ServerAddress,
    ) -> common::StorageResult<Arc<dyn Storage>> {
        Err(common::StorageError::Storage(format!(
            "unexpected connect to {}",
            address
        )))
    }
}

#[test]
fn test_open_from_in_memory_config_and_cleanup() {
    // Setup
    init_tracing();
    let config = kv::Config {
        storage: common::StorageConfig::InMemory,
        use_secondary_index: true,
    };
    let binding = KvBinding::open(
        &config,
        &UnusedConnector,
        &common::ServerRotation::new(),
        Arc::new(ScanSequence::new()),
    )
    .expect("Failed to open binding");

    // Insert and scan through the opened binding
    binding.insert("t", "user1", &Record::from_iter([("f", "v")]));
    let mut result = Vec::new();
    assert_eq!(binding.scan("t", "user1", 1, None, &mut result), Status::Ok);
    assert_eq!(result, vec![Record::from_iter([("f", "v")])]);

    // Cleanup closes the gateway
    assert_eq!(binding.cleanup(), Status::Ok);
}
