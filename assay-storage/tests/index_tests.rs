use assay_storage::index::{add_index, arity, contains, list_keys};
use assay_storage::{MemoryStore, SqliteStore, StorageError, Transaction};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const OWNER_INDEX: &str = "algo~owner~key";

fn index_algo(store: &MemoryStore, owner: &str, key: &str) {
    let mut tx = Transaction::new(store);
    add_index(&mut tx, OWNER_INDEX, &["algo", owner, key]).unwrap();
    tx.commit().unwrap();
}

#[test]
fn arity_counts_segments() {
    assert_eq!(arity("algo~owner~key"), 3);
    assert_eq!(arity("dataSample~dataManager~key"), 3);
}

#[test]
fn list_all_and_by_owner() {
    let store = MemoryStore::new();
    index_algo(&store, "alice", "k2");
    index_algo(&store, "bob", "k3");
    index_algo(&store, "alice", "k1");

    assert_eq!(
        list_keys(&store, OWNER_INDEX, &["algo"]).unwrap(),
        vec!["k1", "k2", "k3"]
    );
    assert_eq!(
        list_keys(&store, OWNER_INDEX, &["algo", "alice"]).unwrap(),
        vec!["k1", "k2"]
    );
    assert_eq!(
        list_keys(&store, OWNER_INDEX, &["algo", "bob"]).unwrap(),
        vec!["k3"]
    );
    assert!(
        list_keys(&store, OWNER_INDEX, &["algo", "carol"])
            .unwrap()
            .is_empty()
    );
}

#[test]
fn empty_index_lists_nothing() {
    let store = MemoryStore::new();
    assert!(list_keys(&store, OWNER_INDEX, &["algo"]).unwrap().is_empty());
}

#[test]
fn contains_full_entry() {
    let store = MemoryStore::new();
    index_algo(&store, "alice", "k1");
    assert!(contains(&store, OWNER_INDEX, &["algo", "alice", "k1"]).unwrap());
    assert!(!contains(&store, OWNER_INDEX, &["algo", "bob", "k1"]).unwrap());
}

#[test]
fn re_adding_entry_is_idempotent() {
    let store = MemoryStore::new();
    index_algo(&store, "alice", "k1");
    index_algo(&store, "alice", "k1");
    assert_eq!(list_keys(&store, OWNER_INDEX, &["algo"]).unwrap(), vec!["k1"]);
}

#[test]
fn entries_staged_in_one_transaction_accumulate() {
    let store = MemoryStore::new();
    let mut tx = Transaction::new(&store);
    for key in ["k3", "k1", "k2"] {
        add_index(&mut tx, "dataSample~dataManager~key", &["dataSample", "dm", key]).unwrap();
    }
    tx.commit().unwrap();
    assert_eq!(
        list_keys(&store, "dataSample~dataManager~key", &["dataSample", "dm"]).unwrap(),
        vec!["k1", "k2", "k3"]
    );
}

#[test]
fn each_entry_rewrites_one_posting_list_per_prefix() {
    let store = MemoryStore::new();
    for i in 0..50 {
        index_algo(&store, "alice", &format!("k{i:02}"));
    }

    let mut tx = Transaction::new(&store);
    add_index(&mut tx, OWNER_INDEX, &["algo", "bob", "k99"]).unwrap();
    // `["algo"]` and `["algo", "bob"]` posting lists, then the entry itself.
    assert_eq!(tx.staged_len(), arity(OWNER_INDEX));
    tx.commit().unwrap();

    let all = list_keys(&store, OWNER_INDEX, &["algo"]).unwrap();
    assert_eq!(all.len(), 51);
    assert_eq!(all.last().map(String::as_str), Some("k99"));
}

#[test]
fn uncommitted_entries_are_invisible() {
    let store = MemoryStore::new();
    let mut tx = Transaction::new(&store);
    add_index(&mut tx, OWNER_INDEX, &["algo", "alice", "k1"]).unwrap();
    drop(tx);
    assert!(list_keys(&store, OWNER_INDEX, &["algo"]).unwrap().is_empty());
}

#[test]
fn wrong_attribute_count_is_index_error() {
    let store = MemoryStore::new();
    let mut tx = Transaction::new(&store);
    let err = add_index(&mut tx, OWNER_INDEX, &["algo", "k1"]).unwrap_err();
    assert!(matches!(err, StorageError::Index(_)));
    assert_eq!(tx.staged_len(), 0);
}

#[test]
fn separator_in_attribute_rejected() {
    let store = MemoryStore::new();
    let mut tx = Transaction::new(&store);
    assert!(add_index(&mut tx, OWNER_INDEX, &["algo", "ali\u{0}ce", "k1"]).is_err());
    assert!(add_index(&mut tx, OWNER_INDEX, &["algo", "", "k1"]).is_err());
}

#[test]
fn listing_by_full_or_empty_prefix_rejected() {
    let store = MemoryStore::new();
    assert!(list_keys(&store, OWNER_INDEX, &[]).is_err());
    assert!(list_keys(&store, OWNER_INDEX, &["algo", "alice", "k1"]).is_err());
}

#[test]
fn works_over_sqlite() {
    let store = SqliteStore::open_in_memory().unwrap();
    let mut tx = Transaction::new(&store);
    add_index(&mut tx, "model~algo~key", &["model", "algo1", "m1"]).unwrap();
    add_index(&mut tx, "model~algo~key", &["model", "algo2", "m2"]).unwrap();
    tx.commit().unwrap();
    assert_eq!(
        list_keys(&store, "model~algo~key", &["model", "algo1"]).unwrap(),
        vec!["m1"]
    );
    assert_eq!(
        list_keys(&store, "model~algo~key", &["model"]).unwrap(),
        vec!["m1", "m2"]
    );
}

proptest! {
    #[test]
    fn listing_equals_sorted_distinct_keys(
        entries in prop::collection::vec(("[a-c]", "[0-9a-f]{8}"), 0..30),
    ) {
        let store = MemoryStore::new();
        for (owner, key) in &entries {
            index_algo(&store, owner, key);
        }

        let mut expected: Vec<String> = entries.iter().map(|(_, k)| k.clone()).collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(list_keys(&store, OWNER_INDEX, &["algo"]).unwrap(), expected);

        for owner in ["a", "b", "c"] {
            let mut by_owner: Vec<String> = entries
                .iter()
                .filter(|(o, _)| o == owner)
                .map(|(_, k)| k.clone())
                .collect();
            by_owner.sort();
            by_owner.dedup();
            prop_assert_eq!(list_keys(&store, OWNER_INDEX, &["algo", owner]).unwrap(), by_owner);
        }
    }
}
