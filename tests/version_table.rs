use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap};
use std::io;
use std::sync::{Arc, Mutex};

use persistent_avl::{Error, PersistentAvl, VersionId, VersionTable};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

const KEYS: [i64; 11] = [50, 30, 70, 20, 40, 60, 80, 10, 25, 35, 45];

/// Inserts `KEYS` one version at a time and returns the last version.
fn build(table: &mut VersionTable<i64>) -> VersionId {
    let mut v = table.empty_version();
    for key in KEYS {
        v = table.insert(v, key).unwrap();
    }
    v
}

fn keys(table: &VersionTable<i64>, v: VersionId) -> Vec<i64> {
    table.tree(v).unwrap().iter().copied().collect()
}

// ─── Reference scenarios ─────────────────────────────────────────────────────

#[test]
fn sequential_inserts_are_balanced_and_range_queryable() {
    let mut table = VersionTable::new();
    let v = build(&mut table);

    assert_eq!(v, VersionId(KEYS.len()));
    assert!(table.is_balanced(v).unwrap());
    assert_eq!(table.range_query(v, &30, &60).unwrap(), [&30, &35, &40, &45, &50, &60]);
    assert_eq!(table.count_in_range(v, &30, &60).unwrap(), 6);
    assert_eq!(table.sum_in_range::<i64>(v, &30, &60).unwrap(), 260);
}

#[test]
fn select_reaches_both_ends() {
    let mut table = VersionTable::new();
    let v = build(&mut table);

    assert_eq!(table.select(v, 1).unwrap(), &10);
    assert_eq!(table.select(v, 11).unwrap(), &80);
    assert_eq!(table.kth_largest(v, 1).unwrap(), &80);
    assert_eq!(table.select(v, 0), Err(Error::OutOfRange { k: 0, len: 11 }));
    assert_eq!(table.select(v, 12), Err(Error::OutOfRange { k: 12, len: 11 }));
}

#[test]
fn deleting_a_leaf_leaves_the_base_intact() {
    let mut table = VersionTable::new();
    let v = build(&mut table);
    let w = table.delete(v, &10).unwrap();

    assert_eq!(keys(&table, w), [20, 25, 30, 35, 40, 45, 50, 60, 70, 80]);
    assert_eq!(keys(&table, v), [10, 20, 25, 30, 35, 40, 45, 50, 60, 70, 80]);
    assert!(table.is_balanced(w).unwrap());
}

#[test]
fn branches_from_one_base_are_independent() {
    let mut table = VersionTable::new();
    let mut v3 = table.empty_version();
    for key in [50, 30, 70] {
        v3 = table.insert(v3, key).unwrap();
    }

    let left = table.insert(v3, 15).unwrap();
    let right = table.insert(v3, 35).unwrap();

    assert_eq!(keys(&table, v3), [30, 50, 70]);
    assert_eq!(keys(&table, left), [15, 30, 50, 70]);
    assert_eq!(keys(&table, right), [30, 35, 50, 70]);
}

#[test]
fn out_of_bounds_and_inverted_ranges_are_empty() {
    let mut table = VersionTable::new();
    let v = build(&mut table);

    assert!(table.range_query(v, &100, &200).unwrap().is_empty());
    assert!(table.range_query(v, &5, &3).unwrap().is_empty());
    assert_eq!(table.count_in_range(v, &5, &3).unwrap(), 0);
    assert_eq!(table.min_in_range(v, &5, &3).unwrap(), None);
    assert_eq!(table.max_in_range(v, &100, &200).unwrap(), None);
}

#[test]
fn sums_widen_past_the_key_type() {
    let mut table: VersionTable<i32> = VersionTable::with_capacity(70_001);
    let mut v = table.empty_version();
    for offset in 0..70_000 {
        v = table.insert(v, i32::MAX - offset).unwrap();
    }

    let total: i64 = table.sum_in_range(v, &0, &i32::MAX).unwrap();
    let expected: i64 = (0..70_000i64).map(|offset| i64::from(i32::MAX) - offset).sum();
    assert_eq!(total, expected);
}

// ─── Error reporting ─────────────────────────────────────────────────────────

#[test]
fn errors_surface_at_the_boundary() {
    let mut table = VersionTable::new();
    let v = build(&mut table);
    let count = table.version_count();
    let bogus = VersionId(count);

    assert_eq!(table.search(bogus, &10), Err(Error::InvalidVersion { version: bogus, count }));
    assert_eq!(table.delete(bogus, &10), Err(Error::InvalidVersion { version: bogus, count }));
    assert_eq!(table.version_count(), count, "failed mutation must not append");

    assert_eq!(table.rank(v, &35).unwrap(), 5);
    assert_eq!(table.rank(v, &36), Err(Error::KeyNotFound));
    assert_eq!(table.tree(v).unwrap().rank(&36), 6);

    assert_eq!(table.kth_to_jth_smallest(v, 2, 4).unwrap(), [&20, &25, &30]);
    assert_eq!(table.kth_to_jth_smallest(v, 4, 2), Err(Error::InvalidRankRange { k: 4, j: 2, len: 11 }));
    assert_eq!(table.kth_to_jth_smallest(v, 1, 12), Err(Error::InvalidRankRange { k: 1, j: 12, len: 11 }));

    assert_eq!(table.closest(v, &33).unwrap(), &35);
    assert_eq!(table.closest(VersionId::EMPTY, &33), Err(Error::EmptyTree));
}

#[test]
fn snapshots_outlive_later_versions() {
    let mut table = VersionTable::new();
    let v = build(&mut table);
    let snapshot = table.get_version(v).unwrap();

    let w = table.delete(v, &50).unwrap();
    let latest = table.latest_version();

    assert_eq!(snapshot.id, v);
    assert_eq!(snapshot.tree.len(), 11);
    assert_eq!(latest.id, w);
    assert!(!latest.tree.contains(&50));
}

#[test]
fn table_can_start_from_a_prebuilt_tree() {
    let mut table = VersionTable::from_tree(PersistentAvl::from([3, 1, 2]));
    let v = table.insert(VersionId::EMPTY, 0).unwrap();
    assert_eq!(keys(&table, v), [0, 1, 2, 3]);
    assert_eq!(table.size(VersionId::EMPTY).unwrap(), 3);
}

/// Collects formatted events so they can be inspected after the run.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn version_events_are_traced() {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let _guard = tracing_subscriber::fmt()
        .with_max_level(LevelFilter::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish()
        .set_default();

    let mut table = VersionTable::new();
    let mut v = table.empty_version();
    for key in [1, 2, 3] {
        v = table.insert(v, key).unwrap();
    }
    let w = table.delete(v, &99).unwrap();
    assert!(table.is_balanced(w).unwrap());

    let output = logs.contents();
    assert!(output.contains("appended version"), "{output}");
    assert!(output.contains("right-right rotation"), "{output}");
    assert!(output.contains("shared_root=false"), "{output}");
    assert!(output.contains("shared_root=true"), "{output}");
}

// ─── Score updates as remove + reinsert ──────────────────────────────────────

/// A ranking where each player appears once, ordered by descending score and then by the
/// sequence number of their latest update.
#[derive(Default)]
struct Leaderboard {
    table: VersionTable<(Reverse<u32>, u64, String)>,
    current: HashMap<String, (Reverse<u32>, u64)>,
    head: VersionId,
    sequence: u64,
}

impl Leaderboard {
    fn submit(&mut self, name: &str, score: u32) {
        let mut head = self.head;
        if let Some((old_score, old_seq)) = self.current.remove(name) {
            head = self.table.delete(head, &(old_score, old_seq, name.to_owned())).unwrap();
        }
        self.sequence += 1;
        let key = (Reverse(score), self.sequence, name.to_owned());
        self.head = self.table.insert(head, key).unwrap();
        self.current.insert(name.to_owned(), (Reverse(score), self.sequence));
    }

    fn top(&self, v: VersionId, n: usize) -> Vec<(String, u32)> {
        let tree = self.table.tree(v).unwrap();
        tree.iter().take(n).map(|(score, _, name)| (name.clone(), score.0)).collect()
    }
}

#[test]
fn leaderboard_updates_keep_one_entry_per_player() {
    let mut board = Leaderboard::default();
    board.submit("ada", 10);
    board.submit("bob", 30);
    board.submit("cyd", 20);
    let before = board.head;

    board.submit("ada", 40);
    board.submit("cyd", 30);

    assert_eq!(board.top(board.head, 3), [("ada".to_owned(), 40), ("bob".to_owned(), 30), ("cyd".to_owned(), 30)]);
    assert_eq!(board.table.size(board.head).unwrap(), 3);

    // Earlier standings remain readable.
    assert_eq!(board.top(before, 3), [("bob".to_owned(), 30), ("cyd".to_owned(), 20), ("ada".to_owned(), 10)]);
    let bob = (Reverse(30), 2, "bob".to_owned());
    assert_eq!(board.table.rank(board.head, &bob).unwrap(), 2);
}

// ─── Randomized history ──────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum HistoryOp {
    Insert { base: usize, key: i64 },
    Delete { base: usize, key: i64 },
}

fn history_op_strategy() -> impl Strategy<Value = HistoryOp> {
    prop_oneof![
        3 => (any::<usize>(), -500i64..500).prop_map(|(base, key)| HistoryOp::Insert { base, key }),
        2 => (any::<usize>(), -500i64..500).prop_map(|(base, key)| HistoryOp::Delete { base, key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Branches from random earlier versions and checks every version against its own model.
    #[test]
    fn every_version_matches_its_model(ops in proptest::collection::vec(history_op_strategy(), 1..400)) {
        let mut table = VersionTable::new();
        let mut models = vec![BTreeSet::new()];

        for op in &ops {
            let (base, key, insert) = match *op {
                HistoryOp::Insert { base, key } => (base % models.len(), key, true),
                HistoryOp::Delete { base, key } => (base % models.len(), key, false),
            };
            let mut model = models[base].clone();
            let v = if insert {
                model.insert(key);
                table.insert(VersionId(base), key).unwrap()
            } else {
                model.remove(&key);
                table.delete(VersionId(base), &key).unwrap()
            };
            prop_assert_eq!(v, VersionId(models.len()));
            models.push(model);
        }

        for (id, model) in models.iter().enumerate() {
            let v = VersionId(id);
            prop_assert!(table.is_balanced(v).unwrap());
            prop_assert_eq!(table.size(v).unwrap(), model.len());
            let actual: Vec<i64> = table.tree(v).unwrap().iter().copied().collect();
            let expected: Vec<i64> = model.iter().copied().collect();
            prop_assert_eq!(actual, expected);
            for key in model {
                let rank = table.rank(v, key).unwrap();
                prop_assert_eq!(table.select(v, rank).unwrap(), key);
            }
        }
    }
}
