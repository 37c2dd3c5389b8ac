//! # Entity Store
//!
//! The registry seam: a key-value store for people and organizations,
//! keyed by their unique business identifier.
//!
//! ## Why a Trait?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Store Seam                                        │
//! │                                                                         │
//! │  PharmacyService ──► dyn Store<Client>   ──┬──► MemoryStore (here)     │
//! │                  ──► dyn Store<Doctor>     │                            │
//! │                  ──► dyn Store<Insurer>    └──► any real backend later  │
//! │                                                                         │
//! │  The core stays testable against the in-memory fake and swappable     │
//! │  for a durable backing store without code changes. No process-wide    │
//! │  singletons: the service receives its stores at construction.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::RwLock;

/// A key-value registry keyed by business identifier.
///
/// ## Concurrency Contract
/// Implementations must support concurrent reads and inserts; a reader
/// never observes a partially-inserted record. [`Store::insert_new`] is
/// the atomic check-then-insert used for duplicate-key enforcement and
/// identifier generation — "check then insert" as two separate calls
/// would race.
pub trait Store<V>: Send + Sync {
    /// Looks up a record. `None` on a missing key, never an error.
    fn get(&self, key: &str) -> Option<V>;

    /// Inserts only if the key is absent.
    ///
    /// ## Returns
    /// `true` if inserted, `false` if the key was already taken
    /// (the record is returned to the caller untouched in spirit;
    /// implementations drop the rejected value).
    fn insert_new(&self, key: &str, value: V) -> bool;

    /// Inserts or replaces unconditionally (used by re-validating setters
    /// writing an updated record back).
    fn put(&self, key: &str, value: V);

    /// Mutates a record in place, atomically with respect to every other
    /// reader and writer. Returns whether the key existed.
    ///
    /// A fetch-modify-put sequence through [`Store::get`] and
    /// [`Store::put`] is NOT atomic: two concurrent updaters would lose
    /// one modification. Callers mutating shared records (e.g. a doctor's
    /// patient set) must go through this instead.
    fn update(&self, key: &str, apply: &mut dyn FnMut(&mut V)) -> bool;

    /// Removes a record. Returns whether one was removed — deletion of a
    /// missing key is a `false`, not an error.
    fn delete(&self, key: &str) -> bool;

    /// Whether a key is present.
    fn contains(&self, key: &str) -> bool;

    /// All records, in unspecified order.
    fn list(&self) -> Vec<V>;

    /// Number of records.
    fn len(&self) -> usize;

    /// Whether the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// The in-memory reference implementation: a `RwLock`'d `HashMap`.
///
/// Writers take the lock exclusively, so an insert is atomic with respect
/// to every reader; reads clone the record out and release the lock
/// immediately.
#[derive(Debug, Default)]
pub struct MemoryStore<V> {
    records: RwLock<HashMap<String, V>>,
}

impl<V: Clone> MemoryStore<V> {
    pub fn new() -> Self {
        MemoryStore {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl<V: Clone + Send + Sync> Store<V> for MemoryStore<V> {
    fn get(&self, key: &str) -> Option<V> {
        let records = self.records.read().expect("store lock poisoned");
        records.get(key).cloned()
    }

    fn insert_new(&self, key: &str, value: V) -> bool {
        let mut records = self.records.write().expect("store lock poisoned");
        if records.contains_key(key) {
            return false;
        }
        records.insert(key.to_string(), value);
        true
    }

    fn put(&self, key: &str, value: V) {
        let mut records = self.records.write().expect("store lock poisoned");
        records.insert(key.to_string(), value);
    }

    fn update(&self, key: &str, apply: &mut dyn FnMut(&mut V)) -> bool {
        let mut records = self.records.write().expect("store lock poisoned");
        match records.get_mut(key) {
            Some(value) => {
                apply(value);
                true
            }
            None => false,
        }
    }

    fn delete(&self, key: &str) -> bool {
        let mut records = self.records.write().expect("store lock poisoned");
        records.remove(key).is_some()
    }

    fn contains(&self, key: &str) -> bool {
        let records = self.records.read().expect("store lock poisoned");
        records.contains_key(key)
    }

    fn list(&self) -> Vec<V> {
        let records = self.records.read().expect("store lock poisoned");
        records.values().cloned().collect()
    }

    fn len(&self) -> usize {
        let records = self.records.read().expect("store lock poisoned");
        records.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
