//! Symbol table: the process-wide named registry of arrays
//!
//! Lookups clone an `Arc` out under the read lock; compound-assign
//! mutations run under the write lock for their whole duration, so
//! concurrent mutations of one name serialize. A freshly created result
//! array is exclusively owned until `add` publishes its name.

use crate::array::NdArray;
use crate::error::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Named registry of server-side arrays
#[derive(Default)]
pub struct SymbolTable {
    entries: RwLock<HashMap<String, Arc<NdArray>>>,
    next_id: AtomicU64,
}

impl SymbolTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an array under a fresh server-assigned name and return it
    pub fn add(&self, array: NdArray) -> String {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let name = format!("id_{id}");
        self.entries
            .write()
            .insert(name.clone(), Arc::new(array));
        name
    }

    /// Insert an array under a caller-chosen name, replacing any previous
    /// entry
    pub fn insert(&self, name: impl Into<String>, array: NdArray) {
        self.entries.write().insert(name.into(), Arc::new(array));
    }

    /// Look up an entry by name
    pub fn get(&self, name: &str) -> Result<Arc<NdArray>> {
        self.entries
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UndefinedSymbol {
                name: name.to_string(),
            })
    }

    /// Remove an entry by name
    pub fn delete(&self, name: &str) -> Result<()> {
        self.entries
            .write()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::UndefinedSymbol {
                name: name.to_string(),
            })
    }

    /// True when the name is bound
    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Mutate an entry in place under the write lock
    ///
    /// The closure sees the entry exclusively; other handles obtained from
    /// [`get`](Self::get) before this call keep the pre-mutation values
    /// (clone-on-write), which is exactly what `a op= a` needs.
    pub fn mutate<R>(&self, name: &str, f: impl FnOnce(&mut NdArray) -> Result<R>) -> Result<R> {
        let mut entries = self.entries.write();
        let entry = entries.get_mut(name).ok_or_else(|| Error::UndefinedSymbol {
            name: name.to_string(),
        })?;
        f(Arc::make_mut(entry))
    }
}
