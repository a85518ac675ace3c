//! In-memory blueprint storage keyed by (author, name)
//!
//! `BlueprintTable` is the single-threaded map with all the keying and
//! uniqueness rules. `BlueprintStore` is a cloneable handle that guards one
//! table behind a `RwLock`; every public operation runs under the lock, and
//! `transaction` keeps the write lock across multi-step read-modify-write
//! sequences.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use ahash::{AHashMap, AHashSet};

use super::schema::Blueprint;
use crate::core::error::{BlueprintError, Result};
use crate::core::types::BlueprintKey;

/// Blueprint map with composite-key uniqueness
#[derive(Debug, Clone, Default)]
pub struct BlueprintTable {
    blueprints: AHashMap<BlueprintKey, Blueprint>,
}

impl BlueprintTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new blueprint, refusing to overwrite an existing key
    pub fn save(&mut self, blueprint: Blueprint) -> Result<()> {
        check_identity(&blueprint)?;
        let key = blueprint.key();
        if self.blueprints.contains_key(&key) {
            return Err(BlueprintError::AlreadyExists(key));
        }
        tracing::debug!("Saved blueprint {}", key);
        self.blueprints.insert(key, blueprint);
        Ok(())
    }

    /// Get a blueprint by exact key
    pub fn get(&self, author: &str, name: &str) -> Result<&Blueprint> {
        self.blueprints
            .get(&BlueprintKey::new(author, name))
            .ok_or_else(|| BlueprintError::not_found(author, name))
    }

    /// Mutable access to a stored blueprint
    pub fn get_mut(&mut self, author: &str, name: &str) -> Result<&mut Blueprint> {
        self.blueprints
            .get_mut(&BlueprintKey::new(author, name))
            .ok_or_else(|| BlueprintError::not_found(author, name))
    }

    /// All blueprints by one author, ordered by name
    ///
    /// An author with no blueprints is reported as not found.
    pub fn get_by_author(&self, author: &str) -> Result<Vec<&Blueprint>> {
        let mut found: Vec<&Blueprint> = self
            .blueprints
            .values()
            .filter(|bp| bp.author == author)
            .collect();

        if found.is_empty() {
            return Err(BlueprintError::author_not_found(author));
        }

        found.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(found)
    }

    /// Every stored blueprint, ordered by key
    pub fn get_all(&self) -> Vec<&Blueprint> {
        let mut all: Vec<&Blueprint> = self.blueprints.values().collect();
        all.sort_by(|a, b| (&a.author, &a.name).cmp(&(&b.author, &b.name)));
        all
    }

    /// Insert or replace; never fails on an existing key
    pub fn upsert(&mut self, blueprint: Blueprint) -> Option<Blueprint> {
        let key = blueprint.key();
        tracing::debug!("Upserted blueprint {} at v{}", key, blueprint.version);
        self.blueprints.insert(key, blueprint)
    }

    /// Remove a blueprint by exact key
    pub fn delete(&mut self, author: &str, name: &str) -> Result<Blueprint> {
        let removed = self
            .blueprints
            .remove(&BlueprintKey::new(author, name))
            .ok_or_else(|| BlueprintError::not_found(author, name))?;
        tracing::debug!("Deleted blueprint {}/{}", author, name);
        Ok(removed)
    }

    pub fn contains(&self, author: &str, name: &str) -> bool {
        self.blueprints.contains_key(&BlueprintKey::new(author, name))
    }

    pub fn len(&self) -> usize {
        self.blueprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blueprints.is_empty()
    }
}

/// Author and name must both be non-blank
fn check_identity(blueprint: &Blueprint) -> Result<()> {
    if blueprint.author.trim().is_empty() || blueprint.name.trim().is_empty() {
        return Err(BlueprintError::InvalidState(format!(
            "blueprint needs a non-blank author and name, got '{}'",
            blueprint.key()
        )));
    }
    Ok(())
}

/// Shared handle to one blueprint table
///
/// Clones share the same table. Reads return owned snapshots so no caller
/// ever holds a reference into the table outside the lock.
#[derive(Debug, Clone, Default)]
pub struct BlueprintStore {
    table: Arc<RwLock<BlueprintTable>>,
}

impl BlueprintStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store preloaded with the sample catalogue
    pub fn with_samples() -> Self {
        let mut table = BlueprintTable::new();
        for blueprint in super::registry::sample_blueprints() {
            table.upsert(blueprint);
        }
        Self {
            table: Arc::new(RwLock::new(table)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BlueprintTable> {
        self.table.read().unwrap_or_else(|poisoned| {
            tracing::warn!("Blueprint table lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, BlueprintTable> {
        self.table.write().unwrap_or_else(|poisoned| {
            tracing::warn!("Blueprint table lock was poisoned; recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Insert a new blueprint (fails with `AlreadyExists` on a taken key)
    pub fn save(&self, blueprint: Blueprint) -> Result<()> {
        self.write().save(blueprint)
    }

    /// Get a copy of the blueprint stored under the exact key
    pub fn get(&self, author: &str, name: &str) -> Result<Blueprint> {
        self.read().get(author, name).cloned()
    }

    /// Copies of all blueprints by one author, ordered by name
    pub fn get_by_author(&self, author: &str) -> Result<Vec<Blueprint>> {
        let table = self.read();
        let found = table.get_by_author(author)?;
        Ok(found.into_iter().cloned().collect())
    }

    /// Snapshot of every blueprint, ordered by key
    pub fn get_all(&self) -> Vec<Blueprint> {
        self.read().get_all().into_iter().cloned().collect()
    }

    /// Insert or replace, returning the previous value if any
    pub fn upsert(&self, blueprint: Blueprint) -> Option<Blueprint> {
        self.write().upsert(blueprint)
    }

    /// Remove a blueprint, returning it
    pub fn delete(&self, author: &str, name: &str) -> Result<Blueprint> {
        self.write().delete(author, name)
    }

    pub fn contains(&self, author: &str, name: &str) -> bool {
        self.read().contains(author, name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Save a batch of blueprints
    ///
    /// All or nothing: if any key is already stored, repeats within the
    /// batch, or has a blank author or name, nothing is saved.
    pub fn load_into(&self, blueprints: impl IntoIterator<Item = Blueprint>) -> Result<usize> {
        let batch: Vec<Blueprint> = blueprints.into_iter().collect();
        let mut table = self.write();

        let mut seen = AHashSet::with_capacity(batch.len());
        for blueprint in &batch {
            check_identity(blueprint)?;
            let key = blueprint.key();
            if table.blueprints.contains_key(&key) || !seen.insert(key.clone()) {
                return Err(BlueprintError::AlreadyExists(key));
            }
        }

        let count = batch.len();
        for blueprint in batch {
            table.blueprints.insert(blueprint.key(), blueprint);
        }
        tracing::debug!("Loaded {} blueprints", count);
        Ok(count)
    }

    /// Run `f` with exclusive access to the table
    ///
    /// The write lock is held for the whole closure, so a read-modify-write
    /// inside it cannot interleave with any other store operation.
    pub fn transaction<T>(&self, f: impl FnOnce(&mut BlueprintTable) -> Result<T>) -> Result<T> {
        let mut table = self.write();
        f(&mut table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn house() -> Blueprint {
        Blueprint::from_coords("John", "HousePlan", &[(10, 10), (20, 20)])
    }

    #[test]
    fn test_table_save_and_get() {
        let mut table = BlueprintTable::new();
        table.save(house()).unwrap();
        assert_eq!(table.get("John", "HousePlan").unwrap(), &house());
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_duplicate_save_keeps_first() {
        let mut table = BlueprintTable::new();
        table.save(house()).unwrap();

        let other = Blueprint::from_coords("John", "HousePlan", &[(1, 1)]);
        let err = table.save(other).unwrap_err();
        assert!(matches!(err, BlueprintError::AlreadyExists(ref key) if key.name == "HousePlan"));
        assert_eq!(table.get("John", "HousePlan").unwrap(), &house());
    }

    #[test]
    fn test_table_rejects_blank_identity() {
        let mut table = BlueprintTable::new();
        let blanks = [("", "HousePlan"), ("John", ""), ("  ", "HousePlan"), ("John", "\t")];
        for (author, name) in blanks {
            let err = table
                .save(Blueprint::from_coords(author, name, &[(1, 1)]))
                .unwrap_err();
            assert!(matches!(err, BlueprintError::InvalidState(_)), "{}/{}", author, name);
        }
        assert!(table.is_empty());
    }

    #[test]
    fn test_table_upsert_replaces() {
        let mut table = BlueprintTable::new();
        assert!(table.upsert(house()).is_none());

        let mut newer = house();
        newer.version = 3;
        let previous = table.upsert(newer.clone()).unwrap();
        assert_eq!(previous, house());
        assert_eq!(table.get("John", "HousePlan").unwrap(), &newer);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_table_get_by_author_sorted() {
        let mut table = BlueprintTable::new();
        table.save(Blueprint::from_coords("ana", "b", &[])).unwrap();
        table.save(Blueprint::from_coords("ana", "a", &[])).unwrap();
        table.save(Blueprint::from_coords("bob", "a", &[])).unwrap();

        let names: Vec<&str> = table
            .get_by_author("ana")
            .unwrap()
            .iter()
            .map(|bp| bp.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b"]);
        assert!(table.get_by_author("carl").unwrap_err().is_not_found());
    }

    #[test]
    fn test_table_get_all_sorted_by_key() {
        let mut table = BlueprintTable::new();
        table.save(Blueprint::from_coords("zed", "a", &[])).unwrap();
        table.save(Blueprint::from_coords("ana", "z", &[])).unwrap();
        table.save(Blueprint::from_coords("ana", "c", &[])).unwrap();

        let keys: Vec<String> = table.get_all().iter().map(|bp| bp.key().to_string()).collect();
        assert_eq!(keys, vec!["ana/c", "ana/z", "zed/a"]);
    }

    #[test]
    fn test_table_delete() {
        let mut table = BlueprintTable::new();
        table.save(house()).unwrap();
        assert_eq!(table.delete("John", "HousePlan").unwrap(), house());
        assert!(table.is_empty());
        assert!(table.delete("John", "HousePlan").unwrap_err().is_not_found());
    }

    #[test]
    fn test_store_clones_share_table() {
        let store = BlueprintStore::new();
        let handle = store.clone();
        store.save(house()).unwrap();
        assert!(handle.contains("John", "HousePlan"));
        assert_eq!(handle.len(), 1);
    }

    #[test]
    fn test_store_snapshots_are_detached() {
        let store = BlueprintStore::new();
        store.save(house()).unwrap();

        let mut copy = store.get("John", "HousePlan").unwrap();
        copy.points.clear();
        copy.version = 9;

        assert_eq!(store.get("John", "HousePlan").unwrap(), house());
    }

    #[test]
    fn test_store_with_samples() {
        let store = BlueprintStore::with_samples();
        assert_eq!(store.len(), 7);
        assert_eq!(store.get_by_author("andres").unwrap().len(), 5);
        assert_eq!(store.get_by_author("juan").unwrap().len(), 2);
    }

    #[test]
    fn test_store_load_into_is_all_or_nothing() {
        let store = BlueprintStore::new();
        let result = store.load_into(vec![
            house(),
            Blueprint::from_coords("John", "Garage", &[]),
            house(),
        ]);
        assert!(result.unwrap_err().is_already_exists());
        assert!(store.is_empty());

        store.save(house()).unwrap();
        let result = store.load_into(vec![
            Blueprint::from_coords("John", "Garage", &[]),
            house(),
        ]);
        assert!(result.unwrap_err().is_already_exists());
        assert_eq!(store.len(), 1);

        let loaded = store
            .load_into(vec![Blueprint::from_coords("John", "Garage", &[])])
            .unwrap();
        assert_eq!(loaded, 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_load_into_rejects_blank_identity() {
        let store = BlueprintStore::new();
        let result = store.load_into(vec![house(), Blueprint::from_coords("John", " ", &[])]);
        assert!(matches!(result, Err(BlueprintError::InvalidState(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn test_transaction_error_propagates() {
        let store = BlueprintStore::new();
        let result = store.transaction(|table| table.get_mut("nobody", "nothing").map(|_| ()));
        assert!(result.unwrap_err().is_not_found());
    }
}
