//! Persisted set store
//!
//! A de-duplicated, order-preserving collection that writes itself through
//! to a key-value store after every mutation. Favorites and the shopping
//! list are both instances of [PersistedSet].

/*--- Use ----------------------------------------------------------------------------------------*/

use core::ops::Deref;

use std::{
    cell::RefCell,
    collections::{HashMap, HashSet},
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::{
    error::{Error, Result},
    recipe::Recipe,
};

/*--- Storage ------------------------------------------------------------------------------------*/

/// Durable string storage addressed by key
///
/// Writes always replace the whole value.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: &Path) -> Self {
        Self { dir: dir.to_path_buf() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryInner {
    entries: HashMap<String, String>,
    writes: usize,
}

/// In-process store
///
/// Clones share the same entries, so several sets can sit on one store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw value without counting it as a write
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.inner
            .borrow_mut()
            .entries
            .insert(key.to_string(), value.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().entries.get(key).cloned()
    }

    /// Number of `set` calls so far
    pub fn writes(&self) -> usize {
        self.inner.borrow().writes
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut inner = self.inner.borrow_mut();
        inner.entries.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

/*--- Items --------------------------------------------------------------------------------------*/

/// Something a [PersistedSet] can hold
///
/// Two items are the same entry when their keys are equal.
pub trait SetItem: Clone + Serialize + DeserializeOwned {
    fn key(&self) -> &str;
}

/// Plain strings compare exactly, case included
impl SetItem for String {
    fn key(&self) -> &str {
        self
    }
}

impl SetItem for Recipe {
    fn key(&self) -> &str {
        &self.id
    }
}

/// Outcome of [PersistedSet::toggle]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggled {
    pub was_added: bool,
}

/// Outcome of [PersistedSet::add_many]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddedMany {
    pub added_count: usize,
}

/*--- Impl ---------------------------------------------------------------------------------------*/

/// Read a stored sequence
///
/// Missing, unreadable or malformed values all come back as an empty
/// sequence; corruption is logged, never returned.
pub fn read_items<T, S>(storage: &S, key: &str) -> Vec<T>
where
    T: SetItem,
    S: KeyValueStore,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return vec![],
        Err(e) => {
            warn!(key, error = %e, "storage read failed, starting empty");
            return vec![];
        }
    };

    match serde_json::from_str::<Vec<T>>(&raw) {
        Ok(items) => items,
        Err(e) => {
            let err = Error::StorageCorrupt { key: key.to_string(), reason: e.to_string() };
            warn!(error = %err, "ignoring stored value");
            vec![]
        }
    }
}

pub struct PersistedSet<T, S> {
    key: String,
    items: Vec<T>,
    index: HashSet<String>,
    storage: S,
}

impl<T, S> PersistedSet<T, S>
where
    T: SetItem,
    S: KeyValueStore,
{
    /// Load from `storage` under `key`
    pub fn load(storage: S, key: &str) -> Self {
        let mut s = Self {
            key: key.to_string(),
            items: Vec::new(),
            index: HashSet::new(),
            storage,
        };

        // stored duplicates are dropped, first occurrence wins
        for item in read_items::<T, S>(&s.storage, key) {
            s.push_if_absent(item);
        }
        debug!(key, count = s.items.len(), "loaded set");
        s
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    pub fn contains(&self, item: &T) -> bool {
        self.contains_key(item.key())
    }

    /// Keys of every entry, for membership tests that outlive a borrow of items
    pub fn keys(&self) -> HashSet<&str> {
        self.items.iter().map(|i| i.key()).collect()
    }

    /// Add when absent, remove when present
    pub fn toggle(&mut self, item: T) -> Result<Toggled> {
        let was_added = if self.contains(&item) {
            self.remove_key(item.key());
            false
        } else {
            self.push_if_absent(item);
            true
        };

        self.persist()?;
        debug!(key = %self.key, was_added, "toggled");
        Ok(Toggled { was_added })
    }

    /// Add a single item, `false` if it was already there
    pub fn add(&mut self, item: T) -> Result<bool> {
        if !self.push_if_absent(item) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Append every new item in input order, one write for the whole batch
    pub fn add_many<I>(&mut self, items: I) -> Result<AddedMany>
    where
        I: IntoIterator<Item = T>,
    {
        let mut added_count = 0;
        for item in items {
            if self.push_if_absent(item) {
                added_count += 1;
            }
        }

        if added_count > 0 {
            self.persist()?;
        }
        debug!(key = %self.key, added_count, "added batch");
        Ok(AddedMany { added_count })
    }

    /// Remove if present, `false` when it was not there
    ///
    /// Absent items leave storage untouched.
    pub fn remove(&mut self, item: &T) -> Result<bool> {
        self.remove_by_key(item.key())
    }

    pub fn remove_by_key(&mut self, key: &str) -> Result<bool> {
        if !self.remove_key(key) {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.items.clear();
        self.index.clear();
        self.persist()
    }

    // -- private items

    fn push_if_absent(&mut self, item: T) -> bool {
        if !self.index.insert(item.key().to_string()) {
            return false;
        }
        self.items.push(item);
        true
    }

    fn remove_key(&mut self, key: &str) -> bool {
        if !self.index.remove(key) {
            return false;
        }
        self.items.retain(|i| i.key() != key);
        true
    }

    fn persist(&mut self) -> Result<()> {
        let value = serde_json::to_string(&self.items)?;
        self.storage.set(&self.key, &value)
    }
}

impl<T, S> Deref for PersistedSet<T, S> {
    type Target = [T];
    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

/*--- Tests --------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KEY: &str = "aurora_list";

    fn list(store: &MemoryStore) -> PersistedSet<String, MemoryStore> {
        PersistedSet::load(store.clone(), KEY)
    }

    fn s(v: &str) -> String {
        v.to_string()
    }

    #[test]
    fn missing_key_is_empty() {
        let set = list(&MemoryStore::new());
        assert!(set.is_empty());
    }

    #[test]
    fn corrupt_value_is_empty() {
        let store = MemoryStore::new().with_entry(KEY, "not valid data");
        let set = list(&store);
        assert!(set.is_empty());

        let store = MemoryStore::new().with_entry(KEY, "null");
        assert!(list(&store).is_empty());

        let store = MemoryStore::new().with_entry(KEY, r#"{"a": 1}"#);
        assert!(list(&store).is_empty());
    }

    #[test]
    fn stored_duplicates_collapse() {
        let store = MemoryStore::new().with_entry(KEY, r#"["Salt","Lime","Salt"]"#);
        let set = list(&store);
        assert_eq!(set.items(), &[s("Salt"), s("Lime")]);
    }

    #[test]
    fn toggle_round_trip() {
        let store = MemoryStore::new();
        let mut set = list(&store);

        assert!(set.toggle(s("r1")).unwrap().was_added);
        assert!(set.toggle(s("r2")).unwrap().was_added);
        assert!(set.contains(&s("r1")));
        assert_eq!(store.raw(KEY).unwrap(), r#"["r1","r2"]"#);

        assert!(!set.toggle(s("r1")).unwrap().was_added);
        assert!(!set.contains(&s("r1")));
        assert_eq!(store.raw(KEY).unwrap(), r#"["r2"]"#);
    }

    #[test]
    fn toggle_removal_keeps_relative_order() {
        let store = MemoryStore::new().with_entry(KEY, r#"["a","b","c","d"]"#);
        let mut set = list(&store);
        set.toggle(s("b")).unwrap();
        assert_eq!(set.items(), &[s("a"), s("c"), s("d")]);
    }

    #[test]
    fn add_many_counts_new_items_only() {
        let store = MemoryStore::new().with_entry(KEY, r#"["Salt"]"#);
        let mut set = list(&store);

        let added = set
            .add_many(vec![s("Onion"), s("Salt"), s("Lime"), s("Onion")])
            .unwrap();
        assert_eq!(added.added_count, 2);
        assert_eq!(set.items(), &[s("Salt"), s("Onion"), s("Lime")]);
        assert_eq!(store.writes(), 1);

        let again = set.add_many(vec![s("Lime")]).unwrap();
        assert_eq!(again.added_count, 0);
        assert_eq!(store.writes(), 1);
    }

    #[test]
    fn add_is_case_sensitive() {
        let mut set = list(&MemoryStore::new());
        assert!(set.add(s("salt")).unwrap());
        assert!(set.add(s("Salt")).unwrap());
        assert!(!set.add(s("Salt")).unwrap());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_absent_does_not_write() {
        let store = MemoryStore::new();
        let mut set = list(&store);
        set.add(s("Eggs")).unwrap();
        let before = store.raw(KEY);
        let writes = store.writes();

        assert!(!set.remove(&s("Milk")).unwrap());
        assert_eq!(store.raw(KEY), before);
        assert_eq!(store.writes(), writes);
        assert_eq!(set.items(), &[s("Eggs")]);

        assert!(set.remove(&s("Eggs")).unwrap());
        assert!(set.is_empty());
        assert_eq!(store.raw(KEY).unwrap(), "[]");
    }

    #[test]
    fn clear_persists_empty() {
        let store = MemoryStore::new();
        let mut set = list(&store);
        set.add_many(vec![s("a"), s("b")]).unwrap();
        set.clear().unwrap();
        assert!(set.is_empty());
        assert_eq!(store.raw(KEY).unwrap(), "[]");
        assert!(list(&store).is_empty());
    }

    #[test]
    fn reload_sees_every_mutation() {
        let store = MemoryStore::new();
        let mut set = list(&store);
        set.add(s("Nori")).unwrap();
        set.toggle(s("Wasabi")).unwrap();
        set.remove(&s("Nori")).unwrap();
        assert_eq!(list(&store).items(), set.items());
    }

    #[test]
    fn records_keyed_by_id() {
        let catalog = crate::catalog::Catalog::fixture().unwrap();
        let mut recipes = catalog.all().to_vec();
        let store = MemoryStore::new();
        let mut set: PersistedSet<Recipe, _> = PersistedSet::load(store.clone(), "saved");

        assert!(set.toggle(recipes[0].clone()).unwrap().was_added);
        // same id, different contents: still the same entry
        recipes[0].name = "Renamed".to_string();
        assert!(set.contains(&recipes[0]));
        assert!(!set.toggle(recipes[0].clone()).unwrap().was_added);
        assert!(set.is_empty());
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(&dir.path().join("nested"));

        let mut set: PersistedSet<String, _> = PersistedSet::load(store.clone(), KEY);
        set.add_many(vec![s("Cumin"), s("Eggs")]).unwrap();

        let raw = fs::read_to_string(store.path_for(KEY)).unwrap();
        assert_eq!(raw, r#"["Cumin","Eggs"]"#);

        let reloaded: PersistedSet<String, _> = PersistedSet::load(store, KEY);
        assert_eq!(reloaded.items(), &[s("Cumin"), s("Eggs")]);
    }

    #[test]
    fn file_store_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        fs::write(store.path_for(KEY), "not valid data").unwrap();

        let set: PersistedSet<String, _> = PersistedSet::load(store, KEY);
        assert!(set.is_empty());
    }

    proptest! {
        #[test]
        fn toggle_parity(ops in proptest::collection::vec(0u8..4, 0..40)) {
            let mut set = list(&MemoryStore::new());
            let mut counts = [0usize; 4];
            for op in ops {
                set.toggle(format!("r{op}")).unwrap();
                counts[op as usize] += 1;
            }
            for (i, n) in counts.iter().enumerate() {
                prop_assert_eq!(set.contains(&format!("r{i}")), n % 2 == 1);
            }
        }

        #[test]
        fn add_many_never_duplicates(
            existing in proptest::collection::vec("[a-d]", 0..6),
            batch in proptest::collection::vec("[a-f]", 0..10),
        ) {
            let mut set = list(&MemoryStore::new());
            set.add_many(existing.clone()).unwrap();
            let before: HashSet<String> = set.items().iter().cloned().collect();

            let added = set.add_many(batch.clone()).unwrap();

            let new: HashSet<&String> = batch.iter().filter(|b| !before.contains(*b)).collect();
            prop_assert_eq!(added.added_count, new.len());

            let unique: HashSet<&String> = set.items().iter().collect();
            prop_assert_eq!(unique.len(), set.len());
        }
    }
}

/*--------------------------------------------- EOF ----------------------------------------------*/
