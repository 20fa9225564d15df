//! # Item Repository — JSON-Document-Backed Collection
//!
//! Persists the item collection as a single JSON array document on disk.
//! Every insert reads the full collection, appends one record, and
//! rewrites the whole document; every read deserializes the whole
//! document. O(n) per operation, which is the intended trade-off at
//! catalog scale.
//!
//! ## Write Discipline
//!
//! The rewrite goes through a uniquely named temp file in the same
//! directory followed by a rename, so a crash mid-write can never leave
//! a torn document behind. Nothing serializes concurrent writers: two
//! overlapping inserts both read the pre-insert state and the later
//! rename wins, silently dropping the earlier insert. Single-writer
//! deployments only.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::StoreError;
use crate::item::Item;

/// Default location of the item document, relative to the working
/// directory.
pub const DEFAULT_ITEMS_FILE: &str = "items.json";

/// Distinguishes temp files of overlapping rewrites within one process.
static WRITE_SEQ: AtomicU64 = AtomicU64::new(0);

/// JSON-document-backed item collection.
///
/// Holds only the document path; every operation is a self-contained
/// read or read-modify-write cycle against it. Clones share nothing but
/// the path.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    path: PathBuf,
}

impl ItemRepository {
    /// Repository over the default `items.json` document.
    pub fn new() -> Self {
        Self::at(DEFAULT_ITEMS_FILE)
    }

    /// Repository over an explicit document path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing document path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `item` to the collection.
    ///
    /// Reads the full existing collection (an absent document counts as
    /// empty here), appends, and rewrites the whole document. The
    /// rewrite is atomic but unserialized; see the module docs.
    pub fn insert(&self, item: Item) -> Result<(), StoreError> {
        let mut items = match self.get_all() {
            Ok(items) => items,
            Err(StoreError::Empty) => Vec::new(),
            Err(e) => return Err(e),
        };
        items.push(item);
        self.write_all(&items)
    }

    /// Read and deserialize the entire collection, in insertion order.
    ///
    /// An absent document is [`StoreError::Empty`], not an empty vector;
    /// an unparseable one is [`StoreError::Decode`]. Callers decide
    /// whether an empty store is an error for them.
    pub fn get_all(&self) -> Result<Vec<Item>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::Empty);
            }
            Err(e) => return Err(StoreError::Io(e)),
        };
        Ok(serde_json::from_str(&contents)?)
    }

    /// The item at 0-based position `index` in the current collection.
    ///
    /// Positions are assigned by insertion order. Out-of-range lookups
    /// fail with [`StoreError::IndexOutOfRange`] carrying the collection
    /// size; a lookup against an absent document fails with
    /// [`StoreError::Empty`] like any other read.
    pub fn get_by_index(&self, index: usize) -> Result<Item, StoreError> {
        let items = self.get_all()?;
        let len = items.len();
        items
            .into_iter()
            .nth(index)
            .ok_or(StoreError::IndexOutOfRange { index, len })
    }

    /// Rewrite the whole document atomically via temp file + rename.
    fn write_all(&self, items: &[Item]) -> Result<(), StoreError> {
        let json = serde_json::to_string(items)?;

        let file_name = self
            .path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(DEFAULT_ITEMS_FILE);
        let temp_path = self.path.with_file_name(format!(
            "{file_name}.{}.{}.tmp",
            std::process::id(),
            WRITE_SEQ.fetch_add(1, Ordering::Relaxed),
        ));

        fs::write(&temp_path, json.as_bytes())?;
        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Io(e));
        }
        Ok(())
    }
}

impl Default for ItemRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(name: &str) -> Item {
        Item::new(name, "kitchen", "ab12cd34.jpg").unwrap()
    }

    fn repo_in(dir: &tempfile::TempDir) -> ItemRepository {
        ItemRepository::at(dir.path().join("items.json"))
    }

    // -- Reads against absent or damaged documents ---------------------

    #[test]
    fn test_get_all_without_document_is_empty_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = repo_in(&dir).get_all().unwrap_err();
        assert!(matches!(err, StoreError::Empty));
    }

    #[test]
    fn test_get_all_with_corrupt_document_is_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        fs::write(repo.path(), b"{ not json").unwrap();
        let err = repo.get_all().unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn test_get_by_index_without_document_is_empty_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = repo_in(&dir).get_by_index(0).unwrap_err();
        assert!(matches!(err, StoreError::Empty));
    }

    // -- Insertion and ordering ----------------------------------------

    #[test]
    fn test_insert_creates_document_on_first_use() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        repo.insert(sample_item("mug")).unwrap();
        assert!(repo.path().is_file());
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }

    #[test]
    fn test_inserts_preserve_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        for name in ["first", "second", "third"] {
            repo.insert(sample_item(name)).unwrap();
        }
        let names: Vec<String> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[test]
    fn test_insert_round_trips_all_fields() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        let item = Item::new("lamp", "desk", "ff00aa.jpg").unwrap();
        repo.insert(item.clone()).unwrap();
        assert_eq!(repo.get_all().unwrap(), [item]);
    }

    #[test]
    fn test_document_is_a_bare_array_without_ids() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        repo.insert(sample_item("mug")).unwrap();
        let raw = fs::read_to_string(repo.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 1);
        let record = records[0].as_object().unwrap();
        assert_eq!(record.len(), 3);
        assert!(record.contains_key("name"));
        assert!(record.contains_key("category"));
        assert!(record.contains_key("image"));
    }

    #[test]
    fn test_rewrite_leaves_no_temp_files_behind() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        repo.insert(sample_item("mug")).unwrap();
        repo.insert(sample_item("lamp")).unwrap();
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, ["items.json"]);
    }

    // -- Positional lookup ---------------------------------------------

    #[test]
    fn test_get_by_index_returns_positional_item() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        repo.insert(sample_item("mug")).unwrap();
        repo.insert(sample_item("lamp")).unwrap();
        assert_eq!(repo.get_by_index(0).unwrap().name, "mug");
        assert_eq!(repo.get_by_index(1).unwrap().name, "lamp");
    }

    #[test]
    fn test_get_by_index_on_empty_collection_is_out_of_range() {
        // A document holding an empty array is an empty collection, not
        // a missing store.
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        fs::write(repo.path(), b"[]").unwrap();
        let err = repo.get_by_index(0).unwrap_err();
        assert!(matches!(
            err,
            StoreError::IndexOutOfRange { index: 0, len: 0 }
        ));
    }

    #[test]
    fn test_get_by_index_out_of_range_reports_size() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        repo.insert(sample_item("mug")).unwrap();
        let err = repo.get_by_index(5).unwrap_err();
        assert!(matches!(
            err,
            StoreError::IndexOutOfRange { index: 5, len: 1 }
        ));
        assert_eq!(err.to_string(), "no item at index 5 (store holds 1)");
    }

    // -- Concurrency (documented last-write-wins behavior) -------------

    #[test]
    fn test_overlapping_inserts_never_corrupt_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let repo = repo_in(&dir);
        let a = sample_item("from-thread-a");
        let b = sample_item("from-thread-b");

        std::thread::scope(|scope| {
            let repo_a = repo.clone();
            let repo_b = repo.clone();
            let ha = scope.spawn(move || repo_a.insert(a));
            let hb = scope.spawn(move || repo_b.insert(b));
            ha.join().unwrap().unwrap();
            hb.join().unwrap().unwrap();
        });

        // One insert may be lost to the race, but the document must
        // still parse and hold only items that were actually submitted.
        let items = repo.get_all().unwrap();
        assert!(!items.is_empty() && items.len() <= 2);
        for item in &items {
            assert!(item.name.starts_with("from-thread-"));
        }
    }
}
