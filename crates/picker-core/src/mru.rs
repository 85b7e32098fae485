//! Most-recently-used list and its persistence.
//!
//! The list holds `(name, code)` records, newest first, unique by code and
//! capped at [`MRU_CAPACITY`]. On disk it is `PKMR` + version byte + a
//! bincode body, written atomically.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

pub const MRU_CAPACITY: usize = 40;

const MAGIC: &[u8; 4] = b"PKMR";
const VERSION: u8 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MruRecord {
    #[serde(rename = "emojiKey")]
    pub emoji_key: String,
    #[serde(rename = "emojiStr")]
    pub emoji_str: String,
}

impl MruRecord {
    pub fn new(name: &str, code: &str) -> Self {
        Self {
            emoji_key: name.to_string(),
            emoji_str: code.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MruList {
    records: Vec<MruRecord>,
}

impl MruList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from persisted records. Later duplicates of a code are dropped
    /// so the most recent occurrence survives; the tail beyond capacity is cut.
    pub fn from_records(records: Vec<MruRecord>) -> Self {
        let mut list = Self::new();
        for rec in records {
            if list.records.len() == MRU_CAPACITY {
                break;
            }
            if !list.contains(&rec.emoji_str) {
                list.records.push(rec);
            }
        }
        list
    }

    /// Move or insert `code` at the front.
    pub fn record(&mut self, name: &str, code: &str) {
        self.records.retain(|r| r.emoji_str != code);
        self.records.insert(0, MruRecord::new(name, code));
        self.records.truncate(MRU_CAPACITY);
    }

    pub fn contains(&self, code: &str) -> bool {
        self.records.iter().any(|r| r.emoji_str == code)
    }

    pub fn records(&self) -> &[MruRecord] {
        &self.records
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.emoji_str.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, io::Error> {
        let body = bincode::serialize(&self.records).map_err(io::Error::other)?;
        let mut buf = Vec::with_capacity(5 + body.len());
        buf.extend_from_slice(MAGIC);
        buf.push(VERSION);
        buf.extend_from_slice(&body);
        Ok(buf)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, io::Error> {
        if bytes.len() < 5 {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "too short"));
        }
        if &bytes[0..4] != MAGIC {
            return Err(io::Error::new(io::ErrorKind::InvalidData, "bad magic"));
        }
        if bytes[4] != VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "unsupported version",
            ));
        }
        let records: Vec<MruRecord> = bincode::deserialize(&bytes[5..])
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self::from_records(records))
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), io::Error> {
        let bytes = self.to_bytes()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Open from file, returning an empty list if the file doesn't exist.
    pub fn open(path: &Path) -> Result<Self, io::Error> {
        match fs::read(path) {
            Ok(bytes) => Self::from_bytes(&bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e),
        }
    }
}

/// Key-value collaborator the MRU list is read from on enable and written to
/// on disable.
pub trait MruStore: Send {
    fn load(&self) -> io::Result<MruList>;
    fn save(&self, list: &MruList) -> io::Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileMruStore {
    path: PathBuf,
}

impl FileMruStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl MruStore for FileMruStore {
    fn load(&self) -> io::Result<MruList> {
        MruList::open(&self.path)
    }

    fn save(&self, list: &MruList) -> io::Result<()> {
        list.save(&self.path)
    }
}

/// Shared in-memory store. Clones see the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryMruStore {
    inner: Arc<Mutex<MruList>>,
    saves: Arc<Mutex<usize>>,
}

impl MemoryMruStore {
    pub fn new(list: MruList) -> Self {
        Self {
            inner: Arc::new(Mutex::new(list)),
            saves: Arc::default(),
        }
    }

    pub fn snapshot(&self) -> MruList {
        self.inner.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.lock().map(|n| *n).unwrap_or(0)
    }
}

impl MruStore for MemoryMruStore {
    fn load(&self) -> io::Result<MruList> {
        self.inner
            .lock()
            .map(|l| l.clone())
            .map_err(|_| io::Error::other("mru store poisoned"))
    }

    fn save(&self, list: &MruList) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("mru store poisoned"))?;
        *guard = list.clone();
        if let Ok(mut n) = self.saves.lock() {
            *n += 1;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_moves_to_front_without_duplicates() {
        let mut mru = MruList::new();
        mru.record("cool", "😎");
        mru.record("grin", "😀");
        assert_eq!(mru.codes().collect::<Vec<_>>(), ["😀", "😎"]);
        mru.record("grin", "😀");
        assert_eq!(mru.codes().collect::<Vec<_>>(), ["😀", "😎"]);
        mru.record("cool", "😎");
        assert_eq!(mru.codes().collect::<Vec<_>>(), ["😎", "😀"]);
    }

    #[test]
    fn capacity_is_enforced() {
        let mut mru = MruList::new();
        for i in 0..50 {
            mru.record(&format!("e{i}"), &format!("c{i}"));
        }
        assert_eq!(mru.len(), MRU_CAPACITY);
        assert_eq!(mru.records()[0].emoji_str, "c49");
        assert!(!mru.contains("c9"));
        assert!(mru.contains("c10"));
    }

    #[test]
    fn from_records_keeps_most_recent_duplicate() {
        let mru = MruList::from_records(vec![
            MruRecord::new("a", "1"),
            MruRecord::new("b", "2"),
            MruRecord::new("a again", "1"),
        ]);
        assert_eq!(mru.len(), 2);
        assert_eq!(mru.records()[0].emoji_key, "a");
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("mru.bin");
        let mut mru = MruList::new();
        for i in 0..MRU_CAPACITY {
            mru.record(&format!("name{i}"), &format!("code{i}"));
        }
        mru.save(&path).unwrap();
        assert!(!path.with_extension("tmp").exists());
        let loaded = MruList::open(&path).unwrap();
        assert_eq!(loaded, mru);
    }

    #[test]
    fn open_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = MruList::open(&dir.path().join("none.bin")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn rejects_bad_header() {
        let err = MruList::from_bytes(b"XXXX\x01").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let err = MruList::from_bytes(b"PKMR\x09").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let err = MruList::from_bytes(b"PK").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn memory_store_shares_state() {
        let store = MemoryMruStore::default();
        let clone = store.clone();
        let mut mru = MruList::new();
        mru.record("grin", "😀");
        clone.save(&mru).unwrap();
        assert_eq!(store.load().unwrap(), mru);
        assert_eq!(store.save_count(), 1);
    }
}
