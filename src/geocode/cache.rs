//! File-based college location cache at ~/.college-atlas/cache.json.
//!
//! Keys are trimmed college names, case-sensitive. Records are
//! insert-once: a college's coordinates never change after the first
//! successful store, and nothing here ever deletes or expires them.

use super::types::{CacheError, Coordinates};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    lat: f64,
    lon: f64,
    /// When this college was first resolved. Provenance only; entries
    /// do not expire.
    #[serde(default)]
    resolved_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Persistent college → coordinates store, the single source of truth
/// across runs.
pub struct LocationCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
}

impl LocationCache {
    /// Open the cache at the default location (~/.college-atlas/cache.json).
    pub fn open_default() -> Result<Self, CacheError> {
        Self::open(Self::default_path())
    }

    /// Open the cache at a specific path. A missing file is an empty
    /// cache; an unreadable or unparsable file is an error — storage
    /// faults are propagated, never swallowed.
    pub fn open(path: PathBuf) -> Result<Self, CacheError> {
        let entries = match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|e| CacheError::Corrupt(format!("{}: {}", path.display(), e)))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, entries })
    }

    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".college-atlas")
            .join("cache.json")
    }

    /// Look up a college. No side effects; all I/O happened at open.
    pub fn lookup(&self, college: &str) -> Option<Coordinates> {
        self.entries.get(college).map(|e| Coordinates {
            lat: e.lat,
            lon: e.lon,
        })
    }

    /// Store a resolved college and persist to disk. Insert-once: if
    /// the college is already cached this is a no-op and the file is
    /// not rewritten.
    pub fn store(&mut self, college: &str, coords: Coordinates) -> Result<(), CacheError> {
        if self.entries.contains_key(college) {
            return Ok(());
        }
        self.entries.insert(
            college.to_string(),
            CacheEntry {
                lat: coords.lat,
                lon: coords.lon,
                resolved_at: Some(chrono::Utc::now()),
            },
        );
        self.persist()
    }

    /// Write the whole store to a temp file, then rename over the real
    /// one, so a crash mid-write never leaves a torn cache behind.
    fn persist(&self) -> Result<(), CacheError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| CacheError::Corrupt(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Number of cached colleges.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
