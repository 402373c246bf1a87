//! Durable on-disk cache for API responses
//!
//! Stores one JSON file per cache key under the platform cache directory,
//! shaped as `{"ts": <unix epoch seconds>, "data": <value>}`. The same store
//! serves two read windows: a short TTL matching the resource's freshness
//! requirements, and a much larger "offline" window read only after every
//! network path has failed. Files are never evicted; stale records are simply
//! ignored by the age check.

use chrono::Utc;
use directories::ProjectDirs;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// On-disk record wrapper: write timestamp plus the cached payload
#[derive(Debug, Serialize, Deserialize)]
struct DiskRecord<T> {
    /// Unix epoch seconds at write time
    ts: i64,
    /// The cached value
    data: T,
}

/// Filesystem-backed key/value cache
///
/// Reads return `None` for missing, unreadable, or corrupt files and for
/// records older than the caller's age window, so a damaged cache degrades
/// to a miss instead of an error. Writes are best-effort; losing the disk
/// cache must never crash or block the caller.
#[derive(Debug, Clone)]
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    /// Opens the cache under the platform cache directory
    /// (`~/.cache/courtside/cache` on Linux, or the XDG equivalent).
    /// Returns `None` when no home directory can be determined.
    pub fn open() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", "courtside")?;
        Some(Self {
            dir: dirs.cache_dir().join("cache"),
        })
    }

    /// Opens the cache at a specific directory (tests, custom layouts)
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Maps a cache key to its file path. Key bytes outside `[A-Za-z0-9_-]`
    /// become `_` so namespaced keys like `games:2025-02-16` stay valid
    /// filenames on every platform.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }

    /// Reads the record for `key`, accepting it only while `age < max_age`.
    ///
    /// Pass the resource's short TTL for standard reads and the offline
    /// window for last-resort reads. Missing, corrupt, and over-age records
    /// all read as `None`.
    pub fn read<T: DeserializeOwned>(&self, key: &str, max_age: Duration) -> Option<T> {
        let content = fs::read_to_string(self.path_for(key)).ok()?;
        let record: DiskRecord<T> = serde_json::from_str(&content).ok()?;
        let age = Utc::now().timestamp().saturating_sub(record.ts);
        if age < 0 || age as u64 >= max_age.as_secs() {
            return None;
        }
        Some(record.data)
    }

    /// Serializes `(now, value)` to the key's file.
    ///
    /// Callers ignore the result: persistence is best-effort and a failed
    /// write is indistinguishable from a future cache miss.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> std::io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        let record = DiskRecord {
            ts: Utc::now().timestamp(),
            data: value,
        };
        let json = serde_json::to_string(&record)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(self.path_for(key), json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SHORT: Duration = Duration::from_secs(3600);

    fn create_test_cache() -> (DiskCache, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = DiskCache::with_dir(temp_dir.path().to_path_buf());
        (cache, temp_dir)
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        let (cache, _temp_dir) = create_test_cache();
        let value = vec!["BOS".to_string(), "LAL".to_string()];

        cache.write("standings", &value).expect("Write should succeed");

        let read: Option<Vec<String>> = cache.read("standings", SHORT);
        assert_eq!(read, Some(value));
    }

    #[test]
    fn test_read_returns_none_for_missing_key() {
        let (cache, _temp_dir) = create_test_cache();
        let read: Option<u32> = cache.read("nonexistent", SHORT);
        assert!(read.is_none());
    }

    #[test]
    fn test_read_returns_none_for_corrupt_file() {
        let (cache, temp_dir) = create_test_cache();
        fs::write(temp_dir.path().join("broken.json"), "{ not json }").expect("seed file");

        let read: Option<u32> = cache.read("broken", SHORT);
        assert!(read.is_none());
    }

    #[test]
    fn test_read_returns_none_past_max_age() {
        let (cache, temp_dir) = create_test_cache();
        // Record stamped two hours in the past
        let stale = format!(
            r#"{{"ts": {}, "data": 42}}"#,
            Utc::now().timestamp() - 7200
        );
        fs::write(temp_dir.path().join("old.json"), stale).expect("seed file");

        let short: Option<u32> = cache.read("old", SHORT);
        assert!(short.is_none(), "two-hour-old record fails the 1h window");

        let offline: Option<u32> = cache.read("old", Duration::from_secs(86_400));
        assert_eq!(offline, Some(42), "same record passes the offline window");
    }

    #[test]
    fn test_wire_shape_is_ts_and_data() {
        let (cache, temp_dir) = create_test_cache();
        cache.write("shape", &serde_json::json!({"wins": 40})).expect("write");

        let content =
            fs::read_to_string(temp_dir.path().join("shape.json")).expect("read file back");
        let parsed: serde_json::Value = serde_json::from_str(&content).expect("valid json");
        assert!(parsed["ts"].is_i64());
        assert_eq!(parsed["data"]["wins"], 40);
    }

    #[test]
    fn test_key_is_sanitized_to_filename() {
        let (cache, temp_dir) = create_test_cache();
        cache.write("games:2025-02-16", &1u32).expect("write");

        assert!(temp_dir.path().join("games_2025-02-16.json").exists());
        let read: Option<u32> = cache.read("games:2025-02-16", SHORT);
        assert_eq!(read, Some(1));
    }

    #[test]
    fn test_write_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("deeper").join("cache");
        let cache = DiskCache::with_dir(nested.clone());

        cache.write("k", &5u32).expect("Write should succeed");

        assert!(nested.join("k.json").exists());
    }

    #[test]
    fn test_overwrite_replaces_previous_record() {
        let (cache, _temp_dir) = create_test_cache();
        cache.write("k", &1u32).expect("first write");
        cache.write("k", &2u32).expect("second write");

        let read: Option<u32> = cache.read("k", SHORT);
        assert_eq!(read, Some(2));
    }

    #[test]
    fn test_open_uses_project_cache_path() {
        if let Some(cache) = DiskCache::open() {
            let path = cache.dir.to_string_lossy().to_string();
            assert!(path.contains("courtside"), "cache path should contain project name");
        }
        // Passes if open() returns None (e.g. no home directory in CI)
    }
}
