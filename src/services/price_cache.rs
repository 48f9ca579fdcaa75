//! Disk cache for fetched price years
//!
//! One JSON file per (symbol, year) under `~/.stockheat/cache/`. Completed
//! years are immutable market history and never expire; the current year is
//! refetched after a short TTL so today's candle fills in.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::types::{PriceRow, Result, StockheatError};

/// Cache TTL for the current (still-trading) year, in seconds
const CURRENT_YEAR_TTL_SECS: i64 = 3600;

/// Cached rows for one (symbol, year)
#[derive(Debug, Serialize, Deserialize)]
pub struct CachedYear {
    /// Unix timestamp when the rows were fetched
    pub fetched_at: i64,
    pub rows: Vec<PriceRow>,
}

/// Whether a cache entry is still usable.
/// Past years never go stale; the current year honors the TTL.
fn is_fresh(fetched_at: i64, year: i32, current_year: i32, now: i64) -> bool {
    year < current_year || now - fetched_at <= CURRENT_YEAR_TTL_SECS
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}

/// Disk cache for price fetch results
pub struct PriceCacheService {
    dir: PathBuf,
}

impl PriceCacheService {
    /// Create a cache rooted at the default directory (~/.stockheat/cache)
    pub fn new() -> Result<Self> {
        let home = directories::UserDirs::new()
            .ok_or_else(|| StockheatError::Cache("Failed to get home directory".into()))?
            .home_dir()
            .to_path_buf();
        Ok(Self {
            dir: home.join(".stockheat").join("cache"),
        })
    }

    /// Create a cache rooted at a custom directory (for testing)
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Path of the cache file for a (symbol, year)
    pub fn cache_path(&self, symbol: &str, year: i32) -> PathBuf {
        self.dir.join(format!("{}-{}.json", symbol, year))
    }

    /// Load cached rows if present and still fresh
    pub fn load(&self, symbol: &str, year: i32) -> Option<Vec<PriceRow>> {
        let content = fs::read_to_string(self.cache_path(symbol, year)).ok()?;
        let cached: CachedYear = serde_json::from_str(&content).ok()?;

        let current_year = Local::now().year();
        if is_fresh(cached.fetched_at, year, current_year, unix_now()) {
            Some(cached.rows)
        } else {
            None
        }
    }

    /// Store fetched rows for a (symbol, year)
    pub fn store(&self, symbol: &str, year: i32, rows: &[PriceRow]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let cached = CachedYear {
            fetched_at: unix_now(),
            rows: rows.to_vec(),
        };
        let content = serde_json::to_string(&cached)
            .map_err(|e| StockheatError::Cache(format!("Serialization failed: {}", e)))?;
        fs::write(self.cache_path(symbol, year), content)?;
        Ok(())
    }
}
