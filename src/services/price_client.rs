//! HTTP client for the price backend
//!
//! The backend serves `GET /api/prices/{SYMBOL}?year={year}` and always
//! answers with a JSON array (possibly empty). This client mirrors that
//! never-fail contract on the consumer side: transport errors, non-array
//! bodies, and malformed rows all normalize to an empty or filtered row
//! list, so the UI degrades to no-data cells instead of an error screen.

use serde_json::Value;

use crate::types::{PriceRow, Result, StockheatError};

/// Default backend base URL (overridable via STOCKHEAT_API_URL)
const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Environment variable naming the backend base URL
const API_URL_ENV: &str = "STOCKHEAT_API_URL";

/// HTTP request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Normalize a user-entered symbol: trim and uppercase.
/// Returns `None` for a blank symbol, which skips the fetch entirely.
pub fn normalize_symbol(raw: &str) -> Option<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        None
    } else {
        Some(symbol)
    }
}

/// Extract price rows from a backend response body.
/// Anything other than an array yields no rows; rows that fail to
/// deserialize are skipped rather than failing the batch.
pub fn parse_rows(body: Value) -> Vec<PriceRow> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Blocking client for the price backend
pub struct PriceClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl PriceClient {
    /// Create a client against `STOCKHEAT_API_URL` or the default base URL
    pub fn new() -> Result<Self> {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::with_base_url(base_url)
    }

    /// Create a client against an explicit base URL
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| StockheatError::Http(format!("HTTP client error: {}", e)))?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Fetch one year of daily rows for a symbol.
    ///
    /// Never errors: a blank symbol, transport failure, or malformed
    /// payload all come back as an empty list.
    pub fn fetch_year(&self, symbol: &str, year: i32) -> Vec<PriceRow> {
        let Some(symbol) = normalize_symbol(symbol) else {
            return Vec::new();
        };

        let url = format!("{}/api/prices/{}", self.base_url, symbol);
        let body: Value = match self
            .client
            .get(&url)
            .query(&[("year", year)])
            .send()
            .and_then(|resp| resp.json())
        {
            Ok(body) => body,
            Err(_) => return Vec::new(),
        };

        parse_rows(body)
    }
}
