//! Services for fetching and caching price data

pub mod loader;
pub mod price_cache;
pub mod price_client;

pub use loader::PriceLoader;
pub use price_cache::PriceCacheService;
pub use price_client::{normalize_symbol, PriceClient};
