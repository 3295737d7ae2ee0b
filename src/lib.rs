// Expose the modules
pub mod config;
pub mod domain;
pub mod inbounds;

// Re-export key types for easier usage
pub use config::{CacheConfig, ConfigError};
pub use domain::models::types::{Order, Side, TypeError};
pub use domain::services::order_cache::{
    ConsistencyError, OrderCache, OrderCacheService, OrderRejection,
};
pub use inbounds::dtos::{CacheRequest, OrderMessage};
