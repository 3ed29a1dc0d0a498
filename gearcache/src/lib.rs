pub use cache::{Cache, CacheStats};
pub use util::config::{CacheConfig, StoreLimits};

pub mod cache;
pub mod events;
pub mod util;
