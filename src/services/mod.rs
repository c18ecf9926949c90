// Service exports
pub mod cache;
pub mod matching;
pub mod postgres;
pub mod store;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use matching::{MatchService, MatchServiceError};
pub use postgres::PostgresStore;
pub use store::{MemoryStore, ProfileStore, StoreError};
