// Service exports
pub mod cache;
pub mod ledger;
pub mod memory;
pub mod profiles;

pub use cache::{CacheError, CacheKey, CacheManager};
pub use ledger::{CommittedSwipe, LedgerError, PostgresLedger, SwipeStore};
pub use memory::{MemoryLedger, MemoryProfileStore};
pub use profiles::{CachedProfiles, ProfileError, ProfileServiceClient, ProfileStore};
