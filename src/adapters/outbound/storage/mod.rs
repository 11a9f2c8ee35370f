/// Trust store adapters
mod memory_trust_store;
mod sqlite_trust_store;

pub use memory_trust_store::InMemoryTrustStore;
pub use sqlite_trust_store::SqliteTrustStore;
