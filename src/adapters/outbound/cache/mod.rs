/// In-process caching shared by credentials and registries
mod memory_cache;

pub use memory_cache::{CacheEntryOptions, MemoryCache};

use crate::trust_evaluation::domain::DependencyEcosystem;
use chrono::Duration;

/// Tag present on every cache-backed entry, for administrative "clear all"
pub const TAG_ALL: &str = "all";

/// Tag present on every GitHub-derived entry
pub const TAG_GITHUB: &str = "github";

/// Options for a registry lookup: one hour, tagged with `all` and the ecosystem
pub fn registry_entry_options(ecosystem: DependencyEcosystem) -> CacheEntryOptions {
    let mut tags = vec![TAG_ALL, ecosystem.as_str()];
    if ecosystem.is_github_backed() {
        tags.push(TAG_GITHUB);
    }
    CacheEntryOptions::new(Duration::hours(1)).with_tags(tags)
}
