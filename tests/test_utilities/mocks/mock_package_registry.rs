use async_trait::async_trait;
use dependabot_trust::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

/// Mock PackageRegistry answering from in-memory tables
pub struct MockPackageRegistry {
    ecosystem: DependencyEcosystem,
    owners: HashMap<String, Vec<String>>,
    attestations: HashMap<String, bool>,
    verified: HashSet<String>,
    lookups: AtomicUsize,
}

impl MockPackageRegistry {
    pub fn new(ecosystem: DependencyEcosystem) -> Self {
        Self {
            ecosystem,
            owners: HashMap::new(),
            attestations: HashMap::new(),
            verified: HashSet::new(),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn with_owners(mut self, id: &str, version: &str, owners: &[&str]) -> Self {
        self.owners.insert(
            format!("{}@{}", id, version),
            owners.iter().map(|o| o.to_string()).collect(),
        );
        self
    }

    pub fn with_attestation(mut self, id: &str, version: &str, valid: bool) -> Self {
        self.attestations.insert(format!("{}@{}", id, version), valid);
        self
    }

    pub fn with_verified_publisher(mut self, owner: &str) -> Self {
        self.verified.insert(owner.to_string());
        self
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PackageRegistry for MockPackageRegistry {
    fn ecosystem(&self) -> DependencyEcosystem {
        self.ecosystem
    }

    async fn get_package_owners(
        &self,
        _repository: &RepositoryId,
        id: &str,
        version: &str,
    ) -> Result<Vec<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .owners
            .get(&format!("{}@{}", id, version))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_package_attestation(
        &self,
        _repository: &RepositoryId,
        id: &str,
        version: &str,
    ) -> Result<Option<bool>> {
        Ok(self.attestations.get(&format!("{}@{}", id, version)).copied())
    }

    async fn is_verified_publisher(&self, owner: &str) -> bool {
        self.verified.contains(owner)
    }
}
