use crate::ports::outbound::{Clock, TrustStore};
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, TrustedDependency};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::Arc;

type TrustKey = (DependencyEcosystem, String, String);

/// TrustStore adapter keeping records in process memory
pub struct InMemoryTrustStore {
    records: DashMap<TrustKey, DateTime<Utc>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryTrustStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            records: DashMap::new(),
            clock,
        }
    }

    fn key(ecosystem: DependencyEcosystem, id: &str, version: &str) -> TrustKey {
        (ecosystem, id.to_string(), version.to_string())
    }
}

#[async_trait]
impl TrustStore for InMemoryTrustStore {
    async fn trust(&self, ecosystem: DependencyEcosystem, id: &str, version: &str) -> Result<()> {
        self.records
            .insert(Self::key(ecosystem, id, version), self.clock.now());
        Ok(())
    }

    async fn distrust(
        &self,
        ecosystem: DependencyEcosystem,
        id: &str,
        version: &str,
    ) -> Result<()> {
        self.records.remove(&Self::key(ecosystem, id, version));
        Ok(())
    }

    async fn is_trusted(
        &self,
        ecosystem: DependencyEcosystem,
        id: &str,
        version: &str,
    ) -> Result<bool> {
        Ok(self
            .records
            .contains_key(&Self::key(ecosystem, id, version)))
    }

    async fn get_trust(&self, ecosystem: DependencyEcosystem) -> Result<Vec<TrustedDependency>> {
        Ok(self
            .records
            .iter()
            .filter(|entry| entry.key().0 == ecosystem)
            .map(|entry| {
                let (_, id, version) = entry.key();
                TrustedDependency::new(id.clone(), version.clone(), Some(*entry.value()))
            })
            .collect())
    }
}
