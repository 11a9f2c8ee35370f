use super::DependencyEcosystem;
use std::collections::{BTreeSet, HashMap};

/// Static allow-list of publishing identities trusted per ecosystem
#[derive(Debug, Clone, Default)]
pub struct TrustedIdentities {
    entries: HashMap<DependencyEcosystem, BTreeSet<String>>,
}

impl TrustedIdentities {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ecosystem: DependencyEcosystem, identity: impl Into<String>) -> Self {
        self.insert(ecosystem, identity);
        self
    }

    pub fn insert(&mut self, ecosystem: DependencyEcosystem, identity: impl Into<String>) {
        let identity = identity.into().trim().to_ascii_lowercase();
        if !identity.is_empty() {
            self.entries.entry(ecosystem).or_default().insert(identity);
        }
    }

    /// Whether any of `owners` is trusted for the ecosystem (case-insensitive).
    ///
    /// An empty owner list is never trusted.
    pub fn is_any_trusted(&self, ecosystem: DependencyEcosystem, owners: &[String]) -> bool {
        let Some(trusted) = self.entries.get(&ecosystem) else {
            return false;
        };

        owners
            .iter()
            .any(|owner| trusted.contains(&owner.trim().to_ascii_lowercase()))
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_any_trusted_case_insensitive() {
        let identities = TrustedIdentities::new().with(DependencyEcosystem::NuGet, "JamesNK");
        let owners = vec!["dotnetfoundation".to_string(), "jamesnk".to_string()];
        assert!(identities.is_any_trusted(DependencyEcosystem::NuGet, &owners));
    }

    #[test]
    fn test_is_any_trusted_scoped_to_ecosystem() {
        let identities = TrustedIdentities::new().with(DependencyEcosystem::Npm, "sindresorhus");
        let owners = vec!["sindresorhus".to_string()];
        assert!(!identities.is_any_trusted(DependencyEcosystem::Pip, &owners));
    }

    #[test]
    fn test_empty_owners_never_trusted() {
        let identities = TrustedIdentities::new().with(DependencyEcosystem::Npm, "");
        assert!(identities.is_empty());
        assert!(!identities.is_any_trusted(DependencyEcosystem::Npm, &[]));
    }
}
