use crate::adapters::outbound::cache::MemoryCache;
use crate::adapters::outbound::network::{
    DockerPackageRegistry, GitHubActionsPackageRegistry, GitHubApi, GitHubReleasePackageRegistry,
    NpmPackageRegistry, NuGetPackageRegistry, PyPiPackageRegistry, RubyGemsPackageRegistry,
    SubmodulePackageRegistry, DEFAULT_MAR_URL, DEFAULT_NPM_REGISTRY_URL, DEFAULT_NUGET_URL,
    DEFAULT_PYPI_URL, DEFAULT_RUBYGEMS_URL,
};
use crate::ports::outbound::{HttpClient, PackageRegistry};
use crate::trust_evaluation::domain::DependencyEcosystem;
use std::sync::Arc;

/// Base URLs for the public registries, overridable for mirrors and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEndpoints {
    pub npm: String,
    pub pypi: String,
    pub rubygems: String,
    pub nuget: String,
    pub mar: String,
}

impl Default for RegistryEndpoints {
    fn default() -> Self {
        Self {
            npm: DEFAULT_NPM_REGISTRY_URL.to_string(),
            pypi: DEFAULT_PYPI_URL.to_string(),
            rubygems: DEFAULT_RUBYGEMS_URL.to_string(),
            nuget: DEFAULT_NUGET_URL.to_string(),
            mar: DEFAULT_MAR_URL.to_string(),
        }
    }
}

/// One package registry per ecosystem
///
/// Construction goes through [`RegistrySet::from_fn`], so every ecosystem
/// always resolves to exactly one registry.
#[derive(Clone)]
pub struct RegistrySet {
    registries: [Arc<dyn PackageRegistry>; 8],
}

impl RegistrySet {
    pub fn from_fn<F>(mut create: F) -> Self
    where
        F: FnMut(DependencyEcosystem) -> Arc<dyn PackageRegistry>,
    {
        Self {
            registries: DependencyEcosystem::ALL.map(&mut create),
        }
    }

    pub fn get(&self, ecosystem: DependencyEcosystem) -> &dyn PackageRegistry {
        // ALL lists the variants in declaration order
        self.registries[ecosystem as usize].as_ref()
    }
}

/// Factory wiring the production registry adapters
pub struct RegistryFactory;

impl RegistryFactory {
    /// Creates the registry for every ecosystem
    ///
    /// # Arguments
    /// * `http` - Client for the public registries
    /// * `github` - Authenticated GitHub access for GitHub-backed ecosystems
    /// * `cache` - Cache shared by every registry
    /// * `endpoints` - Registry base URLs
    pub fn create(
        http: Arc<dyn HttpClient>,
        github: Arc<GitHubApi>,
        cache: Arc<MemoryCache>,
        endpoints: &RegistryEndpoints,
    ) -> RegistrySet {
        RegistrySet::from_fn(|ecosystem| -> Arc<dyn PackageRegistry> {
            let http = Arc::clone(&http);
            let github = Arc::clone(&github);
            let cache = Arc::clone(&cache);
            match ecosystem {
                DependencyEcosystem::Npm => {
                    Arc::new(NpmPackageRegistry::new(http, cache, &endpoints.npm))
                }
                DependencyEcosystem::Pip => {
                    Arc::new(PyPiPackageRegistry::new(http, cache, &endpoints.pypi))
                }
                DependencyEcosystem::Ruby => {
                    Arc::new(RubyGemsPackageRegistry::new(http, cache, &endpoints.rubygems))
                }
                DependencyEcosystem::NuGet => {
                    Arc::new(NuGetPackageRegistry::new(http, cache, &endpoints.nuget))
                }
                DependencyEcosystem::Docker => {
                    Arc::new(DockerPackageRegistry::new(http, cache, &endpoints.mar))
                }
                DependencyEcosystem::GitHubActions => {
                    Arc::new(GitHubActionsPackageRegistry::new(github, cache))
                }
                DependencyEcosystem::GitHubRelease => {
                    Arc::new(GitHubReleasePackageRegistry::new(github, cache))
                }
                DependencyEcosystem::Submodules => {
                    Arc::new(SubmodulePackageRegistry::new(github, cache))
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::{fixed_clock, github_api, FixtureHttpClient};

    #[test]
    fn test_every_ecosystem_has_its_registry() {
        let http = Arc::new(FixtureHttpClient::new());
        let registries = RegistryFactory::create(
            http.clone(),
            github_api(http),
            Arc::new(MemoryCache::new(fixed_clock())),
            &RegistryEndpoints::default(),
        );

        for ecosystem in DependencyEcosystem::ALL {
            assert_eq!(registries.get(ecosystem).ecosystem(), ecosystem);
        }
    }

    #[test]
    fn test_ecosystem_order_matches_discriminants() {
        for (index, ecosystem) in DependencyEcosystem::ALL.iter().enumerate() {
            assert_eq!(*ecosystem as usize, index);
        }
    }
}
