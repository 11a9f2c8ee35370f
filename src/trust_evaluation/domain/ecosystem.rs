use crate::shared::error::TrustError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Package distribution systems whose dependencies can be evaluated.
///
/// Each variant is handled by exactly one package registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyEcosystem {
    Npm,
    Pip,
    Ruby,
    NuGet,
    Docker,
    GitHubActions,
    GitHubRelease,
    Submodules,
}

impl DependencyEcosystem {
    pub const ALL: [DependencyEcosystem; 8] = [
        DependencyEcosystem::Npm,
        DependencyEcosystem::Pip,
        DependencyEcosystem::Ruby,
        DependencyEcosystem::NuGet,
        DependencyEcosystem::Docker,
        DependencyEcosystem::GitHubActions,
        DependencyEcosystem::GitHubRelease,
        DependencyEcosystem::Submodules,
    ];

    /// Stable lowercase name, used for configuration keys, storage and cache tags
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyEcosystem::Npm => "npm",
            DependencyEcosystem::Pip => "pip",
            DependencyEcosystem::Ruby => "ruby",
            DependencyEcosystem::NuGet => "nuget",
            DependencyEcosystem::Docker => "docker",
            DependencyEcosystem::GitHubActions => "github-actions",
            DependencyEcosystem::GitHubRelease => "github-release",
            DependencyEcosystem::Submodules => "submodules",
        }
    }

    /// Whether ownership for this ecosystem is established through the GitHub API
    pub fn is_github_backed(&self) -> bool {
        matches!(
            self,
            DependencyEcosystem::GitHubActions
                | DependencyEcosystem::GitHubRelease
                | DependencyEcosystem::Submodules
        )
    }
}

impl fmt::Display for DependencyEcosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DependencyEcosystem {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "npm" | "npm_and_yarn" => Ok(DependencyEcosystem::Npm),
            "pip" | "pypi" => Ok(DependencyEcosystem::Pip),
            "ruby" | "rubygems" | "bundler" => Ok(DependencyEcosystem::Ruby),
            "nuget" => Ok(DependencyEcosystem::NuGet),
            "docker" => Ok(DependencyEcosystem::Docker),
            "github-actions" | "github_actions" | "actions" => {
                Ok(DependencyEcosystem::GitHubActions)
            }
            "github-release" | "github_release" => Ok(DependencyEcosystem::GitHubRelease),
            "submodules" | "gitsubmodule" => Ok(DependencyEcosystem::Submodules),
            _ => Err(TrustError::Validation {
                message: format!(
                    "Unknown ecosystem '{}'. Expected one of: {}",
                    s,
                    DependencyEcosystem::ALL
                        .iter()
                        .map(|e| e.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            }),
        }
    }
}
