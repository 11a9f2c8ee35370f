use super::DependencyEcosystem;
use crate::shared::error::TrustError;
use std::fmt;
use std::str::FromStr;

/// The GitHub repository whose event triggered an evaluation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryId {
    owner: String,
    name: String,
}

impl RepositoryId {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepositoryId {
    type Err = TrustError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => {
                Ok(Self::new(owner, name))
            }
            _ => Err(TrustError::Validation {
                message: format!("Repository '{}' must be in the form owner/name", s),
            }),
        }
    }
}

/// A single dependency version referenced by an update.
///
/// The format of `id` depends on the ecosystem: `owner/action` for GitHub
/// Actions, an image reference for Docker, a plain package name otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageReference {
    ecosystem: DependencyEcosystem,
    id: String,
    version: String,
}

impl PackageReference {
    pub fn new(
        ecosystem: DependencyEcosystem,
        id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            ecosystem,
            id: id.into(),
            version: version.into(),
        }
    }

    pub fn ecosystem(&self) -> DependencyEcosystem {
        self.ecosystem
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}@{}", self.ecosystem, self.id, self.version)
    }
}
