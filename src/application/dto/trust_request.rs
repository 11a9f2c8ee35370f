use crate::shared::error::TrustError;
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, PackageReference};

/// TrustRequest - a dependency as named on the command line or in a webhook
#[derive(Debug, Clone)]
pub struct TrustRequest {
    pub ecosystem: String,
    pub id: String,
    pub version: String,
}

impl TrustRequest {
    pub fn new(
        ecosystem: impl Into<String>,
        id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            id: id.into(),
            version: version.into(),
        }
    }

    /// Parses the ecosystem name and trims the identifiers
    ///
    /// # Errors
    /// Returns a validation error for an unknown ecosystem or a blank id/version
    pub fn into_reference(self) -> Result<PackageReference> {
        let ecosystem: DependencyEcosystem = self.ecosystem.parse()?;
        let id = self.id.trim();
        let version = self.version.trim();

        if id.is_empty() || version.is_empty() {
            return Err(TrustError::Validation {
                message: "Package id and version must not be empty".to_string(),
            }
            .into());
        }

        Ok(PackageReference::new(ecosystem, id, version))
    }
}
