use crate::shared::error::TrustError;
use crate::shared::Result;

/// Maximum length accepted for a package identifier or version
pub const MAX_COMPONENT_LENGTH: usize = 255;

/// Validates a package name or version before it is placed in a URL path
///
/// # Security
/// Registry lookups interpolate caller-supplied identifiers into request
/// paths. Path separators, traversal sequences and query/fragment markers
/// would let a crafted identifier address a different resource.
///
/// # Errors
/// Returns a validation error naming the offending component
pub fn validate_url_component(component: &str, component_type: &str) -> Result<()> {
    if component.is_empty() {
        return Err(invalid(component_type, "must not be empty"));
    }

    if component.len() > MAX_COMPONENT_LENGTH {
        return Err(invalid(component_type, "is too long"));
    }

    if component.contains('/') || component.contains('\\') {
        return Err(invalid(component_type, "contains path separators"));
    }

    if component.contains("..") {
        return Err(invalid(component_type, "contains '..'"));
    }

    if component.contains('#') || component.contains('?') || component.contains(char::is_whitespace)
    {
        return Err(invalid(component_type, "contains URL-unsafe characters"));
    }

    Ok(())
}

/// Splits an `owner/name` slug, validating both halves.
///
/// Returns `None` when the slug does not contain exactly one separator
/// before the repository name (extra trailing path segments are ignored).
pub fn split_slug(slug: &str) -> Option<(&str, &str)> {
    let mut parts = slug.split('/');
    let owner = parts.next()?;
    let name = parts.next()?;

    if validate_url_component(owner, "Owner").is_err()
        || validate_url_component(name, "Repository").is_err()
    {
        return None;
    }

    Some((owner, name))
}

fn invalid(component_type: &str, reason: &str) -> anyhow::Error {
    TrustError::Validation {
        message: format!("{} {}", component_type, reason),
    }
    .into()
}
