use std::fmt;

/// How a credential is presented in an `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthenticationScheme {
    Bearer,
    Oauth,
    Anonymous,
}

/// A short-lived bearer credential. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
    scheme: AuthenticationScheme,
}

impl Credentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            scheme: AuthenticationScheme::Bearer,
        }
    }

    pub fn oauth(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            scheme: AuthenticationScheme::Oauth,
        }
    }

    pub fn anonymous() -> Self {
        Self {
            token: String::new(),
            scheme: AuthenticationScheme::Anonymous,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn scheme(&self) -> AuthenticationScheme {
        self.scheme
    }

    /// Value for the `Authorization` header, or `None` for anonymous access
    pub fn authorization_header(&self) -> Option<String> {
        match self.scheme {
            AuthenticationScheme::Bearer => Some(format!("Bearer {}", self.token)),
            AuthenticationScheme::Oauth => Some(format!("token {}", self.token)),
            AuthenticationScheme::Anonymous => None,
        }
    }
}

// Tokens must not leak into logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("scheme", &self.scheme)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// The identity a credential is requested for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Principal {
    /// The GitHub App itself, authenticated with a signed JWT
    App,
    /// A specific installation of the GitHub App
    Installation(u64),
    /// A statically configured personal access token
    User,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        assert_eq!(
            Credentials::bearer("jwt").authorization_header().as_deref(),
            Some("Bearer jwt")
        );
        assert_eq!(
            Credentials::oauth("ghs_123").authorization_header().as_deref(),
            Some("token ghs_123")
        );
        assert!(Credentials::anonymous().authorization_header().is_none());
    }

    #[test]
    fn test_debug_redacts_token() {
        let debug = format!("{:?}", Credentials::oauth("ghs_secret"));
        assert!(!debug.contains("ghs_secret"));
        assert!(debug.contains("Oauth"));
    }
}
