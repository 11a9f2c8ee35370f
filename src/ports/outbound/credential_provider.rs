use crate::shared::Result;
use crate::trust_evaluation::domain::{Credentials, Principal};
use async_trait::async_trait;

/// CredentialProvider port for short-lived GitHub credentials
///
/// # Errors
/// Signing failures (missing or invalid private key) and token-exchange
/// failures are returned to the caller. Failures are never cached, so the
/// next call starts from scratch.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn get_credentials(&self, principal: Principal) -> Result<Credentials>;
}
