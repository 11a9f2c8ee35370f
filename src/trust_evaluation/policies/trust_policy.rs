use crate::trust_evaluation::domain::TrustReason;

/// Result of weighing registry evidence for one dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipAssessment {
    /// The evidence settles the verdict
    Decided(TrustReason),
    /// Trusted only if this sole owner is a verified publisher
    Corroborate(String),
}

/// TrustPolicy encodes how registry evidence becomes a verdict
///
/// Precedence:
/// 1. A positive attestation
/// 2. An owner on the trusted identities list
/// 3. A negative attestation
/// 4. No owners at all
/// 5. A single owner, pending verified-publisher corroboration
/// 6. Anything else is untrusted
///
/// The trust store is consulted before any of this and is not part of the
/// policy.
pub struct TrustPolicy;

impl TrustPolicy {
    /// # Arguments
    /// * `attestation` - `None` when the registry has no attestation data
    /// * `owners` - Owners asserted by the registry
    /// * `allow_listed` - Whether any owner is on the trusted identities list
    pub fn assess(
        attestation: Option<bool>,
        owners: &[String],
        allow_listed: bool,
    ) -> OwnershipAssessment {
        let reason = match attestation {
            Some(true) => TrustReason::Attestation,
            _ if allow_listed => TrustReason::TrustedOwner,
            Some(false) => TrustReason::AttestationRejected,
            None if owners.is_empty() => TrustReason::NoOwners,
            None => match owners {
                [owner] => return OwnershipAssessment::Corroborate(owner.clone()),
                _ => TrustReason::UntrustedOwners,
            },
        };
        OwnershipAssessment::Decided(reason)
    }
}
