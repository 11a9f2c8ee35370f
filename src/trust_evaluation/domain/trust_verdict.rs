use super::PackageReference;
use std::fmt;

/// Why a dependency was or was not trusted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustReason {
    /// An operator explicitly trusted this exact version
    TrustStore,
    /// Provenance attestation proves the version was built from its source repository
    Attestation,
    /// Provenance attestation exists but does not match the source repository
    AttestationRejected,
    /// At least one owner is on the trusted identities list
    TrustedOwner,
    /// The sole owner is a verified GitHub publisher
    VerifiedPublisher,
    /// The registry asserted no owner for this version
    NoOwners,
    /// Owners were found but none of them is trusted
    UntrustedOwners,
}

impl TrustReason {
    pub fn is_trusted(&self) -> bool {
        matches!(
            self,
            TrustReason::TrustStore
                | TrustReason::Attestation
                | TrustReason::TrustedOwner
                | TrustReason::VerifiedPublisher
        )
    }
}

impl fmt::Display for TrustReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TrustReason::TrustStore => "explicitly trusted by an operator",
            TrustReason::Attestation => "provenance attestation verified",
            TrustReason::AttestationRejected => "provenance attestation does not match source",
            TrustReason::TrustedOwner => "owned by a trusted identity",
            TrustReason::VerifiedPublisher => "owned by a verified publisher",
            TrustReason::NoOwners => "no owner could be established",
            TrustReason::UntrustedOwners => "owners are not trusted",
        };
        f.write_str(text)
    }
}

/// The trust verdict for a single dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrustVerdict {
    pub reference: PackageReference,
    pub owners: Vec<String>,
    pub reason: TrustReason,
}

impl TrustVerdict {
    pub fn new(reference: PackageReference, owners: Vec<String>, reason: TrustReason) -> Self {
        Self {
            reference,
            owners,
            reason,
        }
    }

    pub fn is_trusted(&self) -> bool {
        self.reason.is_trusted()
    }
}

/// Verdicts for every dependency referenced by one update, in input order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TrustReport {
    pub verdicts: Vec<TrustVerdict>,
}

impl TrustReport {
    pub fn new(verdicts: Vec<TrustVerdict>) -> Self {
        Self { verdicts }
    }

    /// Whether every dependency is trusted; an empty report is not
    pub fn all_trusted(&self) -> bool {
        !self.verdicts.is_empty() && self.verdicts.iter().all(TrustVerdict::is_trusted)
    }

    pub fn untrusted(&self) -> impl Iterator<Item = &TrustVerdict> {
        self.verdicts.iter().filter(|v| !v.is_trusted())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trust_evaluation::domain::DependencyEcosystem;

    #[test]
    fn test_absence_of_data_is_never_trusted() {
        assert!(!TrustReason::NoOwners.is_trusted());
        assert!(!TrustReason::UntrustedOwners.is_trusted());
        assert!(!TrustReason::AttestationRejected.is_trusted());
    }

    #[test]
    fn test_report_all_trusted() {
        let verdict = |reason| {
            TrustVerdict::new(
                PackageReference::new(DependencyEcosystem::Npm, "a", "1"),
                Vec::new(),
                reason,
            )
        };

        assert!(!TrustReport::default().all_trusted());
        assert!(TrustReport::new(vec![verdict(TrustReason::TrustStore)]).all_trusted());

        let mixed = TrustReport::new(vec![
            verdict(TrustReason::TrustedOwner),
            verdict(TrustReason::NoOwners),
        ]);
        assert!(!mixed.all_trusted());
        assert_eq!(mixed.untrusted().count(), 1);
    }
}
