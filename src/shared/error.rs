use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between an untrusted
/// dependency or denied deployment and an outright failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - dependency trusted, deployment approved, or command completed
    Success = 0,
    /// The dependency is not trusted, or a deployment rule denied the event
    Rejected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (API error, network error, storage error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::Rejected => write!(f, "Rejected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Errors surfaced by the trust and approval engine.
///
/// Remote "not found" responses have no variant: registries recover
/// them locally as "no owner" rather than surfacing an error.
#[derive(Debug, Error)]
pub enum TrustError {
    #[error("Failed to sign the GitHub App token\nDetails: {details}\n\n💡 Hint: Check that github.private_key contains a valid RSA private key in PEM format")]
    Signing { details: String },

    #[error("Request to {url} was rejected with status {status}\n\n💡 Hint: Check the configured GitHub App id, installation id and access token")]
    Unauthorized { url: String, status: u16 },

    #[error("Request to {url} failed with status {status}")]
    Http { url: String, status: u16 },

    #[error("Trust store operation failed: {details}")]
    Storage { details: String },

    #[error("Invalid configuration: {details}\n\n💡 Hint: {hint}")]
    Configuration { details: String, hint: String },

    /// Validation error for identifiers supplied by callers
    #[error("Validation error: {message}")]
    Validation { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::Rejected.as_i32(), 1);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(format!("{}", ExitCode::Rejected), "Rejected (1)");
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_signing_error_display() {
        let error = TrustError::Signing {
            details: "invalid key format".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to sign"));
        assert!(display.contains("invalid key format"));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_http_error_display() {
        let error = TrustError::Http {
            url: "https://registry.npmjs.org/left-pad/1.0.0".to_string(),
            status: 503,
        };
        let display = format!("{}", error);
        assert!(display.contains("registry.npmjs.org"));
        assert!(display.contains("503"));
    }

    #[test]
    fn test_configuration_error_display() {
        let error = TrustError::Configuration {
            details: "github.app_id is missing".to_string(),
            hint: "Set github.app_id".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Invalid configuration"));
        assert!(display.contains("github.app_id is missing"));
        assert!(display.contains("Set github.app_id"));
    }
}
