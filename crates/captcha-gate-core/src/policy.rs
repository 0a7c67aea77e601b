// crates/captcha-gate-core/src/policy.rs
// ============================================================================
// Module: Verification Policy
// Description: Immutable local policy a siteverify result is judged against.
// Purpose: Fix secret, score threshold, and expected hostname/action once.
// Dependencies: crate::errors
// ============================================================================

//! ## Overview
//! The policy is a plain immutable value constructed once and shared freely
//! across concurrent `validate` calls. There are no setters; runtime
//! reconfiguration means constructing a new policy. The validating
//! constructors are the only way to build one, and the secret never leaves
//! the type through `Debug` or any serialized form.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::errors::VerifyError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default minimum trust score when none is configured.
pub const DEFAULT_MIN_SCORE: f64 = 0.5;

// ============================================================================
// SECTION: Policy
// ============================================================================

/// Local verification policy.
///
/// # Invariants
/// - `secret` is non-empty.
/// - An empty `hostname` or `action` disables the corresponding check.
/// - `min_score` is nominally within 0.0–1.0; the core does not enforce the
///   range, the config layer does.
/// - Construction goes through the validating constructors; the type is
///   deliberately not serializable so the secret cannot leak and the
///   empty-secret check cannot be bypassed.
#[derive(Clone, PartialEq)]
pub struct VerificationPolicy {
    /// Shared secret presented to the verification endpoint.
    secret: String,
    /// Minimum acceptable trust score.
    min_score: f64,
    /// Expected hostname; empty disables the hostname check.
    hostname: String,
    /// Expected action name; empty disables the action check.
    action: String,
}

impl VerificationPolicy {
    /// Creates a policy from its four settings.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidInput`] when `secret` is empty.
    pub fn new(
        secret: impl Into<String>,
        min_score: f64,
        hostname: impl Into<String>,
        action: impl Into<String>,
    ) -> Result<Self, VerifyError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(VerifyError::InvalidInput("verification secret is not set".to_string()));
        }
        Ok(Self {
            secret,
            min_score,
            hostname: hostname.into(),
            action: action.into(),
        })
    }

    /// Creates a policy with the default score threshold and no
    /// hostname/action expectations.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidInput`] when `secret` is empty.
    pub fn with_secret(secret: impl Into<String>) -> Result<Self, VerifyError> {
        Self::new(secret, DEFAULT_MIN_SCORE, "", "")
    }

    /// Returns the shared secret.
    #[must_use]
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Returns the minimum acceptable trust score.
    #[must_use]
    pub const fn min_score(&self) -> f64 {
        self.min_score
    }

    /// Returns the expected hostname, empty when unchecked.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Returns the expected action, empty when unchecked.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }
}

impl std::fmt::Debug for VerificationPolicy {
    // Secrets stay out of debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationPolicy")
            .field("secret", &"<redacted>")
            .field("min_score", &self.min_score)
            .field("hostname", &self.hostname)
            .field("action", &self.action)
            .finish()
    }
}
