// crates/captcha-gate-core/src/verifier.rs
// ============================================================================
// Module: Verifier
// Description: Reduces a transport result plus policy into a verdict.
// Purpose: Single entry point deciding pass/fail for one submitted token.
// Dependencies: crate::errors, crate::policy, crate::sanitize, crate::transport
// ============================================================================

//! ## Overview
//! The verifier owns the immutable [`VerificationPolicy`] and a shared
//! transport handle injected at construction. Each [`Verifier::validate`]
//! call is a stateless single-shot operation: sanitize inputs, run one
//! round-trip, surface accumulated request errors, then apply every
//! configured check conjunctively. A `false` verdict means "definitely not
//! accepted"; a raised error means "could not determine".

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;

use crate::errors::VerifyError;
use crate::policy::VerificationPolicy;
use crate::sanitize::sanitize_input;
use crate::transport::VerificationTransport;

// ============================================================================
// SECTION: Verifier
// ============================================================================

/// Policy-driven verdict reducer over an injected transport.
///
/// # Invariants
/// - Policy and transport are fixed at construction; `validate` carries no
///   state across calls.
/// - All configured checks must pass; there is no partial credit.
#[derive(Clone)]
pub struct Verifier {
    /// Immutable verification policy.
    policy: VerificationPolicy,
    /// Transport performing the siteverify round-trip.
    transport: Arc<dyn VerificationTransport>,
}

impl Verifier {
    /// Creates a verifier from a policy and a transport.
    #[must_use]
    pub fn new(policy: VerificationPolicy, transport: Arc<dyn VerificationTransport>) -> Self {
        Self {
            policy,
            transport,
        }
    }

    /// Returns the policy this verifier judges results against.
    #[must_use]
    pub const fn policy(&self) -> &VerificationPolicy {
        &self.policy
    }

    /// Validates one submitted token, optionally pinned to a client address.
    ///
    /// Returns `true` only when the remote reports success, the score meets
    /// the configured threshold, and every configured hostname/action
    /// expectation matches.
    ///
    /// # Errors
    ///
    /// - [`VerifyError::InvalidInput`] when the token is empty after
    ///   sanitization.
    /// - [`VerifyError::ValidationFailed`] when the transport accumulated
    ///   request errors; the message joins all entries with `". "`.
    /// - [`VerifyError::MalformedRemoteResponse`] propagated from the
    ///   transport when the remote reply is untrusted.
    pub fn validate(&self, token: &str, client_ip: &str) -> Result<bool, VerifyError> {
        let token = sanitize_input(token);
        let client_ip = sanitize_input(client_ip);
        if token.is_empty() {
            return Err(VerifyError::InvalidInput(
                "verification token is empty after sanitization".to_string(),
            ));
        }

        let result = self.transport.send(self.policy.secret(), &token, &client_ip)?;
        if result.has_errors() {
            return Err(VerifyError::ValidationFailed(result.errors().join(". ")));
        }

        let mut verdict = result.is_success();
        verdict = verdict && result.score() >= self.policy.min_score();
        if !self.policy.hostname().is_empty() {
            verdict = verdict && result.hostname() == self.policy.hostname();
        }
        if !self.policy.action().is_empty() {
            verdict = verdict && result.action() == self.policy.action();
        }
        Ok(verdict)
    }
}

impl std::fmt::Debug for Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier").field("policy", &self.policy).finish_non_exhaustive()
    }
}
