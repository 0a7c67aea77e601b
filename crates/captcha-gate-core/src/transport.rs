// crates/captcha-gate-core/src/transport.rs
// ============================================================================
// Module: Verification Transport Contract
// Description: Capability trait for one siteverify round-trip.
// Purpose: Let the verifier stay free of network concerns and test doubles
//          substitute for the production HTTPS client.
// Dependencies: crate::errors, crate::result
// ============================================================================

//! ## Overview
//! A transport performs exactly one round-trip to the verification endpoint.
//! Recoverable failures (network errors, decode errors, remote-reported
//! error codes) are accumulated into the returned result's error list;
//! raising is reserved for local misuse and untrusted remote replies.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::errors::VerifyError;
use crate::result::VerificationResult;

// ============================================================================
// SECTION: Transport Contract
// ============================================================================

/// Capability for sending one verification request.
pub trait VerificationTransport: Send + Sync {
    /// Sends the secret/token/client-address triple to the verification
    /// endpoint and returns the decoded result.
    ///
    /// Network and decode failures are reported through the result's error
    /// list, not as `Err`. `client_ip` may be empty and is then omitted from
    /// the request.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::InvalidInput`] when `secret` or `token` is
    /// empty, and [`VerifyError::MalformedRemoteResponse`] when the remote
    /// reply claims success but lacks required attributes.
    fn send(
        &self,
        secret: &str,
        token: &str,
        client_ip: &str,
    ) -> Result<VerificationResult, VerifyError>;
}
