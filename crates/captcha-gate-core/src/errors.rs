// crates/captcha-gate-core/src/errors.rs
// ============================================================================
// Module: Verification Errors
// Description: Error taxonomy and remote error-code message table.
// Purpose: Distinguish local misuse, remote failure, and untrusted replies.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! The error taxonomy separates "definitely not a human" (a `false` verdict)
//! from "could not determine" (a raised [`VerifyError`]). Callers must not
//! conflate the two. The remote error-code table is a closed set; anything
//! outside it maps to a generic unknown-code message.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Error Taxonomy
// ============================================================================

/// Verification failure kinds surfaced to the host application.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
/// - `MalformedRemoteResponse` is never downgraded to a `false` verdict.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Local precondition violation: empty secret or empty token after
    /// sanitization, or a missing policy secret at construction.
    #[error("invalid verification input: {0}")]
    InvalidInput(String),
    /// Transport or protocol errors accumulated during the request and
    /// surfaced as one joined message.
    #[error("errors during verification request: {0}")]
    ValidationFailed(String),
    /// The remote service claimed success but required fields were missing
    /// or empty. The reply is untrusted and must not become a verdict.
    #[error("siteverify response does not contain required attributes")]
    MalformedRemoteResponse,
    /// Construction-time settings prevented the component from being built.
    #[error("verifier configuration error: {0}")]
    Configuration(String),
}

// ============================================================================
// SECTION: Remote Error Codes
// ============================================================================

/// Remote code: the secret parameter was absent.
pub const MISSING_INPUT_SECRET: &str = "missing-input-secret";
/// Remote code: the secret parameter was rejected.
pub const INVALID_INPUT_SECRET: &str = "invalid-input-secret";
/// Remote code: the response token was absent.
pub const MISSING_INPUT_RESPONSE: &str = "missing-input-response";
/// Remote code: the response token was rejected.
pub const INVALID_INPUT_RESPONSE: &str = "invalid-input-response";
/// Remote code: the request itself was malformed.
pub const BAD_REQUEST: &str = "bad-request";
/// Remote code: the token expired or was replayed.
pub const TIMEOUT_OR_DUPLICATE: &str = "timeout-or-duplicate";

/// Maps a remote error code to its human-readable message.
///
/// The set of codes is closed; unrecognized codes map to a generic message
/// rather than being echoed back, so untrusted remote strings never reach
/// host-facing error text.
#[must_use]
pub fn error_code_message(code: &str) -> &'static str {
    match code {
        MISSING_INPUT_SECRET => "The secret parameter is missing.",
        INVALID_INPUT_SECRET => "The secret parameter is invalid or malformed.",
        MISSING_INPUT_RESPONSE => "The response parameter is missing.",
        INVALID_INPUT_RESPONSE => "The response parameter is invalid or malformed.",
        BAD_REQUEST => "The request is invalid or malformed.",
        TIMEOUT_OR_DUPLICATE => {
            "The response is no longer valid: either is too old or has been used previously."
        }
        _ => "Unknown error code",
    }
}
