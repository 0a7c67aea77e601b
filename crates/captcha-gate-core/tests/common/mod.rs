// crates/captcha-gate-core/tests/common/mod.rs
// ============================================================================
// Module: Verifier Test Doubles
// Description: Stub transports shared by verifier test suites.
// Purpose: Exercise verdict reduction without any network round-trip.
// Dependencies: captcha-gate-core
// ============================================================================

//! ## Overview
//! Transport doubles for verifier tests: a canned-reply stub, a stub that
//! records the arguments it was called with, one that raises the
//! malformed-reply hard failure, and one that must never be reached.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    dead_code,
    reason = "Test-only doubles; not every suite uses every stub."
)]

use std::sync::Mutex;

use captcha_gate_core::VerificationResult;
use captcha_gate_core::VerificationTransport;
use captcha_gate_core::VerifyError;

/// Returns the canned reply regardless of input.
pub struct StubTransport {
    /// Result handed back from every `send` call.
    pub reply: VerificationResult,
}

impl VerificationTransport for StubTransport {
    fn send(
        &self,
        _secret: &str,
        _token: &str,
        _client_ip: &str,
    ) -> Result<VerificationResult, VerifyError> {
        Ok(self.reply.clone())
    }
}

/// Records the arguments of the most recent `send` call.
pub struct RecordingTransport {
    /// Result handed back from every `send` call.
    pub reply: VerificationResult,
    /// Last `(secret, token, client_ip)` triple seen.
    pub seen: Mutex<Option<(String, String, String)>>,
}

impl VerificationTransport for RecordingTransport {
    fn send(
        &self,
        secret: &str,
        token: &str,
        client_ip: &str,
    ) -> Result<VerificationResult, VerifyError> {
        *self.seen.lock().unwrap() =
            Some((secret.to_string(), token.to_string(), client_ip.to_string()));
        Ok(self.reply.clone())
    }
}

/// Raises the malformed-reply hard failure on every call.
pub struct MalformedReplyTransport;

impl VerificationTransport for MalformedReplyTransport {
    fn send(
        &self,
        _secret: &str,
        _token: &str,
        _client_ip: &str,
    ) -> Result<VerificationResult, VerifyError> {
        Err(VerifyError::MalformedRemoteResponse)
    }
}

/// Panics when reached; asserts the verifier short-circuits earlier.
pub struct UnreachableTransport;

impl VerificationTransport for UnreachableTransport {
    fn send(
        &self,
        _secret: &str,
        _token: &str,
        _client_ip: &str,
    ) -> Result<VerificationResult, VerifyError> {
        panic!("transport must not be called for invalid local input");
    }
}

/// Builds the canonical passing reply used across suites.
pub fn passing_reply() -> VerificationResult {
    let mut reply = VerificationResult::new();
    reply.fill(true, 0.9, "example.com".to_string(), "submit".to_string());
    reply
}

/// Builds a reply carrying the given request errors.
pub fn failing_reply(errors: &[&str]) -> VerificationResult {
    let mut reply = VerificationResult::new();
    for error in errors {
        reply.add_error(*error);
    }
    reply
}
