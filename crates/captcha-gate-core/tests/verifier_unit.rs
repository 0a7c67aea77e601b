// crates/captcha-gate-core/tests/verifier_unit.rs
// ============================================================================
// Module: Verifier Unit Tests
// Description: Verdict reduction over stub transports.
// Purpose: Pin the policy conjunction, error surfacing, and precondition
//          behavior of Verifier::validate.
// Dependencies: captcha-gate-core
// ============================================================================

//! ## Overview
//! Covers the full verdict matrix against a canned passing reply, the
//! precondition raises for empty tokens, surfacing of accumulated request
//! errors as a single joined message, propagation of the malformed-reply
//! hard failure, and statelessness across repeated calls.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod common;

use std::sync::Arc;
use std::sync::Mutex;

use captcha_gate_core::VerificationPolicy;
use captcha_gate_core::Verifier;
use captcha_gate_core::VerifyError;
use captcha_gate_core::error_code_message;

use crate::common::MalformedReplyTransport;
use crate::common::RecordingTransport;
use crate::common::StubTransport;
use crate::common::UnreachableTransport;
use crate::common::failing_reply;
use crate::common::passing_reply;

// ============================================================================
// SECTION: Test Helpers
// ============================================================================

/// Builds a verifier over the canonical passing reply.
fn passing_verifier(min_score: f64, hostname: &str, action: &str) -> Verifier {
    let policy = VerificationPolicy::new("secret-key", min_score, hostname, action).unwrap();
    Verifier::new(policy, Arc::new(StubTransport {
        reply: passing_reply(),
    }))
}

// ============================================================================
// SECTION: Verdict Matrix
// ============================================================================

#[test]
fn validate_passes_with_default_policy() {
    let verifier = passing_verifier(0.5, "", "");
    assert!(verifier.validate("token", "").unwrap());
}

#[test]
fn validate_passes_when_all_expectations_match() {
    let verifier = passing_verifier(0.5, "example.com", "submit");
    assert!(verifier.validate("token", "203.0.113.9").unwrap());
}

#[test]
fn validate_passes_at_exact_score_threshold() {
    let verifier = passing_verifier(0.9, "", "");
    assert!(verifier.validate("token", "").unwrap());
}

#[test]
fn validate_fails_below_score_threshold() {
    let verifier = passing_verifier(0.95, "", "");
    assert!(!verifier.validate("token", "").unwrap());
}

#[test]
fn validate_fails_on_hostname_mismatch() {
    let verifier = passing_verifier(0.5, "other.example", "");
    assert!(!verifier.validate("token", "").unwrap());
}

#[test]
fn validate_fails_on_action_mismatch() {
    let verifier = passing_verifier(0.5, "", "login");
    assert!(!verifier.validate("token", "").unwrap());
}

#[test]
fn validate_fails_when_remote_reports_failure() {
    let mut reply = passing_reply();
    reply.fill(false, 0.9, "example.com".to_string(), "submit".to_string());
    let policy = VerificationPolicy::with_secret("secret-key").unwrap();
    let verifier = Verifier::new(policy, Arc::new(StubTransport {
        reply,
    }));
    assert!(!verifier.validate("token", "").unwrap());
}

// ============================================================================
// SECTION: Preconditions
// ============================================================================

#[test]
fn validate_rejects_empty_token_without_reaching_transport() {
    let policy = VerificationPolicy::with_secret("secret-key").unwrap();
    let verifier = Verifier::new(policy, Arc::new(UnreachableTransport));
    let err = verifier.validate("", "").unwrap_err();
    assert!(matches!(err, VerifyError::InvalidInput(_)));
}

#[test]
fn validate_rejects_token_that_sanitizes_to_empty() {
    let policy = VerificationPolicy::with_secret("secret-key").unwrap();
    let verifier = Verifier::new(policy, Arc::new(UnreachableTransport));
    let err = verifier.validate("<div>\u{0}\u{7}</div>", "").unwrap_err();
    assert!(matches!(err, VerifyError::InvalidInput(_)));
}

#[test]
fn validate_forwards_sanitized_inputs_and_policy_secret() {
    let transport = Arc::new(RecordingTransport {
        reply: passing_reply(),
        seen: Mutex::new(None),
    });
    let policy = VerificationPolicy::with_secret("secret-key").unwrap();
    let verifier = Verifier::new(
        policy,
        Arc::clone(&transport) as Arc<dyn captcha_gate_core::VerificationTransport>,
    );
    assert!(verifier.validate(" tok<b>en</b> ", "198.51.100.7\r\n").unwrap());
    let seen = transport.seen.lock().unwrap().clone().unwrap();
    assert_eq!(seen, ("secret-key".to_string(), "token".to_string(), "198.51.100.7".to_string()));
}

// ============================================================================
// SECTION: Error Surfacing
// ============================================================================

#[test]
fn validate_surfaces_remote_error_codes_as_joined_message() {
    let reply = failing_reply(&[
        error_code_message("missing-input-secret"),
        error_code_message("timeout-or-duplicate"),
    ]);
    let policy = VerificationPolicy::with_secret("secret-key").unwrap();
    let verifier = Verifier::new(policy, Arc::new(StubTransport {
        reply,
    }));
    let err = verifier.validate("token", "").unwrap_err();
    let VerifyError::ValidationFailed(message) = err else {
        panic!("expected ValidationFailed, got {err:?}");
    };
    // Entries are joined with ". ".
    assert!(message.contains("The secret parameter is missing."));
    assert!(message.contains("missing.. The response is no longer valid"));
}

#[test]
fn validate_surfaces_transport_failure_as_validation_failed() {
    let reply = failing_reply(&["transport error: connection refused"]);
    let policy = VerificationPolicy::with_secret("secret-key").unwrap();
    let verifier = Verifier::new(policy, Arc::new(StubTransport {
        reply,
    }));
    let err = verifier.validate("token", "").unwrap_err();
    assert!(!matches!(err, VerifyError::MalformedRemoteResponse));
    let VerifyError::ValidationFailed(message) = err else {
        panic!("expected ValidationFailed, got {err:?}");
    };
    assert!(message.contains("error"));
}

#[test]
fn validate_surfaces_unknown_error_codes() {
    let reply = failing_reply(&[error_code_message("totally-unknown-code")]);
    let policy = VerificationPolicy::with_secret("secret-key").unwrap();
    let verifier = Verifier::new(policy, Arc::new(StubTransport {
        reply,
    }));
    let err = verifier.validate("token", "").unwrap_err();
    let VerifyError::ValidationFailed(message) = err else {
        panic!("expected ValidationFailed, got {err:?}");
    };
    assert!(message.contains("Unknown error code"));
}

#[test]
fn validate_propagates_malformed_reply_hard_failure() {
    let policy = VerificationPolicy::with_secret("secret-key").unwrap();
    let verifier = Verifier::new(policy, Arc::new(MalformedReplyTransport));
    let err = verifier.validate("token", "").unwrap_err();
    assert!(matches!(err, VerifyError::MalformedRemoteResponse));
}

// ============================================================================
// SECTION: Statelessness
// ============================================================================

#[test]
fn validate_is_idempotent_across_repeated_calls() {
    let verifier = passing_verifier(0.5, "example.com", "submit");
    let first = verifier.validate("token", "203.0.113.9").unwrap();
    let second = verifier.validate("token", "203.0.113.9").unwrap();
    assert_eq!(first, second);
    assert!(first);
}

#[test]
fn validate_is_safe_from_concurrent_callers() {
    let verifier = passing_verifier(0.5, "", "");
    let handles: Vec<_> = (0 .. 4)
        .map(|_| {
            let verifier = verifier.clone();
            std::thread::spawn(move || verifier.validate("token", "").unwrap())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}
