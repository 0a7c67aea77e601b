// crates/captcha-gate-core/examples/minimal.rs
// ============================================================================
// Module: Captcha Gate Minimal Example
// Description: Minimal verifier wiring with an in-memory transport.
// Purpose: Demonstrate policy construction and verdict reduction.
// Dependencies: captcha-gate-core
// ============================================================================

//! ## Overview
//! Wires a verifier to an in-memory transport double and validates one token.
//! This example is transport-agnostic; production hosts substitute the HTTPS
//! transport from `captcha-gate-http`.

use std::sync::Arc;

use captcha_gate_core::VerificationPolicy;
use captcha_gate_core::VerificationResult;
use captcha_gate_core::VerificationTransport;
use captcha_gate_core::Verifier;
use captcha_gate_core::VerifyError;

/// Transport double returning a fixed high-trust reply.
struct FixedReplyTransport;

impl VerificationTransport for FixedReplyTransport {
    fn send(
        &self,
        _secret: &str,
        _token: &str,
        _client_ip: &str,
    ) -> Result<VerificationResult, VerifyError> {
        let mut reply = VerificationResult::new();
        reply.fill(true, 0.9, "example.com".to_string(), "submit".to_string());
        Ok(reply)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let policy = VerificationPolicy::new("example-secret", 0.5, "example.com", "submit")?;
    let verifier = Verifier::new(policy, Arc::new(FixedReplyTransport));

    let verdict = verifier.validate("client-token", "203.0.113.9")?;
    if !verdict {
        return Err("verification verdict was false".into());
    }
    Ok(())
}
