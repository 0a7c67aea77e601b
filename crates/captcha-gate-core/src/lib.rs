// crates/captcha-gate-core/src/lib.rs
// ============================================================================
// Module: Captcha Gate Core
// Description: Policy, verdict reduction, and transport contract for captcha checks.
// Purpose: Decide human-vs-bot submissions from siteverify results without I/O.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! Captcha Gate core holds the verification policy, the decoded remote result,
//! the error taxonomy, and the [`Verifier`] that reduces a transport result
//! plus policy into a single pass/fail verdict. The core performs no network
//! I/O and no logging; transports plug in through the
//! [`VerificationTransport`] capability trait.
//! Invariants:
//! - A [`VerificationResult`] either carries transport/protocol errors or a
//!   trustworthy success tuple, never both.
//! - Every `validate` call is stateless; no retries and no caching.
//!
//! Security posture: tokens and client addresses are untrusted input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod errors;
pub mod policy;
pub mod result;
pub mod sanitize;
pub mod transport;
pub mod verifier;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use errors::VerifyError;
pub use errors::error_code_message;
pub use policy::DEFAULT_MIN_SCORE;
pub use policy::VerificationPolicy;
pub use result::VerificationResult;
pub use sanitize::sanitize_input;
pub use transport::VerificationTransport;
pub use verifier::Verifier;
