// crates/captcha-gate-http/src/lib.rs
// ============================================================================
// Module: Captcha Gate HTTP
// Description: Production siteverify transport over HTTPS.
// Purpose: Provide the single concrete VerificationTransport implementation.
// Dependencies: captcha-gate-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! This crate ships [`SiteverifyTransport`], the one production
//! implementation of the core transport capability. It performs a single
//! form-encoded HTTPS POST per verification call with a fixed timeout,
//! bounded response read, and fail-closed decoding of the siteverify reply.
//! Invariants:
//! - Exactly one network round-trip per `send` call; no retries.
//! - Recoverable transport and decode failures land in the result's error
//!   list; only local misuse and untrusted replies raise.
//!
//! Security posture: the remote reply is untrusted input.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod siteverify;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use siteverify::DEFAULT_SITEVERIFY_ENDPOINT;
pub use siteverify::SiteverifyConfig;
pub use siteverify::SiteverifyTransport;
