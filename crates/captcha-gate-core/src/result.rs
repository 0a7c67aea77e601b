// crates/captcha-gate-core/src/result.rs
// ============================================================================
// Module: Verification Result
// Description: Decoded remote reply plus accumulated request errors.
// Purpose: Carry either a trustworthy success tuple or the errors that
//          prevented one, never both.
// Dependencies: none
// ============================================================================

//! ## Overview
//! A [`VerificationResult`] is created fresh per request. Transports either
//! fill the success tuple or accumulate error messages and return early, so
//! `has_errors()` marks the whole result as failed regardless of the
//! `success` flag. Construction goes through `new`/`fill`/`add_error` only;
//! the type is deliberately not deserializable so a decoded payload cannot
//! carry both a success tuple and request errors.

// ============================================================================
// SECTION: Result
// ============================================================================

/// Decoded reply from the verification endpoint.
///
/// # Invariants
/// - Errors are stored in insertion order; empty messages are dropped.
/// - A non-empty error list and a filled success tuple are mutually
///   exclusive by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VerificationResult {
    /// Remote success flag.
    success: bool,
    /// Remote trust score, nominally within 0.0–1.0.
    score: f64,
    /// Hostname the token was solved on.
    hostname: String,
    /// Action name reported by the client widget.
    action: String,
    /// Accumulated transport and protocol error messages.
    errors: Vec<String>,
}

impl VerificationResult {
    /// Creates an empty result with no errors and no success tuple.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills the success tuple after a trusted decode.
    pub fn fill(&mut self, success: bool, score: f64, hostname: String, action: String) {
        self.success = success;
        self.score = score;
        self.hostname = hostname;
        self.action = action;
    }

    /// Appends an error message, ignoring empty strings.
    pub fn add_error(&mut self, error: impl Into<String>) {
        let error = error.into();
        if !error.is_empty() {
            self.errors.push(error);
        }
    }

    /// Returns true when any request error was recorded.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the recorded error messages in insertion order.
    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Returns the remote success flag.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.success
    }

    /// Returns the remote trust score.
    #[must_use]
    pub const fn score(&self) -> f64 {
        self.score
    }

    /// Returns the hostname the token was solved on.
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Returns the action name reported by the client widget.
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }
}
