// crates/captcha-gate-core/src/sanitize.rs
// ============================================================================
// Module: Input Sanitization
// Description: Conservative filter for token and client address strings.
// Purpose: Strip control characters and markup before values reach the wire.
// Dependencies: none
// ============================================================================

//! ## Overview
//! Tokens and client addresses come straight from untrusted form posts.
//! Sanitization is defense in depth, not a validity check: markup tags and
//! control characters are removed, and callers fail only when the
//! post-sanitization value is empty.

// ============================================================================
// SECTION: Sanitizer
// ============================================================================

/// Strips markup tags and control characters from an untrusted input string.
///
/// Anything between `<` and the next `>` is dropped along with the brackets;
/// an unterminated `<` drops the remainder. Surrounding whitespace is
/// trimmed.
#[must_use]
pub fn sanitize_input(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;
    for ch in raw.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag || ch.is_control() => {}
            _ => out.push(ch),
        }
    }
    out.trim().to_string()
}
