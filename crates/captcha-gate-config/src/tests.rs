// crates/captcha-gate-config/src/tests.rs
// ============================================================================
// Module: Config Unit Tests
// Description: Units for config path resolution and loopback host detection.
// Purpose: Pin down the resolution precedence the loader builds on.
// Dependencies: captcha-gate-config
// ============================================================================

//! ## Overview
//! Leaf-level units kept next to the code: path resolution precedence and
//! the loopback host check behind the cleartext endpoint policy.

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

use std::path::Path;
use std::path::PathBuf;

use url::Url;

use crate::config::DEFAULT_CONFIG_NAME;
use crate::config::is_loopback_host;
use crate::config::resolve_path;

// ============================================================================
// SECTION: Path Resolution
// ============================================================================

#[test]
fn resolve_path_prefers_explicit_argument() {
    let explicit = Path::new("/etc/captcha/explicit.toml");
    let resolved = resolve_path(Some(explicit), Some("/etc/captcha/from-env.toml"));
    assert_eq!(resolved, PathBuf::from("/etc/captcha/explicit.toml"));
}

#[test]
fn resolve_path_falls_back_to_environment_override() {
    let resolved = resolve_path(None, Some("/etc/captcha/from-env.toml"));
    assert_eq!(resolved, PathBuf::from("/etc/captcha/from-env.toml"));
}

#[test]
fn resolve_path_defaults_without_argument_or_override() {
    let resolved = resolve_path(None, None);
    assert_eq!(resolved, PathBuf::from(DEFAULT_CONFIG_NAME));
}

// ============================================================================
// SECTION: Loopback Host Detection
// ============================================================================

#[test]
fn loopback_check_accepts_localhost_and_loopback_addresses() {
    let localhost = Url::parse("http://localhost:8080/verify").unwrap();
    let ipv4 = Url::parse("http://127.0.0.1:8080/verify").unwrap();
    let ipv6 = Url::parse("http://[::1]:8080/verify").unwrap();
    assert!(is_loopback_host(&localhost));
    assert!(is_loopback_host(&ipv4));
    assert!(is_loopback_host(&ipv6));
}

#[test]
fn loopback_check_rejects_remote_hosts() {
    let remote_name = Url::parse("http://example.com/verify").unwrap();
    let remote_addr = Url::parse("http://192.0.2.10/verify").unwrap();
    assert!(!is_loopback_host(&remote_name));
    assert!(!is_loopback_host(&remote_addr));
}
