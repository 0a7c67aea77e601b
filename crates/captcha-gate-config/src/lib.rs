// crates/captcha-gate-config/src/lib.rs
// ============================================================================
// Module: Captcha Gate Config
// Description: TOML configuration loading and validation.
// Purpose: Turn host configuration into a verification policy and transport
//          settings with fail-closed validation.
// Dependencies: captcha-gate-core, captcha-gate-http, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits and
//! validated fail-closed before any component is built from it. The host
//! application remains responsible for wiring the resulting policy and
//! transport into a verifier.
//! Security posture: config inputs are untrusted.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::CaptchaGateConfig;
pub use config::ConfigError;
pub use config::TransportSection;
pub use config::VerifierSection;

#[cfg(test)]
mod tests;
