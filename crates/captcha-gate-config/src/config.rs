// crates/captcha-gate-config/src/config.rs
// ============================================================================
// Module: Captcha Gate Configuration
// Description: Configuration model, loading, and validation.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: captcha-gate-core, captcha-gate-http, serde, thiserror, toml, url
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file resolved from an explicit path,
//! the `CAPTCHA_GATE_CONFIG` environment variable, or a default filename.
//! Every section validates its own limits; an invalid file never yields a
//! partially usable configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use captcha_gate_core::DEFAULT_MIN_SCORE;
use captcha_gate_core::VerificationPolicy;
use captcha_gate_http::SiteverifyConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub(crate) const DEFAULT_CONFIG_NAME: &str = "captcha-gate.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "CAPTCHA_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 64 * 1024;
/// Maximum length of the verification secret.
pub(crate) const MAX_SECRET_LENGTH: usize = 256;
/// Maximum length of the expected hostname or action.
pub(crate) const MAX_EXPECTATION_LENGTH: usize = 255;
/// Minimum allowed request timeout in milliseconds.
pub(crate) const MIN_TIMEOUT_MS: u64 = 500;
/// Maximum allowed request timeout in milliseconds.
pub(crate) const MAX_TIMEOUT_MS: u64 = 30_000;
/// Minimum allowed reply size limit in bytes.
pub(crate) const MIN_REPLY_BYTES: usize = 1024;
/// Maximum allowed reply size limit in bytes.
pub(crate) const MAX_REPLY_BYTES: usize = 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// Captcha Gate configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CaptchaGateConfig {
    /// Verification policy configuration.
    pub verifier: VerifierSection,
    /// Siteverify transport configuration.
    #[serde(default)]
    pub transport: TransportSection,
}

/// Policy settings a siteverify result is judged against.
#[derive(Clone, Deserialize)]
pub struct VerifierSection {
    /// Shared secret presented to the verification endpoint.
    pub secret: String,
    /// Minimum acceptable trust score.
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    /// Expected hostname; empty disables the hostname check.
    #[serde(default)]
    pub hostname: String,
    /// Expected action name; empty disables the action check.
    #[serde(default)]
    pub action: String,
}

/// Transport settings for the siteverify round-trip.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportSection {
    /// Verification endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Allow cleartext HTTP endpoints; restricted to loopback hosts.
    #[serde(default)]
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Maximum reply size allowed, in bytes.
    #[serde(default = "default_max_reply_bytes")]
    pub max_reply_bytes: usize,
    /// User agent string for outbound requests.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for TransportSection {
    fn default() -> Self {
        let defaults = SiteverifyConfig::default();
        Self {
            endpoint: defaults.endpoint,
            allow_http: defaults.allow_http,
            timeout_ms: defaults.timeout_ms,
            max_reply_bytes: defaults.max_reply_bytes,
            user_agent: defaults.user_agent,
        }
    }
}

// ============================================================================
// SECTION: Loading and Validation
// ============================================================================

impl CaptchaGateConfig {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let env_override = env::var(CONFIG_ENV_VAR).ok();
        let resolved = resolve_path(path, env_override.as_deref());
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.verifier.validate()?;
        self.transport.validate()?;
        Ok(())
    }

    /// Builds the immutable verification policy from the verifier section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when the section fails policy
    /// construction (an empty secret).
    pub fn policy(&self) -> Result<VerificationPolicy, ConfigError> {
        VerificationPolicy::new(
            self.verifier.secret.clone(),
            self.verifier.min_score,
            self.verifier.hostname.clone(),
            self.verifier.action.clone(),
        )
        .map_err(|err| ConfigError::Invalid(err.to_string()))
    }

    /// Builds the siteverify transport configuration.
    #[must_use]
    pub fn transport_config(&self) -> SiteverifyConfig {
        SiteverifyConfig {
            endpoint: self.transport.endpoint.clone(),
            allow_http: self.transport.allow_http,
            timeout_ms: self.transport.timeout_ms,
            max_reply_bytes: self.transport.max_reply_bytes,
            user_agent: self.transport.user_agent.clone(),
        }
    }
}

impl VerifierSection {
    /// Validates policy settings against hard limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a setting is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::Invalid("verifier secret must be set".to_string()));
        }
        if self.secret.len() > MAX_SECRET_LENGTH {
            return Err(ConfigError::Invalid("verifier secret exceeds max length".to_string()));
        }
        if !(0.0 ..= 1.0).contains(&self.min_score) {
            return Err(ConfigError::Invalid(
                "verifier min_score must be within 0.0 and 1.0".to_string(),
            ));
        }
        if self.hostname.len() > MAX_EXPECTATION_LENGTH {
            return Err(ConfigError::Invalid("verifier hostname exceeds max length".to_string()));
        }
        if self.action.len() > MAX_EXPECTATION_LENGTH {
            return Err(ConfigError::Invalid("verifier action exceeds max length".to_string()));
        }
        Ok(())
    }
}

impl TransportSection {
    /// Validates transport settings against hard limits.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a setting is out of range or the
    /// endpoint violates scheme policy.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_TIMEOUT_MS ..= MAX_TIMEOUT_MS).contains(&self.timeout_ms) {
            return Err(ConfigError::Invalid("transport timeout_ms out of range".to_string()));
        }
        if !(MIN_REPLY_BYTES ..= MAX_REPLY_BYTES).contains(&self.max_reply_bytes) {
            return Err(ConfigError::Invalid(
                "transport max_reply_bytes out of range".to_string(),
            ));
        }
        if self.user_agent.is_empty() {
            return Err(ConfigError::Invalid("transport user_agent must be set".to_string()));
        }
        let endpoint = Url::parse(&self.endpoint)
            .map_err(|_| ConfigError::Invalid("transport endpoint is not a valid url".to_string()))?;
        match endpoint.scheme() {
            "https" => {}
            "http" if self.allow_http && is_loopback_host(&endpoint) => {}
            "http" => {
                return Err(ConfigError::Invalid(
                    "cleartext endpoints require allow_http and a loopback host".to_string(),
                ));
            }
            _ => {
                return Err(ConfigError::Invalid(
                    "transport endpoint scheme must be https".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for VerifierSection {
    // Secrets stay out of debug output.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifierSection")
            .field("secret", &"<redacted>")
            .field("min_score", &self.min_score)
            .field("hostname", &self.hostname)
            .field("action", &self.action)
            .finish()
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading and validation errors.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path in precedence order: explicit argument, then
/// the `CAPTCHA_GATE_CONFIG` override, then the default filename.
pub(crate) fn resolve_path(path: Option<&Path>, env_override: Option<&str>) -> PathBuf {
    if let Some(path) = path {
        return path.to_path_buf();
    }
    if let Some(env_path) = env_override {
        return PathBuf::from(env_path);
    }
    PathBuf::from(DEFAULT_CONFIG_NAME)
}

/// Returns true when the endpoint host is a loopback address.
pub(crate) fn is_loopback_host(endpoint: &Url) -> bool {
    match endpoint.host() {
        Some(url::Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(url::Host::Ipv4(addr)) => addr.is_loopback(),
        Some(url::Host::Ipv6(addr)) => addr.is_loopback(),
        None => false,
    }
}

/// Default minimum trust score.
const fn default_min_score() -> f64 {
    DEFAULT_MIN_SCORE
}

/// Default siteverify endpoint.
fn default_endpoint() -> String {
    SiteverifyConfig::default().endpoint
}

/// Default request timeout in milliseconds.
fn default_timeout_ms() -> u64 {
    SiteverifyConfig::default().timeout_ms
}

/// Default reply size limit in bytes.
fn default_max_reply_bytes() -> usize {
    SiteverifyConfig::default().max_reply_bytes
}

/// Default outbound user agent.
fn default_user_agent() -> String {
    SiteverifyConfig::default().user_agent
}
