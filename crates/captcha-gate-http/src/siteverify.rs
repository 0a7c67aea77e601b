// crates/captcha-gate-http/src/siteverify.rs
// ============================================================================
// Module: Siteverify Transport
// Description: Blocking HTTPS client for the verification endpoint.
// Purpose: Perform one form-encoded POST per call and decode the reply
//          fail-closed into a VerificationResult.
// Dependencies: captcha-gate-core, reqwest, serde, serde_json, url
// ============================================================================

//! ## Overview
//! The transport sends `secret`, `response`, and optionally `remoteip` as a
//! form-encoded POST to the fixed siteverify endpoint. Network failures and
//! undecodable bodies become error-list entries on the returned result;
//! empty local inputs and replies that claim success without the required
//! attributes raise instead. The connection is scoped to the call and
//! released on every exit path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;

use captcha_gate_core::VerificationResult;
use captcha_gate_core::VerificationTransport;
use captcha_gate_core::VerifyError;
use captcha_gate_core::error_code_message;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::redirect::Policy;
use serde::Deserialize;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Fixed production verification endpoint.
pub const DEFAULT_SITEVERIFY_ENDPOINT: &str = "https://www.google.com/recaptcha/api/siteverify";
/// Default request timeout covering the full round-trip, in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 10_000;
/// Default maximum reply size; siteverify replies are a few hundred bytes.
const DEFAULT_MAX_REPLY_BYTES: usize = 16 * 1024;
/// Default user agent for outbound requests.
const DEFAULT_USER_AGENT: &str = "captcha-gate/0.1";

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for the siteverify transport.
///
/// # Invariants
/// - `allow_http = false` blocks cleartext `http://` endpoints.
/// - `max_reply_bytes` is a hard upper bound on reply bodies.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SiteverifyConfig {
    /// Verification endpoint URL.
    pub endpoint: String,
    /// Allow cleartext HTTP endpoints (loopback test servers only).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Maximum reply size allowed, in bytes.
    pub max_reply_bytes: usize,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for SiteverifyConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SITEVERIFY_ENDPOINT.to_string(),
            allow_http: false,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_reply_bytes: DEFAULT_MAX_REPLY_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

// ============================================================================
// SECTION: Wire Format
// ============================================================================

/// Decoded siteverify reply body.
///
/// Decoding into this flat shape bounds the accepted nesting depth: a deeply
/// nested payload fails the typed decode instead of being walked. Unknown
/// top-level fields (such as `challenge_ts`) are ignored.
#[derive(Debug, Deserialize)]
struct SiteverifyReply {
    /// Remote success flag.
    #[serde(default)]
    success: bool,
    /// Remote trust score.
    #[serde(default)]
    score: f64,
    /// Hostname the token was solved on.
    #[serde(default)]
    hostname: String,
    /// Action name reported by the client widget.
    #[serde(default)]
    action: String,
    /// Remote-reported error codes, present only on failure.
    #[serde(rename = "error-codes")]
    error_codes: Option<Vec<String>>,
}

// ============================================================================
// SECTION: Transport Implementation
// ============================================================================

/// Production siteverify transport over blocking HTTPS.
///
/// # Invariants
/// - Redirects are not followed.
/// - Replies exceeding `max_reply_bytes` fail closed.
#[derive(Debug)]
pub struct SiteverifyTransport {
    /// Parsed endpoint URL.
    endpoint: Url,
    /// Hard upper bound on reply bodies.
    max_reply_bytes: usize,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl SiteverifyTransport {
    /// Creates a transport with the default production configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Configuration`] when the HTTP client cannot be
    /// created.
    pub fn new() -> Result<Self, VerifyError> {
        Self::with_config(SiteverifyConfig::default())
    }

    /// Creates a transport from an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::Configuration`] when the endpoint is invalid
    /// or the HTTP client cannot be created.
    pub fn with_config(config: SiteverifyConfig) -> Result<Self, VerifyError> {
        let endpoint = validate_endpoint(&config)?;
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .build()
            .map_err(|_| VerifyError::Configuration("http client build failed".to_string()))?;
        Ok(Self {
            endpoint,
            max_reply_bytes: config.max_reply_bytes,
            client,
        })
    }
}

impl VerificationTransport for SiteverifyTransport {
    #[allow(
        clippy::float_cmp,
        reason = "A score of exactly 0.0 is the sentinel for a missing field."
    )]
    fn send(
        &self,
        secret: &str,
        token: &str,
        client_ip: &str,
    ) -> Result<VerificationResult, VerifyError> {
        if secret.is_empty() || token.is_empty() {
            return Err(VerifyError::InvalidInput(
                "one or more required verification arguments is empty".to_string(),
            ));
        }

        let mut result = VerificationResult::new();
        let mut params = vec![("secret", secret), ("response", token)];
        if !client_ip.is_empty() {
            params.push(("remoteip", client_ip));
        }

        let response = match self.client.post(self.endpoint.clone()).form(&params).send() {
            Ok(response) => response,
            Err(err) => {
                result.add_error(format!("transport error: {err}"));
                return Ok(result);
            }
        };
        let body = match read_reply_limited(response, self.max_reply_bytes) {
            Ok(body) => body,
            Err(message) => {
                result.add_error(message);
                return Ok(result);
            }
        };

        let reply: SiteverifyReply = match serde_json::from_slice(&body) {
            Ok(reply) => reply,
            Err(err) => {
                result.add_error(format!("json decoding error: {err}"));
                return Ok(result);
            }
        };

        if !reply.success
            && let Some(codes) = &reply.error_codes
        {
            for code in codes {
                result.add_error(error_code_message(code));
            }
            return Ok(result);
        }

        // A reply claiming success without the full tuple is impossible
        // under the service contract; do not trust it.
        if !reply.success
            || reply.score == 0.0
            || reply.hostname.is_empty()
            || reply.action.is_empty()
        {
            return Err(VerifyError::MalformedRemoteResponse);
        }

        result.fill(reply.success, reply.score, reply.hostname, reply.action);
        Ok(result)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates the endpoint URL scheme and shape.
fn validate_endpoint(config: &SiteverifyConfig) -> Result<Url, VerifyError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|_| VerifyError::Configuration("invalid siteverify endpoint url".to_string()))?;
    match endpoint.scheme() {
        "https" => {}
        "http" if config.allow_http => {}
        _ => {
            return Err(VerifyError::Configuration(
                "unsupported siteverify endpoint scheme".to_string(),
            ));
        }
    }
    if !endpoint.username().is_empty() || endpoint.password().is_some() {
        return Err(VerifyError::Configuration(
            "endpoint credentials are not allowed".to_string(),
        ));
    }
    Ok(endpoint)
}

/// Reads the reply body while enforcing a byte limit.
fn read_reply_limited(response: Response, max_bytes: usize) -> Result<Vec<u8>, String> {
    let expected_len = response.content_length();
    let max_bytes_u64 =
        u64::try_from(max_bytes).map_err(|_| "reply size limit exceeds u64".to_string())?;
    if let Some(expected) = expected_len
        && expected > max_bytes_u64
    {
        return Err("siteverify reply exceeds size limit".to_string());
    }
    let mut buf = Vec::new();
    let limit = max_bytes_u64.saturating_add(1);
    let mut handle = response.take(limit);
    handle.read_to_end(&mut buf).map_err(|err| format!("failed to read reply: {err}"))?;
    if buf.len() > max_bytes {
        return Err("siteverify reply exceeds size limit".to_string());
    }
    Ok(buf)
}
