//! HTTP transport utilities
//!
//! Common functions for talking to the remote service over HTTP:
//! client construction, URL handling and error-body normalization.

use kernel::error::{app_error::AppError, app_error::AppResult, kind::ErrorKind};
use reqwest::{Client, StatusCode};
use serde_json::Value;

use crate::config::ClientConfig;

/// Normalize a user supplied base URL
///
/// Adds `http://` when no scheme is present and trims trailing slashes so
/// that endpoint paths can be appended without doubling separators.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        let normalized = format!("http://{}", trimmed);
        tracing::debug!(original = raw, normalized = %normalized, "Added scheme to base URL");
        normalized
    }
}

/// Join a base URL and an endpoint path
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url, path.trim_start_matches('/'))
}

/// Build an `Authorization` header value for a bearer token
///
/// The token is attached verbatim.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Build the shared HTTP client
///
/// ## Arguments
/// * `config` - Client configuration (timeout, user agent)
///
/// ## Returns
/// * `Ok(Client)` - Client ready to be cloned into gateways
/// * `Err(AppError)` - TLS backend or builder failure
pub fn build_client(config: &ClientConfig) -> AppResult<Client> {
    let mut builder = Client::builder().user_agent(config.user_agent.clone());
    if let Some(timeout) = config.request_timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder.build()?;

    tracing::info!(
        api_url = %config.api_url,
        timeout_ms = ?config.timeout_ms(),
        "HTTP client ready"
    );

    Ok(client)
}

/// Extract a human readable detail from an error response body
///
/// Lookup order:
/// 1. JSON `detail` string
/// 2. JSON `detail` list (validation errors): each item's `msg`, joined
/// 3. JSON `message` string
/// 4. Non-empty raw body text
/// 5. Canonical reason phrase of the status
pub fn extract_detail(status: u16, body: &str) -> String {
    if let Ok(json) = serde_json::from_str::<Value>(body) {
        match json.get("detail") {
            Some(Value::String(detail)) if !detail.is_empty() => return detail.clone(),
            Some(Value::Array(items)) => {
                let messages: Vec<&str> = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(Value::as_str))
                    .collect();
                if !messages.is_empty() {
                    return messages.join("; ");
                }
            }
            _ => {}
        }
        if let Some(message) = json.get("message").and_then(Value::as_str) {
            if !message.is_empty() {
                return message.to_string();
            }
        }
    }

    let text = body.trim();
    if !text.is_empty() {
        return text.to_string();
    }

    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unexpected response")
        .to_string()
}

/// Normalize a non-success response into an [`AppError`]
pub fn error_from_response(status: u16, body: &str) -> AppError {
    let kind = ErrorKind::from_status(status);
    let detail = extract_detail(status, body);
    let error = AppError::new(kind, detail);
    match kind {
        ErrorKind::Auth => error.with_action("Log in again"),
        _ => error,
    }
}
