//! Shared success/failure decision rule on the destination's response.
//!
//! The file host answers with a plain-text body: an absolute URL on success,
//! a diagnostic string otherwise. HTTP-level success is necessary but not
//! sufficient; a 2xx with a non-URL body is still an application-level
//! failure.

use crate::traits::{TransportError, TransportResult};

/// Decide the outcome from status code, canonical status text, and body.
pub(crate) fn decide(status: u16, status_text: Option<&str>, body: &str) -> TransportResult<String> {
    let body = body.trim();
    if !(200..300).contains(&status) {
        let detail = if body.is_empty() {
            status_text.unwrap_or("no response body").to_string()
        } else {
            body.to_string()
        };
        return Err(TransportError::Status { status, detail });
    }
    if body.starts_with("http://") || body.starts_with("https://") {
        Ok(body.to_string())
    } else {
        Err(TransportError::UnexpectedBody(body.to_string()))
    }
}

/// Read a reqwest response and apply the decision rule.
pub(crate) async fn read_outcome(resp: reqwest::Response) -> TransportResult<String> {
    let status = resp.status();
    let body = resp.text().await?;
    decide(status.as_u16(), status.canonical_reason(), &body)
}
