use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdvisorError {
    /// Transport-level failure: connect, timeout, TLS.
    #[error("request to backend failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {detail}")]
    Backend { status: StatusCode, detail: String },
    /// The response body was not what the wire types expect.
    #[error("failed to decode backend response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Error payload shape used by the backend. Some endpoints use `detail`,
/// others `message`.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

pub(crate) fn error_detail(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail.or(b.message))
        .unwrap_or_else(|| format!("request failed with status {status}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_detail_over_message() {
        let detail = error_detail(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "bad credentials", "message": "ignored"}"#,
        );
        assert_eq!(detail, "bad credentials");
    }

    #[test]
    fn falls_back_to_message() {
        let detail = error_detail(StatusCode::BAD_REQUEST, r#"{"message": "ticker required"}"#);
        assert_eq!(detail, "ticker required");
    }

    #[test]
    fn unparseable_body_reports_the_status() {
        let detail = error_detail(StatusCode::BAD_GATEWAY, "<html>upstream down</html>");
        assert_eq!(detail, "request failed with status 502 Bad Gateway");
    }
}
