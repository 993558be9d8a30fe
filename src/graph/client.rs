// Graph API client — a thin reqwest wrapper with a generic GET helper.
//
// Every request carries the page access token as a query parameter. Error
// responses come back as a JSON envelope (`{"error": {...}}`), which is
// decoded into `GraphApiError` so callers can downcast and tell missing
// permissions apart from real failures.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Default Graph API endpoint (versioned).
pub const DEFAULT_GRAPH_API_URL: &str = "https://graph.facebook.com/v19.0";

/// An error reported by the Graph API itself.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphApiError {
    pub status: u16,
    pub code: Option<i64>,
    pub message: String,
}

impl GraphApiError {
    /// Permission-denied codes: 10 and the 200-299 range. Code 190 (expired
    /// or invalid token) is a hard failure, not a missing permission.
    pub fn is_permission_error(&self) -> bool {
        match self.code {
            Some(10) => true,
            Some(c) => (200..=299).contains(&c),
            None => false,
        }
    }
}

impl std::fmt::Display for GraphApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.code {
            Some(code) => write!(
                f,
                "Graph API returned {} (code {code}): {}",
                self.status, self.message
            ),
            None => write!(f, "Graph API returned {}: {}", self.status, self.message),
        }
    }
}

impl std::error::Error for GraphApiError {}

/// True when `err` (anywhere in its chain) is a Graph permission error.
pub fn is_permission_error(err: &anyhow::Error) -> bool {
    err.chain()
        .filter_map(|e| e.downcast_ref::<GraphApiError>())
        .any(|e| e.is_permission_error())
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<i64>,
}

/// Decode a non-success response body into a `GraphApiError`. Bodies that
/// aren't an error envelope keep their raw text as the message.
pub fn parse_error(status: u16, body: &str) -> GraphApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => GraphApiError {
            status,
            code: envelope.error.code,
            message: envelope.error.message,
        },
        Err(_) => GraphApiError {
            status,
            code: None,
            message: body.to_string(),
        },
    }
}

pub struct GraphClient {
    client: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl GraphClient {
    pub fn new(base_url: &str, access_token: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("pagegrade/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// GET `{base_url}/{path}` and deserialize the response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!(path = path, "Graph GET request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await
            .with_context(|| format!("Graph request failed: {path}"))?;

        Self::decode(response, path).await
    }

    /// Follow a `paging.next` URL. These already carry every query
    /// parameter, including the token.
    pub async fn get_url<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("Graph GET next page");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Graph pagination request failed")?;

        Self::decode(response, "next page").await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::Error::new(parse_error(status, &body)))
                .with_context(|| format!("Graph request {what} failed"));
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize Graph response for {what}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_envelope() {
        let body = r#"{"error": {"message": "(#10) Permission denied", "type": "OAuthException", "code": 10}}"#;
        let err = parse_error(403, body);
        assert_eq!(err.code, Some(10));
        assert!(err.is_permission_error());
        assert!(err.to_string().contains("code 10"));
    }

    #[test]
    fn test_parse_error_raw_body() {
        let err = parse_error(502, "Bad Gateway");
        assert_eq!(err.code, None);
        assert_eq!(err.message, "Bad Gateway");
        assert!(!err.is_permission_error());
    }

    #[test]
    fn test_permission_codes() {
        let code = |c| GraphApiError { status: 400, code: Some(c), message: String::new() };
        assert!(code(200).is_permission_error());
        assert!(code(299).is_permission_error());
        assert!(!code(190).is_permission_error());
        assert!(!code(100).is_permission_error());
    }

    #[test]
    fn test_permission_error_found_through_context() {
        let err = Err::<(), _>(anyhow::Error::new(GraphApiError {
            status: 403,
            code: Some(10),
            message: "denied".to_string(),
        }))
        .context("Failed to fetch insights")
        .unwrap_err();
        assert!(is_permission_error(&err));
        assert!(!is_permission_error(&anyhow::anyhow!("timeout")));
    }
}
