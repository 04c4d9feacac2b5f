//! Thin authenticated JSON client.
//!
//! Every call is fire-once: no retries, no backoff. Non-2xx responses map
//! to [`ApiError::Status`] carrying the status code and the body's `error`
//! field when one can be decoded.

use serde_json::Value;

use crate::models::{Profile, RawProfile};

pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Creates a client for `base_url`, attaching `token` as a bearer
    /// header when present.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let response = self
            .authorize(self.http.get(self.url(path)))
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        let response = self
            .authorize(self.http.post(self.url(path)).json(body))
            .send()
            .await
            .map_err(|e| ApiError::Http(e.to_string()))?;
        Self::decode(response).await
    }

    async fn decode(response: reqwest::Response) -> Result<Value, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let error = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(|e| e.as_str())
                        .map(String::from)
                })
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(ApiError::Status {
                status: status.as_u16(),
                error,
            });
        }
        response
            .json()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Requests a one-time passcode for `email`.
    pub async fn request_code(&self, email: &str) -> Result<(), ApiError> {
        self.post("/auth/request-code", &serde_json::json!({ "email": email }))
            .await?;
        Ok(())
    }

    /// Exchanges a one-time passcode for a session token.
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<String, ApiError> {
        let body = self
            .post(
                "/auth/verify",
                &serde_json::json!({ "email": email, "code": code }),
            )
            .await?;
        body.get("token")
            .and_then(|t| t.as_str())
            .map(String::from)
            .ok_or_else(|| ApiError::Decode("response missing token".to_string()))
    }

    /// Fetches discovery candidates, normalized to strict profiles.
    ///
    /// Records without a usable identifier are dropped.
    pub async fn discover(&self) -> Result<Vec<Profile>, ApiError> {
        let body = self.get("/discover").await?;
        // Some deployments wrap the list in a "profiles" field.
        let payload = match body.get("profiles") {
            Some(list) => list.clone(),
            None => body,
        };
        let raw: Vec<RawProfile> =
            serde_json::from_value(payload).map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(raw.into_iter().filter_map(RawProfile::normalize).collect())
    }
}

/// Errors that can occur talking to the backend.
#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (connection, TLS, timeout).
    Http(String),
    /// Server answered with a non-2xx status.
    Status { status: u16, error: String },
    /// Response body did not have the expected shape.
    Decode(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Http(e) => write!(f, "HTTP error: {}", e),
            ApiError::Status { status, error } => {
                write!(f, "server returned {}: {}", status, error)
            }
            ApiError::Decode(e) => write!(f, "unexpected response: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let client = ApiClient::new("https://api.example.com/", None);
        assert_eq!(
            client.url("/auth/verify"),
            "https://api.example.com/auth/verify"
        );
    }

    #[test]
    fn test_url_without_trailing_slash() {
        let client = ApiClient::new("https://api.example.com", None);
        assert_eq!(client.url("/discover"), "https://api.example.com/discover");
    }
}
