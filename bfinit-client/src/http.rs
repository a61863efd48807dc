//! HTTP client - network transport for the API
//!
//! Every request reads the bearer token from the shared [`Session`] at
//! send time, so a login on one handle is visible to all of them.

use crate::{ClientError, ClientResult, Session};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode, Url, multipart::Form};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Error body some endpoints send with a non-2xx status
#[derive(serde::Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Authenticated GET
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    /// GET without an `Authorization` header
    async fn get_public<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form)
    -> ClientResult<T>;
}

/// Relative request path with each segment percent-encoded.
///
/// Ids coming from the server go through here so characters such as
/// `/`, `#` or `&` stay inside their segment or query value. An empty
/// last segment yields a trailing slash.
pub(crate) fn encoded_path(segments: &[&str], query: &[(&str, &str)]) -> ClientResult<String> {
    let mut url = Url::parse("http://localhost/")
        .map_err(|e| ClientError::Internal(format!("path builder: {}", e)))?;
    url.path_segments_mut()
        .map_err(|_| ClientError::Internal("path builder: URL cannot be a base".into()))?
        .clear()
        .extend(segments);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }

    let mut path = url.path().trim_start_matches('/').to_string();
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }
    Ok(path)
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl NetworkHttpClient {
    pub fn new(base_url: &str, timeout_secs: u64, session: Session) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            tracing::debug!(status = status.as_u16(), body = %text, "Non-success HTTP status");
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.message.or(b.error))
                .unwrap_or_else(|| {
                    if text.is_empty() {
                        status.to_string()
                    } else {
                        text
                    }
                });
            return Err(match status {
                StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
                StatusCode::FORBIDDEN => ClientError::Forbidden(message),
                StatusCode::NOT_FOUND => ClientError::NotFound(message),
                _ => ClientError::Api {
                    status: status.as_u16(),
                    message,
                },
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ClientError::InvalidResponse(format!("undecodable response body: {}", e))
        })
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let req = self.authorize(self.client.get(&url));
        self.send(req).await
    }

    async fn get_public<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "GET (public)");
        self.send(self.client.get(&url)).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let req = self.authorize(self.client.post(&url).json(body));
        self.send(req).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize + std::marker::Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "PUT");
        let req = self.authorize(self.client.put(&url).json(body));
        self.send(req).await
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> ClientResult<T> {
        let url = self.url(path);
        tracing::debug!(%url, "POST multipart");
        let req = self.authorize(self.client.post(&url).multipart(form));
        self.send(req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encoded_path_keeps_ids_in_their_segment() {
        let segments = ["payments", "bitss", "payment", "approved", "a/b#c"];
        let path = encoded_path(&segments, &[]).unwrap();
        assert_eq!(path, "payments/bitss/payment/approved/a%2Fb%23c");

        let path = encoded_path(&["orders", "status", ""], &[("id", "m&1 x")]).unwrap();
        assert_eq!(path, "orders/status/?id=m%261+x");
    }
}
