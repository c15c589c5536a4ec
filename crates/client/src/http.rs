//! Shared HTTP plumbing for the backend collaborators.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use fridgechef_core::TransportError;

use crate::config::ClientConfig;

/// Authenticated client for the backend REST API.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("failed to create HTTP client: {e}")))?;

        // Paths are joined relative to the base, so it must end in a slash.
        let mut base = config.api_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            http,
            base,
            token: config.auth_token.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn url(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::Network(format!("invalid request path {path:?}: {e}")))
    }

    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "backend request");
        let req = self.http.request(method, url);
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Send and decode a JSON body.
    pub async fn send_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, TransportError> {
        let resp = send(req).await?;
        resp.json::<T>().await.map_err(|e| TransportError::Parse(e.to_string()))
    }

    /// Send and ignore the body.
    pub async fn send_empty(&self, req: RequestBuilder) -> Result<(), TransportError> {
        send(req).await.map(drop)
    }
}

async fn send(req: RequestBuilder) -> Result<Response, TransportError> {
    let resp = req.send().await.map_err(map_reqwest_error)?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(TransportError::api(status.as_u16(), error_message(&body)));
    }
    Ok(resp)
}

fn map_reqwest_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_decode() {
        TransportError::Parse(e.to_string())
    } else {
        TransportError::Network(e.to_string())
    }
}

/// The backend reports errors as `{"detail": "..."}`; fall back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_gets_trailing_slash() {
        let config = ClientConfig::for_url(Url::parse("http://api.test/v1").unwrap());
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url().as_str(), "http://api.test/v1/");
        assert_eq!(
            client.url("/recipes/3/star").unwrap().as_str(),
            "http://api.test/v1/recipes/3/star"
        );
    }

    #[test]
    fn error_message_prefers_detail() {
        assert_eq!(error_message(r#"{"detail":"레시피를 찾을 수 없습니다"}"#), "레시피를 찾을 수 없습니다");
        assert_eq!(error_message("bad gateway\n"), "bad gateway");
    }
}
