use crate::config::GithubConfig;
use crate::error::{AnalysisError, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use tracing::debug;

/// Status and body of a single GET, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// How a response should be treated by callers.
#[derive(Debug)]
pub enum Classified {
    Ready(String),
    /// 202: GitHub is still computing the resource.
    Computing,
    /// 204
    NoContent,
    Failed(AnalysisError),
}

pub fn classify(response: RawResponse) -> Classified {
    match StatusCode::from_u16(response.status) {
        Ok(StatusCode::OK) => Classified::Ready(response.body),
        Ok(StatusCode::ACCEPTED) => Classified::Computing,
        Ok(StatusCode::NO_CONTENT) => Classified::NoContent,
        Ok(StatusCode::UNAUTHORIZED) => Classified::Failed(AnalysisError::Unauthorized),
        Ok(StatusCode::FORBIDDEN) | Ok(StatusCode::TOO_MANY_REQUESTS) => {
            Classified::Failed(AnalysisError::Forbidden)
        }
        Ok(StatusCode::NOT_FOUND) => Classified::Failed(AnalysisError::NotFound),
        _ => Classified::Failed(AnalysisError::Http {
            status: response.status,
        }),
    }
}

/// One-shot GET against the GitHub API. Retries belong to callers.
pub trait Transport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse>;
}

/// reqwest-backed transport carrying the per-invocation credential.
pub struct HttpFetcher {
    client: Client,
    api_base: String,
}

/// Fixed `Accept` and `User-Agent`, plus `Authorization` only when a non-empty token is given.
pub fn default_headers(config: &GithubConfig, token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_str(&config.accept)
            .map_err(|e| AnalysisError::Transport(format!("invalid accept header: {}", e)))?,
    );
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)
            .map_err(|e| AnalysisError::Transport(format!("invalid user agent: {}", e)))?,
    );

    if let Some(token) = token.filter(|t| !t.is_empty()) {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|_| AnalysisError::InvalidCredential)?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

impl HttpFetcher {
    pub fn new(config: &GithubConfig, token: Option<&str>) -> Result<Self> {
        let client = Client::builder()
            .default_headers(default_headers(config, token)?)
            .build()
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_base: config.api_base.trim_end_matches('/').to_string(),
        })
    }
}

impl Transport for HttpFetcher {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse> {
        let url = format!("{}{}", self.api_base, path);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Transport(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
