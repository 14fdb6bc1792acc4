use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

use crate::error::ApiError;

pub const DEFAULT_URL: &str = "https://cloud.tenable.com";
const ACCESS_KEY_VAR: &str = "TENABLE_ACCESS_KEY";
const SECRET_KEY_VAR: &str = "TENABLE_SECRET_KEY";
const BODY_SNIPPET: usize = 512;

/// API key pair used for the `X-ApiKeys` header.
#[derive(Clone)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("access_key", &"<redacted>").field("secret_key", &"<redacted>").finish()
    }
}

impl Credentials {
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Result<Self, ApiError> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();
        if access_key.trim().is_empty() || secret_key.trim().is_empty() {
            return Err(ApiError::MissingCredentials);
        }
        Ok(Credentials { access_key, secret_key })
    }

    pub fn from_env() -> Result<Self, ApiError> {
        let access = std::env::var(ACCESS_KEY_VAR).unwrap_or_default();
        let secret = std::env::var(SECRET_KEY_VAR).unwrap_or_default();
        Credentials::new(access, secret)
    }

    fn header(&self) -> Result<HeaderValue, ApiError> {
        let mut v = HeaderValue::from_str(&format!("accessKey={};secretKey={}", self.access_key, self.secret_key))
            .map_err(|_| ApiError::InvalidCredentials)?;
        v.set_sensitive(true);
        Ok(v)
    }
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        ClientOptions { base_url: DEFAULT_URL.to_string(), timeout: Duration::from_secs(60) }
    }
}

/// Thin client over the Tenable Vulnerability Management REST API.
#[derive(Debug, Clone)]
pub struct TenableClient {
    http: Client,
    base: Url,
}

impl TenableClient {
    pub fn new(creds: &Credentials, opts: &ClientOptions) -> Result<Self, ApiError> {
        let mut raw = opts.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base = Url::parse(&raw).map_err(|source| ApiError::BaseUrl { url: opts.base_url.clone(), source })?;

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static("x-apikeys"), creds.header()?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(headers)
            .user_agent(user_agent())
            .timeout(opts.timeout)
            .gzip(true)
            .build()?;
        Ok(TenableClient { http, base })
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path.trim_start_matches('/'))
            .map_err(|source| ApiError::BaseUrl { url: format!("{}{}", self.base, path), source })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "GET");
        let resp = self.http.request(Method::GET, url).query(query).send().await?;
        decode("GET", path, resp).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let url = self.url(path)?;
        tracing::debug!(%url, "POST");
        let resp = self.http.request(Method::POST, url).json(body).send().await?;
        decode("POST", path, resp).await
    }
}

async fn decode<T: DeserializeOwned>(method: &'static str, path: &str, resp: reqwest::Response) -> Result<T, ApiError> {
    let status = resp.status();
    let bytes = resp.bytes().await?;
    if !status.is_success() {
        let body = tio_core::truncate_text(String::from_utf8_lossy(&bytes).trim(), BODY_SNIPPET);
        return Err(ApiError::Status { method, path: path.to_string(), status: status.as_u16(), body });
    }
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { path: path.to_string(), source })
}

fn user_agent() -> String {
    format!("Integration/1.0 (Custom Script; TenableOne_Asset_Tool; Build/{})", env!("CARGO_PKG_VERSION"))
}
