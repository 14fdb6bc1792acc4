use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("TENABLE_ACCESS_KEY and TENABLE_SECRET_KEY must be set as environment variables.")]
    MissingCredentials,
    #[error("API keys contain characters that cannot be sent in a header")]
    InvalidCredentials,
    #[error("invalid API url {url}: {source}")]
    BaseUrl { url: String, source: url::ParseError },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{method} {path} returned {status}: {body}")]
    Status { method: &'static str, path: String, status: u16, body: String },
    #[error("unexpected response from {path}: {source}")]
    Decode { path: String, source: serde_json::Error },
    #[error("export job {uuid} ended with status {status}")]
    ExportFailed { uuid: String, status: String },
}

impl ApiError {
    pub fn is_export_failure(&self) -> bool {
        matches!(self, ApiError::ExportFailed { .. })
    }
}
