use http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("server answered {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
    #[error("invalid base url `{0}`")]
    InvalidBaseUrl(String),
}
