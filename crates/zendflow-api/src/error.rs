//! Zend Server API error types

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZendError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Zend Server API error [{code}]: {message}")]
    Api { code: String, message: String },

    #[error("Failed to decode XML response: {0}")]
    Decode(#[from] quick_xml::DeError),

    #[error("Expected node missing from response: {0}")]
    MissingNode(&'static str),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Invalid header value for {name}: {value:?}")]
    InvalidHeader { name: &'static str, value: String },

    #[error("Timed out waiting for {operation} after {attempts} checks ({waited:?})")]
    PollTimeout {
        operation: String,
        attempts: u32,
        waited: Duration,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ZendError {
    /// API error code reported by the server, if any
    pub fn api_code(&self) -> Option<&str> {
        match self {
            ZendError::Api { code, .. } => Some(code),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ZendError>;
