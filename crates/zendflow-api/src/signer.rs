//! Request signing
//!
//! Every web API call carries a `Date` header and an `X-Zend-Signature` header
//! of the form `<key name>; <hex HMAC-SHA256>`. The HMAC is keyed by the API
//! key hash and computed over `host:path:user-agent:date`, where `path` is the
//! request path without its query string.

use crate::error::{Result, ZendError};
use crate::target::EndpointTarget;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Method;
use reqwest::header::{ACCEPT, DATE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "X-Zend-Signature";
pub const ACCEPT_XML: &str = "application/vnd.zend.serverapi+xml;version=1.9";

const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// RFC 1123 date as sent in the `Date` header
pub fn http_date(timestamp: DateTime<Utc>) -> String {
    timestamp.format(HTTP_DATE_FORMAT).to_string()
}

/// The part of `path` that participates in the signature
pub fn signing_path(path: &str) -> &str {
    match path.split_once('?') {
        Some((path, _query)) => path,
        None => path,
    }
}

/// Hex HMAC-SHA256 of `host:path:user_agent:date` keyed by `secret`
pub fn compute_signature(
    secret: &str,
    host: &str,
    path: &str,
    user_agent: &str,
    date: &str,
) -> String {
    let data = format!("{}:{}:{}:{}", host, signing_path(path), user_agent, date);
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// A request whose signing inputs have been captured.
///
/// Holds everything needed to send it, so replacing the client's target after
/// signing does not change where or how this request goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: Method,
    pub host: String,
    pub path: String,
    pub date: String,
    pub client_id: String,
    pub user_agent: String,
    pub signature: String,
}

impl SignedRequest {
    pub fn new(
        target: EndpointTarget,
        method: Method,
        path: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let path = path.into();
        let date = http_date(timestamp);
        let signature = compute_signature(
            target.secret(),
            target.host(),
            &path,
            target.user_agent(),
            &date,
        );

        Self {
            method,
            host: target.host().to_string(),
            path,
            date,
            client_id: target.client_id().to_string(),
            user_agent: target.user_agent().to_string(),
            signature,
        }
    }

    /// Value of the `X-Zend-Signature` header
    pub fn signature_header(&self) -> String {
        format!("{}; {}", self.client_id, self.signature)
    }

    pub fn url(&self, scheme: &str) -> String {
        format!("{}://{}{}", scheme, self.host, self.path)
    }

    /// `Date`, `User-agent`, `X-Zend-Signature` and `Accept`
    pub fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(DATE, header_value("Date", &self.date)?);
        headers.insert(USER_AGENT, header_value("User-agent", &self.user_agent)?);
        headers.insert(
            HeaderName::from_static("x-zend-signature"),
            header_value(SIGNATURE_HEADER, &self.signature_header())?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_XML));
        Ok(headers)
    }
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| ZendError::InvalidHeader {
        name,
        value: value.to_string(),
    })
}
