//! `zendServerAPIResponse` envelope decoding
//!
//! ```xml
//! <zendServerAPIResponse xmlns="http://www.zend.com/server/api/1.9">
//!   <requestData>...</requestData>
//!   <responseData>...</responseData>   <!-- or <errorData> -->
//! </zendServerAPIResponse>
//! ```

use crate::error::{Result, ZendError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<T> {
    response_data: Option<T>,
    error_data: Option<ErrorData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope {
    error_data: Option<ErrorData>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorData {
    error_code: String,
    #[serde(default)]
    error_message: String,
}

impl From<ErrorData> for ZendError {
    fn from(error: ErrorData) -> Self {
        ZendError::Api {
            code: error.error_code.trim().to_string(),
            message: error.error_message.trim().to_string(),
        }
    }
}

/// A `responseData` whose content the caller does not need
#[derive(Debug, Default, Deserialize)]
pub struct Acknowledged {}

/// Decode `responseData` into `T`, turning `errorData` into [`ZendError::Api`]
pub fn decode<T: DeserializeOwned>(xml: &str) -> Result<T> {
    let envelope: Envelope<T> = quick_xml::de::from_str(xml)?;
    if let Some(error) = envelope.error_data {
        return Err(error.into());
    }
    envelope
        .response_data
        .ok_or(ZendError::MissingNode("responseData"))
}

/// The API error carried by a failed response body, if it has one
pub fn decode_error(xml: &str) -> Option<ZendError> {
    quick_xml::de::from_str::<ErrorEnvelope>(xml)
        .ok()
        .and_then(|envelope| envelope.error_data)
        .map(ZendError::from)
}

const CDATA_START: &str = "<![CDATA[";
const CDATA_END: &str = "]]>";

/// Escape `&` characters that do not start an entity or character reference.
///
/// Some responses embed user-supplied text (application parameters) without
/// escaping it. CDATA sections are copied through untouched.
pub fn escape_bare_ampersands(xml: &str) -> Cow<'_, str> {
    if !xml.contains('&') {
        return Cow::Borrowed(xml);
    }

    let mut out = String::with_capacity(xml.len() + 16);
    let mut rest = xml;
    while let Some(pos) = rest.find('&') {
        if let Some(start) = rest[..pos].find(CDATA_START) {
            let end = rest[start..]
                .find(CDATA_END)
                .map(|e| start + e + CDATA_END.len())
                .unwrap_or(rest.len());
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if starts_with_reference(tail) {
            out.push('&');
        } else {
            out.push_str("&amp;");
        }
        rest = &tail[1..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn starts_with_reference(tail: &str) -> bool {
    let Some(end) = tail.find(';') else {
        return false;
    };
    let name = &tail[1..end];
    if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        return !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit());
    }
    if let Some(dec) = name.strip_prefix('#') {
        return !dec.is_empty() && dec.chars().all(|c| c.is_ascii_digit());
    }
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

/// Treat empty text nodes as absent
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}
