//! Zend Server web API client
//!
//! Blocking, one request at a time. Each call is signed with the current
//! [`EndpointTarget`], sent, and its `responseData` decoded into a typed
//! struct. The per-method wrappers live in [`crate::api`].

use crate::error::{Result, ZendError};
use crate::poller::Poller;
use crate::response;
use crate::signer::SignedRequest;
use crate::target::EndpointTarget;
use chrono::Utc;
use reqwest::Method;
use reqwest::blocking::multipart::Form;
use serde::de::DeserializeOwned;
use zendflow_config::ZendflowConfig;

pub const API_BASE: &str = "/ZendServer/Api";

/// Body of an API request
pub enum RequestBody {
    Empty,
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
    /// `multipart/form-data`, used for package uploads
    Multipart(Form),
}

/// Zend Server web API client
pub struct ZendClient {
    http: reqwest::blocking::Client,
    target: EndpointTarget,
    scheme: String,
    poller: Poller,
}

impl ZendClient {
    pub fn new(target: EndpointTarget) -> Result<Self> {
        let http = reqwest::blocking::Client::builder().build()?;
        Ok(Self {
            http,
            target,
            scheme: "http".to_string(),
            poller: Poller::default(),
        })
    }

    /// Client for the target and polling settings in a config file,
    /// with environment overrides applied
    pub fn from_config(config: &ZendflowConfig) -> Result<Self> {
        let client = Self::new(config.resolve_target().into())?;
        Ok(client.with_poller(Poller::from(&config.poll)))
    }

    pub fn with_poller(mut self, poller: Poller) -> Self {
        self.poller = poller;
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn target(&self) -> &EndpointTarget {
        &self.target
    }

    /// Replace the target used for every request signed from now on
    pub fn set_target(&mut self, target: EndpointTarget) {
        tracing::info!(
            "Switching API target to {} (key {})",
            target.host(),
            target.client_id()
        );
        self.target = target;
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }

    /// Sign `path` with the current target and the current time
    pub fn sign(&self, method: Method, path: &str) -> SignedRequest {
        SignedRequest::new(self.target.clone(), method, path, Utc::now())
    }

    /// Send an already signed request and return the raw response body
    pub fn send(&self, request: &SignedRequest, body: RequestBody) -> Result<String> {
        let url = request.url(&self.scheme);
        tracing::debug!("{} {}", request.method, url);

        let builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers()?);

        let builder = match body {
            RequestBody::Empty => builder,
            RequestBody::Form(params) => builder.form(&params),
            RequestBody::Multipart(form) => builder.multipart(form),
        };

        let response = builder.send()?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            if let Some(api_error) = response::decode_error(&text) {
                return Err(api_error);
            }
            return Err(ZendError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(text)
    }

    pub(crate) fn get_raw(&self, path: &str) -> Result<String> {
        let request = self.sign(Method::GET, path);
        self.send(&request, RequestBody::Empty)
    }

    pub(crate) fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        response::decode(&self.get_raw(path)?)
    }

    pub(crate) fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Vec<(String, String)>,
    ) -> Result<T> {
        let request = self.sign(Method::POST, path);
        response::decode(&self.send(&request, RequestBody::Form(params))?)
    }

    pub(crate) fn post_multipart<T: DeserializeOwned>(&self, path: &str, form: Form) -> Result<T> {
        let request = self.sign(Method::POST, path);
        response::decode(&self.send(&request, RequestBody::Multipart(form))?)
    }
}

/// `/ZendServer/Api/<method>`
pub fn method_path(method: &str) -> String {
    format!("{}/{}", API_BASE, method)
}

/// `/ZendServer/Api/<method>` with a URL-encoded query string
pub fn api_path<K, V>(method: &str, query: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let path = method_path(method);
    if query.is_empty() {
        return path;
    }

    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in query {
        serializer.append_pair(key.as_ref(), value.as_ref());
    }
    format!("{}?{}", path, serializer.finish())
}

/// Form parameter list from borrowed pairs
pub(crate) fn params<K, V>(pairs: &[(K, V)]) -> Vec<(String, String)>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect()
}

/// Booleans are sent the way the web API documents them
pub(crate) fn flag(value: bool) -> &'static str {
    if value { "TRUE" } else { "FALSE" }
}
