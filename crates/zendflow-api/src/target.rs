//! Endpoint target: where requests go and which credentials sign them

use zendflow_config::TargetConfig;

pub const DEFAULT_HOST: &str = "127.0.0.1:10081";
pub const DEFAULT_CLIENT_ID: &str = "admin";
pub const DEFAULT_SECRET: &str = "secret";
pub const DEFAULT_USER_AGENT: &str = "zend_http_client";

/// Port the web API listens on for freshly installed servers
pub const API_PORT: u16 = 10081;

/// Remote host plus the API key used to sign requests against it.
///
/// Owned by [`crate::ZendClient`] and replaced wholesale with
/// [`crate::ZendClient::set_target`]. Signing takes a clone, so a request that
/// has already been signed is unaffected by later replacement.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointTarget {
    host: String,
    client_id: String,
    secret: String,
    user_agent: String,
}

impl Default for EndpointTarget {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_CLIENT_ID, DEFAULT_SECRET)
    }
}

impl std::fmt::Debug for EndpointTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndpointTarget")
            .field("host", &self.host)
            .field("client_id", &self.client_id)
            .field("secret", &"***")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl EndpointTarget {
    pub fn new(
        host: impl Into<String>,
        client_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            client_id: client_id.into(),
            secret: secret.into(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Same credentials, different host
    pub fn with_host(&self, host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..self.clone()
        }
    }

    /// Same host, different API key
    pub fn with_credentials(
        &self,
        client_id: impl Into<String>,
        secret: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            secret: secret.into(),
            ..self.clone()
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl From<TargetConfig> for EndpointTarget {
    fn from(config: TargetConfig) -> Self {
        let target = Self::new(
            config.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            config.key.unwrap_or_else(|| DEFAULT_CLIENT_ID.to_string()),
            config.hash.unwrap_or_else(|| DEFAULT_SECRET.to_string()),
        );
        match config.user_agent {
            Some(user_agent) => target.with_user_agent(user_agent),
            None => target,
        }
    }
}
