//! Cluster membership and bootstrap methods

use crate::api::server::{ServerInfoData, ServersListData};
use crate::client::{ZendClient, api_path, flag, method_path, params};
use crate::error::Result;
use crate::status::ServerStatus;
use serde::Deserialize;

/// Parameters for `bootstrapSingleServer`
#[derive(Clone)]
pub struct BootstrapRequest {
    pub production: bool,
    pub admin_password: String,
    pub order_number: String,
    pub license_key: String,
}

impl std::fmt::Debug for BootstrapRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapRequest")
            .field("production", &self.production)
            .field("admin_password", &"********")
            .field("order_number", &self.order_number)
            .field("license_key", &"********")
            .finish()
    }
}

/// Parameters for `serverAddToCluster`
#[derive(Clone)]
pub struct ClusterJoinRequest {
    pub server_name: String,
    pub db_host: String,
    pub db_username: String,
    pub db_password: String,
    pub node_ip: String,
    pub db_name: String,
}

impl std::fmt::Debug for ClusterJoinRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClusterJoinRequest")
            .field("server_name", &self.server_name)
            .field("db_host", &self.db_host)
            .field("db_username", &self.db_username)
            .field("db_password", &"********")
            .field("node_ip", &self.node_ip)
            .field("db_name", &self.db_name)
            .finish()
    }
}

impl ZendClient {
    /// Status of every cluster member, or of one server
    pub fn cluster_get_server_status(&self, server_id: Option<&str>) -> Result<Vec<ServerInfo>> {
        let query: Vec<(&str, &str)> = server_id
            .map(|id| vec![("servers[0]", id)])
            .unwrap_or_default();
        let data: ServersListData = self.get(&api_path("clusterGetServerStatus", &query))?;
        Ok(data.into_servers())
    }

    /// Register a new server with the cluster this server belongs to
    pub fn cluster_add_server(&self, server_name: &str, server_ip: &str) -> Result<ServerInfo> {
        tracing::info!("Adding server {} ({}) to the cluster", server_name, server_ip);
        let data: ServerInfoData = self.post_form(
            &method_path("clusterAddServer"),
            params(&[("serverName", server_name), ("serverIp", server_ip)]),
        )?;
        Ok(data.server_info)
    }

    /// Turn this standalone server into the first member of a cluster
    pub fn server_add_to_cluster(&self, request: &ClusterJoinRequest) -> Result<ServerInfo> {
        tracing::info!(
            "Creating cluster with {} on database {}",
            request.server_name,
            request.db_host
        );
        let data: ServerInfoData = self.post_form(
            &method_path("serverAddToCluster"),
            params(&[
                ("serverName", request.server_name.as_str()),
                ("dbHost", request.db_host.as_str()),
                ("dbUsername", request.db_username.as_str()),
                ("dbPassword", request.db_password.as_str()),
                ("nodeIp", request.node_ip.as_str()),
                ("dbName", request.db_name.as_str()),
            ]),
        )?;
        Ok(data.server_info)
    }

    /// Run the initial setup of a fresh server.
    ///
    /// The returned API key replaces the default credentials; the caller is
    /// responsible for switching the client target to it.
    pub fn bootstrap_single_server(&self, request: &BootstrapRequest) -> Result<Bootstrap> {
        tracing::info!("Bootstrapping server {}", self.target().host());
        let data: BootstrapData = self.post_form(
            &method_path("bootstrapSingleServer"),
            params(&[
                ("production", flag(request.production)),
                ("adminPassword", request.admin_password.as_str()),
                ("orderNumber", request.order_number.as_str()),
                ("licenseKey", request.license_key.as_str()),
                ("acceptEula", flag(true)),
            ]),
        )?;
        Ok(data.bootstrap)
    }

    /// Poll `clusterGetServerStatus` until no reported server is restarting
    /// or redeploying
    pub fn wait_for_servers(&self, server_id: Option<&str>) -> Result<Vec<ServerInfo>> {
        let operation = match server_id {
            Some(id) => format!("server {}", id),
            None => "cluster servers".to_string(),
        };
        self.poller().until(
            &operation,
            || self.cluster_get_server_status(server_id),
            |servers| !servers.iter().any(|s| s.status.is_in_progress()),
        )
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct BootstrapData {
    bootstrap: Bootstrap,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bootstrap {
    #[serde(default)]
    pub success: bool,
    pub api_key: ApiKey,
}

/// Web API key issued by the server
#[derive(Clone, Deserialize)]
pub struct ApiKey {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    pub name: String,
    pub hash: String,
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKey")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("name", &self.name)
            .field("hash", &"********")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    pub status: ServerStatus,
}
