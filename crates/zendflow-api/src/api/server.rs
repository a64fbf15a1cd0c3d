//! Server lifecycle and information methods

use crate::api::cluster::ServerInfo;
use crate::client::{ZendClient, api_path, flag, method_path, params};
use crate::error::{Result, ZendError};
use serde::Deserialize;

/// Zend Server daemons that can be restarted through the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Daemon {
    /// Job Queue
    JobQueue,
    /// Session Clustering
    SessionClustering,
    /// Deployment
    Deployment,
}

impl Daemon {
    pub fn as_str(&self) -> &'static str {
        match self {
            Daemon::JobQueue => "jqd",
            Daemon::SessionClustering => "scd",
            Daemon::Deployment => "zdd",
        }
    }
}

impl std::fmt::Display for Daemon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ZendClient {
    /// Whether the server has finished all pending background tasks
    pub fn tasks_complete(&self) -> Result<bool> {
        let data: TasksCompleteData = self.get(&method_path("tasksComplete"))?;
        Ok(data.tasks_complete)
    }

    /// Block until `tasksComplete` reports true
    pub fn wait_for_tasks_complete(&self) -> Result<()> {
        self.poller()
            .until("pending tasks", || self.tasks_complete(), |complete| *complete)?;
        Ok(())
    }

    /// Graceful PHP restart, then wait for the server to settle
    pub fn restart_php(&self) -> Result<Vec<ServerInfo>> {
        tracing::info!("Restarting PHP");
        let data: ServersListData = self.post_form(
            &method_path("restartPhp"),
            params(&[("force", flag(false))]),
        )?;
        self.wait_for_tasks_complete()?;
        Ok(data.into_servers())
    }

    pub fn restart_daemon(&self, daemon: Daemon) -> Result<Vec<ServerInfo>> {
        tracing::info!("Restarting daemon {}", daemon);
        let data: ServersListData = self.post_form(
            &method_path("restartDaemon"),
            params(&[("daemon", daemon.as_str())]),
        )?;
        self.wait_for_tasks_complete()?;
        Ok(data.into_servers())
    }

    pub fn get_system_info(&self) -> Result<SystemInfo> {
        let data: SystemInfoData = self.get(&method_path("getSystemInfo"))?;
        Ok(data.system_info)
    }

    pub fn get_server_info(&self, server_id: u32) -> Result<ServerInfo> {
        let data: ServerInfoData = self.get(&api_path(
            "getServerInfo",
            &[("serverId", server_id.to_string())],
        ))?;
        Ok(data.server_info)
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TasksCompleteData {
    tasks_complete: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServersListData {
    servers_list: Option<ServersList>,
}

impl ServersListData {
    pub(crate) fn into_servers(self) -> Vec<ServerInfo> {
        self.servers_list.map(|l| l.servers).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct ServersList {
    #[serde(rename = "serverInfo", default)]
    servers: Vec<ServerInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ServerInfoData {
    pub(crate) server_info: ServerInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SystemInfoData {
    system_info: SystemInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub zend_server_version: Option<String>,
    #[serde(default)]
    pub supported_api_versions: Option<String>,
    #[serde(default)]
    pub php_version: Option<String>,
    #[serde(default)]
    pub operating_system: Option<String>,
    #[serde(default)]
    pub deployment_version: Option<String>,
}

impl SystemInfo {
    /// Whether this server accepts the API version the client speaks
    pub fn supports_api(&self, version: &str) -> Result<bool> {
        let versions = self
            .supported_api_versions
            .as_deref()
            .ok_or(ZendError::MissingNode("supportedApiVersions"))?;
        Ok(versions
            .split(',')
            .any(|v| v.trim().ends_with(&format!("version={}", version))))
    }
}
