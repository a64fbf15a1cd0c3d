//! Server bootstrap and cluster membership workflows

use crate::error::Result;
use zendflow_api::{
    API_PORT, ApiKey, BootstrapRequest, ClusterJoinRequest, Daemon, ServerInfo, ZendClient,
};

/// Cluster member statuses after a workflow finished
#[derive(Debug, Clone)]
pub struct ServerHealth {
    pub servers: Vec<ServerInfo>,
}

impl ServerHealth {
    pub fn is_healthy(&self) -> bool {
        !self.servers.is_empty() && self.servers.iter().all(|s| s.status.is_ok())
    }

    pub fn unhealthy(&self) -> Vec<&ServerInfo> {
        self.servers.iter().filter(|s| !s.status.is_ok()).collect()
    }

    fn check(client: &ZendClient, server_id: Option<&str>) -> Result<Self> {
        Ok(Self {
            servers: client.cluster_get_server_status(server_id)?,
        })
    }

    fn warn_if_unhealthy(&self, consequence: &str) {
        for server in self.unhealthy() {
            tracing::warn!(
                "Server {} ({}) is {}; {}",
                server.name,
                server.id,
                server.status,
                consequence
            );
        }
    }
}

#[derive(Debug, Clone)]
pub struct BootstrapOutcome {
    /// Key issued by the server, now used by the client
    pub api_key: ApiKey,
    pub health: ServerHealth,
}

#[derive(Debug, Clone)]
pub struct JoinOutcome {
    pub server: ServerInfo,
    pub health: ServerHealth,
    /// Session clustering and PHP were restarted to recover other members
    pub recovered: bool,
}

/// Bootstrap a freshly installed server at `node_ip`.
///
/// The client is pointed at `<node_ip>:10081` and, once the server answers,
/// switched to the API key it issued. The daemons are restarted because a
/// fresh bootstrap leaves them pending a restart.
pub fn bootstrap_single_server(
    client: &mut ZendClient,
    node_ip: &str,
    request: &BootstrapRequest,
) -> Result<BootstrapOutcome> {
    bootstrap_server_at(client, &format!("{}:{}", node_ip, API_PORT), request)
}

/// [`bootstrap_single_server`] for a server whose API listens on `host`
pub fn bootstrap_server_at(
    client: &mut ZendClient,
    host: &str,
    request: &BootstrapRequest,
) -> Result<BootstrapOutcome> {
    let target = client.target().with_host(host);
    client.set_target(target);

    let bootstrap = client.bootstrap_single_server(request)?;
    let api_key = bootstrap.api_key;
    let target = client
        .target()
        .with_credentials(api_key.name.as_str(), api_key.hash.as_str());
    client.set_target(target);

    client.wait_for_tasks_complete()?;
    for daemon in [Daemon::JobQueue, Daemon::SessionClustering, Daemon::Deployment] {
        client.restart_daemon(daemon)?;
    }
    client.restart_php()?;

    let health = ServerHealth::check(client, None)?;
    health.warn_if_unhealthy("do not add it to a cluster");
    Ok(BootstrapOutcome { api_key, health })
}

/// Add another server to the cluster the client's server belongs to
pub fn add_server(client: &ZendClient, server_name: &str, server_ip: &str) -> Result<JoinOutcome> {
    let added = client.cluster_add_server(server_name, server_ip)?;
    client.wait_for_tasks_complete()?;
    client.wait_for_servers(Some(added.id.as_str()))?;

    let joined = ServerHealth::check(client, Some(added.id.as_str()))?;
    if !joined.is_healthy() {
        joined.warn_if_unhealthy("do not perform any other action");
        let server = joined.servers.first().cloned().unwrap_or(added);
        return Ok(JoinOutcome {
            server,
            health: joined,
            recovered: false,
        });
    }

    let mut health = ServerHealth::check(client, None)?;
    let mut recovered = false;
    if !health.is_healthy() {
        tracing::warn!("At least one cluster member is unhealthy, restarting scd and PHP");
        client.restart_daemon(Daemon::SessionClustering)?;
        client.restart_php()?;
        health = ServerHealth::check(client, None)?;
        recovered = true;
    }

    let server = joined.servers.into_iter().next().unwrap_or(added);
    Ok(JoinOutcome {
        server,
        health,
        recovered,
    })
}

/// Turn the client's standalone server into the first cluster member
pub fn create_cluster(client: &ZendClient, request: &ClusterJoinRequest) -> Result<ServerHealth> {
    client.server_add_to_cluster(request)?;
    client.wait_for_tasks_complete()?;
    let servers = client.wait_for_servers(None)?;

    let health = ServerHealth { servers };
    health.warn_if_unhealthy("do not perform any other action");
    Ok(health)
}
