//! Virtual host methods

use crate::client::{ZendClient, api_path, method_path, params};
use crate::error::Result;
use crate::response::{Acknowledged, non_empty};
use crate::status::VhostStatus;
use serde::Deserialize;

impl ZendClient {
    pub fn vhost_get_status(&self) -> Result<Vec<VhostInfo>> {
        let data: VhostListData = self.get(&method_path("vhostGetStatus"))?;
        Ok(data.vhost_list.map(|l| l.vhosts).unwrap_or_default())
    }

    pub fn vhost_get_details(&self, vhost_id: &str) -> Result<VhostDetails> {
        let data: VhostDetailsData = self.get(&api_path("vhostGetDetails", &[("vhost", vhost_id)]))?;
        Ok(data.vhost_details)
    }

    /// Replace the configuration template of a vhost
    pub fn vhost_edit(&self, vhost_id: &str, template: &str) -> Result<()> {
        tracing::info!("Editing vhost {}", vhost_id);
        let _: Acknowledged = self.post_form(
            &method_path("vhostEdit"),
            params(&[("vhostId", vhost_id), ("template", template)]),
        )?;
        Ok(())
    }

    /// Rewrite the vhost files on disk from the stored configuration
    pub fn vhost_redeploy(&self, vhost_id: &str) -> Result<()> {
        tracing::info!("Redeploying vhost {}", vhost_id);
        let _: Acknowledged =
            self.post_form(&method_path("vhostRedeploy"), params(&[("vhost", vhost_id)]))?;
        Ok(())
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VhostListData {
    vhost_list: Option<VhostList>,
}

#[derive(Debug, Deserialize)]
struct VhostList {
    #[serde(rename = "vhostInfo", default)]
    vhosts: Vec<VhostInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VhostDetailsData {
    vhost_details: VhostDetails,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VhostInfo {
    pub id: String,
    /// `host:port`
    pub name: String,
    #[serde(default)]
    pub servers: VhostServers,
}

impl VhostInfo {
    /// Servers whose copy of the vhost was edited on disk
    pub fn modified_servers(&self) -> Vec<&str> {
        self.servers
            .servers
            .iter()
            .filter(|s| s.status.is_modified())
            .map(|s| s.id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VhostServers {
    #[serde(rename = "vhostServer", default)]
    pub servers: Vec<VhostServer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VhostServer {
    pub id: String,
    pub status: VhostStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VhostDetails {
    pub vhost_info: VhostInfo,
    #[serde(default)]
    pub vhost_extended: Option<VhostExtended>,
}

impl VhostDetails {
    /// Configured template, trimmed; empty when none is stored
    pub fn template(&self) -> &str {
        self.vhost_extended
            .as_ref()
            .and_then(|ext| non_empty(&ext.template))
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VhostExtended {
    #[serde(default)]
    pub template: Option<String>,
}
