//! zendflow workflows
//!
//! Multi-step operations built on [`zendflow_api::ZendClient`]:
//!
//! - **Synchronization**: vhosts, extensions and directives are planned against
//!   a [`ZendflowConfig`](zendflow_config::ZendflowConfig) and applied, with a
//!   single PHP restart afterwards
//! - **Deployment**: validate a `.zpk`, then update the application on the
//!   same base URL or deploy a new one
//! - **Cluster**: bootstrap a fresh server, create a cluster, add members
//! - **Export**: dump the live server configuration

pub mod action;
pub mod cluster;
pub mod deploy;
pub mod directive;
pub mod error;
pub mod export;
pub mod extension;
pub mod reconciler;
pub mod vhost;

// Re-exports
pub use action::{Action, ActionResult, ActionType, ApplyResult, Plan, PlanSummary, ResourceKind};
pub use cluster::{
    BootstrapOutcome, JoinOutcome, ServerHealth, add_server, bootstrap_server_at,
    bootstrap_single_server, create_cluster,
};
pub use deploy::{DeployOutcome, deploy_or_update, deploy_or_update_by_id, normalize_base_url};
pub use directive::DirectiveSync;
pub use error::{OpsError, Result};
pub use export::{export_config, export_to_file};
pub use extension::ExtensionSync;
pub use reconciler::{Reconciler, SyncReport, synchronize, synchronize_all};
pub use vhost::VhostSync;
