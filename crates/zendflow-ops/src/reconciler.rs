//! Desired-state synchronization
//!
//! Each [`Reconciler`] compares one section of a [`ZendflowConfig`] with the
//! live server and turns the differences into a [`Plan`]. [`synchronize`]
//! applies the plans and restarts PHP once if anything changed, since every
//! one of these changes only takes effect after a restart.

use crate::action::{ApplyResult, Plan, PlanSummary, ResourceKind};
use crate::error::Result;
use std::time::Instant;
use zendflow_api::ZendClient;
use zendflow_config::ZendflowConfig;

/// Plans and applies one kind of server configuration
pub trait Reconciler {
    fn kind(&self) -> ResourceKind;

    /// Calculate the diff between desired and live state
    fn plan(&self, client: &ZendClient, desired: &ZendflowConfig) -> Result<Plan>;

    /// Apply the planned actions, recording per-action failures in the result
    fn apply(&self, client: &ZendClient, plan: &Plan) -> Result<ApplyResult>;
}

/// Outcome of a synchronization run
#[derive(Debug, Clone, Default)]
pub struct SyncReport {
    pub summary: PlanSummary,
    pub result: ApplyResult,
    pub php_restarted: bool,
}

/// Plan and apply every reconciler, then restart PHP if anything changed
pub fn synchronize(
    client: &ZendClient,
    desired: &ZendflowConfig,
    reconcilers: &[&dyn Reconciler],
) -> Result<SyncReport> {
    let started = Instant::now();
    let mut report = SyncReport::default();

    for reconciler in reconcilers {
        let plan = reconciler.plan(client, desired)?;
        let summary = plan.summary();
        tracing::info!("{}: {}", reconciler.kind(), summary);
        report.summary += summary;

        if plan.has_changes {
            report.result.merge(reconciler.apply(client, &plan)?);
        }
    }

    if report.result.has_changes() {
        client.restart_php()?;
        report.php_restarted = true;
    }

    report.result.duration_ms = started.elapsed().as_millis() as u64;
    Ok(report)
}

/// [`synchronize`] with the vhost, extension and directive reconcilers
pub fn synchronize_all(client: &ZendClient, desired: &ZendflowConfig) -> Result<SyncReport> {
    synchronize(
        client,
        desired,
        &[
            &crate::vhost::VhostSync,
            &crate::extension::ExtensionSync,
            &crate::directive::DirectiveSync,
        ],
    )
}
