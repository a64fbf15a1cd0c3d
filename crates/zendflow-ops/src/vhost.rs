//! Virtual host synchronization

use crate::action::{Action, ActionType, ApplyResult, Plan, ResourceKind};
use crate::error::{OpsError, Result};
use crate::reconciler::Reconciler;
use zendflow_api::ZendClient;
use zendflow_config::ZendflowConfig;

/// Redeploys vhosts edited on disk and pushes configured templates
pub struct VhostSync;

impl Reconciler for VhostSync {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Vhost
    }

    fn plan(&self, client: &ZendClient, desired: &ZendflowConfig) -> Result<Plan> {
        let mut actions = Vec::new();

        for vhost in client.vhost_get_status()? {
            let modified = vhost.modified_servers();
            if !modified.is_empty() {
                for server in &modified {
                    tracing::warn!(
                        "vhost {} was modified on disk on server {}, reverting",
                        vhost.name,
                        server
                    );
                }
                actions.push(
                    Action::new(
                        ActionType::Redeploy,
                        ResourceKind::Vhost,
                        &vhost.id,
                        format!("redeploy {} (modified on disk)", vhost.name),
                    )
                    .with_detail("name", vhost.name.as_str())
                    .with_detail("servers", modified.join(",")),
                );
            }

            let Some(template) = desired.vhosts.get(&vhost.name) else {
                continue;
            };
            let template = template.trim();
            let details = client.vhost_get_details(&vhost.id)?;

            if details.template() == template {
                actions.push(Action::new(
                    ActionType::NoOp,
                    ResourceKind::Vhost,
                    &vhost.id,
                    format!("{} is up to date", vhost.name),
                ));
            } else {
                actions.push(
                    Action::new(
                        ActionType::Update,
                        ResourceKind::Vhost,
                        &vhost.id,
                        format!("update template of {}", vhost.name),
                    )
                    .with_detail("name", vhost.name.as_str())
                    .with_detail("template", template),
                );
            }
        }

        Ok(Plan::new(actions))
    }

    fn apply(&self, client: &ZendClient, plan: &Plan) -> Result<ApplyResult> {
        let mut result = ApplyResult::new();

        for action in plan.changes() {
            let outcome = match action.action_type {
                ActionType::Redeploy => client.vhost_redeploy(&action.resource_id),
                ActionType::Update => {
                    let template =
                        action
                            .detail_str("template")
                            .ok_or_else(|| OpsError::MissingDetail {
                                action: action.id.clone(),
                                key: "template",
                            })?;
                    client.vhost_edit(&action.resource_id, template)
                }
                _ => continue,
            };

            match outcome {
                Ok(()) => result.add_success(action.id.clone(), action.description.clone()),
                Err(e) => result.add_failure(action.id.clone(), e.to_string()),
            }
        }

        Ok(result)
    }
}
