//! php.ini directive synchronization

use crate::action::{Action, ActionType, ApplyResult, Plan, ResourceKind};
use crate::error::{OpsError, Result};
use crate::reconciler::Reconciler;
use zendflow_api::ZendClient;
use zendflow_config::ZendflowConfig;

/// Stores configured directive values that differ from the live ones
pub struct DirectiveSync;

impl Reconciler for DirectiveSync {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Directive
    }

    fn plan(&self, client: &ZendClient, desired: &ZendflowConfig) -> Result<Plan> {
        if desired.directives.is_empty() {
            return Ok(Plan::empty());
        }

        let live = client.configuration_directives_list()?;
        let mut actions = Vec::new();

        for (name, value) in &desired.directives {
            let Some(current) = live.iter().find(|d| &d.name == name) else {
                tracing::warn!("Directive {} is unknown to the server", name);
                continue;
            };

            let current = current.effective_value();
            let value = value.trim();
            if current == value {
                actions.push(Action::new(
                    ActionType::NoOp,
                    ResourceKind::Directive,
                    name,
                    format!("{} is up to date", name),
                ));
            } else {
                actions.push(
                    Action::new(
                        ActionType::Update,
                        ResourceKind::Directive,
                        name,
                        format!("{}: {:?} -> {:?}", name, current, value),
                    )
                    .with_detail("current", current)
                    .with_detail("value", value),
                );
            }
        }

        Ok(Plan::new(actions))
    }

    /// All changed directives in a single store call
    fn apply(&self, client: &ZendClient, plan: &Plan) -> Result<ApplyResult> {
        let mut result = ApplyResult::new();
        let batch = plan.actions_by_type(ActionType::Update);
        if batch.is_empty() {
            return Ok(result);
        }

        let mut directives = Vec::with_capacity(batch.len());
        for action in &batch {
            let value = action
                .detail_str("value")
                .ok_or_else(|| OpsError::MissingDetail {
                    action: action.id.clone(),
                    key: "value",
                })?;
            directives.push((action.resource_id.clone(), value.to_string()));
        }

        let outcome = client.configuration_store_directives(&directives);
        for action in batch {
            match &outcome {
                Ok(()) => result.add_success(action.id.clone(), action.description.clone()),
                Err(e) => result.add_failure(action.id.clone(), e.to_string()),
            }
        }

        Ok(result)
    }
}
