//! PHP extension synchronization

use crate::action::{Action, ActionType, ApplyResult, Plan, ResourceKind};
use crate::error::Result;
use crate::reconciler::Reconciler;
use zendflow_api::ZendClient;
use zendflow_config::ZendflowConfig;

/// Loads and unloads extensions to match the configured flags
pub struct ExtensionSync;

impl Reconciler for ExtensionSync {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Extension
    }

    fn plan(&self, client: &ZendClient, desired: &ZendflowConfig) -> Result<Plan> {
        if desired.extensions.is_empty() {
            return Ok(Plan::empty());
        }

        let live = client.configuration_extensions_list()?;
        let mut actions = Vec::new();

        for (name, &loaded) in &desired.extensions {
            let Some(current) = live.iter().find(|e| &e.name == name) else {
                tracing::warn!("Extension {} is not installed on the server", name);
                continue;
            };

            let action = match (current.loaded, loaded) {
                (false, true) => Action::new(
                    ActionType::Enable,
                    ResourceKind::Extension,
                    name,
                    format!("load {}", name),
                ),
                (true, false) => Action::new(
                    ActionType::Disable,
                    ResourceKind::Extension,
                    name,
                    format!("unload {}", name),
                ),
                _ => Action::new(
                    ActionType::NoOp,
                    ResourceKind::Extension,
                    name,
                    format!("{} is up to date", name),
                ),
            };
            actions.push(action.with_detail("loaded", current.loaded));
        }

        Ok(Plan::new(actions))
    }

    /// One batch call per direction
    fn apply(&self, client: &ZendClient, plan: &Plan) -> Result<ApplyResult> {
        let mut result = ApplyResult::new();

        for (action_type, enable) in [(ActionType::Enable, true), (ActionType::Disable, false)] {
            let batch = plan.actions_by_type(action_type);
            if batch.is_empty() {
                continue;
            }

            let names: Vec<String> = batch.iter().map(|a| a.resource_id.clone()).collect();
            let outcome = if enable {
                client.configuration_extensions_on(&names)
            } else {
                client.configuration_extensions_off(&names)
            };

            for action in batch {
                match &outcome {
                    Ok(_) => result.add_success(action.id.clone(), action.description.clone()),
                    Err(e) => result.add_failure(action.id.clone(), e.to_string()),
                }
            }
        }

        Ok(result)
    }
}
