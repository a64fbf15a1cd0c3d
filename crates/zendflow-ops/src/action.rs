//! Action types for server configuration changes

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Represents a planned change on the Zend Server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    /// Unique identifier for the action (e.g., "vhost:shop.example.com:80:edit")
    pub id: String,

    /// Type of action to perform
    pub action_type: ActionType,

    /// Kind of server resource touched
    pub resource_kind: ResourceKind,

    /// Identifier the web API knows the resource by
    pub resource_id: String,

    /// Description of the action
    pub description: String,

    /// Additional details about the action
    pub details: BTreeMap<String, serde_json::Value>,
}

impl Action {
    pub fn new(
        action_type: ActionType,
        resource_kind: ResourceKind,
        resource_id: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let resource_id = resource_id.into();
        Self {
            id: format!("{}:{}:{}", resource_kind, resource_id, action_type),
            action_type,
            resource_kind,
            resource_id,
            description: description.into(),
            details: BTreeMap::new(),
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    /// String detail, if present
    pub fn detail_str(&self, key: &str) -> Option<&str> {
        self.details.get(key).and_then(|v| v.as_str())
    }
}

/// Type of action to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    /// Change the stored configuration
    Update,
    /// Rewrite on-disk files from the stored configuration
    Redeploy,
    /// Load an extension
    Enable,
    /// Unload an extension
    Disable,
    /// No changes needed
    NoOp,
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionType::Update => write!(f, "update"),
            ActionType::Redeploy => write!(f, "redeploy"),
            ActionType::Enable => write!(f, "enable"),
            ActionType::Disable => write!(f, "disable"),
            ActionType::NoOp => write!(f, "no-op"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Vhost,
    Extension,
    Directive,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Vhost => write!(f, "vhost"),
            ResourceKind::Extension => write!(f, "extension"),
            ResourceKind::Directive => write!(f, "directive"),
        }
    }
}

/// Result of applying actions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApplyResult {
    /// Successfully applied actions
    pub succeeded: Vec<ActionResult>,

    /// Failed actions
    pub failed: Vec<ActionResult>,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl ApplyResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Whether anything on the server changed
    pub fn has_changes(&self) -> bool {
        !self.succeeded.is_empty()
    }

    pub fn add_success(&mut self, action_id: String, message: String) {
        self.succeeded.push(ActionResult {
            action_id,
            success: true,
            message,
            error: None,
        });
    }

    pub fn add_failure(&mut self, action_id: String, error: String) {
        tracing::warn!("{} failed: {}", action_id, error);
        self.failed.push(ActionResult {
            action_id,
            success: false,
            message: String::new(),
            error: Some(error),
        });
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: ApplyResult) {
        self.succeeded.extend(other.succeeded);
        self.failed.extend(other.failed);
        self.duration_ms += other.duration_ms;
    }
}

/// Result of a single action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResult {
    pub action_id: String,
    pub success: bool,
    pub message: String,
    pub error: Option<String>,
}

/// Plan containing all actions to be applied
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    /// List of actions to perform
    pub actions: Vec<Action>,

    /// Whether the plan has any changes
    pub has_changes: bool,
}

impl Plan {
    pub fn new(actions: Vec<Action>) -> Self {
        let has_changes = actions.iter().any(|a| a.action_type != ActionType::NoOp);
        Self {
            actions,
            has_changes,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Get actions by type
    pub fn actions_by_type(&self, action_type: ActionType) -> Vec<&Action> {
        self.actions
            .iter()
            .filter(|a| a.action_type == action_type)
            .collect()
    }

    /// Actions that change something
    pub fn changes(&self) -> impl Iterator<Item = &Action> {
        self.actions
            .iter()
            .filter(|a| a.action_type != ActionType::NoOp)
    }

    /// Summary of the plan
    pub fn summary(&self) -> PlanSummary {
        PlanSummary {
            update: self.actions_by_type(ActionType::Update).len(),
            redeploy: self.actions_by_type(ActionType::Redeploy).len(),
            enable: self.actions_by_type(ActionType::Enable).len(),
            disable: self.actions_by_type(ActionType::Disable).len(),
            no_change: self.actions_by_type(ActionType::NoOp).len(),
        }
    }
}

/// Summary of planned actions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanSummary {
    pub update: usize,
    pub redeploy: usize,
    pub enable: usize,
    pub disable: usize,
    pub no_change: usize,
}

impl std::ops::AddAssign for PlanSummary {
    fn add_assign(&mut self, other: Self) {
        self.update += other.update;
        self.redeploy += other.redeploy;
        self.enable += other.enable;
        self.disable += other.disable;
        self.no_change += other.no_change;
    }
}

impl std::fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} to update, {} to redeploy, {} to enable, {} to disable, {} unchanged",
            self.update, self.redeploy, self.enable, self.disable, self.no_change
        )
    }
}
