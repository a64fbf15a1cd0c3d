//! Textual statuses reported by the server
//!
//! Unknown values are kept verbatim in `Other` so new server versions do not
//! break decoding; pollers treat them as "still in progress".

use serde::Deserialize;

/// Deployment status of an application
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ApplicationStatus {
    Deployed,
    Staging,
    Activating,
    Deactivating,
    Unstaging,
    RollingBack,
    PartiallyDeployed,
    /// Any `*Error` state (`stageError`, `activateError`, ...)
    Failed(String),
    Other(String),
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ApplicationStatus::Deployed => "deployed",
            ApplicationStatus::Staging => "staging",
            ApplicationStatus::Activating => "activating",
            ApplicationStatus::Deactivating => "deactivating",
            ApplicationStatus::Unstaging => "unstaging",
            ApplicationStatus::RollingBack => "rollingBack",
            ApplicationStatus::PartiallyDeployed => "partially deployed",
            ApplicationStatus::Failed(s) | ApplicationStatus::Other(s) => s,
        }
    }

    pub fn is_deployed(&self) -> bool {
        matches!(self, ApplicationStatus::Deployed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, ApplicationStatus::Failed(_))
    }
}

impl From<String> for ApplicationStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            "deployed" => ApplicationStatus::Deployed,
            "staging" => ApplicationStatus::Staging,
            "activating" => ApplicationStatus::Activating,
            "deactivating" => ApplicationStatus::Deactivating,
            "unstaging" => ApplicationStatus::Unstaging,
            "rollingBack" => ApplicationStatus::RollingBack,
            "partially deployed" => ApplicationStatus::PartiallyDeployed,
            s if s.ends_with("Error") => ApplicationStatus::Failed(s.to_string()),
            s => ApplicationStatus::Other(s.to_string()),
        }
    }
}

impl From<&str> for ApplicationStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a server in the cluster
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum ServerStatus {
    Ok,
    Restarting,
    Redeploying,
    PendingRestart,
    ShuttingDown,
    StartingUp,
    NotResponding,
    Disabled,
    Other(String),
}

impl ServerStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ServerStatus::Ok => "OK",
            ServerStatus::Restarting => "restarting",
            ServerStatus::Redeploying => "redeploying",
            ServerStatus::PendingRestart => "pendingRestart",
            ServerStatus::ShuttingDown => "shuttingDown",
            ServerStatus::StartingUp => "startingUp",
            ServerStatus::NotResponding => "notResponding",
            ServerStatus::Disabled => "disabled",
            ServerStatus::Other(s) => s,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ServerStatus::Ok)
    }

    /// Still busy after joining a cluster or restarting
    pub fn is_in_progress(&self) -> bool {
        matches!(self, ServerStatus::Restarting | ServerStatus::Redeploying)
    }
}

impl From<String> for ServerStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            "OK" => ServerStatus::Ok,
            "restarting" => ServerStatus::Restarting,
            "redeploying" => ServerStatus::Redeploying,
            "pendingRestart" => ServerStatus::PendingRestart,
            "shuttingDown" => ServerStatus::ShuttingDown,
            "startingUp" => ServerStatus::StartingUp,
            "notResponding" => ServerStatus::NotResponding,
            "disabled" => ServerStatus::Disabled,
            s => ServerStatus::Other(s.to_string()),
        }
    }
}

impl From<&str> for ServerStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl std::fmt::Display for ServerStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status of a virtual host on one server
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum VhostStatus {
    Ok,
    /// Configuration file was edited on disk outside Zend Server
    Modified,
    PendingRestart,
    Error,
    Other(String),
}

impl VhostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            VhostStatus::Ok => "Ok",
            VhostStatus::Modified => "Modified",
            VhostStatus::PendingRestart => "PendingRestart",
            VhostStatus::Error => "Error",
            VhostStatus::Other(s) => s,
        }
    }

    pub fn is_modified(&self) -> bool {
        matches!(self, VhostStatus::Modified)
    }
}

impl From<String> for VhostStatus {
    fn from(value: String) -> Self {
        match value.trim() {
            "Ok" | "OK" => VhostStatus::Ok,
            "Modified" => VhostStatus::Modified,
            "PendingRestart" => VhostStatus::PendingRestart,
            "Error" => VhostStatus::Error,
            s => VhostStatus::Other(s.to_string()),
        }
    }
}

impl From<&str> for VhostStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl std::fmt::Display for VhostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
