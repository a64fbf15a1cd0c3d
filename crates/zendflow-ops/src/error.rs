//! Workflow error types

use thiserror::Error;
use zendflow_api::ZendError;
use zendflow_config::ConfigError;
use zendflow_package::PackageError;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error(transparent)]
    Api(#[from] ZendError),

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Action {action} is missing detail '{key}'")]
    MissingDetail { action: String, key: &'static str },
}

pub type Result<T> = std::result::Result<T, OpsError>;
