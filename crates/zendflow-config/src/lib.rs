//! zendflow の設定ファイル管理
//!
//! 設定ファイルの探索、YAML スキーマ、接続先 (Endpoint Target) の解決を扱う。

pub mod error;
pub mod model;
pub mod target;

pub use error::*;
pub use model::{ApplicationConfig, JobQueueConfig, PollConfig, ZendflowConfig};
pub use target::TargetConfig;

use std::path::{Path, PathBuf};

/// 設定ファイルパスを直接指定する環境変数
pub const CONFIG_PATH_ENV: &str = "ZENDFLOW_CONFIG_PATH";

const CANDIDATES: [&str; 4] = [
    "zendflow.local.yaml",
    ".zendflow.local.yaml",
    "zendflow.yaml",
    ".zendflow.yaml",
];

/// zendflow のグローバル設定ディレクトリを取得
pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or(ConfigError::ConfigDirNotFound)?
        .join("zendflow");

    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

/// 設定ファイルを探す
///
/// 以下の優先順位で検索:
/// 1. 環境変数 ZENDFLOW_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: zendflow.local.yaml, .zendflow.local.yaml, zendflow.yaml, .zendflow.yaml
/// 3. ./.zendflow/ ディレクトリ内: 同様の順序
/// 4. ~/.config/zendflow/zendflow.yaml (グローバル設定)
pub fn find_config_file() -> Result<PathBuf> {
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(config_path);
        if path.exists() {
            return Ok(path);
        }
        tracing::debug!("{} points to a missing file: {}", CONFIG_PATH_ENV, path.display());
    }

    let current_dir = std::env::current_dir()?;
    if let Some(path) = find_in_dir(&current_dir) {
        return Ok(path);
    }

    let project_dir = current_dir.join(".zendflow");
    if project_dir.is_dir() {
        if let Some(path) = find_in_dir(&project_dir) {
            return Ok(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        let global_config = config_dir.join("zendflow").join("zendflow.yaml");
        if global_config.exists() {
            return Ok(global_config);
        }
    }

    Err(ConfigError::ConfigFileNotFound)
}

fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    CANDIDATES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// 指定パスの設定ファイルを読み込む
pub fn load_config(path: &Path) -> Result<ZendflowConfig> {
    let content = std::fs::read_to_string(path)?;
    let config = serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// 設定ファイルを探索して読み込む
pub fn discover_config() -> Result<(PathBuf, ZendflowConfig)> {
    let path = find_config_file()?;
    let config = load_config(&path)?;
    Ok((path, config))
}

/// 設定を YAML として書き出す (export 結果の保存用)
pub fn save_config(path: &Path, config: &ZendflowConfig) -> Result<()> {
    let content = serde_yaml::to_string(config)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}
