use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("設定ディレクトリが見つかりません")]
    ConfigDirNotFound,

    #[error(
        "設定ファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: zendflow.local.yaml, .zendflow.local.yaml, zendflow.yaml, .zendflow.yaml\n\
        - ./.zendflow/ ディレクトリ\n\
        - ~/.config/zendflow/zendflow.yaml\n\
        または ZENDFLOW_CONFIG_PATH 環境変数で直接指定できます"
    )]
    ConfigFileNotFound,

    #[error("設定ファイルの解析に失敗しました ({path}): {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("YAML エラー: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
