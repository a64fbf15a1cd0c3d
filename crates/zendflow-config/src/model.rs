//! 設定ファイル (zendflow.yaml) のスキーマ

use crate::target::TargetConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// 設定ファイル全体
///
/// ```yaml
/// target:
///   host: 10.0.0.5:10081
///   key: admin
///   hash: 0123abcd...
/// poll:
///   interval_secs: 2
/// applications:
///   shop:
///     base_url: http://shop.example.com/
///     display_name: Shop
///     params:
///       db_host: 10.0.0.9
/// vhosts:
///   shop.example.com:80: |
///     <VirtualHost *:${port}>
///     </VirtualHost>
/// extensions:
///   curl: true
/// directives:
///   memory_limit: 256M
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZendflowConfig {
    /// 接続先。環境変数で個別に上書きできる
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<TargetConfig>,

    pub poll: PollConfig,

    /// パッケージ名 -> アプリケーション設定
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub applications: BTreeMap<String, ApplicationConfig>,

    /// vhost 名 -> テンプレート
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub vhosts: BTreeMap<String, String>,

    /// 拡張名 -> ロード有無
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, bool>,

    /// ディレクティブ名 -> 値
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub directives: BTreeMap<String, String>,

    /// キュー名 -> 設定 (export のみ)
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub job_queues: BTreeMap<String, JobQueueConfig>,
}

impl ZendflowConfig {
    /// 設定ファイルの target を環境変数で上書きした接続先
    pub fn resolve_target(&self) -> TargetConfig {
        TargetConfig::resolve(self.target.as_ref())
    }

    pub fn application(&self, package_name: &str) -> Option<&ApplicationConfig> {
        self.applications.get(package_name)
    }
}

const MIN_INTERVAL_SECS: u64 = 1;

/// 非同期オペレーションのポーリング設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollConfig {
    pub interval_secs: u64,

    /// 未指定なら終了状態まで待ち続ける
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: 2,
            timeout_secs: None,
        }
    }
}

impl PollConfig {
    /// 0 を指定しても最低 1 秒は空ける
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs.max(MIN_INTERVAL_SECS))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

/// アプリケーション 1 件分のデプロイ設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// パッケージのユーザーパラメータ
    pub params: BTreeMap<String, String>,
}

impl ApplicationConfig {
    /// 値が空でないパラメータを取得
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Job Queue の設定
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobQueueConfig {
    pub priority: i64,
    pub max_http_jobs: i64,
    pub max_wait_time: i64,
    pub http_connection_timeout: i64,
    pub http_job_timeout: i64,
    pub http_job_retry_count: i64,
    pub http_job_retry_timeout: i64,
}
