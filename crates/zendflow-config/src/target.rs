//! 接続先 (Zend Server Web API) の設定

use serde::{Deserialize, Serialize};

pub const HOST_ENV: &str = "ZEND_HOST";
pub const KEY_ENV: &str = "ZEND_API_KEY";
pub const HASH_ENV: &str = "ZEND_API_HASH";
pub const USER_AGENT_ENV: &str = "ZEND_USER_AGENT";

/// 接続先の設定
///
/// 未指定の項目はクライアント側の既定値が使われる。
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetConfig {
    /// `host:port` (スキームなし)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// API キー名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// API キーのハッシュ (共有シークレット)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl std::fmt::Debug for TargetConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetConfig")
            .field("host", &self.host)
            .field("key", &self.key)
            .field("hash", &self.hash.as_ref().map(|_| "***"))
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl TargetConfig {
    /// 環境変数のみから作成
    pub fn from_env() -> Self {
        Self {
            host: env_value(HOST_ENV),
            key: env_value(KEY_ENV),
            hash: env_value(HASH_ENV),
            user_agent: env_value(USER_AGENT_ENV),
        }
    }

    /// 設定ファイルの値を環境変数で項目ごとに上書きする
    pub fn resolve(file: Option<&TargetConfig>) -> Self {
        let base = file.cloned().unwrap_or_default();
        base.overlay(Self::from_env())
    }

    /// `other` に値がある項目だけ置き換える
    pub fn overlay(self, other: TargetConfig) -> Self {
        Self {
            host: other.host.or(self.host),
            key: other.key.or(self.key),
            hash: other.hash.or(self.hash),
            user_agent: other.user_agent.or(self.user_agent),
        }
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
