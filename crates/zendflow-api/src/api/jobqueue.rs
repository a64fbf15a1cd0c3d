//! Job Queue methods

use crate::client::{ZendClient, method_path};
use crate::error::Result;
use serde::Deserialize;

impl ZendClient {
    pub fn jobqueue_get_queues(&self) -> Result<Vec<Queue>> {
        let data: QueuesData = self.get(&method_path("jobqueueGetQueues"))?;
        Ok(data.queues.map(|q| q.items).unwrap_or_default())
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct QueuesData {
    queues: Option<Queues>,
}

#[derive(Debug, Deserialize)]
struct Queues {
    #[serde(rename = "queue", default)]
    items: Vec<Queue>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Queue {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: i64,
    #[serde(default)]
    pub max_http_jobs: i64,
    #[serde(default)]
    pub max_wait_time: i64,
    #[serde(default)]
    pub http_connection_timeout: i64,
    #[serde(default)]
    pub http_job_timeout: i64,
    #[serde(default)]
    pub http_job_retry_count: i64,
    #[serde(default)]
    pub http_job_retry_timeout: i64,
}
