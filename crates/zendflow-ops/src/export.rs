//! Snapshot of a live server as a zendflow config

use crate::error::Result;
use std::path::Path;
use zendflow_api::ZendClient;
use zendflow_config::{ApplicationConfig, JobQueueConfig, ZendflowConfig};

/// Build a config describing what the server currently runs.
///
/// The target and poll sections are left at their defaults.
pub fn export_config(client: &ZendClient) -> Result<ZendflowConfig> {
    let mut config = ZendflowConfig::default();

    for app in client.application_get_status(None)? {
        let details = client.application_get_details(&app.id)?;
        let display_name = Some(app.user_app_name.clone()).filter(|n| !n.is_empty());
        config.applications.insert(
            app.app_name.clone(),
            ApplicationConfig {
                base_url: Some(app.base_url.clone()),
                display_name,
                params: details.user_params(),
            },
        );
    }

    for vhost in client.vhost_get_status()? {
        let details = client.vhost_get_details(&vhost.id)?;
        config
            .vhosts
            .insert(vhost.name.clone(), details.template().to_string());
    }

    for extension in client.configuration_extensions_list()? {
        config.extensions.insert(extension.name, extension.loaded);
    }

    for directive in client.configuration_directives_list()? {
        let value = directive.effective_value().to_string();
        config.directives.insert(directive.name, value);
    }

    for queue in client.jobqueue_get_queues()? {
        config.job_queues.insert(
            queue.name,
            JobQueueConfig {
                priority: queue.priority,
                max_http_jobs: queue.max_http_jobs,
                max_wait_time: queue.max_wait_time,
                http_connection_timeout: queue.http_connection_timeout,
                http_job_timeout: queue.http_job_timeout,
                http_job_retry_count: queue.http_job_retry_count,
                http_job_retry_timeout: queue.http_job_retry_timeout,
            },
        );
    }

    tracing::info!(
        "Exported {} applications, {} vhosts, {} extensions, {} directives, {} job queues",
        config.applications.len(),
        config.vhosts.len(),
        config.extensions.len(),
        config.directives.len(),
        config.job_queues.len()
    );
    Ok(config)
}

/// [`export_config`] written to `path` as YAML
pub fn export_to_file(client: &ZendClient, path: &Path) -> Result<ZendflowConfig> {
    let config = export_config(client)?;
    zendflow_config::save_config(path, &config)?;
    Ok(config)
}
