//! Deploy a package, or update the application already serving its base URL

use crate::error::{OpsError, Result};
use std::path::Path;
use url::Url;
use zendflow_api::{ApplicationInfo, DeployRequest, ZendClient};
use zendflow_config::{ApplicationConfig, ZendflowConfig};
use zendflow_package::{ValidationReport, validate_package};

#[derive(Debug, Clone)]
pub enum DeployOutcome {
    /// A new application was created
    Deployed(ApplicationInfo),
    /// An existing application received the new version
    Updated(ApplicationInfo),
    /// The package does not match its configuration; nothing was sent
    Invalid(ValidationReport),
}

impl DeployOutcome {
    pub fn application(&self) -> Option<&ApplicationInfo> {
        match self {
            DeployOutcome::Deployed(app) | DeployOutcome::Updated(app) => Some(app),
            DeployOutcome::Invalid(_) => None,
        }
    }
}

/// Spell out the port so `http://a/` and `http://a:80/` compare equal.
///
/// Unparseable input is returned unchanged.
pub fn normalize_base_url(base_url: &str) -> String {
    let Ok(url) = Url::parse(base_url.trim()) else {
        return base_url.to_string();
    };
    let (Some(host), Some(port)) = (url.host_str(), url.port_or_known_default()) else {
        return base_url.to_string();
    };
    format!("{}://{}:{}{}", url.scheme(), host, port, url.path())
}

/// Validate `package`, then update the application whose base URL matches
/// the configured one, or deploy a new application
pub fn deploy_or_update(
    client: &ZendClient,
    package: &Path,
    config: &ZendflowConfig,
) -> Result<DeployOutcome> {
    let (report, app) = match validated(package, config)? {
        Validated::Ready(report, app) => (report, app),
        Validated::Invalid(report) => return Ok(DeployOutcome::Invalid(report)),
    };

    let base_url = app
        .base_url
        .as_deref()
        .map(normalize_base_url)
        .ok_or_else(|| {
            OpsError::InvalidConfig(format!(
                "applications.{}.base_url is required to deploy",
                report.package_name
            ))
        })?;

    let existing = client
        .application_get_status(None)?
        .into_iter()
        .find(|a| normalize_base_url(&a.base_url) == base_url);

    match existing {
        Some(existing) => {
            tracing::info!(
                "Updating {} ({}) at {}",
                existing.display_name(),
                existing.id,
                base_url
            );
            update(client, package, app, existing.id)
        }
        None => deploy(client, package, app, base_url),
    }
}

/// Like [`deploy_or_update`] with the target application chosen by the caller.
///
/// Without an id a new application is deployed.
pub fn deploy_or_update_by_id(
    client: &ZendClient,
    package: &Path,
    config: &ZendflowConfig,
    application_id: Option<&str>,
) -> Result<DeployOutcome> {
    let app = match validated(package, config)? {
        Validated::Ready(_, app) => app,
        Validated::Invalid(report) => return Ok(DeployOutcome::Invalid(report)),
    };

    match application_id {
        Some(id) => update(client, package, app, id.to_string()),
        None => {
            let base_url = app
                .base_url
                .as_deref()
                .map(normalize_base_url)
                .ok_or_else(|| {
                    OpsError::InvalidConfig("base_url is required to deploy".to_string())
                })?;
            deploy(client, package, app, base_url)
        }
    }
}

enum Validated<'a> {
    Ready(ValidationReport, &'a ApplicationConfig),
    Invalid(ValidationReport),
}

fn validated<'a>(package: &Path, config: &'a ZendflowConfig) -> Result<Validated<'a>> {
    let report = validate_package(package, config)?;
    if !report.valid {
        for problem in report.problems() {
            tracing::warn!("{}", problem);
        }
        return Ok(Validated::Invalid(report));
    }

    match config.application(&report.package_name) {
        Some(app) => {
            tracing::info!("Package {} validated", report.package_name);
            Ok(Validated::Ready(report, app))
        }
        None => Ok(Validated::Invalid(report)),
    }
}

fn request(package: &Path, app: &ApplicationConfig) -> DeployRequest {
    let mut request = DeployRequest::new(package);
    request.user_params = app.params.clone();
    request
}

fn deploy(
    client: &ZendClient,
    package: &Path,
    app: &ApplicationConfig,
    base_url: String,
) -> Result<DeployOutcome> {
    let mut request = request(package, app);
    tracing::info!("Deploying new application at {}", base_url);
    request.base_url = Some(base_url);
    request.user_app_name = app.display_name.clone();
    request.create_vhost = true;
    Ok(DeployOutcome::Deployed(client.application_deploy(request)?))
}

fn update(
    client: &ZendClient,
    package: &Path,
    app: &ApplicationConfig,
    application_id: String,
) -> Result<DeployOutcome> {
    let mut request = request(package, app);
    request.app_id = Some(application_id);
    Ok(DeployOutcome::Updated(client.application_update(request)?))
}
