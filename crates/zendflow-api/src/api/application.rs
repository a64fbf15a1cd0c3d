//! Application deployment methods

use crate::client::{ZendClient, api_path, method_path};
use crate::error::{Result, ZendError};
use crate::response::{self, non_empty};
use crate::status::ApplicationStatus;
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const APPLICATION_PACKAGE_MIME: &str = "application/vnd.zend.applicationpackage";

/// Parameters for `applicationDeploy` / `applicationUpdate`
#[derive(Debug, Clone, Default)]
pub struct DeployRequest {
    /// `.zpk` file to upload
    pub package: PathBuf,
    pub base_url: Option<String>,
    pub user_app_name: Option<String>,
    pub create_vhost: bool,
    pub user_params: BTreeMap<String, String>,
    /// Set for `applicationUpdate`
    pub app_id: Option<String>,
}

impl DeployRequest {
    pub fn new(package: impl Into<PathBuf>) -> Self {
        Self {
            package: package.into(),
            ..Default::default()
        }
    }

    fn into_form(self) -> Result<Form> {
        let mut form = Form::new();
        for (name, value) in self.user_params {
            form = form.text(format!("userParams[{}]", name), value);
        }

        let package = Part::file(&self.package)?.mime_str(APPLICATION_PACKAGE_MIME)?;
        form = form.part("appPackage", package);

        if let Some(app_id) = self.app_id {
            form = form.text("appId", app_id);
        }
        if let Some(base_url) = self.base_url {
            form = form.text("baseUrl", base_url);
        }
        if let Some(name) = self.user_app_name {
            form = form.text("userAppName", name);
        }
        if self.create_vhost {
            form = form.text("createVhost", "true");
        }
        Ok(form)
    }
}

impl ZendClient {
    /// Deploy a new application and wait until it reports `deployed`
    pub fn application_deploy(&self, request: DeployRequest) -> Result<ApplicationInfo> {
        tracing::info!("Deploying package {}", request.package.display());
        let data: ApplicationInfoData = self.post_multipart(
            &method_path("applicationDeploy"),
            request.into_form()?,
        )?;
        self.wait_for_deployment(data.application_info)
    }

    /// Upload a new version of an existing application and wait until it
    /// reports `deployed`
    pub fn application_update(&self, request: DeployRequest) -> Result<ApplicationInfo> {
        if request.app_id.is_none() {
            return Err(ZendError::InvalidRequest(
                "applicationUpdate requires an application id".to_string(),
            ));
        }
        tracing::info!("Updating application with {}", request.package.display());
        let data: ApplicationInfoData = self.post_multipart(
            &method_path("applicationUpdate"),
            request.into_form()?,
        )?;
        self.wait_for_deployment(data.application_info)
    }

    /// Status of all applications, or of one when `application_id` is given
    pub fn application_get_status(
        &self,
        application_id: Option<&str>,
    ) -> Result<Vec<ApplicationInfo>> {
        let query: Vec<(&str, &str)> = application_id
            .map(|id| vec![("applications[]", id)])
            .unwrap_or_default();
        let data: ApplicationListData = self.get(&api_path("applicationGetStatus", &query))?;
        Ok(data
            .applications_list
            .map(|list| list.applications)
            .unwrap_or_default())
    }

    /// Current status of a single application
    pub fn application_status(&self, application_id: &str) -> Result<ApplicationInfo> {
        self.application_get_status(Some(application_id))?
            .into_iter()
            .find(|app| app.id == application_id)
            .ok_or(ZendError::MissingNode("applicationInfo"))
    }

    pub fn application_get_details(&self, application_id: &str) -> Result<ApplicationDetails> {
        let raw = self.get_raw(&api_path(
            "applicationGetDetails",
            &[("application", application_id)],
        ))?;
        let data: ApplicationDetailsData =
            response::decode(&response::escape_bare_ampersands(&raw))?;
        Ok(data.application_details)
    }

    /// Poll `applicationGetStatus` until the application is `deployed`.
    ///
    /// Error states are logged but do not end the wait.
    pub fn wait_for_deployment(&self, initial: ApplicationInfo) -> Result<ApplicationInfo> {
        tracing::info!("Deployment status: {}", initial.status);
        if initial.status.is_deployed() {
            return Ok(initial);
        }

        let operation = format!("deployment of {}", initial.display_name());
        let id = initial.id;
        self.poller().until(
            &operation,
            || {
                let info = self.application_status(&id)?;
                if info.status.is_failed() {
                    tracing::warn!("Deployment status: {}", info.status);
                } else {
                    tracing::info!("Deployment status: {}", info.status);
                }
                Ok(info)
            },
            |info| info.status.is_deployed(),
        )
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationInfoData {
    application_info: ApplicationInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationListData {
    applications_list: Option<ApplicationList>,
}

#[derive(Debug, Deserialize)]
struct ApplicationList {
    #[serde(rename = "applicationInfo", default)]
    applications: Vec<ApplicationInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationDetailsData {
    application_details: ApplicationDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    pub id: String,
    #[serde(default)]
    pub app_name: String,
    #[serde(default)]
    pub user_app_name: String,
    #[serde(default)]
    pub base_url: String,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub servers: ApplicationServers,
}

impl ApplicationInfo {
    /// User-facing name, falling back to the package name
    pub fn display_name(&self) -> &str {
        if self.user_app_name.is_empty() {
            &self.app_name
        } else {
            &self.user_app_name
        }
    }

    /// (server id, deployed version) per cluster member
    pub fn deployed_versions(&self) -> Vec<(&str, &str)> {
        self.servers
            .servers
            .iter()
            .map(|s| (s.id.as_str(), s.deployed_version.as_str()))
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApplicationServers {
    #[serde(rename = "applicationServer", default)]
    pub servers: Vec<ApplicationServer>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationServer {
    pub id: String,
    #[serde(default)]
    pub deployed_version: String,
    #[serde(default)]
    pub status: Option<ApplicationStatus>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationDetails {
    pub application_info: ApplicationInfo,
    #[serde(default)]
    pub application_package: Option<ApplicationPackage>,
}

impl ApplicationDetails {
    /// Configured user parameters; absent values become empty strings
    pub fn user_params(&self) -> BTreeMap<String, String> {
        self.application_package
            .as_ref()
            .and_then(|p| p.user_params.as_ref())
            .map(|params| {
                params
                    .parameters
                    .iter()
                    .map(|p| {
                        (
                            p.name.clone(),
                            non_empty(&p.value).unwrap_or_default().to_string(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationPackage {
    #[serde(default)]
    pub user_params: Option<UserParams>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserParams {
    #[serde(rename = "parameter", default)]
    pub parameters: Vec<UserParam>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserParam {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
}
