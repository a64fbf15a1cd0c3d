//! Shared library methods

use crate::client::{ZendClient, api_path, method_path, params};
use crate::error::{Result, ZendError};
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;

pub const LIBRARY_PACKAGE_MIME: &str = "library/vnd.zend.librarypackage";

/// Sort order accepted by `libraryGetStatus`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl ZendClient {
    /// Upload a library package.
    ///
    /// The server stages the library after responding; follow up with
    /// [`ZendClient::library_version_get_status`].
    pub fn library_version_deploy(&self, package: &Path) -> Result<Vec<LibraryInfo>> {
        let file_name = package
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ZendError::InvalidRequest(format!(
                    "library package path has no file name: {}",
                    package.display()
                ))
            })?
            .to_string();
        tracing::info!("Deploying library {}", file_name);

        let part = Part::bytes(std::fs::read(package)?)
            .file_name(file_name)
            .mime_str(LIBRARY_PACKAGE_MIME)?;
        let form = Form::new().part("libPackage", part);
        let data: LibraryListData =
            self.post_multipart(&method_path("libraryVersionDeploy"), form)?;
        Ok(data.into_libraries())
    }

    /// Redeploy a library version from its original package on every member
    pub fn library_version_synchronize(&self, library_version_id: &str) -> Result<Vec<LibraryInfo>> {
        tracing::info!("Synchronizing library version {}", library_version_id);
        let data: LibraryListData = self.post_form(
            &method_path("libraryVersionSynchronize"),
            params(&[("libraryVersionId", library_version_id)]),
        )?;
        Ok(data.into_libraries())
    }

    pub fn library_version_get_status(&self, library_version_id: &str) -> Result<Vec<LibraryInfo>> {
        let data: LibraryListData = self.get(&api_path(
            "libraryVersionGetStatus",
            &[("libraryVersionId", library_version_id)],
        ))?;
        Ok(data.into_libraries())
    }

    /// Libraries deployed on the server, all of them when `library_ids` is empty
    pub fn library_get_status(
        &self,
        library_ids: &[String],
        direction: Option<SortDirection>,
    ) -> Result<Vec<LibraryInfo>> {
        let mut query: Vec<(&str, &str)> = library_ids
            .iter()
            .map(|id| ("libraries[]", id.as_str()))
            .collect();
        if let Some(direction) = direction {
            query.push(("direction", direction.as_str()));
        }
        let data: LibraryListData = self.get(&api_path("libraryGetStatus", &query))?;
        Ok(data.into_libraries())
    }
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LibraryListData {
    library_list: Option<LibraryList>,
}

impl LibraryListData {
    fn into_libraries(self) -> Vec<LibraryInfo> {
        self.library_list.map(|l| l.libraries).unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct LibraryList {
    #[serde(rename = "libraryInfo", default)]
    libraries: Vec<LibraryInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryInfo {
    pub library_id: String,
    #[serde(default)]
    pub library_name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub library_versions: LibraryVersions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LibraryVersions {
    #[serde(rename = "libraryVersion", default)]
    pub versions: Vec<LibraryVersion>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryVersion {
    pub library_version_id: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub default: bool,
}
