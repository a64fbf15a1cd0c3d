//! PHP extension and directive configuration methods

use crate::client::{ZendClient, method_path};
use crate::error::Result;
use crate::response::{Acknowledged, non_empty};
use serde::Deserialize;

impl ZendClient {
    pub fn configuration_extensions_list(&self) -> Result<Vec<Extension>> {
        let data: ExtensionsData = self.get(&method_path("configurationExtensionsList"))?;
        Ok(data.extensions.map(|e| e.items).unwrap_or_default())
    }

    /// Load the given extensions (takes effect after a PHP restart)
    pub fn configuration_extensions_on(&self, names: &[String]) -> Result<Vec<Extension>> {
        tracing::info!("Enabling extensions: {}", names.join(", "));
        let data: ExtensionsData = self.post_form(
            &method_path("configurationExtensionsOn"),
            indexed_params("extensions", names),
        )?;
        Ok(data.extensions.map(|e| e.items).unwrap_or_default())
    }

    /// Unload the given extensions (takes effect after a PHP restart)
    pub fn configuration_extensions_off(&self, names: &[String]) -> Result<Vec<Extension>> {
        tracing::info!("Disabling extensions: {}", names.join(", "));
        let data: ExtensionsData = self.post_form(
            &method_path("configurationExtensionsOff"),
            indexed_params("extensions", names),
        )?;
        Ok(data.extensions.map(|e| e.items).unwrap_or_default())
    }

    pub fn configuration_directives_list(&self) -> Result<Vec<Directive>> {
        let data: DirectivesData = self.get(&method_path("configurationDirectivesList"))?;
        Ok(data.directives.map(|d| d.items).unwrap_or_default())
    }

    /// Store directive values in the php.ini files
    pub fn configuration_store_directives(&self, directives: &[(String, String)]) -> Result<()> {
        let params = directives
            .iter()
            .map(|(name, value)| (format!("directives[{}]", name), value.clone()))
            .collect();
        let _: Acknowledged = self.post_form(&method_path("configurationStoreDirectives"), params)?;
        Ok(())
    }
}

/// `name[0]=a&name[1]=b`
fn indexed_params(name: &str, values: &[String]) -> Vec<(String, String)> {
    values
        .iter()
        .enumerate()
        .map(|(i, value)| (format!("{}[{}]", name, i), value.clone()))
        .collect()
}

// ============ API Types ============

#[derive(Debug, Deserialize)]
struct ExtensionsData {
    extensions: Option<Extensions>,
}

#[derive(Debug, Deserialize)]
struct Extensions {
    #[serde(rename = "extension", default)]
    items: Vec<Extension>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Extension {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub loaded: bool,
    #[serde(default)]
    pub installed: bool,
}

#[derive(Debug, Deserialize)]
struct DirectivesData {
    directives: Option<Directives>,
}

#[derive(Debug, Deserialize)]
struct Directives {
    #[serde(rename = "directive", default)]
    items: Vec<Directive>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Directive {
    pub name: String,
    #[serde(default)]
    pub file_value: Option<String>,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub extension: Option<String>,
}

impl Directive {
    /// Value from php.ini, else the built-in default, else empty
    pub fn effective_value(&self) -> &str {
        non_empty(&self.file_value)
            .or_else(|| non_empty(&self.default_value))
            .unwrap_or_default()
    }
}
