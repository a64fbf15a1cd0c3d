//! deployment.xml (パッケージ記述子) の読み込み

use crate::error::{PackageError, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// アーカイブ内の記述子ファイル名
pub const DESCRIPTOR_FILE: &str = "deployment.xml";

/// deployment.xml の内容
///
/// ```xml
/// <package version="2.0" xmlns="http://www.zend.com/server/deployment-descriptor/1.0">
///   <name>shop</name>
///   <version><release>1.2.0</release></version>
///   <parameters>
///     <parameter id="db_host" required="true" type="string">
///       <defaultvalue>localhost</defaultvalue>
///     </parameter>
///   </parameters>
/// </package>
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PackageDescriptor {
    pub name: String,

    #[serde(default)]
    pub version: PackageVersion,

    #[serde(default)]
    pub parameters: Option<Parameters>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageVersion {
    #[serde(default)]
    pub release: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Parameters {
    #[serde(rename = "parameter", default)]
    pub items: Vec<Parameter>,
}

/// ユーザーパラメータの定義
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    #[serde(rename = "@id")]
    pub id: String,

    #[serde(rename = "@required", default)]
    pub required: bool,

    #[serde(rename = "@type", default)]
    pub kind: Option<String>,

    #[serde(default)]
    pub defaultvalue: Option<String>,

    #[serde(default)]
    pub validation: Option<Validation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Validation {
    #[serde(default)]
    pub enums: Option<Enums>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Enums {
    #[serde(rename = "enum", default)]
    pub values: Vec<String>,
}

impl Parameter {
    /// 許可された値の一覧。制約がなければ None
    pub fn allowed_values(&self) -> Option<&[String]> {
        self.validation
            .as_ref()
            .and_then(|v| v.enums.as_ref())
            .map(|e| e.values.as_slice())
            .filter(|values| !values.is_empty())
    }

    pub fn default_value(&self) -> &str {
        self.defaultvalue.as_deref().unwrap_or_default()
    }
}

impl PackageDescriptor {
    /// XML 文字列から解析
    pub fn from_xml(xml: &str) -> Result<Self> {
        Ok(quick_xml::de::from_str(xml)?)
    }

    /// .zpk アーカイブから deployment.xml を読み込む
    pub fn from_package(path: &Path) -> Result<Self> {
        let xml = read_descriptor_xml(path)?;
        Self::from_xml(&xml)
    }

    pub fn parameters(&self) -> &[Parameter] {
        self.parameters
            .as_ref()
            .map(|p| p.items.as_slice())
            .unwrap_or_default()
    }

    /// パラメータ ID -> デフォルト値 (未定義なら空文字)
    pub fn default_configuration(&self) -> BTreeMap<String, String> {
        self.parameters()
            .iter()
            .map(|p| (p.id.clone(), p.default_value().to_string()))
            .collect()
    }
}

/// パッケージのメタデータ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    pub file_name: PathBuf,
    pub package_name: String,
    pub version: String,
}

impl PackageMetadata {
    pub fn from_package(path: &Path) -> Result<Self> {
        let descriptor = PackageDescriptor::from_package(path)?;
        Ok(Self {
            file_name: path.to_path_buf(),
            package_name: descriptor.name,
            version: descriptor.version.release,
        })
    }
}

/// アーカイブ直下の deployment.xml を文字列で取り出す
pub fn read_descriptor_xml(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(PackageError::NotFound(path.to_path_buf()));
    }

    tracing::debug!("Reading {} from {}", DESCRIPTOR_FILE, path.display());
    let mut archive = zip::ZipArchive::new(File::open(path)?)?;
    let mut entry = match archive.by_name(DESCRIPTOR_FILE) {
        Ok(entry) => entry,
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(PackageError::MissingDescriptor(path.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut xml = String::new();
    entry.read_to_string(&mut xml)?;
    Ok(xml)
}
