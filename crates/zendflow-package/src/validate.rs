//! パッケージのパラメータと設定ファイルの突き合わせ

use crate::descriptor::PackageDescriptor;
use crate::error::Result;
use std::path::Path;
use zendflow_config::ZendflowConfig;

/// 検証結果
///
/// 不正でもエラーにはせず、デプロイを続けるかは呼び出し側が決める。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub package_name: String,
    pub valid: bool,
    /// applications にパッケージのエントリがない
    pub unconfigured: bool,
    /// 必須なのに値が空のパラメータ
    pub missing: Vec<String>,
    /// 許可された値に含まれないパラメータ
    pub invalid: Vec<String>,
}

impl ValidationReport {
    /// 問題点の一覧 (ログ出力用)
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.unconfigured {
            problems.push(format!(
                "package '{}' has no entry under applications",
                self.package_name
            ));
        }
        for id in &self.missing {
            problems.push(format!("required parameter '{}' has no value", id));
        }
        for id in &self.invalid {
            problems.push(format!("parameter '{}' is not one of the allowed values", id));
        }
        problems
    }
}

/// 記述子を設定に照らして検証
pub fn validate(descriptor: &PackageDescriptor, config: &ZendflowConfig) -> ValidationReport {
    let package_name = descriptor.name.clone();

    let Some(app) = config.application(&package_name) else {
        return ValidationReport {
            package_name,
            valid: false,
            unconfigured: true,
            missing: Vec::new(),
            invalid: Vec::new(),
        };
    };

    let mut missing = Vec::new();
    let mut invalid = Vec::new();

    for parameter in descriptor.parameters() {
        // 任意パラメータは値を問わず受け入れる
        if !parameter.required {
            continue;
        }
        match app.param(&parameter.id) {
            None => missing.push(parameter.id.clone()),
            Some(value) => {
                if let Some(allowed) = parameter.allowed_values() {
                    if !allowed.iter().any(|v| v == value) {
                        invalid.push(parameter.id.clone());
                    }
                }
            }
        }
    }

    let valid = missing.is_empty() && invalid.is_empty();
    if !valid {
        tracing::warn!(
            "Package {} does not match its configuration (missing: {:?}, invalid: {:?})",
            package_name,
            missing,
            invalid
        );
    }

    ValidationReport {
        package_name,
        valid,
        unconfigured: false,
        missing,
        invalid,
    }
}

/// .zpk を読み込んで検証
pub fn validate_package(path: &Path, config: &ZendflowConfig) -> Result<ValidationReport> {
    let descriptor = PackageDescriptor::from_package(path)?;
    Ok(validate(&descriptor, config))
}
