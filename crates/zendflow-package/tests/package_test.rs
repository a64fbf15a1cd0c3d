//! 設定ファイルと .zpk を組み合わせた検証テスト

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zendflow_package::{PackageDescriptor, PackageMetadata, validate_package};
use zip::write::SimpleFileOptions;

const BLOG_DESCRIPTOR: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package version="2.0" xmlns="http://www.zend.com/server/deployment-descriptor/1.0">
  <type>application</type>
  <name>blog</name>
  <summary>Company blog</summary>
  <version><release>2.4.1</release></version>
  <appdir>data</appdir>
  <parameters>
    <parameter id="locale" display="Locale" required="true" type="choice">
      <defaultvalue>en_US</defaultvalue>
      <validation>
        <enums>
          <enum>en_US</enum>
          <enum>ja_JP</enum>
        </enums>
      </validation>
    </parameter>
    <parameter id="admin_email" display="Admin e-mail" required="true" type="email"/>
    <parameter id="analytics_id" display="Analytics" required="false" type="string"/>
  </parameters>
</package>"#;

fn write_zpk(dir: &Path) -> PathBuf {
    let path = dir.join("blog-2.4.1.zpk");
    let mut zip = zip::ZipWriter::new(File::create(&path).unwrap());
    let options = SimpleFileOptions::default();
    zip.start_file("deployment.xml", options).unwrap();
    zip.write_all(BLOG_DESCRIPTOR.as_bytes()).unwrap();
    zip.start_file("data/index.php", options).unwrap();
    zip.write_all(b"<?php require 'blog.php';").unwrap();
    zip.finish().unwrap();
    path
}

fn write_config(dir: &Path, yaml: &str) -> zendflow_config::ZendflowConfig {
    let path = dir.join("zendflow.yaml");
    std::fs::write(&path, yaml).unwrap();
    zendflow_config::load_config(&path).unwrap()
}

#[test]
fn test_package_valid_against_yaml_config() {
    let dir = TempDir::new().unwrap();
    let package = write_zpk(dir.path());
    let config = write_config(
        dir.path(),
        r#"
applications:
  blog:
    base_url: http://blog.example.com/
    params:
      locale: ja_JP
      admin_email: ops@example.com
"#,
    );

    let report = validate_package(&package, &config).unwrap();
    assert!(report.valid);
    assert!(report.problems().is_empty());

    let metadata = PackageMetadata::from_package(&package).unwrap();
    assert_eq!(metadata.package_name, "blog");
    assert_eq!(metadata.version, "2.4.1");
}

#[test]
fn test_package_reports_every_problem() {
    let dir = TempDir::new().unwrap();
    let package = write_zpk(dir.path());
    let config = write_config(
        dir.path(),
        r#"
applications:
  blog:
    params:
      locale: fr_FR
      admin_email: ""
      analytics_id: UA-1
"#,
    );

    let report = validate_package(&package, &config).unwrap();
    assert!(!report.valid);
    assert!(!report.unconfigured);
    assert_eq!(report.missing, vec!["admin_email".to_string()]);
    assert_eq!(report.invalid, vec!["locale".to_string()]);
    assert_eq!(report.problems().len(), 2);
}

#[test]
fn test_unconfigured_package() {
    let dir = TempDir::new().unwrap();
    let package = write_zpk(dir.path());
    let config = write_config(dir.path(), "directives:\n  memory_limit: 256M\n");

    let report = validate_package(&package, &config).unwrap();
    assert!(!report.valid);
    assert!(report.unconfigured);
    assert_eq!(report.package_name, "blog");
}

#[test]
fn test_defaults_seed_a_config_entry() {
    let dir = TempDir::new().unwrap();
    let package = write_zpk(dir.path());

    let defaults = PackageDescriptor::from_package(&package)
        .unwrap()
        .default_configuration();
    assert_eq!(defaults.len(), 3);
    assert_eq!(defaults["locale"], "en_US");
    assert_eq!(defaults["admin_email"], "");
}
