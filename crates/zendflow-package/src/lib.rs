//! zendflow のアプリケーションパッケージ (.zpk) 処理
//!
//! .zpk は deployment.xml を含む zip アーカイブ。記述子の読み込み、
//! デフォルトパラメータの取得、設定ファイルとの検証を提供する。

pub mod descriptor;
pub mod error;
pub mod validate;

pub use descriptor::{
    DESCRIPTOR_FILE, PackageDescriptor, PackageMetadata, Parameter, read_descriptor_xml,
};
pub use error::{PackageError, Result};
pub use validate::{ValidationReport, validate, validate_package};
