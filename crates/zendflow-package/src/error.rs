use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Package not found: {0}")]
    NotFound(PathBuf),

    #[error("deployment.xml not found in package: {0}")]
    MissingDescriptor(PathBuf),

    #[error("Invalid package archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Invalid deployment descriptor: {0}")]
    Descriptor(#[from] quick_xml::DeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PackageError {
    /// ユーザー向けの分かりやすいエラーメッセージ
    pub fn user_message(&self) -> String {
        match self {
            PackageError::NotFound(path) => {
                format!(
                    "パッケージが見つかりません: {}\n\
                     \n\
                     .zpk ファイルのパスを確認してください",
                    path.display()
                )
            }
            PackageError::MissingDescriptor(path) => {
                format!(
                    "パッケージに deployment.xml がありません: {}\n\
                     \n\
                     zdpack でパッケージを作り直してください",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PackageError>;
