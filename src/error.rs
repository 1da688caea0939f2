use crate::capability::{FetchError, RasterizeError};
use crate::domain::{PathError, RasterValidationError};
use std::error::Error as _;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/Oエラーが発生しました")]
    Io(#[from] std::io::Error),

    #[error("パス関連のエラー")]
    Path(#[from] PathError),

    #[error("アイコンの取得に失敗しました")]
    Fetch(#[from] FetchError),

    #[error("ラスタライズ用のツール `{0}` が見つかりません")]
    RasterizerUnavailable(String),

    #[error("ラスタライズに失敗しました")]
    Rasterize(#[from] RasterizeError),

    #[error("生成された '{}' の検証に失敗しました", .path.display())]
    RasterValidation {
        path: PathBuf,
        #[source]
        source: RasterValidationError,
    },
}

impl AppError {
    /// 原因を含めた1行のメッセージ (`外側: 内側: ...`)。
    pub fn report(&self) -> String {
        let mut message = self.to_string();
        let mut source = self.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        message
    }
}
