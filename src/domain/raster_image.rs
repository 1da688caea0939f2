// use宣言：必要なクレートやモジュールをスコープに取り込む

use image::{self, GenericImageView}; // 画像のデコードと寸法取得のために利用
use std::fmt; // エラーメッセージのフォーマットのために fmt モジュールを利用

// --- 構造体定義 ---

/// ラスタライズ結果として検証済みのPNG画像。
///
/// `from_bytes` を通じてのみインスタンス化でき、その際に
/// データが空でなく、画像としてデコードできることが保証されます。
#[derive(Debug, PartialEq)]
pub struct RasterImage {
    width: u32,
    height: u32,
}

// --- エラー定義 ---

/// `RasterImage` の検証時に発生する可能性のあるエラー。
#[derive(Debug, PartialEq)]
pub enum RasterValidationError {
    /// 提供されたデータが空の場合に返されるエラー。
    EmptyData,
    /// データが画像として認識できない場合に返されるエラー。
    NotAnImage(String),
    /// 画像の寸法が期待値と異なる場合に返されるエラー。
    UnexpectedDimensions {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}

// --- 実装ブロック ---

impl RasterImage {
    /// 画像のバイナリデータから幅と高さを取得するヘルパー関数。
    #[inline]
    fn get_dimensions(bytes: &[u8]) -> Result<(u32, u32), image::ImageError> {
        Ok(image::load_from_memory(bytes)?.dimensions())
    }

    /// バイト列をデコードして `RasterImage` を作成（コンストラクタ）。
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RasterValidationError> {
        if bytes.is_empty() {
            return Err(RasterValidationError::EmptyData);
        }
        let (width, height) = Self::get_dimensions(bytes)
            .map_err(|e| RasterValidationError::NotAnImage(e.to_string()))?;
        Ok(Self { width, height })
    }

    /// 画像が `size` x `size` であることを確認する。
    pub fn ensure_square(&self, size: u32) -> Result<(), RasterValidationError> {
        if self.dimensions() == (size, size) {
            Ok(())
        } else {
            Err(RasterValidationError::UnexpectedDimensions {
                expected: (size, size),
                actual: self.dimensions(),
            })
        }
    }

    /// (幅, 高さ) をまとめて取得。
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

// --- トレイト実装 ---

impl fmt::Display for RasterValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterValidationError::EmptyData => write!(f, "画像データが空です。"),
            RasterValidationError::NotAnImage(reason) => {
                write!(f, "有効な画像データではありません: {}", reason)
            }
            RasterValidationError::UnexpectedDimensions { expected, actual } => write!(
                f,
                "画像サイズが {}x{} ではなく {}x{} です。",
                expected.0, expected.1, actual.0, actual.1
            ),
        }
    }
}

impl std::error::Error for RasterValidationError {}

// --- テストモジュール ---
