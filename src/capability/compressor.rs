//! 生成したPNGを非可逆に再圧縮する機能。

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

/// 許容する品質の範囲 (0-100)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityRange {
    pub min: u8,
    pub max: u8,
}

impl QualityRange {
    pub const DEFAULT: Self = Self { min: 65, max: 80 };
}

impl fmt::Display for QualityRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[derive(Debug, Error)]
pub enum CompressError {
    #[error("`{program}` を起動できません")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` が '{}' の圧縮に失敗しました (終了コード {code:?})", .path.display())]
    ToolFailed {
        program: String,
        path: PathBuf,
        code: Option<i32>,
    },
}

pub trait Compressor {
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    /// `path` のPNGをその場で (同じファイル名のまま) 再圧縮する。
    fn compress(&self, path: &Path, quality: QualityRange) -> Result<(), CompressError>;
}

const PNGQUANT: &str = "pngquant";

/// `pngquant --quality=<min>-<max> --force --ext .png` による実装。
#[derive(Debug, Clone)]
pub struct PngquantCompressor {
    program: String,
}

impl Default for PngquantCompressor {
    fn default() -> Self {
        Self::with_program(PNGQUANT)
    }
}

impl PngquantCompressor {
    /// PATH 上の `pngquant` 以外 (絶対パスなど) を使う場合に指定する。
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

/// `pngquant` に渡す引数。同じ拡張子で上書きするため `--force --ext .png` を付ける。
fn pngquant_args(path: &Path, quality: QualityRange) -> Vec<OsString> {
    vec![
        format!("--quality={}", quality).into(),
        "--force".into(),
        "--ext".into(),
        ".png".into(),
        path.as_os_str().to_os_string(),
    ]
}

impl Compressor for PngquantCompressor {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    fn compress(&self, path: &Path, quality: QualityRange) -> Result<(), CompressError> {
        // 品質を満たせない場合 (終了コード 99) も失敗として扱う
        let status = Command::new(&self.program)
            .args(pngquant_args(path, quality))
            .status()
            .map_err(|source| CompressError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(CompressError::ToolFailed {
                program: self.program.clone(),
                path: path.to_path_buf(),
                code: status.code(),
            })
        }
    }
}
