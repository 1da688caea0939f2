//! SVGを正方形のPNGに変換する機能。

use resvg::{tiny_skia, usvg};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RasterizeError {
    #[error("'{}' を読み込めません", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{}' をSVGとして解析できません", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: usvg::Error,
    },

    #[error("{0}x{0} のピクセルマップを確保できません")]
    Pixmap(u32),

    #[error("PNGのエンコードに失敗しました: {0}")]
    Encode(String),

    #[error("`{program}` を起動できません")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{program}` が '{}' の変換に失敗しました: {stderr}", .path.display())]
    ToolFailed {
        program: String,
        path: PathBuf,
        stderr: String,
    },
}

pub trait Rasterizer {
    /// ログ表示用の名前。
    fn name(&self) -> &str;

    /// この実行環境で使用可能か。
    fn is_available(&self) -> bool;

    /// `input` のSVGを `size` x `size` のPNGとしてエンコードしたバイト列を返す。
    fn rasterize(&self, input: &Path, size: u32) -> Result<Vec<u8>, RasterizeError>;
}

/// コマンドラインで選択できる実装。
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RasterizerKind {
    /// `resvg` によるネイティブ実装 (外部コマンド不要)
    Resvg,
    /// librsvg の `rsvg-convert` コマンド
    RsvgConvert,
}

impl RasterizerKind {
    pub fn build(self) -> Box<dyn Rasterizer> {
        match self {
            RasterizerKind::Resvg => Box::new(ResvgRasterizer),
            RasterizerKind::RsvgConvert => Box::new(RsvgConvertRasterizer::default()),
        }
    }
}

/// `resvg` で描画する実装。縦横比を保ったまま中央に配置する。
#[derive(Debug, Default, Clone, Copy)]
pub struct ResvgRasterizer;

impl Rasterizer for ResvgRasterizer {
    fn name(&self) -> &str {
        "resvg"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn rasterize(&self, input: &Path, size: u32) -> Result<Vec<u8>, RasterizeError> {
        let data = fs::read(input).map_err(|source| RasterizeError::Read {
            path: input.to_path_buf(),
            source,
        })?;

        let mut opt = usvg::Options::default();
        opt.resources_dir = input.parent().map(Path::to_path_buf);
        let tree = usvg::Tree::from_data(&data, &opt).map_err(|source| RasterizeError::Parse {
            path: input.to_path_buf(),
            source,
        })?;

        let mut pixmap = tiny_skia::Pixmap::new(size, size).ok_or(RasterizeError::Pixmap(size))?;

        let target = size as f32;
        let svg_size = tree.size();
        let scale = (target / svg_size.width()).min(target / svg_size.height());
        let dx = (target - svg_size.width() * scale) / 2.0;
        let dy = (target - svg_size.height() * scale) / 2.0;
        let transform = tiny_skia::Transform::from_row(scale, 0.0, 0.0, scale, dx, dy);
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        pixmap
            .encode_png()
            .map_err(|e| RasterizeError::Encode(e.to_string()))
    }
}

const RSVG_CONVERT: &str = "rsvg-convert";

/// 外部コマンド `rsvg-convert` に変換を任せる実装。PNGは標準出力から受け取る。
#[derive(Debug, Clone)]
pub struct RsvgConvertRasterizer {
    program: String,
}

impl Default for RsvgConvertRasterizer {
    fn default() -> Self {
        Self::with_program(RSVG_CONVERT)
    }
}

impl RsvgConvertRasterizer {
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

fn rsvg_convert_args(input: &Path, size: u32) -> Vec<OsString> {
    let size = size.to_string();
    vec![
        "--width".into(),
        size.clone().into(),
        "--height".into(),
        size.into(),
        "--format".into(),
        "png".into(),
        input.as_os_str().to_os_string(),
    ]
}

impl Rasterizer for RsvgConvertRasterizer {
    fn name(&self) -> &str {
        &self.program
    }

    fn is_available(&self) -> bool {
        which::which(&self.program).is_ok()
    }

    fn rasterize(&self, input: &Path, size: u32) -> Result<Vec<u8>, RasterizeError> {
        let output = Command::new(&self.program)
            .args(rsvg_convert_args(input, size))
            .output()
            .map_err(|source| RasterizeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RasterizeError::ToolFailed {
                program: self.program.clone(),
                path: input.to_path_buf(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::placeholder::PLACEHOLDER_SVG;
    use crate::domain::raster_image::RasterImage;
    use tempfile::tempdir;

    #[test]
    fn resvg_renders_placeholder_at_requested_size() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("generic.svg");
        fs::write(&svg, PLACEHOLDER_SVG).unwrap();

        let png = ResvgRasterizer.rasterize(&svg, 32).unwrap();

        let image = RasterImage::from_bytes(&png).unwrap();
        assert_eq!(image.dimensions(), (32, 32));
    }

    /// 横長のSVGでも出力は正方形になる
    #[test]
    fn resvg_fits_wide_svg_into_square() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("wide.svg");
        fs::write(
            &svg,
            r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 200 100"><rect width="200" height="100" fill="#336699"/></svg>"##,
        )
        .unwrap();

        let png = ResvgRasterizer.rasterize(&svg, 32).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();

        assert_eq!(decoded.dimensions(), (32, 32));
        // 上端は余白 (透明)、中央は塗りつぶし
        assert_eq!(decoded.get_pixel(16, 0)[3], 0);
        assert_eq!(decoded.get_pixel(16, 16)[3], 255);
    }

    #[test]
    fn resvg_reports_parse_error_with_path() {
        let dir = tempdir().unwrap();
        let svg = dir.path().join("broken.svg");
        fs::write(&svg, "404: Not Found").unwrap();

        let err = ResvgRasterizer.rasterize(&svg, 32).unwrap_err();
        assert!(matches!(err, RasterizeError::Parse { .. }));
        assert!(err.to_string().contains("broken.svg"));
    }

    #[test]
    fn resvg_reports_missing_file() {
        let dir = tempdir().unwrap();
        let err = ResvgRasterizer
            .rasterize(&dir.path().join("missing.svg"), 32)
            .unwrap_err();
        assert!(matches!(err, RasterizeError::Read { .. }));
    }

    #[test]
    fn kinds_build_matching_implementations() {
        assert_eq!(RasterizerKind::Resvg.build().name(), "resvg");
        assert_eq!(RasterizerKind::RsvgConvert.build().name(), "rsvg-convert");
        assert!(RasterizerKind::Resvg.build().is_available());
    }

    #[test]
    fn rsvg_convert_args_request_square_png() {
        let args = rsvg_convert_args(Path::new("/src/go.svg"), 32);
        assert_eq!(
            args,
            vec![
                OsString::from("--width"),
                OsString::from("32"),
                OsString::from("--height"),
                OsString::from("32"),
                OsString::from("--format"),
                OsString::from("png"),
                OsString::from("/src/go.svg"),
            ]
        );
    }

    #[test]
    fn rsvg_convert_missing_program_is_spawn_error() {
        let rasterizer = RsvgConvertRasterizer::with_program("rsvg-convert-does-not-exist");
        assert!(!rasterizer.is_available());

        let err = rasterizer.rasterize(Path::new("go.svg"), 32).unwrap_err();
        assert!(matches!(err, RasterizeError::Spawn { .. }));
    }

    /// 失敗したコマンドの標準エラー出力がエラーに含まれること
    #[cfg(unix)]
    #[test]
    fn rsvg_convert_failure_keeps_stderr() {
        // `ls` は `--width` などを受け付けず、標準エラーに理由を出して失敗する
        let rasterizer = RsvgConvertRasterizer::with_program("ls");
        if !rasterizer.is_available() {
            return;
        }

        let err = rasterizer.rasterize(Path::new("go.svg"), 32).unwrap_err();
        match err {
            RasterizeError::ToolFailed { path, stderr, .. } => {
                assert_eq!(path, Path::new("go.svg"));
                assert!(!stderr.is_empty());
            }
            other => panic!("予期せぬエラーが返されました: {:?}", other),
        }
    }

    /// rsvg-convert がインストールされている環境でのみ実行する
    #[test]
    fn rsvg_convert_renders_placeholder_at_requested_size() {
        let rasterizer = RsvgConvertRasterizer::default();
        if !rasterizer.is_available() {
            eprintln!("rsvg-convert が見つからないためスキップします");
            return;
        }

        let dir = tempdir().unwrap();
        let svg = dir.path().join("generic.svg");
        fs::write(&svg, PLACEHOLDER_SVG).unwrap();

        let png = rasterizer.rasterize(&svg, 32).unwrap();
        let image = RasterImage::from_bytes(&png).unwrap();
        assert_eq!(image.dimensions(), (32, 32));
    }
}
