//! アイコン生成のワークフローを定義するモジュール。
//!
//! パス解決からディレクトリ一覧の表示までの各ステージを決められた順に実行する。
//! 致命的なエラーが起きたステージで処理を打ち切り、最適化ステージだけは
//! ファイル単位の失敗を記録して処理を続ける。

use crate::capability::fetcher::validate_svg;
use crate::capability::{CompressError, Compressor, Fetcher, QualityRange, Rasterizer};
use crate::domain::icon_manifest::{expected_identifiers, raster_file_name, ICON_MANIFEST};
use crate::domain::placeholder::write_placeholder;
use crate::domain::{AssetLayout, DirectoryPath, OutputListing, PathError, RasterImage};
use crate::error::AppError;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

/// 生成するPNGの一辺のピクセル数。
pub const RASTER_SIZE: u32 = 32;

/// ワークフローの設定。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// `assets/process-icons` を配置するプロジェクトのルート。
    pub project_root: PathBuf,
    /// ダウンロードした内容がSVGであることを確認するか。
    pub validate_downloads: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            project_root: AssetLayout::default_project_root(),
            validate_downloads: true,
        }
    }
}

/// ワークフローのステージ。`Stage::ORDER` の順に実行される。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ResolvePaths,
    InitDirectories,
    FetchIcons,
    WritePlaceholder,
    Rasterize,
    Optimize,
    Report,
}

impl Stage {
    pub const ORDER: [Stage; 7] = [
        Stage::ResolvePaths,
        Stage::InitDirectories,
        Stage::FetchIcons,
        Stage::WritePlaceholder,
        Stage::Rasterize,
        Stage::Optimize,
        Stage::Report,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Stage::ResolvePaths => "パスの解決",
            Stage::InitDirectories => "ディレクトリの作成",
            Stage::FetchIcons => "アイコンのダウンロード",
            Stage::WritePlaceholder => "汎用アイコンの生成",
            Stage::Rasterize => "PNGへの変換",
            Stage::Optimize => "PNGの最適化",
            Stage::Report => "結果の表示",
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|s| *s == self).unwrap_or(0) + 1
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}/{}] {}", self.position(), Self::ORDER.len(), self.label())
    }
}

/// ダウンロードステージの結果。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FetchSummary {
    pub fetched: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

/// 1ファイル分の最適化結果。
#[derive(Debug)]
pub struct OptimizeOutcome {
    pub path: PathBuf,
    pub result: Result<(), CompressError>,
}

/// 最適化ステージの結果。
#[derive(Debug)]
pub enum OptimizeSummary {
    /// 圧縮ツールが無いためステージ全体をスキップした。
    Skipped { tool: String },
    Ran(Vec<OptimizeOutcome>),
}

impl OptimizeSummary {
    pub fn outcomes(&self) -> &[OptimizeOutcome] {
        match self {
            OptimizeSummary::Skipped { .. } => &[],
            OptimizeSummary::Ran(outcomes) => outcomes,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &OptimizeOutcome> {
        self.outcomes().iter().filter(|o| o.result.is_err())
    }

    /// 最適化をスキップした場合に結果の一覧の後ろに添える注記。
    pub fn skip_note(&self) -> Option<String> {
        match self {
            OptimizeSummary::Skipped { tool } => {
                Some(format!("(注: {} が無いため、PNGは最適化されていません)", tool))
            }
            OptimizeSummary::Ran(_) => None,
        }
    }
}

/// ラスタライズステージの結果。
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RasterSummary {
    pub written: Vec<PathBuf>,
    /// 期待される識別子のうちPNGが生成されなかったもの。
    pub missing: Vec<&'static str>,
}

/// 1回の実行で何が起きたかのまとめ。
#[derive(Debug)]
pub struct RunReport {
    pub layout: AssetLayout,
    pub completed_stages: Vec<Stage>,
    pub fetch: FetchSummary,
    pub raster: RasterSummary,
    pub optimize: OptimizeSummary,
    pub listing: OutputListing,
}

/// 完了したステージを記録しながら順に実行する。
#[derive(Default)]
struct StageRunner {
    completed: Vec<Stage>,
}

impl StageRunner {
    fn run<T>(
        &mut self,
        stage: Stage,
        f: impl FnOnce() -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        info!("{}", stage);
        match f() {
            Ok(value) => {
                self.completed.push(stage);
                Ok(value)
            }
            Err(e) => {
                error!("{} で中断しました", stage.label());
                Err(e)
            }
        }
    }
}

/// アイコン生成のワークフロー本体。
pub struct Pipeline<'a> {
    config: PipelineConfig,
    fetcher: &'a dyn Fetcher,
    rasterizer: &'a dyn Rasterizer,
    compressor: &'a dyn Compressor,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        config: PipelineConfig,
        fetcher: &'a dyn Fetcher,
        rasterizer: &'a dyn Rasterizer,
        compressor: &'a dyn Compressor,
    ) -> Self {
        Self {
            config,
            fetcher,
            rasterizer,
            compressor,
        }
    }

    /// すべてのステージを実行します。
    ///
    /// # 戻り値
    /// * `Ok(RunReport)`: すべてのステージが完了した場合。
    /// * `Err(AppError)`: 致命的なエラーが発生した場合。それ以降のステージは実行されない。
    pub fn run(&self) -> Result<RunReport, AppError> {
        let mut stages = StageRunner::default();

        let layout = stages.run(Stage::ResolvePaths, || {
            Ok(AssetLayout::resolve(&self.config.project_root)?)
        })?;
        let (sources, generated) =
            stages.run(Stage::InitDirectories, || Ok(layout.ensure_dirs()?))?;
        let fetch = stages.run(Stage::FetchIcons, || self.fetch_icons(&layout, &sources))?;
        stages.run(Stage::WritePlaceholder, || {
            let path = write_placeholder(&sources)?;
            info!("  -> {} を書き出しました", path.display());
            Ok(())
        })?;
        let raster = stages.run(Stage::Rasterize, || self.rasterize_all(&sources, &generated))?;
        let optimize = stages.run(Stage::Optimize, || Ok(self.optimize_all(&generated)?))?;
        let listing = stages.run(Stage::Report, || {
            let listing = OutputListing::scan(&generated)?;
            println!("{}", generated);
            println!("{}", listing);
            if let Some(note) = optimize.skip_note() {
                println!("{}", note);
            }
            Ok(listing)
        })?;

        Ok(RunReport {
            layout,
            completed_stages: stages.completed,
            fetch,
            raster,
            optimize,
            listing,
        })
    }

    /// マニフェストのアイコンを取得します。既にファイルがあるものは取得しません。
    fn fetch_icons(
        &self,
        layout: &AssetLayout,
        sources: &DirectoryPath,
    ) -> Result<FetchSummary, AppError> {
        let mut summary = FetchSummary::default();
        for entry in ICON_MANIFEST {
            if layout.source_file(entry.identifier).exists() {
                info!("  -> {} は既に存在するためスキップします", entry.identifier);
                summary.skipped.push(entry.identifier);
                continue;
            }

            let url = entry.url();
            info!("  -> {} を取得中: {}", entry.identifier, url);
            let bytes = self.fetcher.fetch(&url)?;
            if self.config.validate_downloads {
                validate_svg(&url, &bytes)?;
            }
            sources.write_file_atomically(&entry.source_file_name(), &bytes)?;
            summary.fetched.push(entry.identifier);
        }
        Ok(summary)
    }

    /// ソースディレクトリのすべてのSVGをPNGに変換します。
    fn rasterize_all(
        &self,
        sources: &DirectoryPath,
        generated: &DirectoryPath,
    ) -> Result<RasterSummary, AppError> {
        // 1ファイルも処理しないうちに、ツールの有無を確認する
        if !self.rasterizer.is_available() {
            return Err(AppError::RasterizerUnavailable(
                self.rasterizer.name().to_string(),
            ));
        }

        let mut summary = RasterSummary::default();
        for svg in sources.files_with_extension("svg")? {
            let identifier = match svg.file_stem() {
                Some(stem) => stem.to_string_lossy().into_owned(),
                None => continue,
            };
            let output = generated.join(&raster_file_name(&identifier));

            let png = self.rasterizer.rasterize(&svg, RASTER_SIZE)?;
            RasterImage::from_bytes(&png)
                .and_then(|image| image.ensure_square(RASTER_SIZE))
                .map_err(|source| AppError::RasterValidation {
                    path: output.clone(),
                    source,
                })?;

            fs::write(&output, &png)?;
            debug!("  -> {} -> {}", svg.display(), output.display());
            summary.written.push(output);
        }
        info!(
            "  -> {} 個のPNGを生成しました ({})",
            summary.written.len(),
            self.rasterizer.name()
        );

        for identifier in expected_identifiers() {
            if !generated.join(&raster_file_name(identifier)).exists() {
                warn!("  -> {} のPNGがありません", raster_file_name(identifier));
                summary.missing.push(identifier);
            }
        }
        Ok(summary)
    }

    /// 出力ディレクトリのPNGを再圧縮します。失敗したファイルは記録だけして続行します。
    fn optimize_all(&self, generated: &DirectoryPath) -> Result<OptimizeSummary, PathError> {
        if !self.compressor.is_available() {
            let tool = self.compressor.name().to_string();
            warn!("  -> {} が見つからないため最適化をスキップします", tool);
            return Ok(OptimizeSummary::Skipped { tool });
        }

        let mut outcomes = Vec::new();
        for png in generated.files_with_extension("png")? {
            let result = self.compressor.compress(&png, QualityRange::DEFAULT);
            if let Err(e) = &result {
                debug!("  -> 最適化に失敗しました: {}", e);
            }
            outcomes.push(OptimizeOutcome { path: png, result });
        }
        info!(
            "  -> {} 個のPNGを最適化しました (品質 {})",
            outcomes.iter().filter(|o| o.result.is_ok()).count(),
            QualityRange::DEFAULT
        );
        Ok(OptimizeSummary::Ran(outcomes))
    }
}
