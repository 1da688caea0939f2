use clap::Parser;
use process_icons::capability::RasterizerKind;
use process_icons::domain::AssetLayout;
use process_icons::workflow::PipelineConfig;
use std::path::PathBuf;
use std::time::Duration;

/// メニュー用のプロセスアイコンをダウンロードし、32x32 のPNGを生成するツール
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// assets/process-icons を配置するプロジェクトのルート (オプション: デフォルトはこのクレートのディレクトリ)
    #[arg(long)]
    pub project_root: Option<PathBuf>,

    /// SVGをPNGに変換する実装
    #[arg(long, value_enum, default_value_t = RasterizerKind::Resvg)]
    pub rasterizer: RasterizerKind,

    /// ダウンロード1件あたりのタイムアウト (秒)
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// ダウンロードした内容がSVGかどうかを検証しない
    #[arg(long)]
    pub skip_validation: bool,
}

impl Args {
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            project_root: self
                .project_root
                .clone()
                .unwrap_or_else(AssetLayout::default_project_root),
            validate_downloads: !self.skip_validation,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
