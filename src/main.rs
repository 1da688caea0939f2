mod cli;

use clap::Parser;
use cli::Args;
use process_icons::capability::{HttpFetcher, PngquantCompressor};
use process_icons::error::AppError;
use process_icons::workflow::{Pipeline, RunReport};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // コマンドライン引数を解析します
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .without_time()
        .init();

    match run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("エラー: {}", e.report());
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<RunReport, AppError> {
    let fetcher = HttpFetcher::new(args.timeout())?;
    let rasterizer = args.rasterizer.build();
    let compressor = PngquantCompressor::default();

    Pipeline::new(
        args.pipeline_config(),
        &fetcher,
        rasterizer.as_ref(),
        &compressor,
    )
    .run()
}
