//! 外部ツールに相当する機能 (取得・ラスタライズ・圧縮) のインターフェースと実装。
//!
//! ワークフローはトレイト越しにのみ利用するため、テストではモックに差し替えられる。

pub mod compressor;
pub mod fetcher;
pub mod rasterizer;

pub use compressor::{CompressError, Compressor, PngquantCompressor, QualityRange};
pub use fetcher::{FetchError, Fetcher, HttpFetcher};
pub use rasterizer::{
    RasterizeError, Rasterizer, RasterizerKind, ResvgRasterizer, RsvgConvertRasterizer,
};
