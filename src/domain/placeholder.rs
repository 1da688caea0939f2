//! どのアイコンにも当てはまらないプロセス用の汎用アイコン。
//!
//! ダウンロードではなく、埋め込みのSVGを毎回そのまま書き出す。

use super::asset_dirs::directory_path::DirectoryPath;
use super::icon_manifest::{source_file_name, PLACEHOLDER_IDENTIFIER};
use std::fs;
use std::io;
use std::path::PathBuf;

/// ターミナルのプロンプト (`>_`) を模したアイコン。角丸の枠線と2本のストローク。
pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="#6B7280" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
  <rect x="2" y="4" width="20" height="16" rx="3" ry="3"/>
  <polyline points="6 9 10 12 6 15"/>
  <line x1="12" y1="15" x2="18" y2="15"/>
</svg>
"##;

/// `generic.svg` をソースディレクトリに書き出す。既存のファイルは常に上書きする。
pub fn write_placeholder(sources: &DirectoryPath) -> Result<PathBuf, io::Error> {
    let path = sources.join(&source_file_name(PLACEHOLDER_IDENTIFIER));
    fs::write(&path, PLACEHOLDER_SVG)?;
    Ok(path)
}
