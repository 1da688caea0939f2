//! 出力ディレクトリの最終的な中身を一覧表示するためのモジュール。

use super::asset_dirs::directory_path::DirectoryPath;
use super::asset_dirs::path_error::PathError;
use std::fmt;
use ubyte::ToByteUnit;
use walkdir::WalkDir;

/// 一覧の1行分。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub file_name: String,
    pub size: u64,
}

/// ファイル名順に並べた出力ディレクトリ直下のファイル一覧。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputListing {
    entries: Vec<ListingEntry>,
}

impl OutputListing {
    pub fn scan(dir: &DirectoryPath) -> Result<Self, PathError> {
        let mut entries = Vec::new();
        for entry in WalkDir::new(dir.as_path())
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| PathError::IoError(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let size = entry
                .metadata()
                .map_err(|e| PathError::IoError(e.into()))?
                .len();
            entries.push(ListingEntry {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                size,
            });
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ListingEntry] {
        &self.entries
    }

    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }
}

impl fmt::Display for OutputListing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(
                f,
                "{:>10}  {}",
                entry.size.bytes().to_string(),
                entry.file_name
            )?;
        }
        write!(
            f,
            "合計 {} ファイル, {}",
            self.entries.len(),
            self.total_size().bytes()
        )
    }
}
