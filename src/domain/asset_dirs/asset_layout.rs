use super::directory_path::DirectoryPath;
use super::path_error::PathError;
use crate::domain::icon_manifest::{raster_file_name, source_file_name};
use std::fs;
use std::path::{Path, PathBuf};

/// プロジェクトルートから見たアセットの配置場所。
const ASSET_DIR: [&str; 2] = ["assets", "process-icons"];
const SOURCES_DIR: &str = "sources";
const GENERATED_DIR: &str = "generated";

/// ソースSVGと生成PNGの出力先をまとめた構造体。
///
/// パスはすべて絶対パスに正規化されている。ディレクトリの存在は保証しない
/// (作成は `ensure_dirs` で行う)。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    sources_dir: PathBuf,
    generated_dir: PathBuf,
}

impl AssetLayout {
    /// このクレート自身のディレクトリ。`--project-root` 未指定時のルート。
    pub fn default_project_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    /// プロジェクトルートからソース/出力ディレクトリのパスを導出する。
    ///
    /// ルートが存在しない、またはディレクトリでない場合はエラー。
    pub fn resolve<P: AsRef<Path>>(project_root: P) -> Result<Self, PathError> {
        let root = DirectoryPath::new(project_root)?;
        let root = fs::canonicalize(root.as_path())?;

        let mut base = root;
        base.extend(ASSET_DIR);

        Ok(Self {
            sources_dir: base.join(SOURCES_DIR),
            generated_dir: base.join(GENERATED_DIR),
        })
    }

    /// 両ディレクトリを (必要なら親ごと) 作成し、検証済みの `DirectoryPath` を返す。
    pub fn ensure_dirs(&self) -> Result<(DirectoryPath, DirectoryPath), PathError> {
        let sources = DirectoryPath::ensure(&self.sources_dir)?;
        let generated = DirectoryPath::ensure(&self.generated_dir)?;
        Ok((sources, generated))
    }

    pub fn sources_dir(&self) -> &Path {
        &self.sources_dir
    }
    pub fn generated_dir(&self) -> &Path {
        &self.generated_dir
    }

    pub fn source_file(&self, identifier: &str) -> PathBuf {
        self.sources_dir.join(source_file_name(identifier))
    }

    pub fn raster_file(&self, identifier: &str) -> PathBuf {
        self.generated_dir.join(raster_file_name(identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn resolve_nests_directories_under_assets() {
        let dir = tempdir().unwrap();
        let layout = AssetLayout::resolve(dir.path()).unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();

        assert_eq!(
            layout.sources_dir(),
            root.join("assets/process-icons/sources")
        );
        assert_eq!(
            layout.generated_dir(),
            root.join("assets/process-icons/generated")
        );
        assert!(layout.sources_dir().is_absolute());
        // resolve はディレクトリを作らない
        assert!(!layout.sources_dir().exists());
    }

    #[test]
    fn resolve_rejects_missing_root() {
        let dir = tempdir().unwrap();
        let err = AssetLayout::resolve(dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, PathError::InvalidPath(_)));
    }

    #[test]
    fn default_root_contains_manifest() {
        assert!(AssetLayout::default_project_root()
            .join("Cargo.toml")
            .is_file());
    }

    #[test]
    fn ensure_dirs_is_idempotent() {
        let dir = tempdir().unwrap();
        let layout = AssetLayout::resolve(dir.path()).unwrap();

        let (sources, generated) = layout.ensure_dirs().unwrap();
        assert!(sources.as_path().is_dir());
        assert!(generated.as_path().is_dir());

        layout.ensure_dirs().expect("second call must not fail");
    }

    #[test]
    fn file_paths_follow_naming_convention() {
        let dir = tempdir().unwrap();
        let layout = AssetLayout::resolve(dir.path()).unwrap();
        assert_eq!(
            layout.source_file("go"),
            layout.sources_dir().join("go.svg")
        );
        assert_eq!(
            layout.raster_file("go"),
            layout.generated_dir().join("go@2x.png")
        );
    }
}
