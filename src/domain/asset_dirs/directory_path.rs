use super::path_error::PathError;
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

// 構造体としてDirectoryPathを定義
#[derive(Debug, Clone)]
pub struct DirectoryPath {
    pub path: PathBuf,
}

impl DirectoryPath {
    // コンストラクタ: パスを受け取り、バリデーションを行う
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();

        // パスが存在し、かつディレクトリであることを検証
        if !path.exists() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' は存在しません。",
                path.display()
            )));
        }
        if !path.is_dir() {
            return Err(PathError::InvalidPath(format!(
                "パス '{}' はディレクトリではありません。",
                path.display()
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// ディレクトリが無ければ親ディレクトリごと作成してから `new` と同じ検証を行う。
    ///
    /// 既に存在する場合は何もしない。同名のファイルが存在する場合などはエラーになる。
    pub fn ensure<P: AsRef<Path>>(path: P) -> Result<Self, PathError> {
        let path = path.as_ref();
        if !path.is_dir() {
            fs::create_dir_all(path).map_err(PathError::IoError)?;
        }
        Self::new(path)
    }

    // 内部のPathBufへの参照を返す
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    // ディレクトリ直下のファイルパスを組み立てる
    pub fn join(&self, file_name: &str) -> PathBuf {
        self.path.join(file_name)
    }

    // ディレクトリ内のすべてのエントリをイテレータとして取得
    pub fn entries(&self) -> Result<fs::ReadDir, PathError> {
        fs::read_dir(&self.path).map_err(PathError::IoError)
    }

    /// 指定した拡張子 (大文字小文字は区別しない) を持つファイルを列挙する。
    ///
    /// 並び順はディレクトリの読み取り順のまま。ソートはしない。
    pub fn files_with_extension(&self, extension: &str) -> Result<Vec<PathBuf>, PathError> {
        let mut files = Vec::new();
        for entry_result in self.entries()? {
            let path = entry_result.map_err(PathError::IoError)?.path();
            if has_extension(&path, extension) {
                files.push(path);
            }
        }
        Ok(files)
    }

    /// 一時ファイルに書き込んでから rename することで、ファイルを不可分に置き換える。
    ///
    /// 途中で中断されても、書きかけのファイルが `file_name` として残ることはない。
    pub fn write_file_atomically(&self, file_name: &str, data: &[u8]) -> Result<PathBuf, PathError> {
        let target = self.join(file_name);
        let mut tmp = NamedTempFile::new_in(&self.path)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&target).map_err(|e| PathError::IoError(e.error))?;
        Ok(target)
    }
}

/// パスが指定拡張子の通常ファイルであるかを判定します。
///
/// 大文字小文字は区別します (`LOGO.SVG` は `svg` に一致しない)。
fn has_extension(path: &Path, extension: &str) -> bool {
    // `file_stem` がないとドットファイル (`.svg` など) を誤判定するためチェック
    if path.is_file() && path.file_stem().is_some() {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| ext == extension)
            .unwrap_or(false)
    } else {
        false
    }
}

// Displayトレイトの実装（表示用）
impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

#[cfg(test)]
mod tests {
    // 外部クレートや親モジュールをuse
    use super::*;
    use std::io::ErrorKind;
    use tempfile::tempdir;

    /// 正常なディレクトリパスでDirectoryPathが作成できるかテスト
    #[test]
    fn test_valid_directory_path() {
        // 一時的なディレクトリを作成
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path();

        let result = DirectoryPath::new(path);

        // 結果がOKであることを確認
        assert!(result.is_ok());

        // 内部のパスが一致するか検証
        let dir_path_instance = result.unwrap();
        assert_eq!(dir_path_instance.as_path(), path);
    }

    /// 存在しないパスでエラーが返されるかテスト
    #[test]
    fn test_non_existent_path_returns_error() {
        let path = PathBuf::from("this_directory_should_not_exist");
        let result = DirectoryPath::new(&path);

        // エラーの種類がPathError::InvalidPathであることを検証
        let err = result.unwrap_err();
        if let PathError::InvalidPath(msg) = err {
            assert!(msg.contains("存在しません"));
        } else {
            panic!("予期せぬエラーが返されました: {:?}", err);
        }
    }

    /// ファイルパスでエラーが返されるかテスト
    #[test]
    fn test_file_path_returns_error() {
        let file_path = PathBuf::from("Cargo.toml"); // 常に存在するファイル
        let result = DirectoryPath::new(&file_path);

        let err = result.unwrap_err();
        if let PathError::InvalidPath(msg) = err {
            assert!(msg.contains("ディレクトリではありません"));
        } else {
            panic!("予期せぬエラーが返されました: {:?}", err);
        }
    }

    /// ensure()がネストしたディレクトリを作成し、2回目以降は何もしないことをテスト
    #[test]
    fn test_ensure_creates_nested_directories() {
        let dir = tempdir().expect("Failed to create temp directory");
        let nested = dir.path().join("a").join("b").join("c");

        let first = DirectoryPath::ensure(&nested).expect("ensure should create directories");
        assert!(nested.is_dir());
        assert_eq!(first.as_path(), nested);

        // 既に存在していてもエラーにならない
        fs::write(nested.join("keep.txt"), "keep").unwrap();
        DirectoryPath::ensure(&nested).expect("ensure should be a no-op");
        assert!(nested.join("keep.txt").exists());
    }

    /// 同名のファイルがある場合、ensure()はエラーを返す
    #[test]
    fn test_ensure_fails_when_file_is_in_the_way() {
        let dir = tempdir().expect("Failed to create temp directory");
        let blocked = dir.path().join("sources");
        fs::write(&blocked, "not a directory").unwrap();

        assert!(DirectoryPath::ensure(&blocked).is_err());
    }

    /// files_with_extension()が拡張子で絞り込むことをテスト
    #[test]
    fn test_files_with_extension() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path();

        fs::write(path.join("go.svg"), "<svg/>").unwrap();
        fs::write(path.join("RUST.SVG"), "<svg/>").unwrap();
        fs::write(path.join("notes.txt"), "hello").unwrap();
        fs::write(path.join(".svg"), "hidden").unwrap();
        fs::create_dir(path.join("nested.svg")).unwrap();

        let dir_path = DirectoryPath::new(path).unwrap();
        let mut names: Vec<String> = dir_path
            .files_with_extension("svg")
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort(); // 読み取り順序は保証されないためソートする

        assert_eq!(names, vec!["go.svg"]);
    }

    /// write_file_atomically()が既存ファイルを置き換え、一時ファイルを残さないことをテスト
    #[test]
    fn test_write_file_atomically_replaces_content() {
        let dir = tempdir().expect("Failed to create temp directory");
        let dir_path = DirectoryPath::new(dir.path()).unwrap();

        dir_path.write_file_atomically("go.svg", b"old").unwrap();
        let written = dir_path.write_file_atomically("go.svg", b"new").unwrap();

        assert_eq!(fs::read(&written).unwrap(), b"new");
        let entry_count = dir_path.entries().unwrap().count();
        assert_eq!(entry_count, 1);
    }

    /// entries()がI/Oエラーを正しく返すかテスト
    #[test]
    fn test_entries_returns_io_error() {
        // new()のバリデーションをスキップして、存在しないパスを持つインスタンスを強制的に作成
        let dir_path = DirectoryPath {
            path: PathBuf::from("this_path_definitely_does_not_exist"),
        };

        let err = dir_path.entries().unwrap_err();
        if let PathError::IoError(e) = err {
            assert_eq!(e.kind(), ErrorKind::NotFound);
        } else {
            panic!("予期せぬエラーが返されました: {:?}", err);
        }
    }
}
