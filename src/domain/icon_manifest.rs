//! 取得するアイコンの一覧 (マニフェスト) を定義するモジュール。
//!
//! アイコンの追加はコードの分岐ではなく、`ICON_MANIFEST` への1行の追加で行う。

/// アイコンの取得元リポジトリ。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSource {
    /// devicon (言語・ミドルウェアのロゴ)
    Devicon,
    /// simple-icons (devicon に無いブランドのロゴ)
    SimpleIcons,
}

impl IconSource {
    /// 取得元ごとのベースURL。
    pub const fn base_url(self) -> &'static str {
        match self {
            IconSource::Devicon => "https://raw.githubusercontent.com/devicons/devicon/master/icons",
            IconSource::SimpleIcons => {
                "https://raw.githubusercontent.com/simple-icons/simple-icons/develop/icons"
            }
        }
    }
}

/// マニフェストの1エントリ。`identifier` がローカルのファイル名になる。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManifestEntry {
    pub identifier: &'static str,
    pub remote_path: &'static str,
    pub source: IconSource,
}

impl ManifestEntry {
    const fn devicon(identifier: &'static str, remote_path: &'static str) -> Self {
        Self {
            identifier,
            remote_path,
            source: IconSource::Devicon,
        }
    }

    const fn simple_icons(identifier: &'static str, remote_path: &'static str) -> Self {
        Self {
            identifier,
            remote_path,
            source: IconSource::SimpleIcons,
        }
    }

    /// 取得先のURL。
    pub fn url(&self) -> String {
        join_url(self.source.base_url(), self.remote_path)
    }

    /// ソースディレクトリ内でのファイル名 (`<identifier>.svg`)。
    pub fn source_file_name(&self) -> String {
        source_file_name(self.identifier)
    }
}

/// ダウンロード対象のアイコン。devicon から12件、simple-icons から1件。
pub const ICON_MANIFEST: &[ManifestEntry] = &[
    ManifestEntry::devicon("nodejs", "nodejs/nodejs-original.svg"),
    ManifestEntry::devicon("python", "python/python-original.svg"),
    ManifestEntry::devicon("ruby", "ruby/ruby-original.svg"),
    ManifestEntry::devicon("go", "go/go-original.svg"),
    ManifestEntry::devicon("rust", "rust/rust-original.svg"),
    ManifestEntry::devicon("java", "java/java-original.svg"),
    ManifestEntry::devicon("php", "php/php-original.svg"),
    ManifestEntry::devicon("postgresql", "postgresql/postgresql-original.svg"),
    ManifestEntry::devicon("mysql", "mysql/mysql-original.svg"),
    ManifestEntry::devicon("mongodb", "mongodb/mongodb-original.svg"),
    ManifestEntry::devicon("redis", "redis/redis-original.svg"),
    ManifestEntry::devicon("docker", "docker/docker-original.svg"),
    ManifestEntry::simple_icons("homebrew", "homebrew.svg"),
];

/// ローカルで生成するプレースホルダーアイコンの識別子。
pub const PLACEHOLDER_IDENTIFIER: &str = "generic";

/// 高解像度 (2倍) 向けであることを示すファイル名のサフィックス。
pub const DENSITY_SUFFIX: &str = "@2x";

/// 最終的に生成されているべきアイコンの識別子 (マニフェスト + プレースホルダー)。
pub fn expected_identifiers() -> impl Iterator<Item = &'static str> {
    ICON_MANIFEST
        .iter()
        .map(|entry| entry.identifier)
        .chain(std::iter::once(PLACEHOLDER_IDENTIFIER))
}

pub fn source_file_name(identifier: &str) -> String {
    format!("{}.svg", identifier)
}

pub fn raster_file_name(identifier: &str) -> String {
    format!("{}{}.png", identifier, DENSITY_SUFFIX)
}

/// ベースURLとパスを、区切りのスラッシュがちょうど1つになるように連結する。
pub fn join_url(base_url: &str, remote_path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        remote_path.trim_start_matches('/')
    )
}
