//! リモートのSVGを取得する機能。

use resvg::usvg;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTPクライアントの初期化に失敗しました")]
    Client(#[source] reqwest::Error),

    #[error("'{url}' の取得に失敗しました")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{url}' がステータス {status} を返しました")]
    Status { url: String, status: u16 },

    #[error("'{url}' のレスポンスが空です")]
    EmptyBody { url: String },

    #[error("'{url}' の内容はSVGではありません: {reason}")]
    NotSvg { url: String, reason: String },
}

/// URLからバイト列を取得する。
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// `reqwest` のブロッキングクライアントによる実装。
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let rs = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        if !rs.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: rs.status().as_u16(),
            });
        }

        let body = rs.bytes().map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;
        Ok(body.to_vec())
    }
}

/// 取得した内容が空でなく、SVGとして解析できることを確認する。
///
/// エラーページ (`404: Not Found` など) をそのままアイコンとして保存しないためのチェック。
pub fn validate_svg(url: &str, bytes: &[u8]) -> Result<(), FetchError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Err(FetchError::EmptyBody {
            url: url.to_string(),
        });
    }
    if !String::from_utf8_lossy(bytes).contains("<svg") {
        return Err(FetchError::NotSvg {
            url: url.to_string(),
            reason: "<svg> 要素が見つかりません".to_string(),
        });
    }
    usvg::Tree::from_data(bytes, &usvg::Options::default()).map_err(|e| FetchError::NotSvg {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(())
}
