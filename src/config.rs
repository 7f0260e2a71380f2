// =============================================================================
// 設定モジュール
// =============================================================================
// TOML設定ファイルとAPI URLファイルの読み込み・検証
//
// 設定は起動時に一度だけ読み込み、検証済みの不変な値として
// 各コンポーネントに渡す。
// =============================================================================

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// デフォルトの設定ファイル名
pub const DEFAULT_CONFIG_PATH: &str = "rumble_chat_poll.toml";

/// デフォルトの投票時間（秒）
const DEFAULT_DURATION_SECS: u64 = 300;

/// Rumbleのタイムスタンプ形式（例: "2023-09-16T17:43:33+00:00"）
const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("poll requires at least two options")]
    TooFewOptions,

    #[error("poll options must not be empty")]
    EmptyOption,

    #[error("duplicate poll option: {0}")]
    DuplicateOption(String),

    #[error("refresh_rate_secs must be greater than zero")]
    ZeroRefreshRate,
}

/// 設定ファイル（TOML）の形
#[derive(Debug, Deserialize)]
struct SettingsFile {
    /// Live Stream APIのURLが書かれたファイルへのパス
    ///
    /// URLには秘密鍵が含まれるため設定ファイル本体には書かない。
    /// 相対パスは設定ファイルのあるディレクトリから解決する。
    api_url_file: String,
    /// ポーリング間隔（秒）
    refresh_rate_secs: u64,
    /// チャットメッセージのタイムスタンプ形式（chronoのstrftime形式）
    #[serde(default = "default_timestamp_format")]
    timestamp_format: String,
    poll: PollTable,
    #[serde(default)]
    http: HttpTable,
}

#[derive(Debug, Deserialize)]
struct PollTable {
    /// 投票の選択肢（2つ以上、重複・空文字列は不可）
    options: Vec<String>,
    /// 番号（1始まり）での投票を受け付けるか
    #[serde(default = "default_numeric_votes")]
    numeric_votes: bool,
    /// 対象のライブ配信ID（未指定なら最初に見つかった配信）
    livestream_id: Option<String>,
    /// 投票時間（秒）
    #[serde(default = "default_duration_secs")]
    duration_secs: u64,
}

#[derive(Debug, Default, Deserialize)]
struct HttpTable {
    /// APIリクエストに付与する追加ヘッダー
    #[serde(default)]
    headers: HashMap<String, String>,
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

fn default_numeric_votes() -> bool {
    true
}

fn default_duration_secs() -> u64 {
    DEFAULT_DURATION_SECS
}

/// 投票1回分の設定（検証済み）
#[derive(Debug, Clone)]
pub struct PollConfig {
    pub options: Vec<String>,
    pub numeric_votes: bool,
    pub livestream_id: Option<String>,
    pub duration: Duration,
    pub refresh_interval: Duration,
    pub timestamp_format: String,
}

/// 読み込み・検証済みの設定一式
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub headers: HashMap<String, String>,
    pub poll: PollConfig,
}

impl Settings {
    /// 設定ファイルを読み込み、API URLファイルを解決して検証する
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file: SettingsFile = toml::from_str(&raw)?;

        validate_options(&file.poll.options)?;
        if file.refresh_rate_secs == 0 {
            return Err(ConfigError::ZeroRefreshRate);
        }

        let api_url_path = resolve_relative(path, &file.api_url_file);
        let api_url = std::fs::read_to_string(&api_url_path)
            .map_err(|source| ConfigError::Io {
                path: api_url_path.display().to_string(),
                source,
            })?
            .trim()
            .to_string();

        Ok(Settings {
            api_url,
            headers: file.http.headers,
            poll: PollConfig {
                options: file.poll.options,
                numeric_votes: file.poll.numeric_votes,
                livestream_id: file.poll.livestream_id,
                duration: Duration::from_secs(file.poll.duration_secs),
                refresh_interval: Duration::from_secs(file.refresh_rate_secs),
                timestamp_format: file.timestamp_format,
            },
        })
    }
}

/// 選択肢の制約を検証する（2つ以上・空文字列なし・重複なし）
fn validate_options(options: &[String]) -> Result<(), ConfigError> {
    if options.len() < 2 {
        return Err(ConfigError::TooFewOptions);
    }

    let mut seen = HashSet::new();
    for option in options {
        if option.is_empty() {
            return Err(ConfigError::EmptyOption);
        }
        if !seen.insert(option) {
            return Err(ConfigError::DuplicateOption(option.clone()));
        }
    }

    Ok(())
}

/// 設定ファイル内の相対パスを設定ファイルのディレクトリから解決する
fn resolve_relative(config_path: &Path, value: &str) -> std::path::PathBuf {
    let value_path = Path::new(value);
    if value_path.is_absolute() {
        return value_path.to_path_buf();
    }
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(value_path),
        _ => value_path.to_path_buf(),
    }
}
