use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CrawlRequest {
    pub keywords: Vec<String>,
    pub max_news_per_keyword: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrawlResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub item_count: Option<u64>,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub download_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    pub file_name: String,
    #[serde(default)]
    pub file_size_str: String,
    #[serde(default)]
    pub modified_time_str: String,
    #[serde(default)]
    pub has_evaluation: bool,
    #[serde(default)]
    pub is_evaluated: bool,
}

impl FileEntry {
    /// Either evaluation flag marks the file as already scored.
    pub fn evaluated(&self) -> bool {
        self.has_evaluation || self.is_evaluated
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileList {
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FilePreview {
    #[serde(default)]
    pub column_names: Vec<String>,
    #[serde(default)]
    pub preview_data: Vec<Map<String, Value>>,
    #[serde(default)]
    pub total_rows: Option<u64>,
}

impl FilePreview {
    /// Preview rows as text cells in `column_names` order.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.preview_data
            .iter()
            .map(|row| {
                self.column_names
                    .iter()
                    .map(|column| row.get(column).map(cell_text).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FileStatistics {
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub relevant_count: Option<u64>,
    #[serde(default)]
    pub relevant_percent: Option<f64>,
    #[serde(default)]
    pub category_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub keyword_counts: BTreeMap<String, u64>,
}

/// Preview and statistics of one file, fetched together.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileDetails {
    pub preview: FilePreview,
    pub statistics: FileStatistics,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct EvaluateRequest {
    pub file_path: String,
    pub api_key: String,
    pub model: String,
}

impl fmt::Debug for EvaluateRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluateRequest")
            .field("file_path", &self.file_path)
            .field("api_key", &desk_logging::redacted(&self.api_key))
            .field("model", &self.model)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EvaluateResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub stats: Option<EvaluationStats>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct EvaluationStats {
    #[serde(default)]
    pub relevant_count: u64,
    /// Some backend versions report the row count as `total_rows`.
    #[serde(default, alias = "total_rows")]
    pub total_count: u64,
    #[serde(default)]
    pub relevant_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    CrawlCompleted(Result<CrawlResponse, ApiError>),
    FilesListed(Result<Vec<FileEntry>, ApiError>),
    FileDetailsLoaded {
        file_name: String,
        result: Result<FileDetails, ApiError>,
    },
    EvaluationCompleted(Result<EvaluateResponse, ApiError>),
    DownloadCompleted {
        file_name: String,
        result: Result<PathBuf, ApiError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus { status: u16, detail: Option<String> },
    Timeout,
    Network,
    Decode,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Io,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus { status, .. } => write!(f, "http status {status}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Decode => write!(f, "unexpected response body"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Io => write!(f, "file system error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preview_rows_follow_column_order() {
        let preview: FilePreview = serde_json::from_str(
            r#"{
                "total_rows": 12,
                "total_columns": 3,
                "column_names": ["title", "is_relevant", "score"],
                "preview_data": [
                    {"score": 3, "title": "A", "is_relevant": true},
                    {"title": "B", "score": null}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            preview.rows(),
            vec![
                vec!["A".to_string(), "true".to_string(), "3".to_string()],
                vec!["B".to_string(), String::new(), String::new()],
            ]
        );
        assert_eq!(preview.total_rows, Some(12));
    }

    #[test]
    fn missing_optional_fields_default() {
        let entry: FileEntry =
            serde_json::from_str(r#"{"file_name": "a.csv", "file_size": 10}"#).unwrap();
        assert!(!entry.evaluated());
        assert_eq!(entry.file_size_str, "");

        let stats: FileStatistics = serde_json::from_str(r#"{"total_rows": 4}"#).unwrap();
        assert_eq!(stats.relevant_count, None);
        assert!(stats.category_counts.is_empty());
    }

    #[test]
    fn evaluation_stats_accept_total_rows() {
        let response: EvaluateResponse = serde_json::from_str(
            r#"{"success": true, "message": "ok",
                "stats": {"total_rows": 20, "relevant_count": 5, "relevant_percent": 25.0}}"#,
        )
        .unwrap();
        let stats = response.stats.unwrap();
        assert_eq!(stats.total_count, 20);
        assert_eq!(stats.relevant_count, 5);
    }

    #[test]
    fn evaluate_request_debug_hides_key() {
        let request = EvaluateRequest {
            file_path: "a.csv".to_string(),
            api_key: "sk-secret".to_string(),
            model: "gpt-4".to_string(),
        };
        let rendered = format!("{request:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted:9>"));
    }
}
