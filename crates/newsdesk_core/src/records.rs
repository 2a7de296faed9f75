use std::collections::BTreeMap;
use std::fmt;

/// A result file as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub file_name: String,
    pub size_label: String,
    pub modified_label: String,
    /// The file carries relevance columns or was produced by an evaluation.
    pub evaluated: bool,
}

/// First rows of a result file, with cells already aligned to `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileStats {
    pub total_rows: u64,
    pub relevant_count: Option<u64>,
    pub relevant_percent: Option<f64>,
    pub category_counts: BTreeMap<String, u64>,
    pub keyword_counts: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FileDetails {
    pub preview: PreviewTable,
    pub stats: FileStats,
}

/// Backend answer to a crawl request. `success == false` is a reported failure.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrawlSummary {
    pub success: bool,
    pub message: String,
    pub item_count: Option<u64>,
    pub file_path: Option<String>,
    pub download_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationStats {
    pub relevant_count: u64,
    pub total_count: u64,
    pub relevant_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvaluationSummary {
    pub success: bool,
    pub message: String,
    pub stats: Option<EvaluationStats>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// A credential that must not show up in debug output or logs.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "Secret(<unset>)")
        } else {
            write!(f, "Secret(<redacted>)")
        }
    }
}
