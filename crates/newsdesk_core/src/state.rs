use crate::{
    normalize_keywords, model_option, snap_max_news, FileDetails, FileRecord, Page, Secret,
    DEFAULT_MAX_NEWS, DEFAULT_MODEL,
};

pub type NoticeId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// The single inline notification shown above the page content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub severity: Severity,
    pub title: Option<String>,
    pub message: String,
}

/// Small user preferences kept on the local machine between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    pub last_keywords: Vec<String>,
    pub last_max_news: u32,
    pub saved_keywords: Vec<String>,
    pub api_key: Secret,
    pub model: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_keywords: Vec::new(),
            last_max_news: DEFAULT_MAX_NEWS,
            saved_keywords: Vec::new(),
            api_key: Secret::default(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTab {
    #[default]
    Categories,
    Relevance,
    Keywords,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CrawlerForm {
    pub(crate) input: String,
    pub(crate) keywords: Vec<String>,
    pub(crate) max_news: u32,
    pub(crate) selected_preset: Option<String>,
    pub(crate) in_flight: bool,
}

impl Default for CrawlerForm {
    fn default() -> Self {
        Self {
            input: String::new(),
            keywords: Vec::new(),
            max_news: DEFAULT_MAX_NEWS,
            selected_preset: None,
            in_flight: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RelevanceForm {
    pub(crate) file: Option<String>,
    pub(crate) api_key: Secret,
    pub(crate) api_key_visible: bool,
    pub(crate) model: String,
    pub(crate) in_flight: bool,
}

impl Default for RelevanceForm {
    fn default() -> Self {
        Self {
            file: None,
            api_key: Secret::default(),
            api_key_visible: false,
            model: DEFAULT_MODEL.to_string(),
            in_flight: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct BulkDialog {
    pub(crate) open: bool,
    /// Selected file names in the order they were ticked.
    pub(crate) selected: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) struct ResultsPanel {
    pub(crate) selected: Option<String>,
    /// File whose details were requested most recently and not yet answered.
    pub(crate) pending: Option<String>,
    pub(crate) details: Option<FileDetails>,
    pub(crate) tab: ChartTab,
    pub(crate) preview_open: bool,
    pub(crate) bulk: BulkDialog,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub(crate) page: Page,
    pub(crate) crawler: CrawlerForm,
    pub(crate) relevance: RelevanceForm,
    pub(crate) results: ResultsPanel,
    pub(crate) files: Vec<FileRecord>,
    pub(crate) files_loading: bool,
    /// A reload was requested while a list request was in flight.
    pub(crate) files_reload_queued: bool,
    pub(crate) preferences: Preferences,
    pub(crate) notice: Option<Notice>,
    next_notice_id: NoticeId,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Returns whether the state changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the current notice; at most one notice is visible at a time.
    pub(crate) fn notify(
        &mut self,
        severity: Severity,
        title: Option<&str>,
        message: impl Into<String>,
    ) -> NoticeId {
        self.next_notice_id += 1;
        let id = self.next_notice_id;
        self.notice = Some(Notice {
            id,
            severity,
            title: title.map(ToOwned::to_owned),
            message: message.into(),
        });
        self.mark_dirty();
        id
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn restore_preferences(&mut self, preferences: Preferences) {
        self.crawler.keywords = normalize_keywords(&preferences.last_keywords);
        self.crawler.max_news = snap_max_news(preferences.last_max_news);
        self.relevance.api_key = preferences.api_key.clone();
        self.relevance.model = if model_option(&preferences.model).is_some() {
            preferences.model.clone()
        } else {
            DEFAULT_MODEL.to_string()
        };
        self.preferences = Preferences {
            saved_keywords: normalize_keywords(&preferences.saved_keywords),
            model: self.relevance.model.clone(),
            ..preferences
        };
        self.mark_dirty();
    }

    pub(crate) fn file(&self, file_name: &str) -> Option<&FileRecord> {
        self.files.iter().find(|file| file.file_name == file_name)
    }
}
