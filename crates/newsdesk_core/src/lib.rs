//! Newsdesk core: pure state machine, view-model and chart helpers.
mod catalog;
mod charts;
mod effect;
mod keywords;
mod msg;
mod records;
mod route;
mod state;
mod update;
mod view_model;

pub use catalog::{
    category_color, model_option, preset, snap_max_news, KeywordPreset, ModelOption,
    BULK_DOWNLOAD_STAGGER, DEFAULT_MAX_NEWS, DEFAULT_MODEL, KEYWORD_CHART_LIMIT, KEYWORD_PRESETS,
    MAX_NEWS_MAX, MAX_NEWS_MIN, MAX_NEWS_STEP, MODELS, NOTICE_AUTO_DISMISS, PREVIEW_CELL_LIMIT,
    PREVIEW_ROWS,
};
pub use charts::{category_chart, keyword_chart, relevance_chart, truncate_text, ChartBar};
pub use effect::Effect;
pub use keywords::normalize_keywords;
pub use msg::Msg;
pub use records::{
    CrawlSummary, EvaluationStats, EvaluationSummary, FileDetails, FileRecord, FileStats,
    PreviewTable, Rgb, Secret,
};
pub use route::{Page, NAV_PAGES};
pub use state::{AppState, ChartTab, Notice, NoticeId, Preferences, Severity};
pub use update::update;
pub use view_model::{
    AppViewModel, BulkDialogView, BulkEntryView, ChartsView, CrawlerView, FileRowView, NavEntry,
    RelevanceView, ResultsView, SelectedFileView,
};
