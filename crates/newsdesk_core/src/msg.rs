use crate::{ChartTab, CrawlSummary, EvaluationSummary, FileDetails, FileRecord, NoticeId, Page, Preferences};

/// Inputs to [`crate::update`]: user actions and backend completions.
///
/// Backend failures arrive as `Err` with a human-readable message.
#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User picked an entry in the navigation.
    Navigate(Page),
    /// Restore preferences loaded from local storage at startup.
    RestorePreferences(Preferences),

    /// User edited the keyword input box.
    KeywordInputChanged(String),
    /// User confirmed the keyword input (button or Enter).
    KeywordAdded,
    KeywordRemoved(usize),
    /// User picked a recommended keyword preset by name.
    KeywordPresetSelected(String),
    /// User asked to remember the current keywords.
    KeywordsSaved,
    SavedKeywordLoaded(String),
    KeywordsCleared,
    MaxNewsChanged(u32),
    CrawlClicked,
    CrawlCompleted(Result<CrawlSummary, String>),

    /// User asked to reload the file list.
    RefreshFiles,
    FilesLoaded(Result<Vec<FileRecord>, String>),
    /// User selected a file on the results page.
    FileSelected(String),
    FileDetailsLoaded {
        file_name: String,
        result: Result<FileDetails, String>,
    },

    /// User chose the file to evaluate.
    EvaluationFileChosen(String),
    ApiKeyChanged(String),
    ApiKeySaved,
    ApiKeyVisibilityToggled,
    ModelSelected(String),
    EvaluateClicked,
    EvaluationCompleted(Result<EvaluationSummary, String>),

    ChartTabSelected(ChartTab),
    PreviewToggled(bool),
    /// Download the file currently selected on the results page.
    DownloadSelectedClicked,
    BulkDialogOpened,
    BulkDialogClosed,
    BulkFileToggled(String),
    BulkSelectAllToggled,
    BulkDownloadConfirmed,
    /// A single file download finished; `Ok` carries the saved location.
    DownloadFinished {
        file_name: String,
        result: Result<String, String>,
    },

    /// User closed the notice.
    NoticeDismissed,
    /// Auto-dismiss timer for a notice fired.
    NoticeExpired(NoticeId),
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
