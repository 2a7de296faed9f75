use std::time::Duration;

use crate::{NoticeId, Preferences, Secret};

/// Side effects requested by [`crate::update`] for the shell to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Crawl {
        keywords: Vec<String>,
        max_news_per_keyword: u32,
    },
    ListFiles,
    /// Fetch preview and statistics for one file.
    LoadFileDetails { file_name: String, max_rows: u32 },
    Evaluate {
        file_path: String,
        api_key: Secret,
        model: String,
    },
    /// Download files one after another, waiting `stagger` between them.
    Download {
        file_names: Vec<String>,
        stagger: Duration,
    },
    SavePreferences(Preferences),
    DismissNoticeAfter { notice_id: NoticeId, delay: Duration },
}
