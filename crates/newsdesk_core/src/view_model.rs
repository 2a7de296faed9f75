use crate::state::AppState;
use crate::{
    category_chart, keyword_chart, model_option, relevance_chart, truncate_text, ChartBar,
    ChartTab, FileRecord, Notice, Page, PreviewTable, Secret, KEYWORD_PRESETS, MODELS, NAV_PAGES,
    PREVIEW_CELL_LIMIT,
};

/// Everything the shell needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub page: Page,
    pub nav: Vec<NavEntry>,
    pub notice: Option<Notice>,
    pub crawler: CrawlerView,
    pub relevance: RelevanceView,
    pub results: ResultsView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub page: Page,
    pub title: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CrawlerView {
    pub input: String,
    pub can_add: bool,
    pub keywords: Vec<String>,
    pub presets: Vec<String>,
    pub selected_preset: Option<String>,
    pub saved_keywords: Vec<String>,
    pub max_news: u32,
    pub summary: String,
    pub can_save: bool,
    pub can_crawl: bool,
    pub crawling: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RelevanceView {
    /// Files that have not been evaluated yet.
    pub files: Vec<FileRecord>,
    pub selected_file: Option<String>,
    pub api_key: Secret,
    pub api_key_visible: bool,
    pub can_save_key: bool,
    pub models: Vec<String>,
    pub model: String,
    pub model_description: &'static str,
    pub can_evaluate: bool,
    pub evaluating: bool,
    pub files_loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub record: FileRecord,
    pub selected: bool,
    pub loading: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFileView {
    pub file_name: String,
    pub size_label: Option<String>,
    pub modified_label: Option<String>,
    pub total_rows: u64,
    pub relevance_summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartsView {
    pub categories: Vec<ChartBar>,
    pub relevance: Option<Vec<ChartBar>>,
    pub keywords: Vec<ChartBar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEntryView {
    pub file_name: String,
    pub caption: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulkDialogView {
    pub open: bool,
    pub entries: Vec<BulkEntryView>,
    pub all_selected: bool,
    pub selected_count: usize,
    pub can_open: bool,
    pub can_confirm: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultsView {
    pub files: Vec<FileRowView>,
    pub file_count: usize,
    pub files_loading: bool,
    pub loading_details: bool,
    pub selected: Option<SelectedFileView>,
    pub charts: ChartsView,
    pub tab: ChartTab,
    pub preview_open: bool,
    /// Preview with long cells shortened for display.
    pub preview: Option<PreviewTable>,
    pub bulk: BulkDialogView,
}

impl AppState {
    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            page: self.page,
            nav: NAV_PAGES
                .iter()
                .map(|&page| NavEntry {
                    page,
                    title: page.title(),
                    active: page == self.page,
                })
                .collect(),
            notice: self.notice.clone(),
            crawler: self.crawler_view(),
            relevance: self.relevance_view(),
            results: self.results_view(),
        }
    }

    fn crawler_view(&self) -> CrawlerView {
        let form = &self.crawler;
        let count = form.keywords.len();
        CrawlerView {
            input: form.input.clone(),
            can_add: !form.input.trim().is_empty(),
            keywords: form.keywords.clone(),
            presets: KEYWORD_PRESETS
                .iter()
                .map(|preset| preset.name.to_string())
                .collect(),
            selected_preset: form.selected_preset.clone(),
            saved_keywords: self.preferences.saved_keywords.clone(),
            max_news: form.max_news,
            summary: format!(
                "{count} keywords, up to {} news articles",
                count as u64 * u64::from(form.max_news)
            ),
            can_save: count > 0,
            can_crawl: count > 0 && !form.in_flight,
            crawling: form.in_flight,
        }
    }

    fn relevance_view(&self) -> RelevanceView {
        let form = &self.relevance;
        RelevanceView {
            files: self
                .files
                .iter()
                .filter(|file| !file.evaluated)
                .cloned()
                .collect(),
            selected_file: form.file.clone(),
            api_key: form.api_key.clone(),
            api_key_visible: form.api_key_visible,
            can_save_key: !form.api_key.is_blank(),
            models: MODELS.iter().map(|model| model.id.to_string()).collect(),
            model: form.model.clone(),
            model_description: model_option(&form.model)
                .map(|model| model.description)
                .unwrap_or_default(),
            can_evaluate: form.file.is_some() && !form.api_key.is_blank() && !form.in_flight,
            evaluating: form.in_flight,
            files_loading: self.files_loading,
        }
    }

    fn results_view(&self) -> ResultsView {
        let panel = &self.results;
        let files = self
            .files
            .iter()
            .map(|file| FileRowView {
                record: file.clone(),
                selected: panel.selected.as_deref() == Some(file.file_name.as_str()),
                loading: panel.pending.as_deref() == Some(file.file_name.as_str()),
            })
            .collect();

        let selected = panel.selected.as_ref().map(|file_name| {
            let record = self.file(file_name);
            let stats = panel.details.as_ref().map(|details| &details.stats);
            SelectedFileView {
                file_name: file_name.clone(),
                size_label: record.map(|r| r.size_label.clone()),
                modified_label: record.map(|r| r.modified_label.clone()),
                total_rows: stats.map(|s| s.total_rows).unwrap_or(0),
                relevance_summary: stats.and_then(|s| {
                    let relevant = s.relevant_count?;
                    Some(match s.relevant_percent {
                        Some(percent) => format!("{relevant} ({percent}%)"),
                        None => relevant.to_string(),
                    })
                }),
            }
        });

        let charts = panel
            .details
            .as_ref()
            .map(|details| ChartsView {
                categories: category_chart(&details.stats),
                relevance: relevance_chart(&details.stats),
                keywords: keyword_chart(&details.stats),
            })
            .unwrap_or_default();

        let preview = panel
            .details
            .as_ref()
            .map(|details| shorten_preview(&details.preview));

        ResultsView {
            files,
            file_count: self.files.len(),
            files_loading: self.files_loading,
            loading_details: panel.pending.is_some(),
            selected,
            charts,
            tab: panel.tab,
            preview_open: panel.preview_open,
            preview,
            bulk: self.bulk_view(),
        }
    }

    fn bulk_view(&self) -> BulkDialogView {
        let bulk = &self.results.bulk;
        let selected_count = bulk.selected.len();
        BulkDialogView {
            open: bulk.open,
            entries: self
                .files
                .iter()
                .map(|file| BulkEntryView {
                    file_name: file.file_name.clone(),
                    caption: format!("{} - {}", file.size_label, file.modified_label),
                    checked: bulk.selected.contains(&file.file_name),
                })
                .collect(),
            all_selected: !self.files.is_empty() && selected_count == self.files.len(),
            selected_count,
            can_open: !self.files.is_empty(),
            can_confirm: selected_count > 0,
        }
    }
}

fn shorten_preview(preview: &PreviewTable) -> PreviewTable {
    PreviewTable {
        columns: preview.columns.clone(),
        rows: preview
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| truncate_text(cell, PREVIEW_CELL_LIMIT))
                    .collect()
            })
            .collect(),
        total_rows: preview.total_rows,
    }
}
