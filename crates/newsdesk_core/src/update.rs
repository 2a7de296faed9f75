use crate::state::AppState;
use crate::{
    model_option, normalize_keywords, preset, snap_max_news, CrawlSummary, Effect,
    EvaluationSummary, FileDetails, FileRecord, Msg, Page, Secret, Severity,
    BULK_DOWNLOAD_STAGGER, NOTICE_AUTO_DISMISS, PREVIEW_ROWS,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(page) => navigate(&mut state, page),
        Msg::RestorePreferences(preferences) => {
            state.restore_preferences(preferences);
            Vec::new()
        }

        Msg::KeywordInputChanged(text) => {
            if state.crawler.input != text {
                state.crawler.input = text;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::KeywordAdded => {
            let keyword = state.crawler.input.trim().to_string();
            if keyword.is_empty() {
                return (state, Vec::new());
            }
            let mut keywords = std::mem::take(&mut state.crawler.keywords);
            keywords.push(keyword);
            state.crawler.keywords = normalize_keywords(keywords);
            state.crawler.input.clear();
            state.mark_dirty();
            Vec::new()
        }
        Msg::KeywordRemoved(index) => {
            if index < state.crawler.keywords.len() {
                state.crawler.keywords.remove(index);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::KeywordPresetSelected(name) => {
            if let Some(preset) = preset(&name) {
                let mut merged = std::mem::take(&mut state.crawler.keywords);
                merged.extend(preset.keywords.iter().map(|keyword| keyword.to_string()));
                state.crawler.keywords = normalize_keywords(merged);
                state.crawler.selected_preset = Some(name);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::KeywordsSaved => save_keywords(&mut state),
        Msg::SavedKeywordLoaded(keyword) => {
            if !state.crawler.keywords.contains(&keyword) {
                state.crawler.keywords.push(keyword);
                state.crawler.keywords = normalize_keywords(&state.crawler.keywords);
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::KeywordsCleared => {
            if !state.crawler.keywords.is_empty() {
                state.crawler.keywords.clear();
                state.crawler.selected_preset = None;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::MaxNewsChanged(value) => {
            let snapped = snap_max_news(value);
            if snapped != state.crawler.max_news {
                state.crawler.max_news = snapped;
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::CrawlClicked => start_crawl(&mut state),
        Msg::CrawlCompleted(result) => finish_crawl(&mut state, result),

        Msg::RefreshFiles => request_files(&mut state),
        Msg::FilesLoaded(result) => files_loaded(&mut state, result),
        Msg::FileSelected(file_name) => select_file(&mut state, file_name),
        Msg::FileDetailsLoaded { file_name, result } => {
            details_loaded(&mut state, file_name, result);
            Vec::new()
        }

        Msg::EvaluationFileChosen(file_name) => {
            state.relevance.file = Some(file_name);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ApiKeyChanged(text) => {
            state.relevance.api_key = Secret::new(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::ApiKeySaved => save_api_key(&mut state),
        Msg::ApiKeyVisibilityToggled => {
            state.relevance.api_key_visible = !state.relevance.api_key_visible;
            state.mark_dirty();
            Vec::new()
        }
        Msg::ModelSelected(model) => {
            if model_option(&model).is_none() || state.relevance.model == model {
                return (state, Vec::new());
            }
            state.relevance.model = model.clone();
            state.preferences.model = model;
            state.mark_dirty();
            vec![Effect::SavePreferences(state.preferences.clone())]
        }
        Msg::EvaluateClicked => start_evaluation(&mut state),
        Msg::EvaluationCompleted(result) => finish_evaluation(&mut state, result),

        Msg::ChartTabSelected(tab) => {
            state.results.tab = tab;
            state.mark_dirty();
            Vec::new()
        }
        Msg::PreviewToggled(open) => {
            state.results.preview_open = open && state.results.details.is_some();
            state.mark_dirty();
            Vec::new()
        }
        Msg::DownloadSelectedClicked => download_selected(&mut state),
        Msg::BulkDialogOpened => {
            if !state.files.is_empty() {
                state.results.bulk.open = true;
                state.results.bulk.selected.clear();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::BulkDialogClosed => {
            state.results.bulk.open = false;
            state.mark_dirty();
            Vec::new()
        }
        Msg::BulkFileToggled(file_name) => {
            toggle_bulk_file(&mut state, file_name);
            Vec::new()
        }
        Msg::BulkSelectAllToggled => {
            let bulk = &mut state.results.bulk;
            if bulk.selected.len() == state.files.len() {
                bulk.selected.clear();
            } else {
                bulk.selected = state.files.iter().map(|f| f.file_name.clone()).collect();
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::BulkDownloadConfirmed => confirm_bulk_download(&mut state),
        Msg::DownloadFinished { file_name, result } => {
            match result {
                Ok(location) => {
                    state.notify(
                        Severity::Success,
                        None,
                        format!("Saved {file_name} to {location}."),
                    );
                }
                Err(err) => {
                    state.notify(
                        Severity::Error,
                        None,
                        format!("Download of {file_name} failed: {err}"),
                    );
                }
            }
            Vec::new()
        }

        Msg::NoticeDismissed => {
            state.clear_notice();
            Vec::new()
        }
        Msg::NoticeExpired(id) => {
            if state.notice.as_ref().is_some_and(|notice| notice.id == id) {
                state.clear_notice();
            }
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn navigate(state: &mut AppState, page: Page) -> Vec<Effect> {
    state.page = page;
    state.results.bulk.open = false;
    state.results.preview_open = false;
    state.mark_dirty();
    if page.loads_files() {
        request_files(state)
    } else {
        Vec::new()
    }
}

fn request_files(state: &mut AppState) -> Vec<Effect> {
    if state.files_loading {
        state.files_reload_queued = true;
        return Vec::new();
    }
    state.files_loading = true;
    state.mark_dirty();
    vec![Effect::ListFiles]
}

fn files_loaded(state: &mut AppState, result: Result<Vec<FileRecord>, String>) -> Vec<Effect> {
    state.files_loading = false;
    state.mark_dirty();
    if std::mem::take(&mut state.files_reload_queued) {
        if let Ok(files) = result {
            state.files = files;
            prune_bulk_selection(state);
        }
        return request_files(state);
    }
    match result {
        Ok(files) => {
            state.files = files;
            prune_bulk_selection(state);
            let wants_default_selection = state.page == Page::Results
                && state.results.selected.is_none()
                && state.results.pending.is_none();
            if wants_default_selection {
                let first_evaluated = state
                    .files
                    .iter()
                    .find(|file| file.evaluated)
                    .map(|file| file.file_name.clone());
                if let Some(file_name) = first_evaluated {
                    return select_file(state, file_name);
                }
            }
            Vec::new()
        }
        Err(err) => {
            state.notify(
                Severity::Error,
                None,
                format!("Could not load the file list: {err}"),
            );
            Vec::new()
        }
    }
}

fn prune_bulk_selection(state: &mut AppState) {
    let files = &state.files;
    state
        .results
        .bulk
        .selected
        .retain(|name| files.iter().any(|file| &file.file_name == name));
}

fn select_file(state: &mut AppState, file_name: String) -> Vec<Effect> {
    if state.results.pending.as_deref() == Some(file_name.as_str()) {
        return Vec::new();
    }
    state.results.pending = Some(file_name.clone());
    state.mark_dirty();
    vec![Effect::LoadFileDetails {
        file_name,
        max_rows: PREVIEW_ROWS,
    }]
}

fn details_loaded(state: &mut AppState, file_name: String, result: Result<FileDetails, String>) {
    // Only the most recent request may update the panel.
    if state.results.pending.as_deref() != Some(file_name.as_str()) {
        return;
    }
    state.results.pending = None;
    state.mark_dirty();
    match result {
        Ok(details) => {
            state.results.selected = Some(file_name);
            state.results.details = Some(details);
        }
        Err(err) => {
            state.notify(
                Severity::Error,
                None,
                format!("Could not load details for {file_name}: {err}"),
            );
        }
    }
}

fn save_keywords(state: &mut AppState) -> Vec<Effect> {
    if state.crawler.keywords.is_empty() {
        return Vec::new();
    }
    let merged = state
        .preferences
        .saved_keywords
        .iter()
        .chain(state.crawler.keywords.iter());
    state.preferences.saved_keywords = normalize_keywords(merged);
    let notice_id = state.notify(Severity::Success, None, "Keywords saved.");
    vec![
        Effect::SavePreferences(state.preferences.clone()),
        Effect::DismissNoticeAfter {
            notice_id,
            delay: NOTICE_AUTO_DISMISS,
        },
    ]
}

fn start_crawl(state: &mut AppState) -> Vec<Effect> {
    if state.crawler.in_flight {
        return Vec::new();
    }
    let keywords = normalize_keywords(&state.crawler.keywords);
    if keywords.is_empty() {
        state.notify(
            Severity::Error,
            None,
            "Enter at least one keyword before starting a crawl.",
        );
        return Vec::new();
    }

    let max_news_per_keyword = state.crawler.max_news;
    state.crawler.keywords = keywords.clone();
    state.preferences.last_keywords = keywords.clone();
    state.preferences.last_max_news = max_news_per_keyword;
    state.crawler.in_flight = true;
    state.mark_dirty();

    vec![
        Effect::SavePreferences(state.preferences.clone()),
        Effect::Crawl {
            keywords,
            max_news_per_keyword,
        },
    ]
}

fn finish_crawl(state: &mut AppState, result: Result<CrawlSummary, String>) -> Vec<Effect> {
    state.crawler.in_flight = false;
    state.mark_dirty();
    match result {
        Ok(summary) if summary.success => {
            let mut message = format!(
                "Collected {} news articles.",
                summary.item_count.unwrap_or(0)
            );
            if summary.download_path.is_some() {
                message.push_str(" The result file was also copied to your downloads folder.");
            }
            state.notify(Severity::Success, Some("Crawl complete"), message);
            if let Some(file_path) = summary.file_path {
                state.relevance.file = Some(file_path);
            }
            state.page = Page::Relevance;
            request_files(state)
        }
        Ok(summary) => {
            state.notify(
                Severity::Error,
                None,
                format!("Crawl failed: {}", summary.message),
            );
            Vec::new()
        }
        Err(err) => {
            state.notify(
                Severity::Error,
                None,
                format!("Crawl request failed: {err}"),
            );
            Vec::new()
        }
    }
}

fn save_api_key(state: &mut AppState) -> Vec<Effect> {
    if state.relevance.api_key.is_blank() {
        return Vec::new();
    }
    let key = Secret::new(state.relevance.api_key.expose().trim());
    state.relevance.api_key = key.clone();
    state.preferences.api_key = key;
    let notice_id = state.notify(Severity::Success, None, "API key saved.");
    vec![
        Effect::SavePreferences(state.preferences.clone()),
        Effect::DismissNoticeAfter {
            notice_id,
            delay: NOTICE_AUTO_DISMISS,
        },
    ]
}

fn start_evaluation(state: &mut AppState) -> Vec<Effect> {
    if state.relevance.in_flight {
        return Vec::new();
    }
    let file_path = match state.relevance.file.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => path.to_string(),
        _ => {
            state.notify(Severity::Error, None, "Select a file to evaluate.");
            return Vec::new();
        }
    };
    if state.relevance.api_key.is_blank() {
        state.notify(
            Severity::Error,
            None,
            "Enter an API key before starting the evaluation.",
        );
        return Vec::new();
    }

    state.relevance.in_flight = true;
    state.mark_dirty();
    vec![Effect::Evaluate {
        file_path,
        api_key: Secret::new(state.relevance.api_key.expose().trim()),
        model: state.relevance.model.clone(),
    }]
}

fn finish_evaluation(
    state: &mut AppState,
    result: Result<EvaluationSummary, String>,
) -> Vec<Effect> {
    state.relevance.in_flight = false;
    state.mark_dirty();
    match result {
        Ok(summary) if summary.success => {
            let message = match summary.stats {
                Some(stats) => format!(
                    "Relevance evaluation finished. Relevant articles: {}/{} ({}%).",
                    stats.relevant_count, stats.total_count, stats.relevant_percent
                ),
                None => "Relevance evaluation finished.".to_string(),
            };
            state.notify(Severity::Success, Some("Evaluation complete"), message);
            state.page = Page::Results;
            // Let the refreshed list pick the newest evaluated file.
            state.results.selected = None;
            state.results.details = None;
            state.results.pending = None;
            request_files(state)
        }
        Ok(summary) => {
            state.notify(
                Severity::Error,
                None,
                format!("Relevance evaluation failed: {}", summary.message),
            );
            Vec::new()
        }
        Err(err) => {
            state.notify(
                Severity::Error,
                None,
                format!("Relevance evaluation request failed: {err}"),
            );
            Vec::new()
        }
    }
}

fn download_selected(state: &mut AppState) -> Vec<Effect> {
    let Some(file_name) = state.results.selected.clone() else {
        state.notify(Severity::Error, None, "Select a file to download.");
        return Vec::new();
    };
    state.notify(
        Severity::Info,
        None,
        format!("Downloading {file_name}..."),
    );
    vec![Effect::Download {
        file_names: vec![file_name],
        stagger: BULK_DOWNLOAD_STAGGER,
    }]
}

fn toggle_bulk_file(state: &mut AppState, file_name: String) {
    if state.file(&file_name).is_none() {
        return;
    }
    let selected = &mut state.results.bulk.selected;
    if let Some(index) = selected.iter().position(|name| *name == file_name) {
        selected.remove(index);
    } else {
        selected.push(file_name);
    }
    state.mark_dirty();
}

fn confirm_bulk_download(state: &mut AppState) -> Vec<Effect> {
    if state.results.bulk.selected.is_empty() {
        return Vec::new();
    }
    let file_names = std::mem::take(&mut state.results.bulk.selected);
    state.results.bulk.open = false;
    state.notify(
        Severity::Info,
        None,
        format!("Downloading {} files...", file_names.len()),
    );
    vec![Effect::Download {
        file_names,
        stagger: BULK_DOWNLOAD_STAGGER,
    }]
}
