use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use desk_logging::{desk_info, desk_warn};
use newsdesk_core::{
    CrawlSummary, Effect, EvaluationStats, EvaluationSummary, FileDetails, FileRecord, FileStats,
    Msg, PreviewTable,
};
use newsdesk_engine::{
    ApiError, CrawlRequest, CrawlResponse, EngineConfig, EngineError, EngineEvent, EngineHandle,
    EvaluateRequest, EvaluateResponse, FileEntry,
};

use super::persistence;

/// Runs core effects and turns their outcomes back into core messages.
pub struct EffectRunner {
    engine: EngineHandle,
    preferences_path: PathBuf,
    timer_tx: mpsc::Sender<Msg>,
    timer_rx: mpsc::Receiver<Msg>,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, preferences_path: PathBuf) -> Result<Self, EngineError> {
        desk_info!(
            "Backend {} (timeout {:?}), downloads to {:?}",
            config.client.base_url,
            config.client.request_timeout,
            config.download_dir
        );
        let engine = EngineHandle::new(config)?;
        let (timer_tx, timer_rx) = mpsc::channel();
        Ok(Self {
            engine,
            preferences_path,
            timer_tx,
            timer_rx,
        })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Crawl {
                    keywords,
                    max_news_per_keyword,
                } => {
                    self.engine.crawl(CrawlRequest {
                        keywords,
                        max_news_per_keyword,
                    });
                }
                Effect::ListFiles => self.engine.list_files(),
                Effect::LoadFileDetails {
                    file_name,
                    max_rows,
                } => self.engine.load_file_details(file_name, max_rows),
                Effect::Evaluate {
                    file_path,
                    api_key,
                    model,
                } => {
                    self.engine.evaluate(EvaluateRequest {
                        file_path,
                        api_key: api_key.expose().to_string(),
                        model,
                    });
                }
                Effect::Download {
                    file_names,
                    stagger,
                } => {
                    desk_info!("Downloading {} file(s)", file_names.len());
                    self.engine.download(file_names, stagger);
                }
                Effect::SavePreferences(preferences) => {
                    persistence::save_preferences(&self.preferences_path, &preferences);
                }
                Effect::DismissNoticeAfter { notice_id, delay } => {
                    let timer_tx = self.timer_tx.clone();
                    thread::spawn(move || {
                        thread::sleep(delay);
                        let _ = timer_tx.send(Msg::NoticeExpired(notice_id));
                    });
                }
            }
        }
    }

    /// Collects everything that finished since the last call.
    pub fn drain(&self) -> Vec<Msg> {
        let mut inbox = Vec::new();
        while let Some(event) = self.engine.try_recv() {
            inbox.push(map_event(event));
        }
        while let Ok(msg) = self.timer_rx.try_recv() {
            inbox.push(msg);
        }
        inbox
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::CrawlCompleted(result) => {
            Msg::CrawlCompleted(result.map(map_crawl).map_err(|err| describe("Crawl", err)))
        }
        EngineEvent::FilesListed(result) => Msg::FilesLoaded(
            result
                .map(|files| files.into_iter().map(map_file).collect())
                .map_err(|err| describe("File list", err)),
        ),
        EngineEvent::FileDetailsLoaded { file_name, result } => Msg::FileDetailsLoaded {
            result: result
                .map(map_details)
                .map_err(|err| describe(&file_name, err)),
            file_name,
        },
        EngineEvent::EvaluationCompleted(result) => Msg::EvaluationCompleted(
            result
                .map(map_evaluation)
                .map_err(|err| describe("Evaluation", err)),
        ),
        EngineEvent::DownloadCompleted { file_name, result } => Msg::DownloadFinished {
            result: result
                .map(|path| path.display().to_string())
                .map_err(|err| describe(&file_name, err)),
            file_name,
        },
    }
}

fn describe(what: &str, err: ApiError) -> String {
    desk_warn!("{what} request failed: {err}");
    err.to_string()
}

fn map_crawl(response: CrawlResponse) -> CrawlSummary {
    CrawlSummary {
        success: response.success,
        message: response.message,
        item_count: response.item_count,
        file_path: response.file_path,
        download_path: response.download_path,
    }
}

fn map_file(entry: FileEntry) -> FileRecord {
    FileRecord {
        evaluated: entry.evaluated(),
        file_name: entry.file_name,
        size_label: entry.file_size_str,
        modified_label: entry.modified_time_str,
    }
}

fn map_details(details: newsdesk_engine::FileDetails) -> FileDetails {
    let stats = details.statistics;
    FileDetails {
        preview: PreviewTable {
            rows: details.preview.rows(),
            columns: details.preview.column_names,
            total_rows: details.preview.total_rows,
        },
        stats: FileStats {
            total_rows: stats.total_rows,
            relevant_count: stats.relevant_count,
            relevant_percent: stats.relevant_percent,
            category_counts: stats.category_counts,
            keyword_counts: stats.keyword_counts,
        },
    }
}

fn map_evaluation(response: EvaluateResponse) -> EvaluationSummary {
    EvaluationSummary {
        success: response.success,
        message: response.message,
        stats: response.stats.map(|stats| EvaluationStats {
            relevant_count: stats.relevant_count,
            total_count: stats.total_count,
            relevant_percent: stats.relevant_percent,
        }),
    }
}
