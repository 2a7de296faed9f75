//! Newsdesk engine: backend client, downloads and effect execution.
mod client;
mod config;
mod download;
mod engine;
mod filename;
mod persist;
mod types;

pub use client::{endpoint_url, Backend, ReqwestBackend};
pub use config::{ClientSettings, ConfigError, API_URL_VAR, DEFAULT_API_URL, TIMEOUT_VAR};
pub use download::{download_all, download_url, ChannelEventSink, EventSink};
pub use engine::{EngineConfig, EngineError, EngineHandle};
pub use filename::local_file_name;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use types::{
    ApiError, CrawlRequest, CrawlResponse, EngineEvent, EvaluateRequest, EvaluateResponse,
    EvaluationStats, FailureKind, FileDetails, FileEntry, FileList, FilePreview, FileStatistics,
};
