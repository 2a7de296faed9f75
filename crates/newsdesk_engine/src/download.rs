use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use desk_logging::{desk_info, desk_warn};

use crate::{
    endpoint_url, local_file_name, ApiError, AtomicFileWriter, Backend, EngineEvent, FailureKind,
};

/// Receives engine events as they happen.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Direct download URL of a result file.
pub fn download_url(base_url: &str, file_name: &str) -> Result<String, ApiError> {
    endpoint_url(base_url, &["api", "download", file_name]).map(String::from)
}

/// Downloads `file_names` one after another, waiting `stagger` between files.
///
/// Every file reports its own `DownloadCompleted` event; a failure does not stop
/// the remaining files.
pub async fn download_all(
    backend: &dyn Backend,
    writer: &AtomicFileWriter,
    file_names: &[String],
    stagger: Duration,
    sink: &dyn EventSink,
) {
    for (index, file_name) in file_names.iter().enumerate() {
        if index > 0 && !stagger.is_zero() {
            tokio::time::sleep(stagger).await;
        }
        let result = download_one(backend, writer, file_name).await;
        match &result {
            Ok(path) => desk_info!("Downloaded {file_name} to {}", path.display()),
            Err(err) => desk_warn!("Download of {file_name} failed: {err}"),
        }
        sink.emit(EngineEvent::DownloadCompleted {
            file_name: file_name.clone(),
            result,
        });
    }
}

async fn download_one(
    backend: &dyn Backend,
    writer: &AtomicFileWriter,
    file_name: &str,
) -> Result<PathBuf, ApiError> {
    let bytes = backend.download(file_name).await?;
    writer
        .write(&local_file_name(file_name), &bytes)
        .map_err(|err| ApiError::new(FailureKind::Io, err.to_string()))
}
