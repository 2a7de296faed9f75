use std::io;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use desk_logging::{desk_debug, desk_warn};
use futures_util::future;
use thiserror::Error;

use crate::download::{download_all, ChannelEventSink, EventSink};
use crate::{
    ApiError, AtomicFileWriter, Backend, ClientSettings, CrawlRequest, EngineEvent,
    EvaluateRequest, FileDetails, ReqwestBackend,
};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub client: ClientSettings,
    pub download_dir: PathBuf,
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] ApiError),
}

enum EngineCommand {
    Crawl(CrawlRequest),
    ListFiles,
    LoadFileDetails { file_name: String, max_rows: u32 },
    Evaluate(EvaluateRequest),
    Download { file_names: Vec<String>, stagger: Duration },
}

/// Runs backend calls on a background tokio runtime and queues their results.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        let backend = ReqwestBackend::new(config.client)?;
        Self::with_backend(Arc::new(backend), config.download_dir)
    }

    pub fn with_backend(
        backend: Arc<dyn Backend>,
        download_dir: PathBuf,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("newsdesk-engine-worker")
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let writer = Arc::new(AtomicFileWriter::new(download_dir));

        thread::Builder::new()
            .name("newsdesk-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let backend = backend.clone();
                    let writer = writer.clone();
                    let sink = ChannelEventSink::new(event_tx.clone());
                    runtime.spawn(async move {
                        handle_command(backend.as_ref(), &writer, command, &sink).await;
                    });
                }
                desk_debug!("Engine command channel closed");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn crawl(&self, request: CrawlRequest) {
        self.send(EngineCommand::Crawl(request));
    }

    pub fn list_files(&self) {
        self.send(EngineCommand::ListFiles);
    }

    pub fn load_file_details(&self, file_name: impl Into<String>, max_rows: u32) {
        self.send(EngineCommand::LoadFileDetails {
            file_name: file_name.into(),
            max_rows,
        });
    }

    pub fn evaluate(&self, request: EvaluateRequest) {
        self.send(EngineCommand::Evaluate(request));
    }

    pub fn download(&self, file_names: Vec<String>, stagger: Duration) {
        self.send(EngineCommand::Download {
            file_names,
            stagger,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            desk_warn!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    backend: &dyn Backend,
    writer: &AtomicFileWriter,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::Crawl(request) => {
            let result = backend.crawl(&request).await;
            sink.emit(EngineEvent::CrawlCompleted(result));
        }
        EngineCommand::ListFiles => {
            let result = backend.list_files().await;
            sink.emit(EngineEvent::FilesListed(result));
        }
        EngineCommand::LoadFileDetails {
            file_name,
            max_rows,
        } => {
            let result = future::try_join(
                backend.file_preview(&file_name, max_rows),
                backend.file_statistics(&file_name),
            )
            .await
            .map(|(preview, statistics)| FileDetails {
                preview,
                statistics,
            });
            sink.emit(EngineEvent::FileDetailsLoaded { file_name, result });
        }
        EngineCommand::Evaluate(request) => {
            let result = backend.evaluate(&request).await;
            sink.emit(EngineEvent::EvaluationCompleted(result));
        }
        EngineCommand::Download {
            file_names,
            stagger,
        } => {
            download_all(backend, writer, &file_names, stagger, sink).await;
        }
    }
}
