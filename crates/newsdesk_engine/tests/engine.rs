use std::sync::Arc;
use std::time::{Duration, Instant};

use bytes::Bytes;
use newsdesk_engine::{
    ApiError, Backend, ClientSettings, CrawlRequest, CrawlResponse, EngineConfig, EngineEvent,
    EngineHandle, EvaluateRequest, EvaluateResponse, FailureKind, FileEntry, FilePreview,
    FileStatistics,
};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn wait_for_event(engine: &EngineHandle) -> EngineEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = engine.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "no engine event within 5s");
        std::thread::sleep(Duration::from_millis(10));
    }
}

/// Serves fixed statistics and fails previews for one file name.
struct StubBackend;

#[async_trait::async_trait]
impl Backend for StubBackend {
    async fn crawl(&self, _request: &CrawlRequest) -> Result<CrawlResponse, ApiError> {
        Ok(CrawlResponse {
            success: false,
            message: "no news found".to_string(),
            item_count: None,
            file_path: None,
            download_path: None,
        })
    }

    async fn list_files(&self) -> Result<Vec<FileEntry>, ApiError> {
        Ok(Vec::new())
    }

    async fn file_preview(
        &self,
        file_name: &str,
        _max_rows: u32,
    ) -> Result<FilePreview, ApiError> {
        if file_name == "broken.csv" {
            return Err(ApiError {
                kind: FailureKind::HttpStatus {
                    status: 500,
                    detail: Some("Empty file".to_string()),
                },
                message: "Empty file".to_string(),
            });
        }
        Ok(FilePreview {
            column_names: vec!["title".to_string()],
            ..FilePreview::default()
        })
    }

    async fn file_statistics(&self, _file_name: &str) -> Result<FileStatistics, ApiError> {
        Ok(FileStatistics {
            total_rows: 7,
            ..FileStatistics::default()
        })
    }

    async fn evaluate(&self, _request: &EvaluateRequest) -> Result<EvaluateResponse, ApiError> {
        Ok(EvaluateResponse {
            success: true,
            message: "ok".to_string(),
            stats: None,
        })
    }

    async fn download(&self, _file_name: &str) -> Result<Bytes, ApiError> {
        Ok(Bytes::from_static(b"csv"))
    }
}

#[test]
fn engine_reports_file_list_from_backend() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(MockServer::start());
    runtime.block_on(
        Mock::given(method("GET"))
            .and(path("/api/crawler/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "files": [{"file_name": "a.csv", "is_evaluated": true}]
            })))
            .mount(&server),
    );

    let temp = TempDir::new().unwrap();
    let engine = EngineHandle::new(EngineConfig {
        client: ClientSettings {
            base_url: server.uri(),
            ..ClientSettings::default()
        },
        download_dir: temp.path().to_path_buf(),
    })
    .unwrap();

    engine.list_files();
    match wait_for_event(&engine) {
        EngineEvent::FilesListed(Ok(files)) => {
            assert_eq!(files.len(), 1);
            assert!(files[0].evaluated());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn details_combine_preview_and_statistics() {
    let temp = TempDir::new().unwrap();
    let engine =
        EngineHandle::with_backend(Arc::new(StubBackend), temp.path().to_path_buf()).unwrap();

    engine.load_file_details("good.csv", 10);
    match wait_for_event(&engine) {
        EngineEvent::FileDetailsLoaded { file_name, result } => {
            assert_eq!(file_name, "good.csv");
            let details = result.expect("details");
            assert_eq!(details.preview.column_names, vec!["title".to_string()]);
            assert_eq!(details.statistics.total_rows, 7);
        }
        other => panic!("unexpected event {other:?}"),
    }

    engine.load_file_details("broken.csv", 10);
    match wait_for_event(&engine) {
        EngineEvent::FileDetailsLoaded { file_name, result } => {
            assert_eq!(file_name, "broken.csv");
            assert_eq!(result.unwrap_err().message, "Empty file");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn downloads_land_in_download_dir() {
    let temp = TempDir::new().unwrap();
    let engine =
        EngineHandle::with_backend(Arc::new(StubBackend), temp.path().to_path_buf()).unwrap();

    engine.download(vec!["../x/result.csv".to_string()], Duration::ZERO);
    match wait_for_event(&engine) {
        EngineEvent::DownloadCompleted { file_name, result } => {
            assert_eq!(file_name, "../x/result.csv");
            let saved = result.expect("saved");
            assert_eq!(saved, temp.path().join("result.csv"));
            assert_eq!(std::fs::read(saved).unwrap(), b"csv");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn crawl_and_evaluate_results_are_forwarded() {
    let temp = TempDir::new().unwrap();
    let engine =
        EngineHandle::with_backend(Arc::new(StubBackend), temp.path().to_path_buf()).unwrap();

    engine.crawl(CrawlRequest {
        keywords: vec!["a".to_string()],
        max_news_per_keyword: 10,
    });
    match wait_for_event(&engine) {
        EngineEvent::CrawlCompleted(Ok(response)) => assert!(!response.success),
        other => panic!("unexpected event {other:?}"),
    }

    engine.evaluate(EvaluateRequest {
        file_path: "a.csv".to_string(),
        api_key: "k".to_string(),
        model: "gpt-4".to_string(),
    });
    match wait_for_event(&engine) {
        EngineEvent::EvaluationCompleted(Ok(response)) => assert!(response.success),
        other => panic!("unexpected event {other:?}"),
    }
}
