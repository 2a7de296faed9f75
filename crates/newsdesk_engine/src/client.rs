use bytes::{Bytes, BytesMut};
use desk_logging::{desk_debug, desk_info, desk_warn};
use futures_util::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::{
    download_url, ApiError, ClientSettings, CrawlRequest, CrawlResponse, EvaluateRequest,
    EvaluateResponse, FailureKind, FileEntry, FileList, FilePreview, FileStatistics,
};

/// The backend operations the dashboard composes.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn crawl(&self, request: &CrawlRequest) -> Result<CrawlResponse, ApiError>;

    async fn list_files(&self) -> Result<Vec<FileEntry>, ApiError>;

    async fn file_preview(&self, file_name: &str, max_rows: u32)
        -> Result<FilePreview, ApiError>;

    async fn file_statistics(&self, file_name: &str) -> Result<FileStatistics, ApiError>;

    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse, ApiError>;

    async fn download(&self, file_name: &str) -> Result<Bytes, ApiError>;
}

/// Appends `segments` to the base url path, percent-encoding each one.
pub fn endpoint_url(base_url: &str, segments: &[&str]) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url)
        .map_err(|err| ApiError::new(FailureKind::InvalidUrl, err.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| ApiError::new(FailureKind::InvalidUrl, "base url cannot have a path"))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestBackend {
    pub fn new(settings: ClientSettings) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ApiError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        endpoint_url(&self.settings.base_url, segments)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().to_string();
        // The body is only used for the error message; a failed read is not worth reporting.
        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body);
        desk_warn!("{url} returned {status}: {}", detail.as_deref().unwrap_or("-"));
        Err(ApiError::new(
            FailureKind::HttpStatus {
                status: status.as_u16(),
                detail: detail.clone(),
            },
            detail.unwrap_or_else(|| status.to_string()),
        ))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| ApiError::new(FailureKind::Decode, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn crawl(&self, request: &CrawlRequest) -> Result<CrawlResponse, ApiError> {
        let url = self.url(&["api", "crawler", "crawl"])?;
        desk_info!(
            "Crawl requested: {} keywords, up to {} per keyword",
            request.keywords.len(),
            request.max_news_per_keyword
        );
        self.send_json(self.client.post(url).json(request)).await
    }

    async fn list_files(&self) -> Result<Vec<FileEntry>, ApiError> {
        let url = self.url(&["api", "crawler", "files"])?;
        desk_debug!("GET {url}");
        let list: FileList = self.send_json(self.client.get(url)).await?;
        Ok(list.files)
    }

    async fn file_preview(
        &self,
        file_name: &str,
        max_rows: u32,
    ) -> Result<FilePreview, ApiError> {
        let mut url = self.url(&["api", "crawler", "files", file_name, "preview"])?;
        url.query_pairs_mut()
            .append_pair("max_rows", &max_rows.to_string());
        desk_debug!("GET {url}");
        self.send_json(self.client.get(url)).await
    }

    async fn file_statistics(&self, file_name: &str) -> Result<FileStatistics, ApiError> {
        let url = self.url(&["api", "crawler", "files", file_name, "statistics"])?;
        desk_debug!("GET {url}");
        self.send_json(self.client.get(url)).await
    }

    async fn evaluate(&self, request: &EvaluateRequest) -> Result<EvaluateResponse, ApiError> {
        let url = self.url(&["api", "relevance", "evaluate"])?;
        desk_info!(
            "Evaluation requested for {} with {}",
            request.file_path,
            request.model
        );
        self.send_json(self.client.post(url).json(request)).await
    }

    async fn download(&self, file_name: &str) -> Result<Bytes, ApiError> {
        let url = download_url(&self.settings.base_url, file_name)?;
        desk_debug!("GET {url}");
        let response = self.send(self.client.get(url)).await?;

        let max_bytes = self.settings.max_download_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "download too large",
                ));
            }
        }

        let mut buffer = BytesMut::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = buffer.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ApiError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "download too large",
                ));
            }
            buffer.extend_from_slice(&chunk);
        }
        Ok(buffer.freeze())
    }
}

/// Extracts the `detail` field of an error body, if the body is JSON.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        Value::String(text) => Some(text.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        return ApiError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ApiError::new(FailureKind::Decode, err.to_string());
    }
    ApiError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_file_names_as_one_segment() {
        let url = endpoint_url("http://localhost:8000/", &["api", "download", "뉴스 a/b.csv"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8000/api/download/%EB%89%B4%EC%8A%A4%20a%2Fb.csv"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let url = endpoint_url("https://host/backend", &["api", "crawler", "files"]).unwrap();
        assert_eq!(url.as_str(), "https://host/backend/api/crawler/files");
    }

    #[test]
    fn endpoint_rejects_unparsable_base() {
        let err = endpoint_url("not a url", &["api"]).unwrap_err();
        assert_eq!(err.kind, FailureKind::InvalidUrl);
    }

    #[test]
    fn detail_is_read_from_json_bodies_only() {
        assert_eq!(
            error_detail(r#"{"detail": "File 'x.csv' not found"}"#).as_deref(),
            Some("File 'x.csv' not found")
        );
        assert_eq!(
            error_detail(r#"{"detail": [{"msg": "field required"}]}"#).as_deref(),
            Some(r#"[{"msg":"field required"}]"#)
        );
        assert_eq!(error_detail("Internal Server Error"), None);
    }
}
