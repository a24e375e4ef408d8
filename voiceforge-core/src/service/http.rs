//! Voice-cloning service reached over plain HTTP

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use super::error::ServiceError;
use super::provider::CloneService;
use super::types::{CloneRequest, CloneResponse, SAMPLE_FIELD};
use crate::settings::ServiceSettings;

pub struct HttpCloneService {
    origin: String,
    endpoint_url: String,
    client: Client,
}

impl HttpCloneService {
    pub fn new(settings: &ServiceSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            origin: settings.origin.clone(),
            endpoint_url: settings.endpoint_url(),
            client,
        })
    }

    async fn build_form(request: &CloneRequest) -> Result<Form, ServiceError> {
        let bytes = request.sample.read_bytes().await?;
        let part = Part::bytes(bytes)
            .file_name(request.sample.name.clone())
            .mime_str(&request.sample.media_type)
            .map_err(|e| ServiceError::InvalidRequest(format!("bad media type: {e}")))?;

        let mut form = Form::new().part(SAMPLE_FIELD, part);
        for (name, value) in request.text_fields() {
            form = form.text(name, value);
        }
        Ok(form)
    }
}

#[async_trait]
impl CloneService for HttpCloneService {
    fn origin(&self) -> &str {
        &self.origin
    }

    async fn clone_and_generate(
        &self,
        request: &CloneRequest,
    ) -> Result<CloneResponse, ServiceError> {
        let form = Self::build_form(request).await?;

        info!(
            url = %self.endpoint_url,
            sample = %request.sample.name,
            fields = ?request.text_fields().iter().map(|(n, _)| *n).collect::<Vec<_>>(),
            "Submitting clone request"
        );

        let response = self
            .client
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| ServiceError::Transport {
                url: self.endpoint_url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| ServiceError::Transport {
                url: self.endpoint_url.clone(),
                source,
            })?;
        debug!(%body, "Clone response");

        serde_json::from_str(&body).map_err(|e| ServiceError::InvalidResponse(e.to_string()))
    }

    async fn fetch_audio(&self, url: &str) -> Result<Vec<u8>, ServiceError> {
        let transport = |source| ServiceError::Transport {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(transport)?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{Emotion, Language, OutputFormat, TtsOptions};
    use crate::sample::SampleFile;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// What the stub server saw on its single connection.
    struct Captured {
        head: String,
        body: String,
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack
            .windows(needle.len())
            .position(|window| window == needle)
    }

    /// Accept one connection, record the request and answer with `status` and `body`.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Captured>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let origin = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];

            let head_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                assert!(n > 0, "connection closed before the request head");
                buf.extend_from_slice(&chunk[..n]);
                if let Some(pos) = find(&buf, b"\r\n\r\n") {
                    break pos + 4;
                }
            };

            let head = String::from_utf8_lossy(&buf[..head_end]).to_string();
            let content_length = head
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            let chunked = head
                .to_ascii_lowercase()
                .contains("transfer-encoding: chunked");

            loop {
                let received = &buf[head_end..];
                let complete = if chunked {
                    find(received, b"0\r\n\r\n").is_some()
                } else {
                    received.len() >= content_length
                };
                if complete {
                    break;
                }
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;

            Captured {
                head,
                body: String::from_utf8_lossy(&buf[head_end..]).to_string(),
            }
        });

        (origin, handle)
    }

    fn service(origin: &str) -> HttpCloneService {
        HttpCloneService::new(&ServiceSettings {
            origin: origin.to_string(),
            endpoint_path: "/api/clone-and-generate".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn request(dir: &std::path::Path, options: TtsOptions) -> CloneRequest {
        let path = dir.join("me.wav");
        std::fs::write(&path, b"RIFF-sample-bytes").unwrap();
        CloneRequest {
            sample: SampleFile::from_path(&path).unwrap(),
            voice_name: "Narrator".to_string(),
            message: "Hello there".to_string(),
            options,
        }
    }

    #[tokio::test]
    async fn test_posts_multipart_form() {
        let dir = tempfile::tempdir().unwrap();
        let (origin, server) = serve_once("200 OK", r#"{"audio_url": "/files/abc.wav"}"#).await;
        let options = TtsOptions {
            output_format: OutputFormat::Wav,
            emotion: Emotion::Unset,
            language: Language::English,
        };

        let response = service(&origin)
            .clone_and_generate(&request(dir.path(), options))
            .await
            .unwrap();
        let captured = server.await.unwrap();

        assert_eq!(response.audio_url, "/files/abc.wav");
        assert!(captured.head.starts_with("POST /api/clone-and-generate HTTP/1.1"));
        assert!(captured
            .head
            .to_ascii_lowercase()
            .contains("content-type: multipart/form-data; boundary="));

        let body = &captured.body;
        assert!(body.contains(r#"name="sample_file"; filename="me.wav""#));
        assert!(body.contains("Content-Type: audio/wav"));
        assert!(body.contains("RIFF-sample-bytes"));
        assert!(body.contains("name=\"voice_name\"\r\n\r\nNarrator\r\n"));
        assert!(body.contains("name=\"message\"\r\n\r\nHello there\r\n"));
        assert!(body.contains("name=\"output_format\"\r\n\r\nwav\r\n"));
        assert!(body.contains("name=\"language\"\r\n\r\nenglish\r\n"));
        assert!(!body.contains("name=\"emotion\""));
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let (origin, server) = serve_once("500 Internal Server Error", "model crashed").await;

        let err = service(&origin)
            .clone_and_generate(&request(dir.path(), TtsOptions::default()))
            .await
            .unwrap_err();
        server.await.unwrap();

        match err {
            ServiceError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "model crashed");
            }
            other => panic!("expected a status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_invalid_response() {
        let dir = tempfile::tempdir().unwrap();
        let (origin, server) = serve_once("200 OK", r#"{"voice_id": 7}"#).await;

        let err = service(&origin)
            .clone_and_generate(&request(dir.path(), TtsOptions::default()))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, ServiceError::InvalidResponse(_)), "{err:?}");
    }

    #[tokio::test]
    async fn test_fetch_audio_returns_body() {
        let (origin, server) = serve_once("200 OK", "RIFF-generated").await;

        let bytes = service(&origin)
            .fetch_audio(&format!("{origin}/files/abc.wav"))
            .await
            .unwrap();
        let captured = server.await.unwrap();

        assert_eq!(bytes, b"RIFF-generated");
        assert!(captured.head.starts_with("GET /files/abc.wav HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_fetch_audio_missing_file() {
        let (origin, server) = serve_once("404 Not Found", "no such file").await;

        let err = service(&origin)
            .fetch_audio(&format!("{origin}/files/gone.wav"))
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, ServiceError::Status { status: 404, .. }), "{err:?}");
    }
}
