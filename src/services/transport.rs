use crate::config::join_base_path;
use crate::error::AppError;
use crate::models::analysis_types::RawReply;
use crate::models::file_types::SelectedFile;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tokio_util::sync::CancellationToken;

pub const PREDICT_PATH: &str = "/predict";
pub const STATUS_PATH: &str = "/";
pub const IMAGE_FIELD: &str = "image";

/// Moves bytes to the classifier and back. Implementations only report
/// transport failures; judging the reply is the orchestrator's job.
///
/// Callers race these futures against `cancel` and drop them once it fires,
/// which aborts the exchange. `cancel` is handed over for implementations
/// that own work outside the future.
#[async_trait]
pub trait PredictTransport: Send + Sync {
    async fn post_image(
        &self,
        file: &SelectedFile,
        cancel: &CancellationToken,
    ) -> Result<RawReply, AppError>;

    async fn get_status(&self, cancel: &CancellationToken) -> Result<RawReply, AppError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    predict_url: String,
    status_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("photo-analyze/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, AppError> {
        Ok(Self {
            client,
            predict_url: join_base_path(base_url, PREDICT_PATH)?,
            status_url: join_base_path(base_url, STATUS_PATH)?,
        })
    }

    pub fn predict_url(&self) -> &str {
        &self.predict_url
    }
}

#[async_trait]
impl PredictTransport for HttpTransport {
    async fn post_image(
        &self,
        file: &SelectedFile,
        _cancel: &CancellationToken,
    ) -> Result<RawReply, AppError> {
        let body = reqwest::Body::from(file.content.clone());
        let part = Part::stream_with_length(body, file.len() as u64)
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part(IMAGE_FIELD, part);

        let response = self
            .client
            .post(&self.predict_url)
            .multipart(form)
            .send()
            .await?;

        read_reply(response).await
    }

    async fn get_status(&self, _cancel: &CancellationToken) -> Result<RawReply, AppError> {
        let response = self.client.get(&self.status_url).send().await?;
        read_reply(response).await
    }
}

async fn read_reply(response: reqwest::Response) -> Result<RawReply, AppError> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let mut body = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        body.extend_from_slice(&chunk?);
    }

    Ok(RawReply {
        status,
        content_type,
        body,
    })
}
