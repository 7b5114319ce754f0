use crate::config::AnalyzerConfig;
use crate::error::{AbortReason, AnalyzeError, AppError, ProtocolError};
use crate::models::analysis_types::{AnalysisResult, PredictionBody, RawReply, ServerStatus};
use crate::models::file_types::SelectedFile;
use crate::services::deadline::{race_with_deadline, RaceOutcome};
use crate::services::transport::{HttpTransport, PredictTransport};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);

#[derive(Debug)]
pub struct AnalysisRequest {
    pub cancel: CancellationToken,
    pub deadline: Instant,
}

impl AnalysisRequest {
    pub fn new(timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            cancel,
            deadline: Instant::now() + timeout,
        }
    }
}

#[derive(Clone)]
pub struct RequestOrchestrator {
    transport: Arc<dyn PredictTransport>,
    timeout: Duration,
}

impl RequestOrchestrator {
    pub fn new(transport: Arc<dyn PredictTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn from_config(config: &AnalyzerConfig) -> Result<Self, AppError> {
        let transport = HttpTransport::new(&config.endpoint)?;
        tracing::debug!(
            url = transport.predict_url(),
            timeout_ms = config.timeout_ms,
            "orchestrator ready"
        );
        Ok(Self::new(Arc::new(transport), config.timeout()))
    }

    pub async fn analyze(&self, file: &SelectedFile) -> AnalysisResult {
        self.analyze_with_cancel(file, CancellationToken::new()).await
    }

    /// Like `analyze`, but the caller keeps a clone of `cancel` and may abort
    /// the upload at any point. An aborted upload reports like a timeout.
    pub async fn analyze_with_cancel(
        &self,
        file: &SelectedFile,
        cancel: CancellationToken,
    ) -> AnalysisResult {
        let request = AnalysisRequest::new(self.timeout, cancel);
        let started = Instant::now();

        let outcome = race_with_deadline(
            self.transport.post_image(file, &request.cancel),
            request.deadline,
            &request.cancel,
        )
        .await;

        let verdict = match outcome {
            RaceOutcome::Completed(Ok(reply)) => classify_reply(&reply),
            RaceOutcome::Completed(Err(err)) => Err(AnalyzeError::from(err)),
            RaceOutcome::DeadlineElapsed => {
                Err(AnalyzeError::Aborted(AbortReason::DeadlineElapsed(self.timeout)))
            }
            RaceOutcome::Cancelled => Err(AnalyzeError::Aborted(AbortReason::Cancelled)),
        };

        let elapsed_ms = started.elapsed().as_millis() as u64;
        match verdict {
            Ok(body) => {
                tracing::info!(
                    file = %file.name,
                    bytes = file.len(),
                    elapsed_ms,
                    prediction = %body.prediction,
                    confidence = body.confidence,
                    "analysis succeeded"
                );
                AnalysisResult::Success {
                    prediction: body.prediction,
                    confidence: body.confidence,
                }
            }
            Err(err) => {
                tracing::warn!(
                    file = %file.name,
                    bytes = file.len(),
                    elapsed_ms,
                    kind = err.kind(),
                    error = %err,
                    "analysis failed"
                );
                AnalysisResult::failure(err)
            }
        }
    }

    pub async fn check_health(&self) -> Result<ServerStatus, AppError> {
        let cancel = CancellationToken::new();
        let deadline = Instant::now() + self.timeout;

        let outcome = race_with_deadline(self.transport.get_status(&cancel), deadline, &cancel).await;
        let reply = match outcome {
            RaceOutcome::Completed(reply) => reply?,
            RaceOutcome::DeadlineElapsed => {
                return Err(AbortReason::DeadlineElapsed(self.timeout).to_string().into())
            }
            RaceOutcome::Cancelled => return Err(AbortReason::Cancelled.to_string().into()),
        };

        if !is_success_status(reply.status) {
            return Err(ProtocolError::Status(reply.status).to_string().into());
        }
        Ok(serde_json::from_slice(&reply.body)?)
    }
}

fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

fn is_json_content_type(content_type: Option<&str>) -> bool {
    content_type
        .map(|value| value.to_ascii_lowercase().contains("application/json"))
        .unwrap_or(false)
}

// Status first, then content type, then the body.
pub fn classify_reply(reply: &RawReply) -> Result<PredictionBody, AnalyzeError> {
    if !is_success_status(reply.status) {
        return Err(ProtocolError::Status(reply.status).into());
    }

    if !is_json_content_type(reply.content_type.as_deref()) {
        return Err(ProtocolError::NonJson.into());
    }

    let value: serde_json::Value =
        serde_json::from_slice(&reply.body).map_err(|e| AnalyzeError::Parse(e.to_string()))?;

    // The server's own failure shape: `{"error": "...", "success": false}`.
    if let Some(reason) = value.get("error").and_then(|e| e.as_str()) {
        return Err(ProtocolError::Rejected(reason.to_string()).into());
    }

    let body: PredictionBody =
        serde_json::from_value(value).map_err(|e| AnalyzeError::Parse(e.to_string()))?;

    if !body.confidence.is_finite() || !(0.0..=1.0).contains(&body.confidence) {
        return Err(ProtocolError::ConfidenceOutOfRange(body.confidence).into());
    }

    Ok(body)
}
