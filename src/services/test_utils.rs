use crate::error::AppError;
use crate::models::analysis_types::RawReply;
use crate::models::file_types::SelectedFile;
use crate::services::transport::PredictTransport;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub(crate) enum Script {
    Reply(RawReply),
    Fail(&'static str),
}

pub(crate) fn reply(status: u16, content_type: Option<&str>, body: &str) -> Script {
    Script::Reply(RawReply {
        status,
        content_type: content_type.map(str::to_string),
        body: body.as_bytes().to_vec(),
    })
}

pub(crate) fn dog_reply() -> Script {
    reply(
        200,
        Some("application/json"),
        r#"{"prediction":"Dog","confidence":0.87,"success":true}"#,
    )
}

pub(crate) fn dog() -> SelectedFile {
    SelectedFile::new("dog.jpg", "image/jpeg", vec![0xFFu8, 0xD8, 0xFF])
}

/// Answers every call with the same script after `delay`.
pub(crate) struct ScriptedTransport {
    script: Script,
    delay: Duration,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, String, usize)>>,
}

impl ScriptedTransport {
    pub(crate) fn new(script: Script, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            script,
            delay,
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(name, mime, len)` of every uploaded file, in order.
    pub(crate) fn seen(&self) -> Vec<(String, String, usize)> {
        self.seen.lock().unwrap().clone()
    }

    fn answer(&self) -> Result<RawReply, AppError> {
        match &self.script {
            Script::Reply(reply) => Ok(reply.clone()),
            Script::Fail(text) => Err((*text).into()),
        }
    }
}

#[async_trait]
impl PredictTransport for ScriptedTransport {
    async fn post_image(
        &self,
        file: &SelectedFile,
        _cancel: &CancellationToken,
    ) -> Result<RawReply, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((file.name.clone(), file.mime_type.clone(), file.len()));
        tokio::time::sleep(self.delay).await;
        self.answer()
    }

    async fn get_status(&self, _cancel: &CancellationToken) -> Result<RawReply, AppError> {
        tokio::time::sleep(self.delay).await;
        self.answer()
    }
}
