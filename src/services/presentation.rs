use crate::models::analysis_types::Completion;
use crate::models::file_types::SelectedFile;
use crate::models::ui_types::{ModalView, UiState};
use crate::services::file_holder::SelectedFileHolder;
use crate::services::orchestrator::RequestOrchestrator;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

struct InFlight {
    id: u64,
    cancel: CancellationToken,
}

/// At most one request is tracked at a time. Completions carrying any
/// other id are dropped by `resolve`.
pub struct PresentationStateMachine {
    state: UiState,
    files: SelectedFileHolder,
    orchestrator: RequestOrchestrator,
    completions: mpsc::UnboundedSender<Completion>,
    in_flight: Option<InFlight>,
    next_request_id: u64,
}

impl PresentationStateMachine {
    pub fn new(
        orchestrator: RequestOrchestrator,
        completions: mpsc::UnboundedSender<Completion>,
    ) -> Self {
        Self {
            state: UiState::Idle,
            files: SelectedFileHolder::new(),
            orchestrator,
            completions,
            in_flight: None,
            next_request_id: 0,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn modal(&self) -> ModalView<'_> {
        ModalView::of(&self.state)
    }

    pub fn selected_file_name(&self) -> Option<&str> {
        self.files.file_name()
    }

    pub fn in_flight_request(&self) -> Option<u64> {
        self.in_flight.as_ref().map(|f| f.id)
    }

    pub fn select_file(&mut self, file: SelectedFile) {
        self.cancel_in_flight("superseded by a new selection");
        tracing::debug!(file = %file.name, mime = %file.mime_type, bytes = file.len(), "file selected");
        self.files.select(file);
        self.transition(UiState::FileChosen);
    }

    pub fn begin_analyze(&mut self) -> Option<u64> {
        if !matches!(self.state, UiState::FileChosen) {
            tracing::debug!(state = self.state.name(), "analyze ignored");
            return None;
        }
        let file = self.files.current()?;

        self.next_request_id += 1;
        let id = self.next_request_id;
        let cancel = CancellationToken::new();

        let orchestrator = self.orchestrator.clone();
        let completions = self.completions.clone();
        let token = cancel.clone();
        tokio::spawn(async move {
            let result = orchestrator.analyze_with_cancel(&file, token).await;
            // Receiver gone means nobody is watching any more.
            let _ = completions.send(Completion {
                request_id: id,
                result,
            });
        });

        self.in_flight = Some(InFlight { id, cancel });
        self.transition(UiState::Analyzing);
        Some(id)
    }

    /// Applies a finished request. Returns `false` if it was stale and dropped.
    pub fn resolve(&mut self, completion: Completion) -> bool {
        let current = match &self.in_flight {
            Some(flight) if flight.id == completion.request_id => flight.id,
            _ => {
                tracing::debug!(request_id = completion.request_id, "discarding stale completion");
                return false;
            }
        };
        if !matches!(self.state, UiState::Analyzing) {
            tracing::debug!(request_id = current, state = self.state.name(), "discarding completion");
            return false;
        }

        self.in_flight = None;
        self.transition(UiState::Result(completion.result));
        true
    }

    pub fn close(&mut self) {
        self.cancel_in_flight("modal closed");
        self.files.clear();
        self.transition(UiState::Idle);
    }

    fn cancel_in_flight(&mut self, why: &str) {
        if let Some(flight) = self.in_flight.take() {
            tracing::debug!(request_id = flight.id, why, "cancelling request");
            flight.cancel.cancel();
        }
    }

    fn transition(&mut self, next: UiState) {
        tracing::debug!(from = self.state.name(), to = next.name(), "ui transition");
        self.state = next;
    }
}

impl Drop for PresentationStateMachine {
    fn drop(&mut self) {
        self.cancel_in_flight("state machine dropped");
    }
}
