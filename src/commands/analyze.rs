use crate::commands::render::print_modal;
use crate::error::AppError;
use crate::models::analysis_types::{AnalysisResult, Completion};
use crate::models::ui_types::UiState;
use crate::services::fs_service;
use crate::services::orchestrator::RequestOrchestrator;
use crate::services::presentation::PresentationStateMachine;
use std::path::Path;
use tokio::sync::mpsc;

/// Select, analyze, wait, close. Returns the result that was shown.
pub async fn analyze_image(
    orchestrator: RequestOrchestrator,
    image: &Path,
    json: bool,
) -> Result<AnalysisResult, AppError> {
    let file = fs_service::load_selected_file(image).await?;
    if !file.looks_like_image() {
        tracing::warn!(file = %file.name, mime = %file.mime_type, "file does not look like an image, sending anyway");
    }
    if file.is_empty() {
        tracing::warn!(file = %file.name, "file is empty, the server will likely reject it");
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<Completion>();
    let mut machine = PresentationStateMachine::new(orchestrator, tx);
    machine.select_file(file);
    if machine.begin_analyze().is_none() {
        return Err("Nothing to analyze".into());
    }
    if !json {
        print_modal(machine.modal());
    }

    while let Some(done) = rx.recv().await {
        if machine.resolve(done) {
            break;
        }
    }

    let result = match machine.state() {
        UiState::Result(result) => result.clone(),
        other => return Err(format!("Analysis ended in state {}", other.name()).into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_modal(machine.modal());
    }

    machine.close();
    Ok(result)
}
