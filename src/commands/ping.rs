use crate::error::AppError;
use crate::models::analysis_types::ServerStatus;
use crate::services::orchestrator::RequestOrchestrator;

pub async fn ping(orchestrator: &RequestOrchestrator) -> Result<ServerStatus, AppError> {
    let status = orchestrator.check_health().await?;
    tracing::info!(status = %status.status, success = status.success, "classifier reachable");
    println!("{}", status.status);
    Ok(status)
}
