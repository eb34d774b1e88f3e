use build_trigger_core::contract::{BuildRequest, BuildStartError, SUCCESS_MESSAGE};
use lambda_runtime::tracing;
use serde_json::Value;

use crate::adapters::build_service::BuildStarter;

/// Starts the configured build project and returns the fixed greeting.
///
/// The event is accepted for signature compatibility only. A failed start is
/// returned to the caller untouched so the invocation is reported as failed.
pub fn handle_trigger_event(
    _event: &Value,
    starter: &dyn BuildStarter,
) -> Result<String, BuildStartError> {
    let request = BuildRequest::default_project();
    tracing::info!(project_name = %request.project_name, "starting build");

    let ack = starter.start_build(&request).inspect_err(|error| {
        tracing::error!(project_name = %request.project_name, %error, "build start failed");
    })?;
    tracing::debug!(
        build_id = ack.build_id.as_deref().unwrap_or("<none>"),
        build_status = ack.build_status.as_deref().unwrap_or("<none>"),
        "build start accepted"
    );

    Ok(SUCCESS_MESSAGE.to_string())
}
