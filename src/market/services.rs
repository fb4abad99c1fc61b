use serde_json::Value;
use tracing::{error, warn};

use crate::{
    error::AppError,
    llm::{extract_json, CompletionClient},
};

/// Runs one completion and recovers JSON from it.
///
/// `upstream_message` is the generic text returned to the caller when the
/// model call itself fails; the underlying error is only logged.
pub async fn complete_json(
    client: &dyn CompletionClient,
    prompt: &str,
    upstream_message: &'static str,
) -> Result<Value, AppError> {
    let output = client.complete(prompt).await.map_err(|e| {
        error!(error = %e, "completion failed");
        AppError::Upstream(upstream_message)
    })?;

    extract_json(&output).map_err(|_| {
        warn!(len = output.len(), "model output was not JSON");
        AppError::Parse
    })
}
