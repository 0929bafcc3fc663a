//! Switches a session to a different index location.

use crate::format::format_status;
use crate::session::SearchSession;
use crate::source::source_for;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetIndexRequest {
    /// Index file, directory containing search-index.json, or http(s) URL
    pub location: String,
}

/// Replaces the session's index with the one at `location` and waits for it.
///
/// An unreachable location is not an error: the session falls back to an
/// empty index, which the returned status reports.
pub async fn handle_set_index(
    session: &SearchSession,
    base_path: &str,
    request: SetIndexRequest,
) -> Result<String, String> {
    let location = request.location.trim();
    if location.is_empty() {
        return Err("location must not be empty".to_string());
    }

    let previous = session.source().describe();
    let source = source_for(location, base_path);
    tracing::info!("Switching index from {} to {}", previous, source.describe());

    session.reload(source);
    session.wait_ready().await;

    Ok(format!(
        "Index replaced (previously {})\n\n{}",
        previous,
        format_status(&session.status())
    ))
}
