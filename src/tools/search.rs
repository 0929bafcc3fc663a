//! Fuzzy documentation search handler.

use crate::format::format_outcome;
use crate::i18n::Messages;
use crate::session::{SearchOutcome, SearchSession};
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

/// How long a search waits for a pending index before reporting loading.
pub const LOAD_WAIT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query, e.g. "config" or "api key"
    pub query: String,
    /// Language of the documents to search (default: the configured language)
    #[serde(default)]
    pub lang: Option<String>,
    /// Maximum number of results to return (default: 20)
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Runs the query against the session and formats the outcome.
///
/// Waits up to [`LOAD_WAIT`] for an in-flight index fetch; past that the
/// loading message is returned instead of results.
pub async fn handle_search(
    session: &SearchSession,
    messages: &dyn Messages,
    default_lang: &str,
    request: SearchRequest,
) -> Result<String, String> {
    if tokio::time::timeout(LOAD_WAIT, session.wait_ready())
        .await
        .is_err()
    {
        tracing::debug!("Index still loading after {:?}", LOAD_WAIT);
    }

    let lang = request.lang.as_deref().unwrap_or(default_lang);
    let outcome = match (session.search(&request.query, lang), request.limit) {
        (SearchOutcome::Results(hits), Some(limit)) if limit < hits.len() => {
            SearchOutcome::Results(Arc::new(hits[..limit].to_vec()))
        }
        (outcome, _) => outcome,
    };

    tracing::debug!(
        "search_docs {:?} in {} returned {} hits",
        request.query,
        lang,
        outcome.hits().len()
    );

    Ok(format_outcome(
        &outcome,
        &request.query,
        lang,
        session.settings().snippet_options(),
        messages,
    ))
}
