//! Navigation paths for search results and the search entry point.

use crate::search::SearchRow;
use reqwest::Url;

/// Path of the search results view.
pub const SEARCH_PATH: &str = "/search";

/// Query parameter carrying the search string.
pub const QUERY_PARAM: &str = "q";

/// Placeholder origin; only the path and query of generated URLs are used.
const LOCAL_ORIGIN: &str = "http://localhost/";

/// `/docs/<slug>` for a document row, `/docs/<slug>#<headingId>` for a heading row.
pub fn result_path(row: &SearchRow) -> String {
    match &row.heading_id {
        Some(id) => format!("/docs/{}#{}", row.slug, id),
        None => format!("/docs/{}", row.slug),
    }
}

/// Path of the results view for `query`, or `None` when the trimmed query is empty.
pub fn search_path(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let mut url = Url::parse(LOCAL_ORIGIN).ok()?.join(SEARCH_PATH).ok()?;
    url.query_pairs_mut().append_pair(QUERY_PARAM, query);
    Some(format!("{}?{}", url.path(), url.query().unwrap_or_default()))
}

/// Reads the search string back out of a results-view path or query string.
pub fn query_from_path(path: &str) -> Option<String> {
    let query_string = path.split_once('?').map_or(path, |(_, qs)| qs);
    let query_string = query_string.split('#').next().unwrap_or_default();

    let mut url = Url::parse(LOCAL_ORIGIN).ok()?;
    url.set_query(Some(query_string));
    url.query_pairs()
        .find(|(key, _)| key == QUERY_PARAM)
        .map(|(_, value)| value.into_owned())
}
