//! Index status handler.

use crate::format::format_status;
use crate::session::SearchSession;

/// Reports whether the index is loaded, and what it holds.
pub fn handle_index_status(session: &SearchSession) -> String {
    format_status(&session.status())
}
