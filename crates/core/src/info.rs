//! Rendering of the `/api/info` summary.

use chrono::{DateTime, Utc};

/// Timestamp layout used in the summary, e.g. `Mon Oct 19 2026 14:03:12 UTC`.
const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S UTC";

/// Render the info summary for `count` contacts generated at `now`.
///
/// The clock is a parameter so the output is deterministic under test.
pub fn render_info(count: usize, now: DateTime<Utc>) -> String {
    format!(
        "<p>Phonebook has info for {count} people</p>\n<p>{}</p>",
        now.format(TIMESTAMP_FORMAT)
    )
}
