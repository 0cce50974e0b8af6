//! Cleanup of model output before it becomes a commit message.

/// Trim the backend output and unwrap a surrounding markdown code fence.
///
/// Models sometimes answer with ```` ```text ... ``` ```` even when asked for
/// plain text. Returns `None` when nothing is left.
pub fn clean_message(raw: &str) -> Option<String> {
    let trimmed = raw.trim();

    let unfenced = match trimmed.strip_prefix("```") {
        Some(rest) => {
            // Drop the info string (e.g. "text") on the opening fence line.
            // A single-line fence has no info string.
            let body = rest.split_once('\n').map_or(rest, |(_, body)| body);
            let body = body.trim_end();
            body.strip_suffix("```").unwrap_or(body)
        }
        None => trimmed,
    };

    let message = unfenced.trim();
    if message.is_empty() {
        None
    } else {
        Some(message.to_string())
    }
}
