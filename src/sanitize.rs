//! Textual pre-filter for model output.
//!
//! Models asked for bare JSON still wrap it in a markdown fence now and then.
//! Nothing here looks at the JSON itself.

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Strip a leading ```` ```json ```` / ```` ``` ```` and a trailing ```` ``` ````,
/// then trim. Repeats until nothing changes, so nested wrappers are peeled
/// and `sanitize(sanitize(x)) == sanitize(x)`.
pub fn sanitize(raw: &str) -> String {
    let mut current = raw.trim();
    loop {
        let next = strip_once(current);
        if next.len() == current.len() {
            break;
        }
        current = next;
    }

    if current.len() == raw.len() {
        tracing::trace!("no fence or padding to strip");
    }

    current.to_string()
}

fn strip_once(s: &str) -> &str {
    let s = s.trim();
    let s = s
        .strip_prefix(JSON_FENCE)
        .or_else(|| s.strip_prefix(FENCE))
        .unwrap_or(s)
        .trim();
    s.strip_suffix(FENCE).unwrap_or(s).trim()
}
