//! Request interpretation: turns a method string and a raw path suffix into
//! the normalized `(method, id, title)` triple the dispatcher works with.
//!
//! The decoding step is deliberately narrow: only `%20`, `%2F`, and `+` are
//! substituted. Any other escape sequence passes through unmodified.

/// Normalized request fields produced by [`interpret`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFields {
    /// HTTP method, `GET` when absent.
    pub method: String,
    /// First path segment when it is all digits.
    pub id: Option<String>,
    /// Title segment, dropped when purely numeric.
    pub title: Option<String>,
}

/// Interpret a request into its normalized fields.
///
/// `raw_path` is the still-encoded path suffix — the request path with the
/// leading `/` stripped, e.g. `"42/Buy%20milk"`.
pub fn interpret(method: Option<&str>, raw_path: &str) -> RequestFields {
    let decoded = decode_path_suffix(raw_path);
    RequestFields {
        method: method
            .filter(|m| !m.is_empty())
            .unwrap_or("GET")
            .to_string(),
        id: task_id(&decoded),
        title: task_title(&decoded),
    }
}

/// Substitute encoded spaces and slashes. Not a general URL decoder.
fn decode_path_suffix(raw: &str) -> String {
    raw.replace("%20", " ").replace("%2F", "/").replace('+', " ")
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// The task id, when the first path segment is all digits.
fn task_id(decoded: &str) -> Option<String> {
    let first = decoded.split('/').next().unwrap_or("");
    is_numeric(first).then(|| first.to_string())
}

/// The task title: second segment when present, otherwise the first — kept
/// only when the chosen value is not purely numeric. A path of just an id
/// therefore yields no title, and a path of just a title yields no id.
fn task_title(decoded: &str) -> Option<String> {
    if decoded.is_empty() {
        return None;
    }
    let mut parts = decoded.split('/');
    let first = parts.next().unwrap_or("");
    let chosen = parts.next().unwrap_or(first);
    (!is_numeric(chosen)).then(|| chosen.to_string())
}

/// True when a title is present and 6–255 characters long (inclusive).
pub fn title_is_valid(title: Option<&str>) -> bool {
    title.is_some_and(|t| {
        let len = t.chars().count();
        (6..=255).contains(&len)
    })
}
