use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

// Non-greedy up to the first matching close tag, across lines.
static SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("script pattern"));
static IFRAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<iframe\b.*?</iframe>").expect("iframe pattern"));
static JAVASCRIPT_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)javascript:").expect("scheme pattern"));
static EVENT_HANDLER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)on[0-9a-z_]+\s*=").expect("handler pattern"));

/// Strip dangerous embedded markup from raw text.
///
/// This is a textual filter, not an HTML sanitizer: complete `<script>` and
/// `<iframe>` elements are dropped, along with every `javascript:` scheme and
/// every `on<word>=` handler pattern. Removal repeats until nothing matches so
/// that stripping one pattern cannot join the halves of another.
pub fn sanitize(raw: &str) -> Cow<'_, str> {
    let mut text = Cow::Borrowed(raw);
    loop {
        let stripped = match strip_once(&text) {
            Cow::Owned(stripped) => stripped,
            Cow::Borrowed(_) => break,
        };
        tracing::debug!(
            removed = text.len() - stripped.len(),
            "stripped dangerous markup"
        );
        text = Cow::Owned(stripped);
    }
    text
}

fn strip_once(text: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(text);
    for re in [&*SCRIPT, &*IFRAME, &*JAVASCRIPT_SCHEME, &*EVENT_HANDLER] {
        let stripped = match re.replace_all(&out, "") {
            Cow::Owned(stripped) => Some(stripped),
            Cow::Borrowed(_) => None,
        };
        if let Some(stripped) = stripped {
            out = Cow::Owned(stripped);
        }
    }
    out
}
