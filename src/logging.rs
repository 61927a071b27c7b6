//! Diagnostic logging setup and secret redaction.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use tracing_subscriber::EnvFilter;

static REDACT_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (
            Regex::new(r"(access_token=)[^&\s]+").expect("valid redaction pattern"),
            "${1}***",
        ),
        (
            Regex::new(r#"("?(?:tp_)?access_token"?\s*:\s*"?)[^"\s,}]+"#)
                .expect("valid redaction pattern"),
            "${1}***",
        ),
    ]
});

/// Mask access tokens in a message before it reaches a log line.
pub fn redact(message: &str) -> Cow<'_, str> {
    let mut out = Cow::Borrowed(message);
    for (pattern, replacement) in REDACT_PATTERNS.iter() {
        if pattern.is_match(&out) {
            out = Cow::Owned(pattern.replace_all(&out, *replacement).into_owned());
        }
    }
    out
}

/// Install the stderr subscriber. `RUST_LOG` wins over `default_level`.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("zup={default_level}")));

    // a second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
