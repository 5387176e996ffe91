use std::sync::OnceLock;

use regex::Regex;

/// A timestamp written in the URL fragment, e.g. `#t=75s`.
/// The seconds suffix is optional.
const FRAGMENT_TIMESTAMP: &str = r"t=(?P<secs>\d+)s?";

static FRAGMENT_TIMESTAMP_RE: OnceLock<Regex> = OnceLock::new();

pub fn fragment_timestamp_re() -> &'static Regex {
    FRAGMENT_TIMESTAMP_RE.get_or_init(|| {
        // The pattern is a constant, it can only fail if the constant is broken
        Regex::new(FRAGMENT_TIMESTAMP).expect("fragment timestamp pattern is valid")
    })
}

/// Find the first fragment timestamp and return its digits
pub fn find_fragment_timestamp(fragment: &str) -> Option<&str> {
    fragment_timestamp_re()
        .captures(fragment)
        .and_then(|cap| cap.name("secs"))
        .map(|m| m.as_str())
}
