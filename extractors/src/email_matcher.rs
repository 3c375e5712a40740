//! Finds email-shaped substrings in arbitrary text.
//!
//! Text is cut into maximal runs of characters that may appear in an address
//! (including `@`), and each run is accepted or rejected as a whole once
//! trailing punctuation is dropped. A run such as `a@b@c.com` therefore
//! yields nothing rather than `b@c.com`.

use once_cell::sync::Lazy;
use regex::Regex;

static CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9._%+\-@]+").expect("candidate pattern is valid"));

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Lazily yields every email address found in `text`, case preserved.
pub fn find_emails(text: &str) -> impl Iterator<Item = &str> + '_ {
    CANDIDATE.find_iter(text).filter_map(|m| {
        // An address never ends in these: "write to x@y.com." or "x@y.com- today"
        let candidate = m
            .as_str()
            .trim_end_matches(|c: char| matches!(c, '.' | '-' | '%' | '+' | '_'));
        if EMAIL_SHAPE.is_match(candidate) {
            Some(candidate)
        } else {
            None
        }
    })
}

/// True when `text` is exactly one email address.
pub fn is_email(text: &str) -> bool {
    EMAIL_SHAPE.is_match(text)
}
