//! String predicates: length, patterns, membership

use once_cell::sync::Lazy;
use regex::Regex;

static ALPHA: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]+$").expect("valid alpha regex"));

// Comma separated words of three or more word characters, e.g. "rust,wasm,web"
static TAG_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(,?\w{3,})+$").expect("valid tag list regex"));

/// Length in characters, not bytes
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub fn min_length(s: &str, min: usize) -> bool {
    char_len(s) >= min
}

pub fn max_length(s: &str, max: usize) -> bool {
    char_len(s) <= max
}

pub fn length_between(s: &str, min: usize, max: usize) -> bool {
    (min..=max).contains(&char_len(s))
}

/// ASCII letters only
pub fn is_alpha(s: &str) -> bool {
    ALPHA.is_match(s)
}

/// Comma separated tags, each at least three word characters
pub fn is_tag_list(s: &str) -> bool {
    TAG_LIST.is_match(s)
}

pub fn matches_pattern(s: &str, pattern: &Regex) -> bool {
    pattern.is_match(s)
}

/// http(s) URL with a dotted host
pub fn is_valid_url(url: &str) -> bool {
    let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    else {
        return false;
    };

    let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
    !host.is_empty() && host.contains('.') && !host.starts_with('.') && !host.ends_with('.')
}

/// Value restricted to an allowed set
pub fn is_one_of<S: AsRef<str>>(s: &str, allowed: &[S]) -> bool {
    allowed.iter().any(|candidate| candidate.as_ref() == s)
}
