//! Hashtag extraction and removal
//!
//! A hashtag is `#` followed by one or more word characters, the same
//! token in both directions: [`extract_hashtags`] returns exactly the
//! spans that [`strip_hashtags`] deletes.

use regex::Regex;
use smallvec::SmallVec;
use std::sync::OnceLock;

/// Hashtag tokens borrowed from the source text, in order of appearance
///
/// Posts rarely carry more than a handful of tags, so the first four are
/// stored inline.
pub type Hashtags<'a> = SmallVec<[&'a str; 4]>;

static HASHTAG_PATTERN: OnceLock<Regex> = OnceLock::new();

fn hashtag_regex() -> &'static Regex {
    HASHTAG_PATTERN.get_or_init(|| Regex::new(r"#\w+").expect("hashtag pattern must compile"))
}

/// Collect every hashtag token in `text`
///
/// Duplicates are preserved and tokens keep their original casing.
pub fn extract_hashtags(text: &str) -> Hashtags<'_> {
    hashtag_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Remove every hashtag token from `text`
///
/// Surrounding whitespace is left as is; callers trim where needed.
pub fn strip_hashtags(text: &str) -> String {
    hashtag_regex().replace_all(text, "").into_owned()
}
