// ABOUTME: Text rules shared by the analysis modules.
// ABOUTME: Chapter timestamp detection, the #shorts marker, hashtags and title keyword extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::stats::frequency_table;

// h:mm, mm:ss or h:mm:ss with no digit touching either end.
static TIMESTAMP_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\D)\d{1,2}:\d{2}(?::\d{2})?(?:\D|$)").unwrap());
static SHORTS_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(?:^|\s)#shorts\b").unwrap());
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-zA-Z]{3,}\b").unwrap());

/// Stop words dropped from title keyword statistics.
pub const KEYWORD_STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "you", "how", "this", "that", "from", "are", "was", "but",
];

/// Stop words dropped when suggesting tags for a single item.
pub const TAG_STOP_WORDS: &[&str] = &["the", "and", "for", "with"];

/// Stop words dropped when writing an example tag set.
pub const EXAMPLE_TAG_STOP_WORDS: &[&str] = &["the", "and", "for", "with", "this", "that", "from"];

/// True when the description carries a chapter-style timestamp.
pub fn has_timestamp(description: &str) -> bool {
    TIMESTAMP_TOKEN.is_match(description)
}

/// True when title or description carries the `#shorts` marker as a token.
pub fn has_shorts_marker(title: &str, description: &str) -> bool {
    SHORTS_MARKER.is_match(&format!("{title} {description}"))
}

pub fn has_hashtag(text: &str) -> bool {
    text.contains('#')
}

/// Length in characters, not bytes.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// First `n` characters of `s`.
pub fn truncate_chars(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}

/// Formats an integer with comma thousands separators (`12345` -> `12,345`).
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Lowercased alphabetic words of three or more letters, in order, minus stop words.
pub fn words(text: &str, stop_words: &[&str]) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|w| !stop_words.contains(&w.as_str()))
        .collect()
}

/// Most frequent keywords across `texts`, ties in first-seen order.
pub fn top_keywords<'a, I>(texts: I, stop_words: &[&str], limit: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut table = frequency_table(texts.into_iter().flat_map(|t| words(t, stop_words)));
    table.truncate(limit);
    table
}
