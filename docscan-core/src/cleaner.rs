//! Text cleaning and summary truncation
//!
//! Extracted text is frequently polluted with markup, container signatures
//! and embedded binary blobs. `clean` strips that noise down to a single
//! line of printable text; `summarize` bounds it for the report.

use once_cell::sync::Lazy;
use regex::Regex;

/// Default summary length (characters)
pub const DEFAULT_SUMMARY_LEN: usize = 600;

/// Returned when nothing readable survives cleaning
pub const UNREADABLE_FALLBACK: &str = "Unable to extract readable text from the document.";

/// Appended to truncated summaries
pub const ELLIPSIS: &str = "...";

/// Zip local header, central directory and end-of-central-directory signatures
const CONTAINER_SIGNATURES: &[&str] = &["PK\x03\x04", "PK\x01\x02", "PK\x05\x06"];

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static BASE64_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9+/=]{80,}").expect("valid regex"));

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Strip markup, binary noise and non-printable characters, then collapse
/// whitespace. May return an empty string.
pub fn clean(raw: &str) -> String {
    let text = raw.replace('\0', " ");
    let text = MARKUP_TAG.replace_all(&text, " ");

    let mut text = text.into_owned();
    for signature in CONTAINER_SIGNATURES {
        if text.contains(signature) {
            text = text.replace(signature, " ");
        }
    }

    let text = BASE64_RUN.replace_all(&text, " ");

    let text: String = text
        .chars()
        .map(|ch| if is_printable(ch) { ch } else { ' ' })
        .collect();

    WHITESPACE_RUN.replace_all(&text, " ").trim().to_string()
}

/// Clean `raw` and bound it to `max_len` characters, ellipsis included.
pub fn summarize(raw: &str, max_len: usize) -> String {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return truncate_chars(UNREADABLE_FALLBACK, max_len);
    }
    truncate_chars(&cleaned, max_len)
}

/// Truncate to `max_len` characters; the ellipsis counts against the budget.
fn truncate_chars(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }

    let ellipsis_len = ELLIPSIS.chars().count();
    if max_len <= ellipsis_len {
        return text.chars().take(max_len).collect();
    }

    let body: String = text.chars().take(max_len - ellipsis_len).collect();
    format!("{}{}", body.trim_end(), ELLIPSIS)
}

/// Space is the only printable whitespace; control, format, separator and
/// private-use characters are not printable. Unassigned code points are kept:
/// std has no general-category table to tell them apart from assigned ones.
fn is_printable(ch: char) -> bool {
    if ch == ' ' {
        return true;
    }
    if ch.is_control() || ch.is_whitespace() {
        return false;
    }
    !matches!(
        ch,
        '\u{00AD}'
            | '\u{0600}'..='\u{0605}'
            | '\u{061C}'
            | '\u{06DD}'
            | '\u{070F}'
            | '\u{180E}'
            | '\u{200B}'..='\u{200F}'
            | '\u{202A}'..='\u{202E}'
            | '\u{2060}'..='\u{2064}'
            | '\u{2066}'..='\u{206F}'
            | '\u{E000}'..='\u{F8FF}'
            | '\u{FEFF}'
            | '\u{FFF9}'..='\u{FFFB}'
            | '\u{F0000}'..='\u{10FFFF}'
    )
}
