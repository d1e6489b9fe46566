use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::constants::{LARGE_CONTENT_GUARD_CHARS, MAX_EXTRACTED_FRAGMENTS};

/// Fragments shorter than this (in whitespace tokens) are dropped during re-extraction.
const MIN_FRAGMENT_WORDS: usize = 3;

/// Class-name substrings that mark a container as UI chrome.
const CHROME_CLASS_MARKERS: &str = "sidebar|nav|header|footer|menu|toolbar";

/// Container elements checked for UI chrome class names.
const CHROME_TAGS: [&str; 5] = ["div", "nav", "header", "footer", "aside"];

/// Elements removed together with their content.
const STRUCTURAL_TAGS: [&str; 3] = ["head", "style", "script"];

static STRUCTURAL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    STRUCTURAL_TAGS
        .iter()
        .map(|tag| {
            Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("Valid structural element regex")
        })
        .collect()
});

static CHROME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    CHROME_TAGS
        .iter()
        .map(|tag| {
            Regex::new(&format!(
                r#"(?is)<{tag}\b[^>]*\bclass\s*=\s*["'][^"']*(?:{CHROME_CLASS_MARKERS})[^"']*["'][^>]*>.*?</{tag}\s*>"#
            ))
            .expect("Valid UI chrome regex")
        })
        .collect()
});

static META_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("Valid meta tag regex"));

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("Valid markup tag regex"));

static NUMERIC_ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#(\d{1,7});").expect("Valid numeric entity regex"));

static TURN_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:user|assistant|human|ai|claude|chatgpt|system)\s*:")
        .expect("Valid conversational turn regex")
});

static SENTENCE_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+\s+").expect("Valid sentence boundary regex"));

/// Extracts readable text from raw text or markup.
///
/// Removes `head`/`style`/`script`/`meta` elements and UI chrome containers, strips remaining
/// tags, decodes common entities and collapses whitespace. Residual text above
/// [`LARGE_CONTENT_GUARD_CHARS`] is re-extracted from conversational turns or sentences.
pub fn extract_text(raw: &str) -> String {
    let mut text = raw.to_string();

    for pattern in STRUCTURAL_PATTERNS.iter() {
        text = pattern.replace_all(&text, " ").into_owned();
    }
    text = META_TAG.replace_all(&text, " ").into_owned();
    for pattern in CHROME_PATTERNS.iter() {
        text = pattern.replace_all(&text, " ").into_owned();
    }
    text = ANY_TAG.replace_all(&text, " ").into_owned();

    let stripped = collapse_whitespace(&decode_entities(&text));

    if stripped.chars().count() <= LARGE_CONTENT_GUARD_CHARS {
        return stripped;
    }

    match reextract_large(&stripped) {
        Some(fragments) => {
            debug!(
                stripped_len = stripped.len(),
                extracted_len = fragments.len(),
                "Large content re-extracted"
            );
            fragments
        }
        None => {
            debug!(
                stripped_len = stripped.len(),
                "Re-extraction rejected, keeping stripped text"
            );
            stripped
        }
    }
}

/// Decodes the common named entities and decimal numeric references.
pub fn decode_entities(text: &str) -> String {
    let named = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'");

    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &regex::Captures<'_>| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default()
    });

    // `&amp;` last so "&amp;lt;" decodes to the literal "&lt;".
    numeric.replace("&amp;", "&")
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn reextract_large(text: &str) -> Option<String> {
    if TURN_MARKER.find_iter(text).take(2).count() >= 2 {
        let turns = substantial_fragments(&TURN_MARKER, text);
        if !turns.is_empty() && turns.len() <= MAX_EXTRACTED_FRAGMENTS {
            return Some(turns.join(" "));
        }
    }

    let sentences = substantial_fragments(&SENTENCE_BOUNDARY, text);
    if !sentences.is_empty() && sentences.len() <= MAX_EXTRACTED_FRAGMENTS {
        return Some(sentences.join(" "));
    }

    None
}

fn substantial_fragments<'a>(separator: &Regex, text: &'a str) -> Vec<&'a str> {
    separator
        .split(text)
        .map(str::trim)
        .filter(|fragment| fragment.split_whitespace().count() >= MIN_FRAGMENT_WORDS)
        .collect()
}
