use super::*;
use crate::constants::{FINGERPRINT_HEX_LEN, LARGE_CONTENT_GUARD_CHARS};

fn words(n: usize) -> String {
    const VOCAB: [&str; 8] = [
        "river", "stone", "lantern", "orbit", "meadow", "signal", "harbor", "quartz",
    ];
    (0..n)
        .map(|i| VOCAB[i % VOCAB.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn test_plain_text_word_count() {
    assert_eq!(count_words("The quick brown fox jumps"), 5);
    assert_eq!(count_words(&words(400)), 400);
    assert_eq!(count_words(""), 0);
}

#[test]
fn test_token_filter_rules() {
    assert!(is_countable_token("hello"));
    assert!(is_countable_token("it's"));
    assert!(is_countable_token("v2"));
    assert!(is_countable_token("42"));

    assert!(!is_countable_token("a"), "single character");
    assert!(!is_countable_token("--"), "no alphanumeric content");
    assert!(!is_countable_token("..."), "no alphanumeric content");
    assert!(!is_countable_token("a;;;"), "majority punctuation");
    assert!(!is_countable_token("div"), "markup word");
    assert!(!is_countable_token("Class"), "markup word, case-insensitive");
    assert!(!is_countable_token("\"href"), "markup word behind punctuation");
}

#[test]
fn test_extract_strips_structural_elements() {
    let html = r#"<html><head><title>Ignored title</title><meta charset="utf-8"></head>
        <body><style>.x { color: red; }</style><script>var tracking = 1;</script>
        <p>Visible paragraph text</p></body></html>"#;

    let text = extract_text(html);
    assert_eq!(text, "Visible paragraph text");
}

#[test]
fn test_extract_strips_ui_chrome_by_class() {
    let html = r#"<div class="app-sidebar">Recent chats list</div>
        <nav class="top-nav">Home Settings</nav>
        <header class="page-header">Banner</header>
        <div class="message">Real conversation content</div>
        <footer class="site-footer">Copyright notice</footer>"#;

    let text = extract_text(html);
    assert_eq!(text, "Real conversation content");
}

#[test]
fn test_extract_keeps_unclassed_containers() {
    let html = "<div><p>Hello there</p></div><section>General Kenobi</section>";
    assert_eq!(extract_text(html), "Hello there General Kenobi");
}

#[test]
fn test_decode_entities() {
    assert_eq!(decode_entities("a&nbsp;b"), "a b");
    assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
    assert_eq!(decode_entities("&quot;hi&quot; &#39;yo&apos;"), "\"hi\" 'yo'");
    assert_eq!(decode_entities("fish &amp; chips"), "fish & chips");
    assert_eq!(decode_entities("&amp;lt;"), "&lt;");
    assert_eq!(decode_entities("&#65;&#66;"), "AB");
    assert_eq!(decode_entities("&#1114112;"), "");
}

#[test]
fn test_extract_collapses_whitespace() {
    assert_eq!(extract_text("  one\n\n two\t three  "), "one two three");
}

#[test]
fn test_large_conversation_is_reextracted_by_turn() {
    let turn = format!("User: {} Assistant: {} ", words(60), words(60));
    let mut content = String::new();
    while content.len() <= LARGE_CONTENT_GUARD_CHARS + 1_000 {
        content.push_str(&turn);
        content.push_str("User: ok ");
    }

    let text = extract_text(&content);

    assert!(!text.contains("User:"), "turn markers should be removed");
    assert!(!text.contains(" ok "), "short turns should be dropped");
    assert!(text.starts_with("river stone"));
}

#[test]
fn test_large_prose_is_reextracted_by_sentence() {
    let sentence = format!("{}. Hi. ", words(12));
    let mut content = String::new();
    while content.len() <= LARGE_CONTENT_GUARD_CHARS + 1_000 {
        content.push_str(&sentence);
    }

    let text = extract_text(&content);

    assert!(!text.contains("Hi"), "short sentences should be dropped");
    assert_eq!(count_words(&text) % 12, 0);
}

#[test]
fn test_large_text_without_substantial_fragments_falls_back_to_stripped() {
    let content = "ab. ".repeat(LARGE_CONTENT_GUARD_CHARS / 4 + 1_000);
    let text = extract_text(&content);
    assert_eq!(text, content.trim_end());
}

#[test]
fn test_canonicalize_outputs() {
    let raw = "<p>Hello   World</p>\n<p>This is SYMBI.</p>";
    let canonical = canonicalize(raw);

    assert_eq!(canonical.word_count, 5);
    assert_eq!(canonical.content_hash.len(), FINGERPRINT_HEX_LEN);
    assert_eq!(canonical.scoring_text, "hello world this is symbi.");
}

#[test]
fn test_canonicalize_is_deterministic() {
    let raw = format!("<div>{}</div>", words(500));
    assert_eq!(canonicalize(&raw), canonicalize(&raw));
}

#[test]
fn test_fingerprint_tracks_raw_content_not_extraction() {
    let plain = canonicalize("Hello world");
    let marked = canonicalize("<b>Hello</b> world");

    assert_eq!(plain.word_count, marked.word_count);
    assert_ne!(plain.content_hash, marked.content_hash);
}
