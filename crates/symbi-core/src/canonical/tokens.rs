/// Attribute and tag names that survive markup stripping and should not count as words.
const MARKUP_WORDS: &[&str] = &[
    "div",
    "span",
    "class",
    "classname",
    "style",
    "href",
    "src",
    "nbsp",
    "px",
    "rel",
    "alt",
    "img",
    "br",
    "ul",
    "li",
    "td",
    "tr",
    "tbody",
    "thead",
    "svg",
    "viewbox",
    "xmlns",
    "aria",
    "onclick",
    "rgba",
    "rgb",
];

/// Returns `true` if a whitespace-delimited token counts as a word.
///
/// Rejected: tokens without any alphanumeric character, tokens shorter than two characters,
/// tokens that are mostly punctuation, and leftover markup vocabulary.
pub fn is_countable_token(token: &str) -> bool {
    let len = token.chars().count();
    if len < 2 {
        return false;
    }

    let alphanumeric = token.chars().filter(|c| c.is_alphanumeric()).count();
    if alphanumeric == 0 {
        return false;
    }

    let punctuation = token
        .chars()
        .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
        .count();
    if punctuation * 2 > len {
        return false;
    }

    let bare = token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    !MARKUP_WORDS.contains(&bare.as_str())
}

/// Counts the words in already-extracted text.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace()
        .filter(|token| is_countable_token(token))
        .count()
}
