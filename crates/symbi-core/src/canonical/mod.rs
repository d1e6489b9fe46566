//! Content canonicalization: markup stripping, word counting and fingerprinting.
//!
//! Two independent views of an artifact come out of this module:
//!
//! - The **fingerprint** is computed over the raw content after
//!   [`normalize_for_hash`](crate::hashing::normalize_for_hash). It is the dedup key and must
//!   be a pure function of the content.
//! - The **word count** and **scoring text** come from a best-effort extraction that strips
//!   markup and UI chrome. Extraction is a heuristic, not a canonical form: it can change
//!   between releases without invalidating existing fingerprints.

mod extract;
mod tokens;

#[cfg(test)]
mod tests;

pub use extract::{decode_entities, extract_text};
pub use tokens::{count_words, is_countable_token};

use crate::hashing::content_fingerprint;

/// Canonical view of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalContent {
    /// Filtered token count of the extracted text.
    pub word_count: usize,
    /// Truncated digest of the normalized raw content.
    pub content_hash: String,
    /// Extracted text, lowercased, whitespace collapsed. Input to the scorer.
    pub scoring_text: String,
}

/// Canonicalizes raw text/markup into word count, fingerprint and scoring text.
pub fn canonicalize(raw: &str) -> CanonicalContent {
    let extracted = extract_text(raw);
    let word_count = count_words(&extracted);

    CanonicalContent {
        word_count,
        content_hash: content_fingerprint(raw),
        scoring_text: extracted.to_lowercase(),
    }
}
