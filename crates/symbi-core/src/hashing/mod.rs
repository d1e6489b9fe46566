//! Content fingerprints and seeded deterministic draws.

use crate::constants::FINGERPRINT_HEX_LEN;

/// Canonical form used for fingerprinting: trimmed, lowercased, whitespace runs collapsed.
pub fn normalize_for_hash(content: &str) -> String {
    content
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Full 256-bit BLAKE3 digest of the normalized content.
#[inline]
pub fn hash_content(content: &str) -> [u8; 32] {
    *blake3::hash(normalize_for_hash(content).as_bytes()).as_bytes()
}

/// Returns the content fingerprint: the first [`FINGERPRINT_HEX_LEN`] hex characters of the
/// BLAKE3 digest of [`normalize_for_hash`].
///
/// # Collision Budget
///
/// Eight hex characters carry 32 bits. By the birthday bound the probability of at least one
/// collision reaches ~50% around 77,000 distinct artifacts:
///
/// | Distinct artifacts | Collision probability |
/// |--------------------|-----------------------|
/// | 1,000              | ~0.01% |
/// | 10,000             | ~1.2% |
/// | 77,000             | ~50% |
///
/// Deduplication and the duplicate report treat equal fingerprints as identical content, so a
/// collision silently clones one artifact's assessment onto another. The width is kept as-is
/// for compatibility with existing fingerprints.
pub fn content_fingerprint(content: &str) -> String {
    blake3::Hash::from(hash_content(content)).to_hex()[..FINGERPRINT_HEX_LEN].to_string()
}

/// Rolling multiply-add hash over UTF-16 code units (`h * 31 + unit`, wrapping at 32 bits).
#[inline]
pub fn rolling_hash(input: &str) -> i32 {
    input.encode_utf16().fold(0i32, |hash, unit| {
        (hash << 5).wrapping_sub(hash).wrapping_add(unit as i32)
    })
}

/// Deterministic value in `[0, 1)` for `(fingerprint, draw_index)`.
///
/// Separate indices give independent-looking jitter for each sub-score while staying fully
/// reproducible for the same fingerprint.
#[inline]
pub fn seeded_draw(fingerprint: &str, draw_index: u32) -> f64 {
    let seed = format!("{fingerprint}{draw_index}");
    let hash = rolling_hash(&seed);
    (hash.unsigned_abs() % 10_000) as f64 / 10_000.0
}
