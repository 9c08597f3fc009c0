//! Near-duplicate detection.
//!
//! Two layers: a 64-bit simhash (Charikar) fingerprint used to compare
//! whole documents, and a process-wide LRU counter that drops text segments
//! repeated across documents (typical for per-site boilerplate that survives
//! the DOM-level filters).

use std::sync::{LazyLock, Mutex, MutexGuard};

use sha2::{Digest, Sha256};

use crate::lru::LruCache;
use crate::options::Options;

/// Number of tokens sampled into the simhash.
const SAMPLE_SIZE: usize = 64;

/// Capacity of the process-wide segment counter.
const SEGMENT_CACHE_SIZE: usize = 4096;

static SEGMENT_COUNTER: LazyLock<Mutex<LruCache>> =
    LazyLock::new(|| Mutex::new(LruCache::new(SEGMENT_CACHE_SIZE)));

fn segment_counter() -> MutexGuard<'static, LruCache> {
    match SEGMENT_COUNTER.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Empty the process-wide duplicate counter.
///
/// Callers must ensure no extraction is in flight.
pub fn reset_caches() {
    segment_counter().clear();
    tracing::debug!("deduplication caches reset");
}

/// Check a text segment against the process-wide counter and record it.
///
/// Returns `true` when the segment has already been seen more than
/// `max_repetitions` times. Segments at or below `min_duplcheck_size`
/// characters are never counted. Counting is keyed on the exact text (via
/// a content hash) so that near-duplicates stay independent; similarity
/// search is what [`simhash`] is for.
pub fn seen_too_often(text: &str, options: &Options) -> bool {
    let trimmed = text.trim();
    if trimmed.chars().count() <= options.min_duplcheck_size {
        return false;
    }
    let digest = Sha256::digest(trimmed.as_bytes());
    let key: String = digest[..16].iter().map(|b| format!("{b:02x}")).collect();
    let count = segment_counter().increment(&key);
    count > options.max_repetitions
}

/// Sample tokens for hashing.
///
/// Tokens are whitespace-split words, stripped of surrounding punctuation
/// and kept only when fully alphanumeric. To bias the sample toward content
/// words, the longest minimum length `L` (from 4 down to 0) such that at
/// least half the tokens are longer than `L` is applied. Text without any
/// such tokens (e.g. fully CJK input without spaces) falls back to replacing
/// punctuation with spaces and re-splitting.
#[must_use]
pub fn sample_tokens(text: &str) -> Vec<String> {
    let tokens = alnum_tokens(text);
    if tokens.is_empty() {
        let respaced: String = text
            .chars()
            .map(|c| if c.is_ascii_punctuation() || c.is_whitespace() { ' ' } else { c })
            .collect();
        return respaced
            .split_whitespace()
            .take(SAMPLE_SIZE)
            .map(ToString::to_string)
            .collect();
    }

    let half = tokens.len() / 2;
    for min_len in (1..=4).rev() {
        let qualifying = tokens.iter().filter(|t| t.chars().count() > min_len).count();
        if qualifying >= half {
            return tokens
                .iter()
                .filter(|t| t.chars().count() > min_len)
                .take(SAMPLE_SIZE)
                .cloned()
                .collect();
        }
    }
    tokens.into_iter().take(SAMPLE_SIZE).collect()
}

fn alnum_tokens(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty() && w.chars().all(char::is_alphanumeric))
        .map(ToString::to_string)
        .collect()
}

fn hash_token(token: &str) -> u64 {
    let digest = Sha256::digest(token.as_bytes());
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(bytes)
}

/// 64-bit locality-sensitive hash of a text sample.
///
/// Each sampled token votes on every bit position: +1 when the token hash
/// has the bit set, -1 otherwise. Accumulated non-negative components set
/// the corresponding output bit.
#[must_use]
pub fn simhash(text: &str) -> u64 {
    let tokens = sample_tokens(text);
    let mut vector = [0i32; 64];
    for token in &tokens {
        let hash = hash_token(token);
        for (i, component) in vector.iter_mut().enumerate() {
            if hash >> i & 1 == 1 {
                *component += 1;
            } else {
                *component -= 1;
            }
        }
    }

    let mut result = 0u64;
    for (i, component) in vector.iter().enumerate() {
        if *component >= 0 {
            result |= 1 << i;
        }
    }
    result
}

/// Number of differing bits between two fingerprints.
#[must_use]
pub fn hamming_distance(a: u64, b: u64) -> u32 {
    (a ^ b).count_ones()
}

/// Fingerprint similarity in `[0, 1]`.
#[must_use]
pub fn similarity(a: u64, b: u64) -> f64 {
    f64::from(64 - hamming_distance(a, b)) / 64.0
}

/// Document-level fingerprint: simhash of title and raw text, as hex.
#[must_use]
pub fn content_fingerprint(title: &str, raw_text: &str) -> String {
    let combined = format!("{title} {raw_text}");
    format!("{:x}", simhash(&combined))
}
