//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.
//!
//! # Identifier Invariants
//!
//! Neighbor-service identifiers are `ProductId + suffix`, where the suffix is always
//! [`NEIGHBOR_ID_SUFFIX_LEN`] characters. The suffix encodes which index row produced the
//! match (e.g. per-modality or per-image variants) and is never part of the product key.

/// Number of trailing characters appended to every neighbor identifier.
pub const NEIGHBOR_ID_SUFFIX_LEN: usize = 3;

/// Delimiter between category levels when a path is rendered as text.
pub const CATEGORY_DELIMITER: &str = "->";

pub const DEFAULT_NUM_NEIGHBORS: u64 = 5;

pub const DEFAULT_CATEGORY_DEPTH: usize = 4;

pub const DEFAULT_CATEGORY_COLUMNS: [&str; DEFAULT_CATEGORY_DEPTH] =
    ["c0_name", "c1_name", "c2_name", "c3_name"];

pub const DEFAULT_ALLOW_TRAILING_NULLS: bool = true;

/// Output budget for the ranking prompt. One line per candidate fits comfortably.
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 256;

/// Ranking always decodes greedily.
pub const RANKING_TEMPERATURE: f64 = 0.0;

/// Dimension of vectors produced by the stub embedder.
pub const STUB_EMBEDDING_DIM: usize = 128;

/// Splits a neighbor identifier into its product id, dropping the fixed-length suffix.
///
/// Returns `None` when the identifier has no characters left after the suffix.
///
/// # Example
///
/// ```
/// use categorizer::constants::strip_neighbor_suffix;
///
/// assert_eq!(strip_neighbor_suffix("ABC123xyz"), Some("ABC123"));
/// assert_eq!(strip_neighbor_suffix("xyz"), None);
/// ```
pub fn strip_neighbor_suffix(identifier: &str) -> Option<&str> {
    let (cut, _) = identifier
        .char_indices()
        .rev()
        .nth(NEIGHBOR_ID_SUFFIX_LEN - 1)?;
    if cut == 0 {
        return None;
    }
    Some(&identifier[..cut])
}
