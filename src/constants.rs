//! Cross-cutting, shared constants.
//!
//! The chunk size and the model's sequence length are independent knobs: chunk size counts
//! characters of source text, the sequence length counts tokens of the `(query, passage)` pair.

/// Default passage window in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 512;

/// Maximum token length of one `(query, passage)` pair fed to the cross-encoder.
pub const DEFAULT_MAX_SEQ_LEN: usize = 512;

/// Era marker prepended to normalized year expressions.
pub const YEAR_ERA_PREFIX: &str = "民國";

/// Number of hierarchical header levels recognized in insurance text.
pub const HEADER_DEPTH: usize = 4;

/// Separator between ancestor headers and segment text in augmented passages.
pub const HEADER_JOIN_SEPARATOR: &str = " ";

/// Separator used when merging consecutive segments under the same header chain.
pub const SEGMENT_MERGE_SEPARATOR: &str = "  \n";
