//! Document structuring: date normalization, header promotion and chunking.
//!
//! - [`dates`] rewrites traditional-numeral dates in finance text.
//! - [`rules`] promotes structural patterns in insurance text to markdown headers.
//! - [`splitter`] splits promoted text into header-scoped segments.
//! - [`flat`] provides lossless fixed-size windows.
//! - [`DocumentStructurer`] ties them together per category.

pub mod dates;
pub mod error;
pub mod flat;
pub mod rules;
pub mod splitter;
mod structurer;
pub mod types;


pub use dates::{DateNormalizer, numerals_to_digits};
pub use error::StructureError;
pub use flat::{char_windows, structure_flat};
pub use rules::{HeaderPromoter, HeaderRule, PromotedText, Promotion};
pub use splitter::split_by_headers;
pub use structurer::DocumentStructurer;
pub use types::{Chunk, ChunkStrategy, HeaderChain, HeaderLevel, Segment};
