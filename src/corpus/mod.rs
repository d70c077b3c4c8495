//! Raw corpora: categories, documents and the JSON cache reader.
//!
//! Text extraction from the source PDFs happens upstream; this module only reads the
//! `{"<id>": "<text>"}` caches it leaves behind.

pub mod error;
pub mod loader;
pub mod types;


pub use error::{CorpusError, UnknownCategory};
pub use loader::{CorpusPaths, load_category, load_corpus};
pub use types::{Category, CategoryCorpus, Corpus, RawDocument};
