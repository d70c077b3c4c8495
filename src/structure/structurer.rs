use tracing::debug;

use super::error::StructureError;
use super::flat::{char_windows, structure_flat};
use super::rules::HeaderPromoter;
use super::splitter::split_by_headers;
use super::types::{Chunk, ChunkStrategy, Segment};
use crate::constants::HEADER_JOIN_SEPARATOR;
use crate::corpus::RawDocument;

/// Turns raw documents into ordered, provenance-tagged chunks.
#[derive(Debug, Clone)]
pub struct DocumentStructurer {
    promoter: HeaderPromoter,
}

impl DocumentStructurer {
    /// Structurer using the insurance header rules.
    pub fn new() -> Result<Self, StructureError> {
        Ok(Self::with_promoter(HeaderPromoter::insurance()?))
    }

    pub fn with_promoter(promoter: HeaderPromoter) -> Self {
        Self { promoter }
    }

    pub fn promoter(&self) -> &HeaderPromoter {
        &self.promoter
    }

    /// Header-aware structuring: promote, split by header, prepend ancestor headers.
    ///
    /// Text without any recognized marker comes back as a single chunk.
    pub fn structure(&self, document: &RawDocument) -> Vec<Chunk> {
        let promoted = self.promoter.promote(&document.text);
        if promoted.is_degenerate() {
            debug!(
                document_id = document.id,
                category = %document.category,
                "No structural markers found, keeping document whole"
            );
        }

        split_by_headers(&promoted.text)
            .into_iter()
            .map(|segment| augment(segment, document))
            .collect()
    }

    /// Chunks a document with its category's strategy, windowed to `chunk_size` characters.
    ///
    /// Hierarchical chunks longer than the window are cut into consecutive windows that keep
    /// the parent's header chain.
    pub fn chunk_document(
        &self,
        document: &RawDocument,
        chunk_size: usize,
    ) -> Result<Vec<Chunk>, StructureError> {
        if chunk_size == 0 {
            return Err(StructureError::InvalidChunkSize { chunk_size });
        }

        match document.category.strategy() {
            ChunkStrategy::Hierarchical => {
                let mut chunks = Vec::new();
                for chunk in self.structure(document) {
                    for window in char_windows(&chunk.content, chunk_size)? {
                        chunks.push(Chunk {
                            content: window.to_string(),
                            document_id: chunk.document_id,
                            category: chunk.category,
                            headers: chunk.headers.clone(),
                        });
                    }
                }
                Ok(chunks)
            }
            ChunkStrategy::Fixed => structure_flat(document, chunk_size),
        }
    }
}

fn augment(segment: Segment, document: &RawDocument) -> Chunk {
    let content = segment
        .headers
        .iter()
        .map(|(_, title)| title.as_str())
        .chain(std::iter::once(segment.text.as_str()))
        .collect::<Vec<_>>()
        .join(HEADER_JOIN_SEPARATOR);

    Chunk {
        content,
        document_id: document.id,
        category: document.category,
        headers: segment.headers,
    }
}
