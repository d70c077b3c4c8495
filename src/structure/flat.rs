use super::error::StructureError;
use super::types::Chunk;
use crate::corpus::RawDocument;

/// Cuts `text` into contiguous windows of `size` characters. The last window may be shorter.
///
/// Windows count Unicode scalar values, so multi-byte text is never split mid-character.
pub fn char_windows(text: &str, size: usize) -> Result<Vec<&str>, StructureError> {
    if size == 0 {
        return Err(StructureError::InvalidChunkSize { chunk_size: size });
    }

    let mut windows = Vec::with_capacity(text.len() / size + 1);
    let mut start = 0;
    let mut count = 0;

    for (idx, _) in text.char_indices() {
        if count == size {
            windows.push(&text[start..idx]);
            start = idx;
            count = 0;
        }
        count += 1;
    }
    if start < text.len() {
        windows.push(&text[start..]);
    }

    Ok(windows)
}

/// Fixed-size split with no overlap and no header context.
pub fn structure_flat(document: &RawDocument, chunk_size: usize) -> Result<Vec<Chunk>, StructureError> {
    Ok(char_windows(&document.text, chunk_size)?
        .into_iter()
        .map(|window| Chunk::flat(window, document.id, document.category))
        .collect())
}
