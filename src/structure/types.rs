use crate::corpus::Category;

/// Depth of a promoted header, `H1` being the outermost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HeaderLevel {
    H1 = 1,
    H2 = 2,
    H3 = 3,
    H4 = 4,
}

impl HeaderLevel {
    /// Levels from outermost to innermost.
    pub const ALL: [HeaderLevel; 4] = [
        HeaderLevel::H1,
        HeaderLevel::H2,
        HeaderLevel::H3,
        HeaderLevel::H4,
    ];

    pub fn depth(self) -> usize {
        self as usize
    }

    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            1 => Some(HeaderLevel::H1),
            2 => Some(HeaderLevel::H2),
            3 => Some(HeaderLevel::H3),
            4 => Some(HeaderLevel::H4),
            _ => None,
        }
    }

    /// Markdown marker for this level (`#` .. `####`).
    pub fn marker(self) -> &'static str {
        match self {
            HeaderLevel::H1 => "#",
            HeaderLevel::H2 => "##",
            HeaderLevel::H3 => "###",
            HeaderLevel::H4 => "####",
        }
    }
}

/// How a category's documents are cut into passages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkStrategy {
    /// Header promotion, header splitting, then fixed-size windows.
    Hierarchical,
    /// Contiguous fixed-size character windows.
    Fixed,
}

/// Active header chain, outermost first.
pub type HeaderChain = Vec<(HeaderLevel, String)>;

/// A retrieval-ready passage tagged with its source document.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    /// Passage text. For hierarchical chunks the ancestor headers are prepended.
    pub content: String,
    pub document_id: u64,
    pub category: Category,
    /// Header chain the passage falls under; empty for fixed-size chunks.
    pub headers: HeaderChain,
}

impl Chunk {
    pub fn flat(content: impl Into<String>, document_id: u64, category: Category) -> Self {
        Self {
            content: content.into(),
            document_id,
            category,
            headers: Vec::new(),
        }
    }

    /// Number of characters (not bytes) in the passage.
    pub fn char_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// A header-delimited section before content augmentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub headers: HeaderChain,
    pub text: String,
}
