use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::UnknownCategory;
use crate::structure::{ChunkStrategy, DateNormalizer};

/// Document domain. Each category has its own corpus and chunking strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Insurance policy text with article/section structure.
    Insurance,
    /// Financial filings.
    Finance,
    /// FAQ entries.
    Faq,
}

impl Category {
    /// Every category, in load order.
    pub const ALL: [Category; 3] = [Category::Insurance, Category::Finance, Category::Faq];

    /// Wire name (`insurance`, `finance`, `faq`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Insurance => "insurance",
            Category::Finance => "finance",
            Category::Faq => "faq",
        }
    }

    /// How documents of this category are cut into passages.
    pub fn strategy(&self) -> ChunkStrategy {
        match self {
            Category::Insurance => ChunkStrategy::Hierarchical,
            Category::Finance | Category::Faq => ChunkStrategy::Fixed,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "insurance" => Ok(Category::Insurance),
            "finance" => Ok(Category::Finance),
            "faq" => Ok(Category::Faq),
            other => Err(UnknownCategory {
                value: other.to_string(),
            }),
        }
    }
}

/// One source document as extracted from the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDocument {
    pub id: u64,
    pub category: Category,
    pub text: String,
}

impl RawDocument {
    pub fn new(id: u64, category: Category, text: impl Into<String>) -> Self {
        Self {
            id,
            category,
            text: text.into(),
        }
    }
}

/// All documents of one category, keyed by id.
#[derive(Debug, Clone)]
pub struct CategoryCorpus {
    category: Category,
    documents: HashMap<u64, RawDocument>,
}

impl CategoryCorpus {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            documents: HashMap::new(),
        }
    }

    /// Builds a category corpus from `(id, text)` pairs. Later duplicates replace earlier ones.
    pub fn from_texts<I, S>(category: Category, texts: I) -> Self
    where
        I: IntoIterator<Item = (u64, S)>,
        S: Into<String>,
    {
        let documents = texts
            .into_iter()
            .map(|(id, text)| (id, RawDocument::new(id, category, text)))
            .collect();
        Self {
            category,
            documents,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn get(&self, id: u64) -> Option<&RawDocument> {
        self.documents.get(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.documents.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document ids in ascending order.
    pub fn ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.documents.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn map_texts(&self, f: impl Fn(&str) -> String) -> Self {
        let documents = self
            .documents
            .iter()
            .map(|(id, doc)| (*id, RawDocument::new(*id, self.category, f(&doc.text))))
            .collect();
        Self {
            category: self.category,
            documents,
        }
    }
}

/// The loaded corpora. A category may be absent when it was not loaded.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    categories: HashMap<Category, CategoryCorpus>,
}

impl Corpus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a category corpus.
    pub fn with_category(mut self, corpus: CategoryCorpus) -> Self {
        self.insert(corpus);
        self
    }

    pub fn insert(&mut self, corpus: CategoryCorpus) {
        self.categories.insert(corpus.category(), corpus);
    }

    pub fn category(&self, category: Category) -> Option<&CategoryCorpus> {
        self.categories.get(&category)
    }

    pub fn contains_category(&self, category: Category) -> bool {
        self.categories.contains_key(&category)
    }

    pub fn document(&self, category: Category, id: u64) -> Option<&RawDocument> {
        self.category(category).and_then(|c| c.get(id))
    }

    /// Total number of documents across categories.
    pub fn len(&self) -> usize {
        self.categories.values().map(CategoryCorpus::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a new corpus whose finance texts have their dates normalized.
    ///
    /// `self` is left untouched; other categories are cloned as-is.
    pub fn normalize_finance(&self, normalizer: &DateNormalizer) -> Corpus {
        let categories = self
            .categories
            .iter()
            .map(|(category, corpus)| {
                let corpus = match category {
                    Category::Finance => corpus.map_texts(|text| normalizer.normalize_dates(text)),
                    Category::Insurance | Category::Faq => corpus.clone(),
                };
                (*category, corpus)
            })
            .collect();
        Corpus { categories }
    }
}
