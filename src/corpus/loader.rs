use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::CorpusError;
use super::types::{Category, CategoryCorpus, Corpus};

/// Locations of the per-category extracted-text caches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusPaths {
    pub insurance: PathBuf,
    pub finance: PathBuf,
    pub faq: PathBuf,
}

impl CorpusPaths {
    /// Lays out caches as `<root>/<category>/<file name>`.
    pub fn under(
        root: &Path,
        insurance_file: &str,
        finance_file: &str,
        faq_file: &str,
    ) -> Self {
        Self {
            insurance: root.join(Category::Insurance.as_str()).join(insurance_file),
            finance: root.join(Category::Finance.as_str()).join(finance_file),
            faq: root.join(Category::Faq.as_str()).join(faq_file),
        }
    }

    pub fn path_for(&self, category: Category) -> &Path {
        match category {
            Category::Insurance => &self.insurance,
            Category::Finance => &self.finance,
            Category::Faq => &self.faq,
        }
    }
}

/// Loads all three categories.
pub fn load_corpus(paths: &CorpusPaths) -> Result<Corpus, CorpusError> {
    let mut corpus = Corpus::new();
    for category in Category::ALL {
        corpus.insert(load_category(paths.path_for(category), category)?);
    }
    info!(documents = corpus.len(), "Corpus loaded");
    Ok(corpus)
}

/// Reads one cache file shaped `{"<id>": <text>, ...}`.
///
/// String values are taken verbatim, `null` becomes an empty document and any other JSON
/// value is kept as its compact JSON text (FAQ entries are stored as structured values).
pub fn load_category(path: &Path, category: Category) -> Result<CategoryCorpus, CorpusError> {
    if !path.exists() {
        return Err(CorpusError::CacheMissing {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
    let raw: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(&content).map_err(|e| CorpusError::parse(path, e))?;

    let mut texts = Vec::with_capacity(raw.len());
    for (key, value) in raw {
        let id: u64 = key
            .trim()
            .parse()
            .map_err(|_| CorpusError::InvalidDocumentId {
                path: path.to_path_buf(),
                key: key.clone(),
            })?;
        texts.push((id, value_to_text(value)));
    }

    debug!(
        category = %category,
        path = %path.display(),
        documents = texts.len(),
        "Loaded category cache"
    );

    Ok(CategoryCorpus::from_texts(category, texts))
}

/// Non-string values become compact JSON with object keys in file order.
fn value_to_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}
