//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `DOCSIFT_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_SEQ_LEN};
use crate::corpus::CorpusPaths;
use crate::embedding::RerankerConfig;

/// Run configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `DOCSIFT_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of the per-category corpus caches. Default: `./reference`.
    pub source_path: PathBuf,

    /// Questions file. Default: `./dataset/preliminary/questions_example.json`.
    pub questions_path: PathBuf,

    /// Answers file written at the end of a run. Default: `./dataset/preliminary/pred_retrieve.json`.
    pub output_path: PathBuf,

    /// Cache file name under `<source>/insurance`. Default: `insurance.json`.
    pub insurance_json_name: String,

    /// Cache file name under `<source>/finance`. Default: `finance.json`.
    pub finance_json_name: String,

    /// Cache file name under `<source>/faq`. Default: `faq.json`.
    pub faq_json_name: String,

    /// Reranker model directory. `None` runs the stub scorer.
    pub reranker_path: Option<PathBuf>,

    /// Characters per chunk. Default: `512`.
    pub chunk_size: usize,

    /// Token budget per query/passage pair. Default: `512`.
    pub max_seq_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from("./reference"),
            questions_path: PathBuf::from("./dataset/preliminary/questions_example.json"),
            output_path: PathBuf::from("./dataset/preliminary/pred_retrieve.json"),
            insurance_json_name: "insurance.json".to_string(),
            finance_json_name: "finance.json".to_string(),
            faq_json_name: "faq.json".to_string(),
            reranker_path: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_seq_len: DEFAULT_MAX_SEQ_LEN,
        }
    }
}

impl Config {
    const ENV_SOURCE_PATH: &'static str = "DOCSIFT_SOURCE_PATH";
    const ENV_QUESTIONS_PATH: &'static str = "DOCSIFT_QUESTIONS_PATH";
    const ENV_OUTPUT_PATH: &'static str = "DOCSIFT_OUTPUT_PATH";
    const ENV_INSURANCE_JSON: &'static str = "DOCSIFT_INSURANCE_JSON";
    const ENV_FINANCE_JSON: &'static str = "DOCSIFT_FINANCE_JSON";
    const ENV_FAQ_JSON: &'static str = "DOCSIFT_FAQ_JSON";
    const ENV_CHUNK_SIZE: &'static str = "DOCSIFT_CHUNK_SIZE";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let source_path = Self::parse_path_from_env(Self::ENV_SOURCE_PATH, defaults.source_path);
        let questions_path =
            Self::parse_path_from_env(Self::ENV_QUESTIONS_PATH, defaults.questions_path);
        let output_path = Self::parse_path_from_env(Self::ENV_OUTPUT_PATH, defaults.output_path);
        let insurance_json_name =
            Self::parse_string_from_env(Self::ENV_INSURANCE_JSON, defaults.insurance_json_name);
        let finance_json_name =
            Self::parse_string_from_env(Self::ENV_FINANCE_JSON, defaults.finance_json_name);
        let faq_json_name = Self::parse_string_from_env(Self::ENV_FAQ_JSON, defaults.faq_json_name);
        let reranker_path = Self::parse_optional_path_from_env(RerankerConfig::ENV_MODEL_PATH);
        let chunk_size =
            Self::parse_size_from_env(Self::ENV_CHUNK_SIZE, "chunk size", defaults.chunk_size)?;
        let max_seq_len = Self::parse_size_from_env(
            RerankerConfig::ENV_MAX_SEQ_LEN,
            "max sequence length",
            defaults.max_seq_len,
        )?;

        Ok(Self {
            source_path,
            questions_path,
            output_path,
            insurance_json_name,
            finance_json_name,
            faq_json_name,
            reranker_path,
            chunk_size,
            max_seq_len,
        })
    }

    /// Validates paths and sizes (does not create anything).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_size == 0 {
            return Err(ConfigError::MustBePositive { name: "chunk size" });
        }
        if self.max_seq_len == 0 {
            return Err(ConfigError::MustBePositive {
                name: "max sequence length",
            });
        }

        Self::require_dir(&self.source_path)?;
        Self::require_file(&self.questions_path)?;

        if let Some(parent) = self.output_path.parent()
            && !parent.as_os_str().is_empty()
        {
            Self::require_dir(parent)?;
        }

        if let Some(ref path) = self.reranker_path {
            Self::require_dir(path)?;
        }

        Ok(())
    }

    /// Cache file locations under [`Config::source_path`].
    pub fn corpus_paths(&self) -> CorpusPaths {
        CorpusPaths::under(
            &self.source_path,
            &self.insurance_json_name,
            &self.finance_json_name,
            &self.faq_json_name,
        )
    }

    pub fn reranker_config(&self) -> RerankerConfig {
        let config = match self.reranker_path {
            Some(ref path) => RerankerConfig::new(path.clone()),
            None => RerankerConfig::stub(),
        };
        config.with_max_seq_len(self.max_seq_len)
    }

    fn require_dir(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn require_file(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            return Err(ConfigError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_file() {
            return Err(ConfigError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(())
    }

    fn parse_size_from_env(
        var_name: &str,
        name: &'static str,
        default: usize,
    ) -> Result<usize, ConfigError> {
        match env::var(var_name) {
            Ok(value) => {
                let size: usize =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::NumberParseError {
                            name,
                            value: value.clone(),
                            source: e,
                        })?;

                if size == 0 {
                    return Err(ConfigError::MustBePositive { name });
                }

                Ok(size)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_path_from_env(var_name: &str, default: PathBuf) -> PathBuf {
        env::var(var_name).map(PathBuf::from).unwrap_or(default)
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(default)
    }
}
