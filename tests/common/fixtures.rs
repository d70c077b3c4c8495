//! Test fixtures for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

use docsift::config::Config;

pub const INSURANCE_POLICY: &str = "\n第一條 契約的構成\n本保險單條款、要保書及其他約定書，均為本契約的構成部分。\n第二條 名詞定義\n一、被保險人：指本契約承保之人。\n二、受益人：指領取保險金之人。";

pub const FINANCE_REPORT: &str = "一一二年第三季營業收入較去年同期增加，本季每股盈餘為二元。";

/// Lays out `<root>/reference/{insurance,finance,faq}/*.json` plus a questions file.
#[derive(Default)]
pub struct DatasetBuilder {
    insurance: Vec<(u64, Value)>,
    finance: Vec<(u64, Value)>,
    faq: Vec<(u64, Value)>,
    questions: Vec<Value>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insurance(mut self, id: u64, text: &str) -> Self {
        self.insurance.push((id, Value::String(text.to_string())));
        self
    }

    pub fn finance(mut self, id: u64, text: &str) -> Self {
        self.finance.push((id, Value::String(text.to_string())));
        self
    }

    pub fn faq(mut self, id: u64, value: Value) -> Self {
        self.faq.push((id, value));
        self
    }

    pub fn question(mut self, qid: u64, category: &str, source: &[u64], query: &str) -> Self {
        self.questions.push(json!({
            "qid": qid,
            "source": source,
            "query": query,
            "category": category,
        }));
        self
    }

    /// Writes everything and returns a config pointing at it.
    pub fn write(self, dir: &TempDir) -> Config {
        let source = dir.path().join("reference");
        write_cache(&source.join("insurance").join("insurance.json"), &self.insurance);
        write_cache(&source.join("finance").join("finance.json"), &self.finance);
        write_cache(&source.join("faq").join("faq.json"), &self.faq);

        let questions_path = dir.path().join("questions.json");
        fs::write(
            &questions_path,
            serde_json::to_string(&json!({ "questions": self.questions })).unwrap(),
        )
        .unwrap();

        Config {
            source_path: source,
            questions_path,
            output_path: dir.path().join("pred_retrieve.json"),
            ..Default::default()
        }
    }
}

fn write_cache(path: &Path, entries: &[(u64, Value)]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let map: serde_json::Map<String, Value> = entries
        .iter()
        .map(|(id, value)| (id.to_string(), value.clone()))
        .collect();
    fs::write(path, serde_json::to_string(&Value::Object(map)).unwrap()).unwrap();
}

pub fn read_answers(path: &PathBuf) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}
