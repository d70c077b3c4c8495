//! End-to-end retrieval over JSON fixtures: load, normalize, select, write.

mod common;

use common::fixtures::{DatasetBuilder, FINANCE_REPORT, INSURANCE_POLICY, read_answers};
use docsift::corpus::{Category, load_corpus};
use docsift::embedding::{Reranker, ScriptedRelevanceModel};
use docsift::pipeline::{PipelineError, RetrievalPipeline, load_questions, write_answers};
use docsift::scoring::CrossEncoderSelector;
use docsift::structure::DateNormalizer;
use serde_json::json;
use tempfile::TempDir;

fn scripted_pipeline(model: ScriptedRelevanceModel) -> RetrievalPipeline<ScriptedRelevanceModel> {
    RetrievalPipeline::new(CrossEncoderSelector::new(model).unwrap(), 512).unwrap()
}

#[test]
fn test_full_run_writes_answers_in_question_order() {
    let dir = TempDir::new().unwrap();
    let config = DatasetBuilder::new()
        .insurance(1, INSURANCE_POLICY)
        .insurance(2, "本附約之保險期間為一年。")
        .finance(10, FINANCE_REPORT)
        .finance(11, "董事會決議發放現金股利。")
        .faq(20, json!([{"question": "如何申請理賠?", "answers": ["備齊文件"]}]))
        .faq(21, json!("營業時間為平日九點至五點。"))
        .question(3, "faq", &[21, 20], "理賠怎麼申請")
        .question(1, "insurance", &[2, 1], "受益人是誰")
        .question(2, "finance", &[11, 10], "第三季營收")
        .write(&dir);
    config.validate().unwrap();

    let corpus = load_corpus(&config.corpus_paths())
        .unwrap()
        .normalize_finance(&DateNormalizer::new().unwrap());
    let questions = load_questions(&config.questions_path).unwrap();

    let model = ScriptedRelevanceModel::new()
        .with_default_score(-5.0)
        .with_passage_score(
            r#"[{"question":"如何申請理賠?","answers":["備齊文件"]}]"#,
            3.0,
        )
        .with_passage_score("第二條 二、 受益人：指領取保險金之人。", 4.0)
        .with_passage_score(
            "民國112年第3季營業收入較去年同期增加，本季每股盈餘為二元。",
            2.5,
        );
    let pipeline = scripted_pipeline(model);

    let results = pipeline.run(&questions, &corpus).unwrap();
    write_answers(&config.output_path, &results).unwrap();

    assert_eq!(
        read_answers(&config.output_path),
        json!({
            "answers": [
                {"qid": 3, "retrieve": 20},
                {"qid": 1, "retrieve": 1},
                {"qid": 2, "retrieve": 10},
            ]
        })
    );
    assert_eq!(pipeline.selector().model().call_count(), 3);
}

#[test]
fn test_finance_passages_reach_model_normalized() {
    let dir = TempDir::new().unwrap();
    let config = DatasetBuilder::new()
        .finance(10, FINANCE_REPORT)
        .question(1, "finance", &[10], "營收")
        .write(&dir);

    let corpus = load_corpus(&config.corpus_paths())
        .unwrap()
        .normalize_finance(&DateNormalizer::new().unwrap());
    let questions = load_questions(&config.questions_path).unwrap();

    let pipeline = scripted_pipeline(ScriptedRelevanceModel::new());
    pipeline.run(&questions, &corpus).unwrap();

    let calls = pipeline.selector().model().calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].pairs[0].1.starts_with("民國112年第3季"));
}

#[test]
fn test_insurance_passages_carry_header_context() {
    let dir = TempDir::new().unwrap();
    let config = DatasetBuilder::new()
        .insurance(1, INSURANCE_POLICY)
        .question(1, "insurance", &[1], "受益人")
        .write(&dir);

    let corpus = load_corpus(&config.corpus_paths()).unwrap();
    let questions = load_questions(&config.questions_path).unwrap();

    let pipeline = scripted_pipeline(ScriptedRelevanceModel::new());
    pipeline.run(&questions, &corpus).unwrap();

    let calls = pipeline.selector().model().calls();
    let passages: Vec<&str> = calls[0].pairs.iter().map(|(_, p)| p.as_str()).collect();
    assert!(passages.len() > 1);
    assert!(passages.iter().any(|p| p.starts_with("第二條") && p.contains("受益人")));
}

#[test]
fn test_unknown_category_writes_nothing_and_scores_nothing() {
    let dir = TempDir::new().unwrap();
    let config = DatasetBuilder::new()
        .finance(10, FINANCE_REPORT)
        .question(1, "finance", &[10], "營收")
        .question(2, "legal", &[10], "契約")
        .write(&dir);

    let corpus = load_corpus(&config.corpus_paths()).unwrap();
    let questions = load_questions(&config.questions_path).unwrap();

    let pipeline = scripted_pipeline(ScriptedRelevanceModel::new());
    let err = pipeline.run(&questions, &corpus).unwrap_err();

    assert!(matches!(err, PipelineError::UnknownCategory { qid: 2, .. }));
    assert_eq!(pipeline.selector().model().call_count(), 0);
    assert!(!config.output_path.exists());
}

#[test]
fn test_empty_candidates_answer_null() {
    let dir = TempDir::new().unwrap();
    let config = DatasetBuilder::new()
        .faq(1, json!(null))
        .question(1, "faq", &[], "q")
        .question(2, "faq", &[1], "q")
        .write(&dir);

    let corpus = load_corpus(&config.corpus_paths()).unwrap();
    assert_eq!(corpus.document(Category::Faq, 1).unwrap().text, "");
    let questions = load_questions(&config.questions_path).unwrap();

    let pipeline = scripted_pipeline(ScriptedRelevanceModel::new());
    let results = pipeline.run(&questions, &corpus).unwrap();
    write_answers(&config.output_path, &results).unwrap();

    assert_eq!(
        read_answers(&config.output_path),
        json!({"answers": [{"qid": 1, "retrieve": null}, {"qid": 2, "retrieve": null}]})
    );
}

#[test]
fn test_stub_reranker_prefers_overlapping_document() {
    let dir = TempDir::new().unwrap();
    let config = DatasetBuilder::new()
        .faq(1, json!("營業時間為平日九點至五點。"))
        .faq(2, json!("申請理賠需備齊診斷證明書與收據。"))
        .question(1, "faq", &[1, 2], "申請理賠需要什麼")
        .write(&dir);

    let corpus = load_corpus(&config.corpus_paths()).unwrap();
    let questions = load_questions(&config.questions_path).unwrap();

    let reranker = Reranker::load(config.reranker_config()).unwrap();
    assert!(!reranker.is_model_loaded());
    let pipeline = RetrievalPipeline::new(CrossEncoderSelector::new(reranker).unwrap(), 512).unwrap();

    let results = pipeline.run(&questions, &corpus).unwrap();
    assert_eq!(results[0].document_id, Some(2));
}
