use super::*;
use crate::corpus::{Category, CategoryCorpus, Corpus};
use crate::embedding::{RerankerError, ScriptedRelevanceModel};

fn finance_corpus() -> Corpus {
    Corpus::new().with_category(CategoryCorpus::from_texts(
        Category::Finance,
        [(1, "aaaabbbb"), (2, "cccc"), (3, "dddd"), (4, "")],
    ))
}

fn request(ids: impl IntoIterator<Item = u64>) -> QueryRequest {
    QueryRequest::new(7, "營收", Category::Finance, ids)
}

fn scripted() -> ScriptedRelevanceModel {
    ScriptedRelevanceModel::new()
        .with_passage_score("aaaa", 0.1)
        .with_passage_score("bbbb", 0.9)
        .with_passage_score("cccc", 0.5)
        .with_passage_score("dddd", 0.2)
}

#[test]
fn test_first_max_picks_first_of_equal_scores() {
    assert_eq!(first_max(&[0.3, 0.8, 0.8, 0.1]), Some((1, 0.8)));
}

#[test]
fn test_first_max_skips_nan() {
    assert_eq!(first_max(&[f32::NAN, 0.2, f32::NAN]), Some((1, 0.2)));
    assert_eq!(first_max(&[f32::NAN]), None);
    assert_eq!(first_max(&[]), None);
}

#[test]
fn test_first_max_handles_negative_logits() {
    assert_eq!(first_max(&[-3.5, -1.25, -7.0]), Some((1, -1.25)));
}

#[test]
fn test_single_candidate_is_selected() {
    let selector = CrossEncoderSelector::new(scripted()).unwrap();
    let outcome = selector
        .score_and_select(&request([2]), &finance_corpus(), 4)
        .unwrap();

    assert_eq!(outcome.document_id(), Some(2));
    assert_eq!(selector.model().call_count(), 1);
}

#[test]
fn test_document_with_best_chunk_wins() {
    let selector = CrossEncoderSelector::new(scripted()).unwrap();
    let outcome = selector
        .score_and_select(&request([3, 1, 2]), &finance_corpus(), 4)
        .unwrap();

    assert_eq!(
        outcome,
        SelectionOutcome::Selected {
            document_id: 1,
            score: 0.9,
            pool_index: 1,
        }
    );
}

#[test]
fn test_all_chunks_scored_in_one_batch_in_id_order() {
    let selector = CrossEncoderSelector::new(scripted()).unwrap();
    selector
        .score_and_select(&request([3, 2, 1]), &finance_corpus(), 4)
        .unwrap();

    let calls = selector.model().calls();
    assert_eq!(calls.len(), 1);
    let passages: Vec<&str> = calls[0].pairs.iter().map(|(_, p)| p.as_str()).collect();
    assert_eq!(passages, vec!["aaaa", "bbbb", "cccc", "dddd"]);
    assert!(calls[0].pairs.iter().all(|(q, _)| q == "營收"));
}

#[test]
fn test_tie_goes_to_lower_document_id() {
    let corpus = Corpus::new().with_category(CategoryCorpus::from_texts(
        Category::Finance,
        [(10, "same"), (5, "same")],
    ));
    let selector =
        CrossEncoderSelector::new(ScriptedRelevanceModel::new().with_default_score(0.4)).unwrap();

    let outcome = selector
        .score_and_select(&request([10, 5]), &corpus, 4)
        .unwrap();
    assert_eq!(outcome.document_id(), Some(5));
}

#[test]
fn test_tie_within_document_goes_to_earlier_chunk() {
    let selector =
        CrossEncoderSelector::new(ScriptedRelevanceModel::new().with_default_score(1.0)).unwrap();
    let outcome = selector
        .score_and_select(&request([1]), &finance_corpus(), 4)
        .unwrap();

    match outcome {
        SelectionOutcome::Selected { pool_index, .. } => assert_eq!(pool_index, 0),
        other => panic!("unexpected outcome: {other}"),
    }
}

#[test]
fn test_empty_pool_returns_no_candidates_without_scoring() {
    let selector = CrossEncoderSelector::new(scripted()).unwrap();

    let no_ids = selector
        .score_and_select(&request([]), &finance_corpus(), 4)
        .unwrap();
    assert_eq!(no_ids, SelectionOutcome::NoCandidates);

    let empty_doc = selector
        .score_and_select(&request([4]), &finance_corpus(), 4)
        .unwrap();
    assert_eq!(empty_doc, SelectionOutcome::NoCandidates);

    assert_eq!(selector.model().call_count(), 0);
}

#[test]
fn test_missing_document_is_an_error() {
    let selector = CrossEncoderSelector::new(scripted()).unwrap();
    let err = selector
        .score_and_select(&request([1, 99]), &finance_corpus(), 4)
        .unwrap_err();

    assert!(matches!(
        err,
        ScoringError::DocumentNotFound {
            category: Category::Finance,
            document_id: 99,
        }
    ));
    assert_eq!(selector.model().call_count(), 0);
}

#[test]
fn test_unloaded_category_is_an_error() {
    let selector = CrossEncoderSelector::new(scripted()).unwrap();
    let faq = QueryRequest::new(1, "q", Category::Faq, [1]);

    let err = selector
        .score_and_select(&faq, &finance_corpus(), 4)
        .unwrap_err();
    assert!(matches!(
        err,
        ScoringError::CategoryNotLoaded {
            category: Category::Faq
        }
    ));
}

#[test]
fn test_zero_chunk_size_is_rejected() {
    let selector = CrossEncoderSelector::new(scripted()).unwrap();
    let err = selector
        .score_and_select(&request([1]), &finance_corpus(), 0)
        .unwrap_err();

    assert!(matches!(err, ScoringError::Structure(_)));
}

#[test]
fn test_model_failure_propagates() {
    let selector =
        CrossEncoderSelector::new(ScriptedRelevanceModel::new().failing("device lost")).unwrap();
    let err = selector
        .score_and_select(&request([1]), &finance_corpus(), 4)
        .unwrap_err();

    assert!(matches!(
        err,
        ScoringError::Reranker(RerankerError::InferenceFailed { .. })
    ));
}

struct ShortModel;

impl crate::embedding::RelevanceModel for ShortModel {
    fn score_pairs(&self, _pairs: &[(&str, &str)]) -> Result<Vec<f32>, RerankerError> {
        Ok(vec![0.5])
    }
}

#[test]
fn test_score_count_mismatch_is_an_error() {
    let selector = CrossEncoderSelector::new(ShortModel).unwrap();
    let err = selector
        .score_and_select(&request([1, 2]), &finance_corpus(), 4)
        .unwrap_err();

    assert!(matches!(err, ScoringError::ComputationFailed { .. }));
}

#[test]
fn test_rank_chunks_keeps_pool_order() {
    let selector = CrossEncoderSelector::new(scripted()).unwrap();
    let ranked = selector
        .rank_chunks(&request([2, 1]), &finance_corpus(), 4)
        .unwrap();

    let ids: Vec<u64> = ranked.iter().map(ScoredChunk::document_id).collect();
    assert_eq!(ids, vec![1, 1, 2]);
    let scores: Vec<f32> = ranked.iter().map(|c| c.relevance_score).collect();
    assert_eq!(scores, vec![0.1, 0.9, 0.5]);
}

#[test]
fn test_insurance_pool_uses_header_chunks() {
    let corpus = Corpus::new().with_category(CategoryCorpus::from_texts(
        Category::Insurance,
        [(3, "\n第一條 契約構成\n本契約條款。\n第二條 名詞定義\n被保險人。")],
    ));
    let selector =
        CrossEncoderSelector::new(ScriptedRelevanceModel::new().with_default_score(0.0)).unwrap();
    let pool = selector
        .build_pool(
            &QueryRequest::new(1, "q", Category::Insurance, [3]),
            &corpus,
            512,
        )
        .unwrap();

    assert!(pool.len() >= 2);
    assert!(pool.iter().all(|c| c.document_id == 3));
    assert!(pool.iter().any(|c| c.content.starts_with("第一條")));
}

#[test]
fn test_outcome_display() {
    let selected = SelectionOutcome::Selected {
        document_id: 42,
        score: 0.5,
        pool_index: 0,
    };
    assert_eq!(selected.to_string(), "SELECTED 42 (score: 0.5000)");
    assert_eq!(SelectionOutcome::NoCandidates.to_string(), "NO_CANDIDATES");
    assert_eq!(SelectionOutcome::NoCandidates.debug_status(), "NO_CANDIDATES");
    assert!(selected.is_selected());
}
