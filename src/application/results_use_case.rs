// ============================================================
// Layer 2 — Results Use Case
// ============================================================
// Checks a results file against the ground truth and builds
// the result index from it.
//
//   Step 1: Load the ground-truth index             (Layer 4)
//   Step 2: Read the results file and the questions
//           the result index should use             (Layer 4)
//   Step 3: Validate + enrich + rebuild             (Layer 4)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::index::{DuplicatePolicy, VqaIndex};
use crate::data::loader::{read_json, JsonFileSource};
use crate::data::results::parse_predictions;
use crate::domain::question::QuestionFile;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultsConfig {
    pub annotation_file: PathBuf,
    pub question_file:   PathBuf,
    pub results_file:    PathBuf,
    /// Questions for the result index; defaults to `question_file`
    pub result_question_file: Option<PathBuf>,
    pub strict:          bool,
}

pub struct ResultsUseCase {
    config: ResultsConfig,
}

impl ResultsUseCase {
    pub fn new(config: ResultsConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<VqaIndex> {
        let cfg = &self.config;

        let source = JsonFileSource::new(&cfg.annotation_file, &cfg.question_file);
        let policy = DuplicatePolicy::from_strict(cfg.strict);
        let truth  = VqaIndex::load(&source, policy)?;

        let raw: serde_json::Value = read_json(&cfg.results_file)?;
        let predictions = parse_predictions(raw)
            .with_context(|| format!("Invalid results file '{}'", cfg.results_file.display()))?;

        let question_path = cfg
            .result_question_file
            .as_ref()
            .unwrap_or(&cfg.question_file);
        let questions: QuestionFile = read_json(question_path)?;

        let result = truth
            .load_results(predictions, questions)
            .with_context(|| format!("Results in '{}' rejected", cfg.results_file.display()))?;

        tracing::info!("Result index holds {} predictions", result.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::index::tests::fixture;
    use crate::domain::error::IndexError;
    use crate::infra::export::write_json;
    use serde_json::json;

    fn setup(results: serde_json::Value) -> (tempfile::TempDir, ResultsConfig) {
        let dir        = tempfile::tempdir().unwrap();
        let (anns, qs) = fixture();
        let cfg = ResultsConfig {
            annotation_file: dir.path().join("ann.json"),
            question_file:   dir.path().join("qs.json"),
            results_file:    dir.path().join("results.json"),
            ..ResultsConfig::default()
        };
        write_json(&cfg.annotation_file, &anns).unwrap();
        write_json(&cfg.question_file, &qs).unwrap();
        write_json(&cfg.results_file, &results).unwrap();
        (dir, cfg)
    }

    #[test]
    fn test_valid_results_build_an_index() {
        let (_dir, cfg) = setup(json!([
            {"question_id": 1, "answer": "cat"},
            {"question_id": 2, "answer": "no"},
            {"question_id": 3, "answer": "2"},
            {"question_id": 4, "answer": "yes"}
        ]));
        let result = ResultsUseCase::new(cfg).execute().unwrap();
        assert_eq!(result.len(), 4);
        assert_eq!(result.annotation(3).unwrap().answer_type, "number");
    }

    #[test]
    fn test_object_instead_of_list_is_rejected() {
        let (_dir, cfg) = setup(json!({"question_id": 1, "answer": "cat"}));
        let err = ResultsUseCase::new(cfg).execute().unwrap_err();
        assert_eq!(err.downcast_ref::<IndexError>(), Some(&IndexError::ResultsNotAList));
    }

    #[test]
    fn test_partial_results_are_rejected() {
        let (_dir, cfg) = setup(json!([{"question_id": 1, "answer": "cat"}]));
        let err = ResultsUseCase::new(cfg).execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<IndexError>(),
            Some(IndexError::CoverageMismatch { missing: 3, extra: 0 })
        ));
    }
}
