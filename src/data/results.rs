// ============================================================
// Layer 4 — Result Index
// ============================================================
// Builds a VqaIndex out of a model's predictions so they can
// be queried exactly like the ground-truth annotations.
//
// Checks, each one fatal:
//   1. the results document is a JSON array
//   2. it covers the same question ids as the annotation
//      file, no more and no fewer
//   3. for multiple-choice question files, every predicted
//      answer is one of that question's choices
//
// Every prediction is then enriched with image_id,
// question_type and answer_type from the original annotation
// and the new index is built from scratch.

use std::collections::HashSet;
use std::time::Instant;

use crate::data::index::VqaIndex;
use crate::domain::annotation::{Annotation, AnnotationFile};
use crate::domain::error::IndexError;
use crate::domain::prediction::Prediction;
use crate::domain::question::QuestionFile;
use crate::domain::QuestionId;

/// Question-file fields copied onto the result annotation document
const CARRIED_FIELDS: [&str; 5] = ["info", "task_type", "data_type", "data_subtype", "license"];

/// Turn a raw results document into predictions.
/// Anything but an array of prediction objects is rejected.
pub fn parse_predictions(raw: serde_json::Value) -> Result<Vec<Prediction>, IndexError> {
    if !raw.is_array() {
        return Err(IndexError::ResultsNotAList);
    }
    serde_json::from_value(raw).map_err(|e| IndexError::MalformedPrediction(e.to_string()))
}

impl VqaIndex {
    /// Validate `predictions` against this index and build a result index
    /// whose questions are `questions`.
    pub fn load_results(
        &self,
        predictions: Vec<Prediction>,
        questions:   QuestionFile,
    ) -> Result<VqaIndex, IndexError> {
        tracing::info!("Loading and preparing results...");
        let started = Instant::now();

        let mut dataset = AnnotationFile::default();
        for key in CARRIED_FIELDS {
            if let Some(value) = self.questions().field(key) {
                dataset.metadata.insert(key.to_string(), value);
            }
        }

        self.check_coverage(&predictions)?;

        let multiple_choice = self
            .questions()
            .task()
            .is_some_and(|task| task.is_multiple_choice());

        let mut annotations: Vec<Annotation> = Vec::with_capacity(predictions.len());
        for prediction in predictions {
            let id = prediction.question_id;
            if multiple_choice && !self.question(id)?.offers_choice(&prediction.answer) {
                return Err(IndexError::AnswerNotAChoice {
                    question_id: id,
                    answer:      prediction.answer,
                });
            }
            let original = self.annotation(id).ok_or(IndexError::UnknownQuestion(id))?;
            annotations.push(prediction.enrich(original));
        }

        tracing::info!("DONE (t={:.2}s)", started.elapsed().as_secs_f64());

        dataset.annotations = annotations;
        VqaIndex::from_documents(Some(dataset), Some(questions), self.policy())
    }

    /// The prediction ids must equal the annotation ids as sets.
    fn check_coverage(&self, predictions: &[Prediction]) -> Result<(), IndexError> {
        let predicted: HashSet<QuestionId> = predictions.iter().map(|p| p.question_id).collect();
        let expected:  HashSet<QuestionId> = self.all_question_ids().into_iter().collect();

        if predicted == expected {
            return Ok(());
        }
        Err(IndexError::CoverageMismatch {
            missing: expected.difference(&predicted).count(),
            extra:   predicted.difference(&expected).count(),
        })
    }
}
