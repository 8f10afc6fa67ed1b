// ============================================================
// Layer 3 — Prediction Domain Type
// ============================================================
// A results file is a flat JSON array:
//
//   [ {"question_id": 1, "answer": "cat"},
//     {"question_id": 2, "answer": "yes"} ]
//
// Anything else a model writes next to the answer is kept
// in `extra` and carried into the result annotation.

use serde::{Deserialize, Serialize};

use super::annotation::Annotation;
use super::{Extra, QuestionId};

/// Typed annotation fields that must not survive in `extra`
const OVERWRITTEN_KEYS: [&str; 4] = ["image_id", "question_type", "answer_type", "answers"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub question_id: QuestionId,
    pub answer:      String,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Prediction {
    pub fn new(question_id: QuestionId, answer: impl Into<String>) -> Self {
        Self { question_id, answer: answer.into(), extra: Extra::new() }
    }

    /// Turn this prediction into an annotation, copying the image id
    /// and both type tags from the original annotation.
    /// Same-named keys the prediction carried are overwritten.
    pub fn enrich(mut self, original: &Annotation) -> Annotation {
        for key in OVERWRITTEN_KEYS {
            self.extra.remove(key);
        }

        Annotation {
            question_id:   self.question_id,
            image_id:      original.image_id,
            question_type: original.question_type.clone(),
            answer_type:   original.answer_type.clone(),
            answers:       Vec::new(),
            answer:        Some(self.answer),
            extra:         self.extra,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::annotation::Answer;

    #[test]
    fn test_enrich_copies_tags_from_original() {
        let original = Annotation::new(7, 70, "is the", "yes/no", vec![Answer::new(1, "no")]);
        let ann      = Prediction::new(7, "yes").enrich(&original);

        assert_eq!(ann.image_id, 70);
        assert_eq!(ann.question_type, "is the");
        assert_eq!(ann.answer_type, "yes/no");
        assert_eq!(ann.answer.as_deref(), Some("yes"));
        assert!(ann.answers.is_empty());
    }

    #[test]
    fn test_enrich_drops_stale_typed_keys() {
        let original = Annotation::new(7, 70, "is the", "yes/no", Vec::new());
        let mut pred = Prediction::new(7, "yes");
        pred.extra.insert("answer_type".into(), serde_json::json!("other"));
        pred.extra.insert("score".into(), serde_json::json!(0.5));

        let ann = pred.enrich(&original);
        assert_eq!(ann.answer_type, "yes/no");
        assert!(ann.extra.get("answer_type").is_none());
        assert_eq!(ann.extra.get("score"), Some(&serde_json::json!(0.5)));
    }
}
