// ============================================================
// Layer 3 — Annotation Domain Type
// ============================================================
// One annotation per question. It carries the coarse
// answer_type (yes/no, number, other), the finer
// question_type ("what color is the", "is there a", ...),
// and the human answers collected for that question.
//
// Annotations built from predictions (see prediction.rs)
// have no human answers but a single predicted `answer`.
//
// Reference: Rust Book §5 (Structs and Methods)

use serde::{Deserialize, Serialize};

use super::{Extra, ImageId, QuestionId};

/// A single human answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub answer_id: u32,
    pub answer:    String,

    /// e.g. answer_confidence
    #[serde(flatten)]
    pub extra: Extra,
}

impl Answer {
    pub fn new(answer_id: u32, answer: impl Into<String>) -> Self {
        Self { answer_id, answer: answer.into(), extra: Extra::new() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub question_id:   QuestionId,
    pub image_id:      ImageId,
    pub question_type: String,
    pub answer_type:   String,

    #[serde(default)]
    pub answers: Vec<Answer>,

    /// Predicted answer, only set on result annotations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// e.g. multiple_choice_answer
    #[serde(flatten)]
    pub extra: Extra,
}

impl Annotation {
    pub fn new(
        question_id:   QuestionId,
        image_id:      ImageId,
        question_type: impl Into<String>,
        answer_type:   impl Into<String>,
        answers:       Vec<Answer>,
    ) -> Self {
        Self {
            question_id,
            image_id,
            question_type: question_type.into(),
            answer_type:   answer_type.into(),
            answers,
            answer: None,
            extra:  Extra::new(),
        }
    }
}

/// The full annotation document: metadata plus the annotation list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotationFile {
    #[serde(default)]
    pub annotations: Vec<Annotation>,

    /// info, license, data_type, data_subtype, ...
    #[serde(flatten)]
    pub metadata: Extra,
}

impl AnnotationFile {
    pub fn new(annotations: Vec<Annotation>) -> Self {
        Self { annotations, metadata: Extra::new() }
    }

    /// Copy of this document holding only `annotations`, metadata intact
    pub fn with_annotations(&self, annotations: Vec<Annotation>) -> Self {
        Self { annotations, metadata: self.metadata.clone() }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_real_shaped_annotation() {
        let raw = json!({
            "question_id": 1,
            "image_id": 10,
            "question_type": "what",
            "answer_type": "other",
            "multiple_choice_answer": "cat",
            "answers": [
                {"answer_id": 1, "answer": "cat", "answer_confidence": "yes"}
            ]
        });

        let ann: Annotation = serde_json::from_value(raw).unwrap();
        assert_eq!(ann.answers[0].answer, "cat");
        assert_eq!(ann.answers[0].extra.get("answer_confidence"), Some(&json!("yes")));
        assert_eq!(ann.extra.get("multiple_choice_answer"), Some(&json!("cat")));
        assert!(ann.answer.is_none());
    }

    #[test]
    fn test_with_annotations_keeps_metadata() {
        let mut file = AnnotationFile::new(vec![
            Annotation::new(1, 10, "what", "other", vec![Answer::new(1, "cat")]),
        ]);
        file.metadata.insert("data_subtype".into(), json!("val2014"));

        let subset = file.with_annotations(Vec::new());
        assert!(subset.annotations.is_empty());
        assert_eq!(subset.metadata.get("data_subtype"), Some(&json!("val2014")));
    }
}
