// ============================================================
// Layer 3 — Question Domain Type
// ============================================================
// A question file looks like:
//
//   {
//     "info": {...}, "task_type": "OpenEnded",
//     "data_type": "mscoco", "data_subtype": "val2014",
//     "license": {...},
//     "questions": [
//       { "question_id": 262148000, "image_id": 262148,
//         "question": "Where is he looking?" },
//       ...
//     ]
//   }
//
// Multiple-choice question files add a "multiple_choices"
// array to every question.

use serde::{Deserialize, Serialize};

use super::{Extra, ImageId, QuestionId};

/// One natural-language question about an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: QuestionId,
    pub image_id:    ImageId,
    pub question:    String,

    /// Offered choices, only present for the multiple-choice task
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiple_choices: Option<Vec<String>>,

    #[serde(flatten)]
    pub extra: Extra,
}

impl Question {
    pub fn new(question_id: QuestionId, image_id: ImageId, question: impl Into<String>) -> Self {
        Self {
            question_id,
            image_id,
            question: question.into(),
            multiple_choices: None,
            extra: Extra::new(),
        }
    }

    /// Builder-style helper for multiple-choice questions
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.multiple_choices = Some(choices.into_iter().map(Into::into).collect());
        self
    }

    /// True if `answer` is one of the offered choices.
    /// A question without choices accepts nothing.
    pub fn offers_choice(&self, answer: &str) -> bool {
        self.multiple_choices
            .as_ref()
            .is_some_and(|choices| choices.iter().any(|c| c == answer))
    }
}

/// The task a question file was built for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskType {
    OpenEnded,
    MultipleChoice,
    Other(String),
}

impl TaskType {
    /// Several spellings appear in the wild: spaced or hyphenated
    /// inside v1 files, run together in file names.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Multiple Choice" | "Multiple-Choice" | "MultipleChoice" => TaskType::MultipleChoice,
            "Open-Ended" | "OpenEnded"                               => TaskType::OpenEnded,
            other                                                    => TaskType::Other(other.to_string()),
        }
    }

    pub fn is_multiple_choice(&self) -> bool {
        matches!(self, TaskType::MultipleChoice)
    }
}

/// The full question document: metadata plus the question list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_type: Option<String>,

    #[serde(default)]
    pub questions: Vec<Question>,

    /// info, data_type, data_subtype, license, ...
    #[serde(flatten)]
    pub metadata: Extra,
}

impl QuestionFile {
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions, ..Self::default() }
    }

    pub fn task(&self) -> Option<TaskType> {
        self.task_type.as_deref().map(TaskType::parse)
    }

    /// Look up a metadata field, including the typed `task_type`
    pub fn field(&self, key: &str) -> Option<serde_json::Value> {
        if key == "task_type" {
            return self.task_type.clone().map(serde_json::Value::String);
        }
        self.metadata.get(key).cloned()
    }

    /// Copy of this document holding only `questions`, metadata intact
    pub fn with_questions(&self, questions: Vec<Question>) -> Self {
        Self {
            task_type: self.task_type.clone(),
            questions,
            metadata:  self.metadata.clone(),
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_type_spellings() {
        assert!(TaskType::parse("Multiple Choice").is_multiple_choice());
        assert!(TaskType::parse("MultipleChoice").is_multiple_choice());
        assert!(TaskType::parse("Multiple-Choice").is_multiple_choice());
        assert_eq!(TaskType::parse("OpenEnded"), TaskType::OpenEnded);
        assert_eq!(TaskType::parse("Open-Ended"), TaskType::OpenEnded);
        assert_eq!(TaskType::parse("Captioning"), TaskType::Other("Captioning".into()));
    }

    #[test]
    fn test_offers_choice() {
        let q = Question::new(1, 10, "What animal?").with_choices(["cat", "dog"]);
        assert!(q.offers_choice("cat"));
        assert!(!q.offers_choice("bird"));

        // No choices at all → nothing is a valid choice
        assert!(!Question::new(2, 10, "Why?").offers_choice("cat"));
    }

    #[test]
    fn test_metadata_survives_round_trip() {
        let raw = json!({
            "info": {"year": 2015},
            "task_type": "OpenEnded",
            "data_subtype": "val2014",
            "questions": [
                {"question_id": 5, "image_id": 50, "question": "Is it red?", "note": "kept"}
            ]
        });

        let file: QuestionFile = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(file.task(), Some(TaskType::OpenEnded));
        assert_eq!(file.field("data_subtype"), Some(json!("val2014")));
        assert_eq!(file.questions[0].extra.get("note"), Some(&json!("kept")));

        let back = serde_json::to_value(&file).unwrap();
        assert_eq!(back, raw);
    }
}
