// ============================================================
// Layer 4 — JSON Loader
// ============================================================
// Reads the VQA documents from disk with serde_json.
//
// The annotation and question files of the real dataset are
// large (hundreds of MB for train2014), so they are streamed
// through a BufReader instead of read into a String first.
//
// A path that is not configured is not an error: the source
// simply reports "no document" and the index comes up empty.
//
// Reference: serde_json documentation (from_reader)
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::domain::annotation::AnnotationFile;
use crate::domain::question::QuestionFile;
use crate::domain::traits::DatasetSource;

/// Parse one JSON file into any deserialisable type.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Cannot parse JSON in '{}'", path.display()))
}

/// Loads the annotation and question documents from JSON files.
/// Implements the DatasetSource trait from Layer 3.
#[derive(Debug, Clone, Default)]
pub struct JsonFileSource {
    annotation_path: Option<PathBuf>,
    question_path:   Option<PathBuf>,
}

impl JsonFileSource {
    pub fn new(annotation_path: impl Into<PathBuf>, question_path: impl Into<PathBuf>) -> Self {
        Self {
            annotation_path: Some(annotation_path.into()),
            question_path:   Some(question_path.into()),
        }
    }
}

impl DatasetSource for JsonFileSource {
    fn annotations(&self) -> Result<Option<AnnotationFile>> {
        self.annotation_path
            .as_deref()
            .map(read_json::<AnnotationFile>)
            .transpose()
    }

    fn questions(&self) -> Result<Option<QuestionFile>> {
        self.question_path
            .as_deref()
            .map(read_json::<QuestionFile>)
            .transpose()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_reads_both_documents() {
        let dir = tempfile::tempdir().unwrap();
        let ann = dir.path().join("ann.json");
        let qs  = dir.path().join("qs.json");
        fs::write(&ann, r#"{"annotations": [{"question_id": 1, "image_id": 10,
            "question_type": "what", "answer_type": "other",
            "answers": [{"answer_id": 1, "answer": "cat"}]}]}"#).unwrap();
        fs::write(&qs, r#"{"task_type": "OpenEnded", "questions": [
            {"question_id": 1, "image_id": 10, "question": "What is it?"}]}"#).unwrap();

        let source = JsonFileSource::new(&ann, &qs);
        assert_eq!(source.annotations().unwrap().unwrap().annotations.len(), 1);
        assert_eq!(source.questions().unwrap().unwrap().questions[0].question, "What is it?");
    }

    #[test]
    fn test_unconfigured_paths_yield_nothing() {
        let source = JsonFileSource::default();
        assert!(source.annotations().unwrap().is_none());
        assert!(source.questions().unwrap().is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir    = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("nope.json"), dir.path().join("nope2.json"));
        let err    = source.annotations().unwrap_err();
        assert!(err.to_string().contains("Cannot open"));
    }
}
