// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The index only needs two documents. Where they come from
// (JSON files on disk, an in-memory fixture, a subset that
// was just extracted) is behind this trait.
//
// Implementations:
//   - JsonFileSource → reads both documents from disk (Layer 4)
//   - InMemorySource → hands over documents already in memory
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)

use anyhow::Result;

use crate::domain::annotation::AnnotationFile;
use crate::domain::question::QuestionFile;

// ─── DatasetSource ────────────────────────────────────────────────────────────
/// Anything that can supply the annotation and question documents.
///
/// `None` means the source has no such document; the index is
/// then built empty rather than failing.
pub trait DatasetSource {
    fn annotations(&self) -> Result<Option<AnnotationFile>>;

    fn questions(&self) -> Result<Option<QuestionFile>>;
}

// ─── InMemorySource ───────────────────────────────────────────────────────────
/// Documents that are already parsed.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub annotations: Option<AnnotationFile>,
    pub questions:   Option<QuestionFile>,
}

impl InMemorySource {
    pub fn new(annotations: AnnotationFile, questions: QuestionFile) -> Self {
        Self { annotations: Some(annotations), questions: Some(questions) }
    }
}

impl DatasetSource for InMemorySource {
    fn annotations(&self) -> Result<Option<AnnotationFile>> {
        Ok(self.annotations.clone())
    }

    fn questions(&self) -> Result<Option<QuestionFile>> {
        Ok(self.questions.clone())
    }
}
