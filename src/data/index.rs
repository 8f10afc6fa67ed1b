// ============================================================
// Layer 4 — VQA Index
// ============================================================
// Owns the annotation and question documents and three
// lookup tables derived from them:
//
//   qa        question_id → annotation
//   qqa       question_id → question
//   img_to_qa image_id    → annotations about that image,
//                           in source order
//
// The tables store positions into the owned vectors, so a
// lookup is a hash probe plus a slice index. They are built
// once in `create_index` and never patched; a new dataset
// (subset, result set) gets a brand new VqaIndex.
//
// Filtering follows a two-stage rule shared by
// `question_ids` and `image_ids`:
//
//   1. pick candidates: by key (image id / question id) when
//      keys are given, otherwise every annotation
//   2. narrow by question_type, then by answer_type
//
// Unknown keys contribute nothing. Duplicates are kept.
//
// Reference: Rust Book §8 (HashMap), §13 (Iterators)

use anyhow::Result;
use std::collections::HashMap;
use std::time::Instant;

use crate::domain::annotation::{Annotation, AnnotationFile};
use crate::domain::error::IndexError;
use crate::domain::question::{Question, QuestionFile};
use crate::domain::traits::DatasetSource;
use crate::domain::{ImageId, QuestionId};

/// What to do when a question id shows up twice in one list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Later records overwrite earlier ones in `qa` / `qqa`
    #[default]
    LastWins,
    /// Refuse to build the index
    Reject,
}

impl DuplicatePolicy {
    /// `--strict` on the command line selects `Reject`
    pub fn from_strict(strict: bool) -> Self {
        if strict { DuplicatePolicy::Reject } else { DuplicatePolicy::LastWins }
    }
}

// ─── Filters ──────────────────────────────────────────────────────────────────

/// Filter for `VqaIndex::question_ids`. Empty fields don't restrict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub image_ids:      Vec<ImageId>,
    pub question_types: Vec<String>,
    pub answer_types:   Vec<String>,
}

impl QuestionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn image_ids(mut self, ids: impl IntoIterator<Item = ImageId>) -> Self {
        self.image_ids.extend(ids);
        self
    }

    pub fn question_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.question_types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn answer_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.answer_types.extend(types.into_iter().map(Into::into));
        self
    }
}

/// Filter for `VqaIndex::image_ids`. Empty fields don't restrict.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageFilter {
    pub question_ids:   Vec<QuestionId>,
    pub question_types: Vec<String>,
    pub answer_types:   Vec<String>,
}

impl ImageFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question_ids(mut self, ids: impl IntoIterator<Item = QuestionId>) -> Self {
        self.question_ids.extend(ids);
        self
    }

    pub fn question_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.question_types.extend(types.into_iter().map(Into::into));
        self
    }

    pub fn answer_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.answer_types.extend(types.into_iter().map(Into::into));
        self
    }
}

// ─── VqaIndex ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct VqaIndex {
    dataset:   AnnotationFile,
    questions: QuestionFile,
    qa:        HashMap<QuestionId, usize>,
    qqa:       HashMap<QuestionId, usize>,
    img_to_qa: HashMap<ImageId, Vec<usize>>,
    policy:    DuplicatePolicy,
}

impl VqaIndex {
    /// An index with no data. Useful as a holder for a result set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from two documents.
    /// If either one is missing the index stays empty.
    pub fn from_documents(
        annotations: Option<AnnotationFile>,
        questions:   Option<QuestionFile>,
        policy:      DuplicatePolicy,
    ) -> Result<Self, IndexError> {
        let (Some(dataset), Some(questions)) = (annotations, questions) else {
            tracing::debug!("Annotation or question source missing, index left empty");
            return Ok(Self { policy, ..Self::default() });
        };

        let mut index = Self { dataset, questions, policy, ..Self::default() };
        index.create_index()?;
        Ok(index)
    }

    /// Load both documents from a source and index them.
    pub fn load(source: &dyn DatasetSource, policy: DuplicatePolicy) -> Result<Self> {
        tracing::info!("Loading VQA annotations and questions into memory...");
        let started     = Instant::now();
        let annotations = source.annotations()?;
        let questions   = source.questions()?;
        tracing::info!("Loaded in {:.2?}", started.elapsed());

        Ok(Self::from_documents(annotations, questions, policy)?)
    }

    fn create_index(&mut self) -> Result<(), IndexError> {
        tracing::info!("Creating index...");

        let mut qa        = HashMap::with_capacity(self.dataset.annotations.len());
        let mut img_to_qa = HashMap::<ImageId, Vec<usize>>::new();

        for (pos, ann) in self.dataset.annotations.iter().enumerate() {
            img_to_qa.entry(ann.image_id).or_default().push(pos);
            if qa.insert(ann.question_id, pos).is_some() && self.policy == DuplicatePolicy::Reject {
                return Err(IndexError::DuplicateQuestionId(ann.question_id));
            }
        }

        let mut qqa = HashMap::with_capacity(self.questions.questions.len());
        for (pos, ques) in self.questions.questions.iter().enumerate() {
            if qqa.insert(ques.question_id, pos).is_some() && self.policy == DuplicatePolicy::Reject {
                return Err(IndexError::DuplicateQuestionId(ques.question_id));
            }
        }

        tracing::info!(
            "Index created: {} annotations, {} questions, {} images",
            qa.len(),
            qqa.len(),
            img_to_qa.len()
        );

        self.qa        = qa;
        self.qqa       = qqa;
        self.img_to_qa = img_to_qa;
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn dataset(&self) -> &AnnotationFile {
        &self.dataset
    }

    pub fn questions(&self) -> &QuestionFile {
        &self.questions
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.dataset.annotations
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Number of annotations in the source list
    pub fn len(&self) -> usize {
        self.dataset.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dataset.annotations.is_empty()
    }

    /// Number of distinct question ids that have an annotation
    pub fn annotated_question_count(&self) -> usize {
        self.qa.len()
    }

    pub fn question_count(&self) -> usize {
        self.qqa.len()
    }

    pub fn image_count(&self) -> usize {
        self.img_to_qa.len()
    }

    /// Key/value pairs of the annotation file's `info` block
    pub fn info(&self) -> Vec<(String, serde_json::Value)> {
        match self.dataset.metadata.get("info") {
            Some(serde_json::Value::Object(map)) => {
                map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
            }
            _ => Vec::new(),
        }
    }

    // ── Lookups ───────────────────────────────────────────────────────────────

    pub fn annotation(&self, id: QuestionId) -> Option<&Annotation> {
        self.qa.get(&id).map(|&pos| &self.dataset.annotations[pos])
    }

    /// The question for `id`; a miss is an error
    pub fn question(&self, id: QuestionId) -> Result<&Question, IndexError> {
        self.qqa
            .get(&id)
            .map(|&pos| &self.questions.questions[pos])
            .ok_or(IndexError::UnknownQuestion(id))
    }

    /// Every annotation about `image_id`, in source order
    pub fn annotations_for_image(&self, image_id: ImageId) -> Vec<&Annotation> {
        self.img_to_qa
            .get(&image_id)
            .map(|positions| positions.iter().map(|&p| &self.dataset.annotations[p]).collect())
            .unwrap_or_default()
    }

    /// Annotations for the given question ids, in request order.
    /// Callers wrap a single id as `&[id]`.
    pub fn load_qa(&self, ids: &[QuestionId]) -> Result<Vec<&Annotation>, IndexError> {
        ids.iter()
            .map(|&id| self.annotation(id).ok_or(IndexError::UnknownQuestion(id)))
            .collect()
    }

    // ── Filtering ─────────────────────────────────────────────────────────────

    /// Annotations selected by image id, then narrowed by type tags.
    pub fn annotations_by_image(&self, filter: &QuestionFilter) -> Vec<&Annotation> {
        let candidates: Vec<&Annotation> = if filter.image_ids.is_empty() {
            self.dataset.annotations.iter().collect()
        } else {
            filter
                .image_ids
                .iter()
                .filter_map(|id| self.img_to_qa.get(id))
                .flatten()
                .map(|&pos| &self.dataset.annotations[pos])
                .collect()
        };

        narrow(candidates, &filter.question_types, &filter.answer_types)
    }

    /// Annotations selected by question id, then narrowed by type tags.
    pub fn annotations_by_question(&self, filter: &ImageFilter) -> Vec<&Annotation> {
        let candidates: Vec<&Annotation> = if filter.question_ids.is_empty() {
            self.dataset.annotations.iter().collect()
        } else {
            filter
                .question_ids
                .iter()
                .filter_map(|&id| self.annotation(id))
                .collect()
        };

        narrow(candidates, &filter.question_types, &filter.answer_types)
    }

    /// Question ids of the annotations that pass `filter`.
    pub fn question_ids(&self, filter: &QuestionFilter) -> Vec<QuestionId> {
        self.annotations_by_image(filter)
            .into_iter()
            .map(|ann| ann.question_id)
            .collect()
    }

    /// Image ids of the annotations that pass `filter`.
    pub fn image_ids(&self, filter: &ImageFilter) -> Vec<ImageId> {
        self.annotations_by_question(filter)
            .into_iter()
            .map(|ann| ann.image_id)
            .collect()
    }

    /// Every question id, in source annotation order
    pub fn all_question_ids(&self) -> Vec<QuestionId> {
        self.question_ids(&QuestionFilter::default())
    }
}

/// Keep annotations whose tags are in the given sets.
/// An empty set lets everything through.
fn narrow<'a>(
    candidates:     Vec<&'a Annotation>,
    question_types: &[String],
    answer_types:   &[String],
) -> Vec<&'a Annotation> {
    candidates
        .into_iter()
        .filter(|ann| question_types.is_empty() || question_types.contains(&ann.question_type))
        .filter(|ann| answer_types.is_empty() || answer_types.contains(&ann.answer_type))
        .collect()
}
