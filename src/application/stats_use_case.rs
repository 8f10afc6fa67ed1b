// ============================================================
// Layer 2 — Stats Use Case
// ============================================================
// Loads an index and summarises it: the `info` block of the
// annotation file plus how many questions fall under each
// answer type.

use anyhow::Result;
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::data::index::{DuplicatePolicy, VqaIndex};
use crate::data::loader::JsonFileSource;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetStats {
    pub info:            Vec<(String, serde_json::Value)>,
    pub annotations:     usize,
    pub questions:       usize,
    pub images:          usize,
    pub per_answer_type: BTreeMap<String, usize>,
}

pub struct StatsUseCase {
    annotation_file: PathBuf,
    question_file:   PathBuf,
    policy:          DuplicatePolicy,
}

impl StatsUseCase {
    pub fn new(annotation_file: PathBuf, question_file: PathBuf, policy: DuplicatePolicy) -> Self {
        Self { annotation_file, question_file, policy }
    }

    pub fn execute(&self) -> Result<DatasetStats> {
        let source = JsonFileSource::new(&self.annotation_file, &self.question_file);
        let index  = VqaIndex::load(&source, self.policy)?;
        Ok(summarise(&index))
    }
}

pub fn summarise(index: &VqaIndex) -> DatasetStats {
    let mut per_answer_type = BTreeMap::new();
    for ann in index.annotations() {
        *per_answer_type.entry(ann.answer_type.clone()).or_insert(0usize) += 1;
    }

    DatasetStats {
        info:            index.info(),
        annotations:     index.len(),
        questions:       index.question_count(),
        images:          index.image_count(),
        per_answer_type,
    }
}
