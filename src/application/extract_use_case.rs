// ============================================================
// Layer 2 — Extract Use Case
// ============================================================
// Builds a small, balanced subset of a VQA release:
//
//   Step 1: Load the source annotations and questions  (Layer 4)
//   Step 2: For every answer type, sample k question ids
//           with replacement                           (Layer 4)
//   Step 3: Export annotations, questions, captions and
//           images under a new version prefix          (Layer 6)
//
// With the defaults this takes 50 yes/no, 50 number and
// 50 other questions from v2 val2014 and writes them as v3.

use anyhow::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::index::{DuplicatePolicy, QuestionFilter, VqaIndex};
use crate::data::loader::JsonFileSource;
use crate::data::sampler::{sample_with_replacement, seeded_rng};
use crate::domain::QuestionId;
use crate::infra::captions::DEFAULT_CAPTION_PREFIX;
use crate::infra::export::{DatasetExporter, ExportSummary, ExportTargets};
use crate::infra::paths::VqaPaths;

// ─── Extraction Configuration ────────────────────────────────────────────────
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    /// Where the source release lives
    pub paths:          VqaPaths,
    /// Version prefix of the extracted files, e.g. "v3_"
    pub new_version:    String,
    pub answer_types:   Vec<String>,
    /// Questions drawn per answer type
    pub per_type:       usize,
    pub seed:           Option<u64>,
    pub caption_prefix: String,
    pub strict:         bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            paths:          VqaPaths::default(),
            new_version:    "v3_".to_string(),
            answer_types:   vec!["yes/no".into(), "number".into(), "other".into()],
            per_type:       50,
            seed:           None,
            caption_prefix: DEFAULT_CAPTION_PREFIX.to_string(),
            strict:         false,
        }
    }
}

impl ExtractConfig {
    /// Output locations derived from the source layout
    pub fn targets(&self) -> ExportTargets {
        let source = &self.paths;
        let target = source.with_version(&self.new_version);

        ExportTargets {
            annotation_file: target.annotation_file(),
            question_file:   target.question_file(),
            source_captions: source.caption_file(false),
            caption_file:    target.caption_file(true),
            image_dir:       source.image_dir(false),
            new_image_dir:   target.image_dir(true),
            data_subtype:    source.data_subtype.clone(),
            caption_prefix:  self.caption_prefix.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExtractReport {
    /// Every drawn id, in draw order, repeats included
    pub sampled: Vec<QuestionId>,
    pub summary: ExportSummary,
    /// Index over the subset that was written
    pub extracted: VqaIndex,
}

pub struct ExtractUseCase {
    config: ExtractConfig,
}

impl ExtractUseCase {
    pub fn new(config: ExtractConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<ExtractReport> {
        let cfg = &self.config;
        if let Ok(json) = serde_json::to_string(cfg) {
            tracing::debug!("Extract config: {json}");
        }

        // ── Step 1: Load the source release ──────────────────────────────────
        let source = JsonFileSource::new(cfg.paths.annotation_file(), cfg.paths.question_file());
        let policy = DuplicatePolicy::from_strict(cfg.strict);
        let index  = VqaIndex::load(&source, policy)?;

        // ── Step 2: Sample per answer type ───────────────────────────────────
        let mut rng = seeded_rng(cfg.seed);
        let sampled = sample_question_ids(&index, &cfg.answer_types, cfg.per_type, &mut rng);
        tracing::info!("Sampled {} question ids", sampled.len());

        // ── Step 3: Export the subset ────────────────────────────────────────
        let (summary, subset) = DatasetExporter::new(&index).export(&sampled, &cfg.targets())?;

        // The written subset, indexed the same way as the source
        let extracted = subset.into_index()?;
        tracing::info!(
            "Extracted set: {} questions over {} images",
            extracted.question_count(),
            extracted.image_count()
        );

        Ok(ExtractReport { sampled, summary, extracted })
    }
}

/// Draw `per_type` question ids for each answer type, concatenated
/// in the order the answer types are listed.
pub fn sample_question_ids<R: Rng + ?Sized>(
    index:        &VqaIndex,
    answer_types: &[String],
    per_type:     usize,
    rng:          &mut R,
) -> Vec<QuestionId> {
    let mut sampled = Vec::with_capacity(answer_types.len() * per_type);

    for answer_type in answer_types {
        let ids = index.question_ids(&QuestionFilter::new().answer_types([answer_type.as_str()]));
        tracing::debug!("{} questions with answer type '{}'", ids.len(), answer_type);
        sampled.extend(sample_with_replacement(&ids, per_type, rng));
    }

    sampled
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::index::tests::{fixture, index};
    use crate::infra::export::write_json;
    use crate::infra::paths::coco_image_name;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_samples_come_from_their_answer_type() {
        let idx     = index();
        let types   = vec!["yes/no".to_string(), "number".to_string()];
        let sampled = sample_question_ids(&idx, &types, 3, &mut seeded_rng(Some(9)));

        assert_eq!(sampled.len(), 6);
        assert!(sampled[..3].iter().all(|id| [2, 4].contains(id)));
        assert!(sampled[3..].iter().all(|&id| id == 3));
    }

    #[test]
    fn test_unknown_answer_type_draws_nothing() {
        let idx     = index();
        let sampled = sample_question_ids(&idx, &["color".to_string()], 5, &mut seeded_rng(Some(1)));
        assert!(sampled.is_empty());
    }

    #[test]
    fn test_end_to_end_extraction() {
        let dir   = tempfile::tempdir().unwrap();
        let paths = VqaPaths { data_dir: dir.path().to_path_buf(), ..VqaPaths::default() };

        let (anns, qs) = fixture();
        write_json(&paths.annotation_file(), &anns).unwrap();
        write_json(&paths.question_file(), &qs).unwrap();
        write_json(&paths.caption_file(false), &json!({
            "annotations": [{"image_id": 20, "id": 1, "caption": "Dogs."}]
        })).unwrap();
        let images = paths.image_dir(false);
        fs::create_dir_all(&images).unwrap();
        for id in [10, 20, 30] {
            fs::write(images.join(coco_image_name("val2014", id)), b"x").unwrap();
        }

        let config = ExtractConfig {
            paths:        paths.clone(),
            answer_types: vec!["number".into()],
            per_type:     4,
            seed:         Some(5),
            ..ExtractConfig::default()
        };
        let report = ExtractUseCase::new(config.clone()).execute().unwrap();

        assert_eq!(report.sampled, vec![3, 3, 3, 3]);
        assert_eq!(report.summary.annotations, 1);
        assert_eq!(report.summary.copied_images, 1);
        assert_eq!(report.summary.captioned_images, 1);
        assert_eq!(report.extracted.all_question_ids(), vec![3]);
        assert_eq!(report.extracted.annotations_for_image(20).len(), 1);

        let targets = config.targets();
        assert!(targets.annotation_file.ends_with("Annotations/v3_mscoco_val2014_annotations.json"));
        assert!(targets.annotation_file.is_file());
        assert!(targets.question_file.is_file());
        assert!(targets.new_image_dir.join(coco_image_name("val2014", 20)).is_file());
    }
}
