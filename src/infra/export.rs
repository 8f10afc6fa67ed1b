// ============================================================
// Layer 6 — Subset Exporter
// ============================================================
// Writes a subset of the dataset, chosen by question id, as a
// self-contained mini release:
//
//   1. annotation + question documents, metadata untouched,
//      lists filtered to the chosen ids (source order)
//   2. one aggregated caption string per chosen image
//   3. a fresh directory with the chosen images
//
// The subset documents are also returned as a new VqaIndex,
// rebuilt from scratch, so callers can inspect what was
// written without reading it back.

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    collections::HashSet,
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::data::index::{DuplicatePolicy, VqaIndex};
use crate::data::loader::read_json;
use crate::domain::annotation::AnnotationFile;
use crate::domain::question::QuestionFile;
use crate::domain::{ImageId, QuestionId};
use crate::infra::captions::{aggregate_captions, CaptionFile};
use crate::infra::images::copy_images;

/// Serialise `value` as compact JSON, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create '{}'", parent.display()))?;
    }

    let file = File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, value)
        .with_context(|| format!("Cannot write JSON to '{}'", path.display()))?;
    writer.flush()?;

    tracing::debug!("Wrote '{}'", path.display());
    Ok(())
}

/// Where each piece of an export goes
#[derive(Debug, Clone)]
pub struct ExportTargets {
    pub annotation_file: PathBuf,
    pub question_file:   PathBuf,
    pub source_captions: PathBuf,
    pub caption_file:    PathBuf,
    pub image_dir:       PathBuf,
    pub new_image_dir:   PathBuf,
    pub data_subtype:    String,
    pub caption_prefix:  String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub annotations:      usize,
    pub questions:        usize,
    pub captioned_images: usize,
    pub copied_images:    usize,
    pub missing_images:   usize,
}

/// The documents of a subset, before anything touches the disk
#[derive(Debug, Clone)]
pub struct Subset {
    pub annotations: AnnotationFile,
    pub questions:   QuestionFile,
    /// image_id of each kept question, source order, repeats kept
    pub image_ids:   Vec<ImageId>,
}

impl Subset {
    /// Select `ids` out of the index's documents
    pub fn select(index: &VqaIndex, ids: &HashSet<QuestionId>) -> Self {
        let annotations = index.dataset().with_annotations(
            index
                .annotations()
                .iter()
                .filter(|ann| ids.contains(&ann.question_id))
                .cloned()
                .collect(),
        );

        let kept: Vec<_> = index
            .questions()
            .questions
            .iter()
            .filter(|q| ids.contains(&q.question_id))
            .cloned()
            .collect();
        let image_ids = kept.iter().map(|q| q.image_id).collect();
        let questions = index.questions().with_questions(kept);

        Self { annotations, questions, image_ids }
    }

    /// Fresh index over the subset documents
    pub fn into_index(self) -> Result<VqaIndex> {
        Ok(VqaIndex::from_documents(
            Some(self.annotations),
            Some(self.questions),
            DuplicatePolicy::default(),
        )?)
    }
}

pub struct DatasetExporter<'a> {
    index: &'a VqaIndex,
}

impl<'a> DatasetExporter<'a> {
    pub fn new(index: &'a VqaIndex) -> Self {
        Self { index }
    }

    /// Write the subset named by `ids` to `targets`.
    pub fn export(&self, ids: &[QuestionId], targets: &ExportTargets) -> Result<(ExportSummary, Subset)> {
        let wanted: HashSet<QuestionId> = ids.iter().copied().collect();
        let subset = Subset::select(self.index, &wanted);

        // ── Step 1: annotation and question documents ────────────────────────
        write_json(&targets.annotation_file, &subset.annotations)?;
        write_json(&targets.question_file, &subset.questions)?;
        tracing::info!(
            "Extracted {} annotations and {} questions",
            subset.annotations.annotations.len(),
            subset.questions.questions.len()
        );

        // ── Step 2: captions ─────────────────────────────────────────────────
        let source: CaptionFile = read_json(&targets.source_captions)
            .context("Cannot load source captions")?;
        let images: HashSet<ImageId> = subset.image_ids.iter().copied().collect();
        let captions = aggregate_captions(&source, &images, &targets.caption_prefix);
        write_json(&targets.caption_file, &captions)?;
        tracing::info!("Aggregated captions for {} images", captions.len());

        // ── Step 3: images ───────────────────────────────────────────────────
        let report = copy_images(
            &subset.image_ids,
            &targets.data_subtype,
            &targets.image_dir,
            &targets.new_image_dir,
        )?;

        let summary = ExportSummary {
            annotations:      subset.annotations.annotations.len(),
            questions:        subset.questions.questions.len(),
            captioned_images: captions.len(),
            copied_images:    report.copied,
            missing_images:   report.missing.len(),
        };
        Ok((summary, subset))
    }
}
