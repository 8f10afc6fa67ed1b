// ============================================================
// Layer 6 — Image Copier
// ============================================================
// Copies the COCO images of an extracted subset into a fresh
// directory. The target directory is wiped first so stale
// images from an earlier extraction never leak into a new one.
//
// A missing source image is reported and skipped; the rest
// of the copy carries on.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::domain::ImageId;
use crate::infra::paths::coco_image_name;

/// Outcome of one copy run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCopyReport {
    pub copied:  usize,
    pub missing: Vec<ImageId>,
}

/// Recreate `target_dir` and copy every image in `image_ids` into it.
pub fn copy_images(
    image_ids:    &[ImageId],
    data_subtype: &str,
    source_dir:   &Path,
    target_dir:   &Path,
) -> Result<ImageCopyReport> {
    if target_dir.exists() {
        fs::remove_dir_all(target_dir)
            .with_context(|| format!("Cannot clear '{}'", target_dir.display()))?;
    }
    fs::create_dir_all(target_dir)
        .with_context(|| format!("Cannot create '{}'", target_dir.display()))?;

    let mut report = ImageCopyReport::default();

    for &id in image_ids {
        let name   = coco_image_name(data_subtype, id);
        let source = source_dir.join(&name);

        if !source.is_file() {
            tracing::warn!("Image {} not found at '{}'", id, source.display());
            report.missing.push(id);
            continue;
        }

        fs::copy(&source, target_dir.join(&name))
            .with_context(|| format!("Cannot copy '{}'", source.display()))?;
        report.copied += 1;
    }

    tracing::info!(
        "Copied {} images to '{}' ({} missing)",
        report.copied,
        target_dir.display(),
        report.missing.len()
    );
    Ok(report)
}
