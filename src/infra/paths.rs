// ============================================================
// Layer 6 — Dataset File Layout
// ============================================================
// The VQA release uses a fixed directory layout:
//
//   <data_dir>/
//     Annotations/<version><data_type>_<subtype>_annotations.json
//     Questions/<version><task>_<data_type>_<subtype>_questions.json
//     Images/<data_type>/
//       captions_<subtype>.json        ← COCO captions
//       <subtype>/                     ← COCO images
//         COCO_<subtype>_<id:012>.jpg
//
// An extracted subset is written next to the source with a
// new version prefix (e.g. "v3_"), so both can coexist.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::domain::ImageId;

/// Names that pick one concrete release out of the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VqaPaths {
    pub data_dir:     PathBuf,
    /// "" for v1, "v2_" for v2
    pub version:      String,
    pub task_type:    String,
    pub data_type:    String,
    pub data_subtype: String,
}

impl Default for VqaPaths {
    fn default() -> Self {
        Self {
            data_dir:     PathBuf::from("../../VQA"),
            version:      "v2_".to_string(),
            task_type:    "OpenEnded".to_string(),
            data_type:    "mscoco".to_string(),
            data_subtype: "val2014".to_string(),
        }
    }
}

impl VqaPaths {
    /// Same layout, different version prefix
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self { version: version.into(), ..self.clone() }
    }

    pub fn annotation_file(&self) -> PathBuf {
        self.data_dir.join("Annotations").join(format!(
            "{}{}_{}_annotations.json",
            self.version, self.data_type, self.data_subtype
        ))
    }

    pub fn question_file(&self) -> PathBuf {
        self.data_dir.join("Questions").join(format!(
            "{}{}_{}_{}_questions.json",
            self.version, self.task_type, self.data_type, self.data_subtype
        ))
    }

    fn images_root(&self) -> PathBuf {
        self.data_dir.join("Images").join(&self.data_type)
    }

    /// Captions file; the source release has no version prefix
    pub fn caption_file(&self, versioned: bool) -> PathBuf {
        let version = if versioned { self.version.as_str() } else { "" };
        self.images_root()
            .join(format!("captions_{}{}.json", version, self.data_subtype))
    }

    /// Image directory; the source release has no version prefix
    pub fn image_dir(&self, versioned: bool) -> PathBuf {
        let version = if versioned { self.version.as_str() } else { "" };
        self.images_root().join(format!("{}{}", version, self.data_subtype))
    }
}

/// COCO image file name, e.g. `COCO_val2014_000000262148.jpg`
pub fn coco_image_name(data_subtype: &str, image_id: ImageId) -> String {
    format!("COCO_{data_subtype}_{image_id:012}.jpg")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let p = VqaPaths::default();
        assert_eq!(
            p.annotation_file(),
            PathBuf::from("../../VQA/Annotations/v2_mscoco_val2014_annotations.json")
        );
        assert_eq!(
            p.question_file(),
            PathBuf::from("../../VQA/Questions/v2_OpenEnded_mscoco_val2014_questions.json")
        );
        assert_eq!(
            p.caption_file(false),
            PathBuf::from("../../VQA/Images/mscoco/captions_val2014.json")
        );
        assert_eq!(p.image_dir(false), PathBuf::from("../../VQA/Images/mscoco/val2014"));
    }

    #[test]
    fn test_versioned_subset_layout() {
        let p = VqaPaths::default().with_version("v3_");
        assert_eq!(
            p.annotation_file(),
            PathBuf::from("../../VQA/Annotations/v3_mscoco_val2014_annotations.json")
        );
        assert_eq!(
            p.caption_file(true),
            PathBuf::from("../../VQA/Images/mscoco/captions_v3_val2014.json")
        );
        assert_eq!(p.image_dir(true), PathBuf::from("../../VQA/Images/mscoco/v3_val2014"));
    }

    #[test]
    fn test_coco_image_name_is_zero_padded() {
        assert_eq!(coco_image_name("val2014", 262148), "COCO_val2014_000000262148.jpg");
        assert_eq!(coco_image_name("train2014", 9), "COCO_train2014_000000000009.jpg");
    }
}
