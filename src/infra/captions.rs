// ============================================================
// Layer 6 — Caption Aggregation
// ============================================================
// COCO ships five or so captions per image:
//
//   { "annotations": [ {"image_id": 9, "id": 1, "caption": "A cat."}, ... ] }
//
// For an extracted subset we glue all captions of each kept
// image into a single string, after a fixed prefix:
//
//   { "9": "Futuristic. A cat. A cat on a mat. " }

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::domain::{Extra, ImageId};

pub const DEFAULT_CAPTION_PREFIX: &str = "Futuristic. ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caption {
    pub image_id: ImageId,
    pub caption:  String,

    #[serde(flatten)]
    pub extra: Extra,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptionFile {
    #[serde(default)]
    pub annotations: Vec<Caption>,

    #[serde(flatten)]
    pub metadata: Extra,
}

/// image_id → prefix + every caption of that image, each followed by a space.
/// Images without captions are absent from the map.
pub fn aggregate_captions(
    source: &CaptionFile,
    images: &HashSet<ImageId>,
    prefix: &str,
) -> BTreeMap<ImageId, String> {
    let mut captions = BTreeMap::new();

    for c in source.annotations.iter().filter(|c| images.contains(&c.image_id)) {
        let text = captions
            .entry(c.image_id)
            .or_insert_with(|| prefix.to_string());
        text.push_str(&c.caption);
        text.push(' ');
    }

    captions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caption(image_id: ImageId, text: &str) -> Caption {
        Caption { image_id, caption: text.to_string(), extra: Extra::new() }
    }

    #[test]
    fn test_joins_captions_per_selected_image() {
        let source = CaptionFile {
            annotations: vec![
                caption(9, "A cat."),
                caption(5, "A dog."),
                caption(9, "A cat on a mat."),
            ],
            metadata: Extra::new(),
        };
        let images = HashSet::from([9, 77]);

        let out = aggregate_captions(&source, &images, DEFAULT_CAPTION_PREFIX);
        assert_eq!(out.len(), 1);
        assert_eq!(out[&9], "Futuristic. A cat. A cat on a mat. ");
    }

    #[test]
    fn test_serialises_with_string_keys() {
        let source = CaptionFile { annotations: vec![caption(3, "Hi.")], metadata: Extra::new() };
        let out    = aggregate_captions(&source, &HashSet::from([3]), "");
        assert_eq!(serde_json::to_string(&out).unwrap(), r#"{"3":"Hi. "}"#);
    }
}
