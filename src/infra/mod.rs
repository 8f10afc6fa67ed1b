// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-system work that sits around the index:
//
//   paths.rs    — the VQA release directory layout and the
//                 COCO image naming scheme
//
//   export.rs   — writes a subset of annotations/questions
//                 back to JSON, metadata preserved
//
//   captions.rs — folds COCO captions into one string per
//                 extracted image
//
//   images.rs   — copies the extracted images into a fresh
//                 directory
//
// None of this is needed to query an index; it is what the
// `extract` command drives.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Dataset directory layout and file naming
pub mod paths;

/// Subset selection and JSON export
pub mod export;

/// COCO caption aggregation
pub mod captions;

/// Image directory copying
pub mod images;
