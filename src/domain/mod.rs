// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs and traits describing the VQA dataset:
// what a question is, what an annotation is, what a
// prediction looks like, and how the core reports failures.
//
// Rules for this layer:
//   - NO file I/O
//   - NO index or query logic (that's Layer 4)
//   - Only typed records, enums, and traits
//
// Every record keeps an `extra` map of fields we don't model
// explicitly, so a document can be loaded, subset and written
// back without losing anything.
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

/// Question records and the question document
pub mod question;

/// Annotation records and the annotation document
pub mod annotation;

/// Flat prediction records used to build a result index
pub mod prediction;

/// Typed failures raised by the index core
pub mod error;

// Core abstractions (traits) that other layers implement
pub mod traits;

/// Question ids are unique across the whole dataset
pub type QuestionId = u64;

/// COCO image id, shared by every question asked about that image
pub type ImageId = u64;

/// Metadata / passthrough fields of a JSON record
pub type Extra = serde_json::Map<String, serde_json::Value>;
