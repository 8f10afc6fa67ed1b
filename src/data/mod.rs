// ============================================================
// Layer 4 — Data Layer
// ============================================================
// Everything between the JSON files on disk and the answers
// to a query:
//
//   annotation.json + question.json
//       │
//       ▼
//   JsonFileSource     → parses both documents with serde
//       │
//       ▼
//   VqaIndex           → qa / qqa / img_to_qa lookup tables
//       │                 and the filter queries over them
//       ├──► load_results  → result index built from predictions
//       │
//       ▼
//   sampler            → random question ids for a subset
//
// Reference: Rust Book §7 (Modules), §8 (Collections)

/// Reads annotation/question JSON documents from disk
pub mod loader;

/// The VQA index and its filter queries
pub mod index;

/// Validates predictions and builds a result index
pub mod results;

/// Sampling with replacement for subset extraction
pub mod sampler;
