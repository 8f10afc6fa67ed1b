// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case wires the data and infra layers together for
// one command:
//
//   stats    — load an index and summarise it
//   query    — filter question / image ids, optionally show QA
//   extract  — sample a balanced subset and export it
//   results  — validate a results file into a result index
//
// No printing here (that's Layer 1); use cases return values.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

pub mod stats_use_case;

pub mod query_use_case;

/// Balanced subset extraction
pub mod extract_use_case;

/// Result-file validation
pub mod results_use_case;
