// ============================================================
// Layer 2 — Query Use Case
// ============================================================
// Loads an index and answers one filter query:
//
//   - by image ids     → question ids
//   - by question ids  → image ids
//
// Optionally renders the matching questions with their
// answers, the way a person would browse the dataset.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::index::{DuplicatePolicy, ImageFilter, QuestionFilter, VqaIndex};
use crate::data::loader::JsonFileSource;
use crate::domain::annotation::Annotation;
use crate::domain::error::IndexError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryConfig {
    pub annotation_file: PathBuf,
    pub question_file:   PathBuf,
    pub image_ids:       Vec<u64>,
    pub question_ids:    Vec<u64>,
    pub question_types:  Vec<String>,
    pub answer_types:    Vec<String>,
    /// Project image ids instead of question ids
    pub images:          bool,
    /// Render question and answers for each match
    pub show:            bool,
    pub strict:          bool,
}

/// What a query produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOutcome {
    pub ids:   Vec<u64>,
    pub lines: Vec<String>,
}

pub struct QueryUseCase {
    config: QueryConfig,
}

impl QueryUseCase {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<QueryOutcome> {
        let cfg    = &self.config;
        let source = JsonFileSource::new(&cfg.annotation_file, &cfg.question_file);
        let policy = DuplicatePolicy::from_strict(cfg.strict);
        let index  = VqaIndex::load(&source, policy)?;

        Ok(run_query(&index, cfg)?)
    }
}

/// Run the query described by `cfg` against an already built index.
/// Question ids, when given, take the place of image ids as the
/// first-stage filter.
pub fn run_query(index: &VqaIndex, cfg: &QueryConfig) -> Result<QueryOutcome, IndexError> {
    let matched = if cfg.question_ids.is_empty() {
        index.annotations_by_image(&QuestionFilter {
            image_ids:      cfg.image_ids.clone(),
            question_types: cfg.question_types.clone(),
            answer_types:   cfg.answer_types.clone(),
        })
    } else {
        index.annotations_by_question(&ImageFilter {
            question_ids:   cfg.question_ids.clone(),
            question_types: cfg.question_types.clone(),
            answer_types:   cfg.answer_types.clone(),
        })
    };

    let ids: Vec<u64> = matched
        .iter()
        .map(|ann| if cfg.images { ann.image_id } else { ann.question_id })
        .collect();
    tracing::info!("Query matched {} ids", ids.len());

    let lines = if cfg.show { render_qa(index, &matched)? } else { Vec::new() };

    Ok(QueryOutcome { ids, lines })
}

/// Human-readable lines for a list of annotations:
///
/// ```text
/// Question: What is on the couch?
/// Answer 1: cat
/// ```
///
/// An empty list renders nothing.
pub fn render_qa(index: &VqaIndex, anns: &[&Annotation]) -> Result<Vec<String>, IndexError> {
    let mut lines = Vec::new();

    for ann in anns {
        let question = index.question(ann.question_id)?;
        lines.push(format!("Question: {}", question.question));
        for ans in &ann.answers {
            lines.push(format!("Answer {}: {}", ans.answer_id, ans.answer));
        }
        if let Some(predicted) = &ann.answer {
            lines.push(format!("Predicted: {predicted}"));
        }
    }

    Ok(lines)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::index::tests::index;

    #[test]
    fn test_query_by_image_and_answer_type() {
        let idx = index();
        let cfg = QueryConfig {
            image_ids:    vec![10],
            answer_types: vec!["yes/no".into()],
            ..QueryConfig::default()
        };
        assert_eq!(run_query(&idx, &cfg).unwrap().ids, vec![2]);
    }

    #[test]
    fn test_query_projects_images() {
        let idx = index();
        let cfg = QueryConfig {
            answer_types: vec!["yes/no".into()],
            images:       true,
            ..QueryConfig::default()
        };
        assert_eq!(run_query(&idx, &cfg).unwrap().ids, vec![10, 30]);
    }

    #[test]
    fn test_query_by_question_ids_skips_unknown() {
        let idx = index();
        let cfg = QueryConfig {
            question_ids: vec![4, 999, 3],
            images:       true,
            ..QueryConfig::default()
        };
        assert_eq!(run_query(&idx, &cfg).unwrap().ids, vec![30, 20]);
    }

    #[test]
    fn test_show_renders_questions_and_answers() {
        let idx = index();
        let cfg = QueryConfig { image_ids: vec![20], show: true, ..QueryConfig::default() };
        let out = run_query(&idx, &cfg).unwrap();
        assert_eq!(out.lines, vec![
            "Question: How many dogs?".to_string(),
            "Answer 1: 2".to_string(),
            "Answer 2: 3".to_string(),
        ]);
    }

    #[test]
    fn test_render_empty_and_unknown() {
        let idx = index();
        assert!(render_qa(&idx, &[]).unwrap().is_empty());

        let stray = Annotation::new(77, 1, "what", "other", Vec::new());
        assert_eq!(render_qa(&idx, &[&stray]).unwrap_err(), IndexError::UnknownQuestion(77));
    }
}
