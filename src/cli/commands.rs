// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the four subcommands: `stats`, `query`, `extract`
// and `results`, and all their configurable flags.
//
// Repeated filters are passed by repeating the flag:
//   --image-id 10 --image-id 20
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::extract_use_case::ExtractConfig;
use crate::application::query_use_case::QueryConfig;
use crate::application::results_use_case::ResultsConfig;
use crate::infra::captions::DEFAULT_CAPTION_PREFIX;
use crate::infra::paths::VqaPaths;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the info block and per-answer-type counts
    Stats(DatasetArgs),

    /// Find question or image ids matching filters
    Query(QueryArgs),

    /// Sample a balanced subset and export it as a new version
    Extract(ExtractArgs),

    /// Validate a results file against the ground truth
    Results(ResultsArgs),
}

/// The two documents every index needs
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Annotation JSON file
    #[arg(long)]
    pub annotations: PathBuf,

    /// Question JSON file
    #[arg(long)]
    pub questions: PathBuf,

    /// Fail on repeated question ids instead of keeping the last one
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Only questions about this image (repeatable)
    #[arg(long = "image-id")]
    pub image_ids: Vec<u64>,

    /// Only these question ids (repeatable); replaces --image-id
    #[arg(long = "by-question", conflicts_with = "image_ids")]
    pub question_ids: Vec<u64>,

    /// Only this question type, e.g. "what color is the" (repeatable)
    #[arg(long = "question-type")]
    pub question_types: Vec<String>,

    /// Only this answer type: yes/no, number, other (repeatable)
    #[arg(long = "answer-type")]
    pub answer_types: Vec<String>,

    /// Print image ids instead of question ids
    #[arg(long)]
    pub images: bool,

    /// Print each matching question with its answers
    #[arg(long)]
    pub show: bool,
}

impl From<QueryArgs> for QueryConfig {
    fn from(a: QueryArgs) -> Self {
        QueryConfig {
            annotation_file: a.dataset.annotations,
            question_file:   a.dataset.questions,
            image_ids:       a.image_ids,
            question_ids:    a.question_ids,
            question_types:  a.question_types,
            answer_types:    a.answer_types,
            images:          a.images,
            show:            a.show,
            strict:          a.dataset.strict,
        }
    }
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Root of the VQA release
    #[arg(long, default_value = "../../VQA")]
    pub data_dir: PathBuf,

    /// Version prefix of the source files ("" for v1)
    #[arg(long = "version", default_value = "v2_")]
    pub source_version: String,

    /// Version prefix for the extracted files
    #[arg(long, default_value = "v3_")]
    pub new_version: String,

    /// OpenEnded or MultipleChoice
    #[arg(long, default_value = "OpenEnded")]
    pub task_type: String,

    /// mscoco, or abstract_v002 for abstract scenes
    #[arg(long, default_value = "mscoco")]
    pub data_type: String,

    #[arg(long, default_value = "val2014")]
    pub data_subtype: String,

    /// Questions drawn per answer type
    #[arg(long, default_value_t = 50)]
    pub per_type: usize,

    /// Answer types to sample (repeatable); defaults to yes/no, number, other
    #[arg(long = "answer-type")]
    pub answer_types: Vec<String>,

    /// Seed for reproducible sampling
    #[arg(long)]
    pub seed: Option<u64>,

    /// Text placed before each image's joined captions
    #[arg(long, default_value = DEFAULT_CAPTION_PREFIX)]
    pub caption_prefix: String,

    #[arg(long)]
    pub strict: bool,
}

impl From<ExtractArgs> for ExtractConfig {
    fn from(a: ExtractArgs) -> Self {
        let defaults = ExtractConfig::default();
        ExtractConfig {
            paths: VqaPaths {
                data_dir:     a.data_dir,
                version:      a.source_version,
                task_type:    a.task_type,
                data_type:    a.data_type,
                data_subtype: a.data_subtype,
            },
            new_version:    a.new_version,
            answer_types:   if a.answer_types.is_empty() { defaults.answer_types } else { a.answer_types },
            per_type:       a.per_type,
            seed:           a.seed,
            caption_prefix: a.caption_prefix,
            strict:         a.strict,
        }
    }
}

#[derive(Args, Debug)]
pub struct ResultsArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// JSON array of {question_id, answer}
    #[arg(long)]
    pub results: PathBuf,

    /// Question file for the result index (defaults to --questions)
    #[arg(long)]
    pub result_questions: Option<PathBuf>,
}

impl From<ResultsArgs> for ResultsConfig {
    fn from(a: ResultsArgs) -> Self {
        ResultsConfig {
            annotation_file:      a.dataset.annotations,
            question_file:        a.dataset.questions,
            results_file:         a.results,
            result_question_file: a.result_questions,
            strict:               a.dataset.strict,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_query_flags_repeat() {
        let cli = Cli::try_parse_from([
            "vqa-tools", "query",
            "--annotations", "a.json", "--questions", "q.json",
            "--image-id", "10", "--image-id", "20",
            "--answer-type", "yes/no",
        ]).unwrap();

        let Commands::Query(args) = cli.command else { panic!("expected query") };
        let cfg = QueryConfig::from(args);
        assert_eq!(cfg.image_ids, vec![10, 20]);
        assert_eq!(cfg.answer_types, vec!["yes/no".to_string()]);
        assert!(!cfg.images);
    }

    #[test]
    fn test_image_and_question_ids_conflict() {
        let res = Cli::try_parse_from([
            "vqa-tools", "query",
            "--annotations", "a.json", "--questions", "q.json",
            "--image-id", "10", "--by-question", "1",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn test_extract_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["vqa-tools", "extract"]).unwrap();
        let Commands::Extract(args) = cli.command else { panic!("expected extract") };
        let cfg = ExtractConfig::from(args);
        let def = ExtractConfig::default();

        assert_eq!(cfg.paths, def.paths);
        assert_eq!(cfg.new_version, def.new_version);
        assert_eq!(cfg.answer_types, def.answer_types);
        assert_eq!(cfg.per_type, 50);
        assert_eq!(cfg.caption_prefix, "Futuristic. ");
    }
}
