// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and prints what the use cases
// return. All the work happens in Layer 2 (application).
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, DatasetArgs, ExtractArgs, QueryArgs, ResultsArgs};

use crate::data::index::DuplicatePolicy;

#[derive(Parser, Debug)]
#[command(
    name = "vqa-tools",
    version,
    about = "Index, query and extract subsets of VQA question/annotation datasets."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Stats(args)   => run_stats(args),
            Commands::Query(args)   => run_query(args),
            Commands::Extract(args) => run_extract(args),
            Commands::Results(args) => run_results(args),
        }
    }
}

fn run_stats(args: DatasetArgs) -> Result<()> {
    use crate::application::stats_use_case::StatsUseCase;

    let policy = DuplicatePolicy::from_strict(args.strict);
    let stats  = StatsUseCase::new(args.annotations, args.questions, policy).execute()?;

    for (key, value) in &stats.info {
        println!("{key}: {value}");
    }
    println!("annotations: {}", stats.annotations);
    println!("questions:   {}", stats.questions);
    println!("images:      {}", stats.images);
    for (answer_type, count) in &stats.per_answer_type {
        println!("  {answer_type}: {count}");
    }
    Ok(())
}

fn run_query(args: QueryArgs) -> Result<()> {
    use crate::application::query_use_case::QueryUseCase;

    let outcome = QueryUseCase::new(args.into()).execute()?;

    if outcome.lines.is_empty() {
        for id in &outcome.ids {
            println!("{id}");
        }
    } else {
        for line in &outcome.lines {
            println!("{line}");
        }
    }
    Ok(())
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    use crate::application::extract_use_case::ExtractUseCase;

    tracing::info!("Extracting subset from '{}'", args.data_dir.display());
    let report = ExtractUseCase::new(args.into()).execute()?;
    let s      = &report.summary;

    println!(
        "Extracted {} annotations, {} questions, captions for {} images, \
         {} images copied ({} missing).",
        s.annotations, s.questions, s.captioned_images, s.copied_images, s.missing_images
    );
    Ok(())
}

fn run_results(args: ResultsArgs) -> Result<()> {
    use crate::application::results_use_case::ResultsUseCase;

    let result = ResultsUseCase::new(args.into()).execute()?;
    println!(
        "Results accepted: {} predictions over {} images.",
        result.len(),
        result.image_count()
    );
    Ok(())
}
