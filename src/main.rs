mod analyzer;
mod config;
mod extract;
mod output;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};

use analyzer::score::Scorer;
use output::AnalysisOutput;

#[derive(Parser)]
#[command(name = "doc_insight", about = "Persona-driven document section ranking")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every collection config under the input directory
    Run {
        /// Directory searched recursively for collection.json files
        #[arg(short, long, default_value = "input")]
        input: PathBuf,
        /// Directory receiving <collection>_output.json files
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },
    /// Rank one collection and print its top sections
    Sections {
        /// Path to a collection.json config
        config: PathBuf,
        /// Max rows to display
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run { input, output } => run_batch(&input, &output),
        Commands::Sections { config, limit } => show_sections(&config, limit),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn run_batch(input_dir: &Path, output_dir: &Path) -> Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    if !input_dir.exists() {
        warn!("Input directory not found: {}", input_dir.display());
        return Ok(());
    }
    let configs = config::discover_configs(input_dir)?;
    if configs.is_empty() {
        warn!("No input configuration files found under {}", input_dir.display());
        return Ok(());
    }
    std::fs::create_dir_all(output_dir)?;

    println!("Processing {} collections...", configs.len());
    let pb = ProgressBar::new(configs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("#>-"),
    );

    // Collections share no state, so they can be ranked in parallel.
    let scorer = Scorer::default();
    let results: Vec<(PathBuf, AnalysisOutput)> = configs
        .par_iter()
        .map(|path| {
            let record = process_config(path, &scorer);
            pb.inc(1);
            (path.clone(), record)
        })
        .collect();
    pb.finish_and_clear();

    let mut written = 0usize;
    for (config_path, record) in results {
        let name = collection_name(&config_path);
        let out_path = output_dir.join(format!("{name}_output.json"));
        match output::write_output(&record, &out_path) {
            Ok(()) => {
                info!("Generated {}", out_path.display());
                written += 1;
            }
            Err(e) => error!("Failed to write result for {name}: {e:#}"),
        }
    }

    println!("Wrote {} result files to {}", written, output_dir.display());
    Ok(())
}

/// Load one config and run its collection. Config errors are contained
/// the same way processing errors are: an error record comes back.
fn process_config(config_path: &Path, scorer: &Scorer) -> AnalysisOutput {
    let collection_dir = config_path.parent().unwrap_or(Path::new("."));
    match config::load_config(config_path) {
        Ok(cfg) => analyzer::run_collection(&cfg, collection_dir, scorer),
        Err(e) => {
            error!("Error processing document collection: {e:#}");
            AnalysisOutput::error_record(&format!("{e:#}"))
        }
    }
}

/// The collection is named after the directory its config sits in.
fn collection_name(config_path: &Path) -> String {
    config_path
        .parent()
        .and_then(|d| d.file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("collection")
        .to_string()
}

fn show_sections(config_path: &Path, limit: usize) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let collection_dir = config_path.parent().unwrap_or(Path::new("."));

    let blocks = analyzer::collect_blocks(&cfg, collection_dir)?;
    let mut sections = analyzer::segment::segment_blocks(&blocks);
    let scorer = Scorer::default();
    analyzer::rank::rank_sections(&mut sections, &scorer, &cfg.persona, &cfg.job_to_be_done);

    if sections.is_empty() {
        println!("No sections found.");
        return Ok(());
    }

    println!(
        "{:>4} | {:>6} | {:<44} | {:<24} | {:>4}",
        "Rank", "Score", "Title", "Document", "Page"
    );
    println!("{}", "-".repeat(94));

    for s in sections.iter().take(limit) {
        println!(
            "{:>4} | {:>6.1} | {:<44} | {:<24} | {:>4}",
            s.importance_rank,
            s.relevance_score,
            truncate(&s.title, 44),
            truncate(&s.document, 24),
            s.page
        );
    }

    println!("\n{} sections | persona: {}", sections.len(), cfg.persona);
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

// ── Tests ──
