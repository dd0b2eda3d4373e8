//! `simprint` CLI: run a winnowing similarity pass over a directory of
//! submissions, or validate a YAML pass configuration.

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use simprint::config::SimprintConfig;
use simprint_hash::Xxh3WindowHasher;
use simprint_pipeline::{DiskFileStore, JsonRenderer, Pipeline, Renderer, SourceFile, Submission, WhitespacePreprocessor};
use simprint_span::{FileId, SubmissionId};

#[derive(Parser)]
#[command(name = "simprint", about = "Winnowing-based textual similarity engine")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare every immediate subdirectory of `dir` as one submission.
    Compare {
        dir: PathBuf,
        /// YAML pass configuration.
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a YAML pass configuration without running a pass.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Load and validate a configuration file, printing it back as JSON.
    Check { file: PathBuf },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Compare { dir, config } => run_compare(&dir, &config),
        Command::Config {
            action: ConfigAction::Check { file },
        } => run_config_check(&file),
    }
}

fn run_config_check(file: &Path) -> Result<(), Box<dyn Error>> {
    let config = SimprintConfig::from_file(file)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn run_compare(dir: &Path, config_path: &Path) -> Result<(), Box<dyn Error>> {
    let config = SimprintConfig::from_file(config_path)?;
    let pass_config = config.to_pass_config();

    let mut store = DiskFileStore::new();
    let mut next_file_id = 0u32;
    let mut submissions = Vec::new();

    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    entries.sort();

    for (idx, submission_dir) in entries.iter().enumerate() {
        let mut files = Vec::new();
        let mut source_entries: Vec<PathBuf> = std::fs::read_dir(submission_dir)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .collect();
        source_entries.sort();

        for path in source_entries {
            let file_id = FileId(next_file_id);
            next_file_id += 1;
            store = store.with_file(file_id, path.clone());
            files.push(SourceFile {
                file_id,
                path: path.display().to_string(),
            });
        }

        submissions.push(Submission {
            id: SubmissionId(idx as u32),
            files,
        });
    }

    let mut distro = Vec::new();
    for distro_path in &config.distro {
        let file_id = FileId(next_file_id);
        next_file_id += 1;
        store = store.with_file(file_id, PathBuf::from(distro_path));
        distro.push(SourceFile {
            file_id,
            path: distro_path.clone(),
        });
    }

    let preprocessor = WhitespacePreprocessor::new(pass_config.pass_name.0.as_str());
    let pipeline = Pipeline::new(Xxh3WindowHasher::default());

    let outcome = pipeline.run_pass(&store, &preprocessor, &pass_config, &submissions, &distro, None)?;

    let renderer = JsonRenderer::new(std::io::stdout());
    for report in &outcome.reports {
        renderer.render(report)?;
    }

    eprintln!(
        "{} submissions, {} reported pairs",
        submissions.len(),
        outcome.top_pairs.len()
    );
    Ok(())
}
