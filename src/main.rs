//! Resume scorer: ATS-style resume scoring against a job description

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use resume_scorer::cli::{self, Cli, Commands, ConfigAction};
use resume_scorer::config::{Config, OutputFormat};
use resume_scorer::input::manager::InputManager;
use resume_scorer::output::formatter::{save_report_to_file, ReportGenerator};
use resume_scorer::output::report::ScoreReport;
use resume_scorer::processing::text_processor::TextProcessor;
use resume_scorer::{analyze_with, parse_text, AnalysisEngine, JobDescriptionInput};
use std::path::{Path, PathBuf};
use std::process;

/// Keywords derived from the description when a job supplies none
const DERIVED_KEYWORDS: usize = 15;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    if let Err(e) = run_command(cli.command, &config_path).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config_path: &Path) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            save,
            detailed,
        } => {
            let config = load_config(config_path)?;
            score(&config, &resume, &job, output.as_deref(), save, detailed).await
        }
        Commands::Parse { resume, output } => {
            let config = load_config(config_path)?;
            parse(&config, &resume, output.as_deref()).await
        }
        Commands::Config { action } => handle_config(action, config_path),
    }
}

fn load_config(path: &Path) -> Result<Config> {
    Config::load_from(path).with_context(|| format!("Failed to load configuration from {}", path.display()))
}

fn input_manager(config: &Config) -> InputManager {
    InputManager::new()
        .with_cache(config.input.enable_cache)
        .with_max_file_bytes(config.input.max_file_bytes)
}

fn output_format(config: &Config, requested: Option<&str>) -> Result<OutputFormat> {
    match requested {
        Some(format) => cli::parse_output_format(format).map_err(anyhow::Error::msg),
        None => Ok(config.output.format),
    }
}

async fn score(
    config: &Config,
    resume: &Path,
    job: &Path,
    output: Option<&str>,
    save: Option<PathBuf>,
    detailed: bool,
) -> Result<()> {
    cli::validate_file_extension(resume, cli::RESUME_EXTENSIONS)
        .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;
    cli::validate_file_extension(job, cli::JOB_EXTENSIONS)
        .map_err(|e| anyhow::anyhow!("Job description file: {}", e))?;
    let format = output_format(config, output)?;

    info!("Scoring {} against {}", resume.display(), job.display());

    let mut inputs = input_manager(config);
    let resume_text = inputs
        .extract_text(resume)
        .await
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;
    let mut job_input = inputs
        .load_job(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;

    if job_input.keywords.is_empty() {
        job_input.keywords = derive_keywords(&job_input);
        info!("Derived {} keywords from the job description", job_input.keywords.len());
    }

    let parsed = parse_text(&resume_text);
    if parsed.has_no_sections() {
        warn!("No sections found in {}; scores will be low", resume.display());
    }

    let weights = config.scoring.weights;
    let engine = AnalysisEngine::new(weights).context("Invalid scoring weights")?;
    let result = analyze_with(&engine, &parsed, &job_input);

    let report = ScoreReport::new(
        result,
        weights,
        &resume.to_string_lossy(),
        &job.to_string_lossy(),
    );

    let generator = ReportGenerator::with_options(
        config.output.color_output,
        detailed || config.output.detailed,
        true,
        true,
    );
    let rendered = generator.generate_report(&report, format)?;
    println!("{}", rendered);

    if let Some(path) = save {
        // Saved files never carry terminal colors
        let plain = ReportGenerator::with_options(false, detailed || config.output.detailed, true, true)
            .generate_report(&report, format)?;
        save_report_to_file(&plain, &path)
            .with_context(|| format!("Failed to save report to {}", path.display()))?;
        println!("💾 Report saved to {}", path.display());
    }

    Ok(())
}

async fn parse(config: &Config, resume: &Path, output: Option<&str>) -> Result<()> {
    cli::validate_file_extension(resume, cli::RESUME_EXTENSIONS)
        .map_err(|e| anyhow::anyhow!("Resume file: {}", e))?;
    let format = output_format(config, output)?;

    let text = input_manager(config)
        .extract_text(resume)
        .await
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;
    let parsed = parse_text(&text);

    let generator = ReportGenerator::with_options(config.output.color_output, false, true, false);
    println!("{}", generator.generate_parsed(&parsed, format)?);
    Ok(())
}

fn handle_config(action: Option<ConfigAction>, config_path: &Path) -> Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let config = load_config(config_path)?;
            println!("📁 {}\n", config_path.display());
            println!("{}", toml::to_string_pretty(&config)?);
        }
        ConfigAction::Reset => {
            Config::default()
                .save_to(config_path)
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            println!("✅ Configuration reset to defaults: {}", config_path.display());
        }
        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }
    Ok(())
}

fn derive_keywords(job: &JobDescriptionInput) -> Vec<String> {
    TextProcessor::new().extract_keywords(&job.description, DERIVED_KEYWORDS)
}
