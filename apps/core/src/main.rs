// HoaxScan CLI entry point
// Reads a news text, prints the JSON analysis report.

use anyhow::{Context, Result};
use clap::Parser;
use hoaxscan_core::config::AppConfig;
use hoaxscan_core::resources::Resources;
use hoaxscan_core::samples::Sample;
use hoaxscan_core::session::AnalysisSession;
use hoaxscan_core::telemetry;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "hoaxscan")]
#[command(about = "Classify Indonesian news text as VALID or HOAX", long_about = None)]
#[command(version)]
struct Cli {
    /// News text file, stdin when omitted or '-'
    #[arg(conflicts_with = "sample")]
    input: Option<PathBuf>,

    /// Analyze a built-in sample instead of reading input
    #[arg(long, value_enum)]
    sample: Option<Sample>,

    /// Directory holding the vectorizer and model artifacts
    #[arg(long)]
    model_dir: Option<PathBuf>,
}

impl Cli {
    fn read_text(&self, session: &mut AnalysisSession) -> Result<String> {
        if let Some(sample) = self.sample {
            return Ok(session.load_sample(sample).to_string());
        }

        match self.input.as_deref() {
            Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            _ => {
                let mut text = String::new();
                io::stdin()
                    .read_to_string(&mut text)
                    .context("failed to read stdin")?;
                Ok(text)
            }
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = AppConfig::from_env()?;
    if let Some(dir) = &cli.model_dir {
        config.model_dir = dir.clone();
    }
    telemetry::init_tracing(config.log_format);

    let resources = Resources::load(&config).context("failed to load analysis resources")?;
    info!(
        "Model: {} (accuracy {})",
        resources.card().method,
        resources
            .card()
            .accuracy
            .map(|a| format!("{:.2}%", a * 100.0))
            .unwrap_or_else(|| "unknown".to_string())
    );

    let mut session = AnalysisSession::new(resources.analyzer().clone());
    let text = cli.read_text(&mut session)?;

    match session.submit(&text) {
        Ok(_) => {}
        Err(e) if e.is_user_recoverable() => {
            warn!("{}", e);
            eprintln!("{}", e.user_message());
            return Ok(ExitCode::from(2));
        }
        Err(e) => return Err(e).context("analysis failed"),
    }

    let report = session.report().context("analysis produced no result")?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
