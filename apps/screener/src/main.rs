use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use screener::config::Config;
use screener::telemetry::init_tracing;
use screener::{AnalysisRequest, Analyzer, ScreenError};

/// Résumé screener - classify a document and analyze it if it is a résumé
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the extracted résumé text, or `-` to read stdin
    input: PathBuf,

    /// Target job role, used for skill fallbacks and keyword suggestions
    job_role: Option<String>,
}

impl Cli {
    fn read_input(&self) -> Result<(String, String)> {
        if self.input.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read résumé text from stdin")?;
            return Ok((buf, "stdin.txt".to_string()));
        }

        let text = std::fs::read_to_string(&self.input)
            .with_context(|| format!("failed to read '{}'", self.input.display()))?;
        let name = self
            .input
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.input.display().to_string());
        Ok((text, name))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    init_tracing(&config)?;
    info!("Starting screener v{}", env!("CARGO_PKG_VERSION"));

    let (raw_text, filename) = cli.read_input()?;

    let analyzer = Analyzer::new(config);
    let request = AnalysisRequest {
        raw_text,
        filename,
        job_role: cli.job_role,
        extraction_quality: None,
    };

    match analyzer.analyze(request).await {
        Ok(report) => {
            println!("{}", report.to_json()?);
            Ok(())
        }
        Err(ScreenError::Rejected(notice)) => {
            println!("{}", serde_json::to_string_pretty(&notice)?);
            std::process::exit(2);
        }
        Err(e) => {
            error!(code = e.code(), "Analysis failed: {e}");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_path_and_role() {
        let cli = Cli::try_parse_from(["screener", "resume.txt", "Backend Engineer"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("resume.txt"));
        assert_eq!(cli.job_role.as_deref(), Some("Backend Engineer"));
    }

    #[test]
    fn test_cli_role_is_optional() {
        let cli = Cli::try_parse_from(["screener", "-"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("-"));
        assert!(cli.job_role.is_none());
    }

    #[test]
    fn test_cli_requires_input() {
        assert!(Cli::try_parse_from(["screener"]).is_err());
    }
}
