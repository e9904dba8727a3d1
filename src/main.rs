// src/main.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::credentials::{CredentialError, Credentials, DEFAULT_ENDPOINT_FILE, DEFAULT_KEY_FILE};
use crate::vision::blocking::BlockingVisionClient;
use crate::vision::client::VisionClient;
use crate::vision::connector::VisionConnector;
use crate::vision::model::AnalysisResult;
use crate::vision::request::{AnalysisRequest, VisualFeature};

mod credentials;
mod report;
mod vision;

const DEFAULT_IMAGE: &str = "images/image.jpg";

#[derive(Parser)]
#[command(name = "imagelens")]
#[command(about = "Analyze an image with Azure AI Vision (tags, objects, OCR)", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    // analyze options, used when no subcommand is given
    #[command(flatten)]
    analyze: AnalyzeArgs,
}

#[derive(Args, Clone)]
struct CredentialArgs {
    /// File holding the API key
    #[arg(long, default_value = DEFAULT_KEY_FILE)]
    key_file: PathBuf,

    /// File holding the service endpoint URL
    #[arg(long, default_value = DEFAULT_ENDPOINT_FILE)]
    endpoint_file: PathBuf,
}

#[derive(Args, Clone)]
struct AnalyzeArgs {
    #[command(flatten)]
    credentials: CredentialArgs,

    /// Image to analyze
    #[arg(long, short = 'i', default_value = DEFAULT_IMAGE)]
    image: PathBuf,

    /// Where to write the JSON response
    #[arg(long, short = 'o', default_value = report::DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Feature to request; repeat for several (default: tags, objects, read)
    #[arg(long = "feature", short = 'f', value_enum)]
    features: Vec<VisualFeature>,

    /// Print results only, do not write the JSON file
    #[arg(long)]
    no_save: bool,

    /// Use the blocking client instead of the async one
    #[arg(long)]
    blocking: bool,

    /// Request timeout in seconds (none by default)
    #[arg(long)]
    timeout: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an image and save the response (default)
    Analyze(AnalyzeArgs),
    /// Load credentials and build the blocking client without calling the service
    Check {
        #[command(flatten)]
        credentials: CredentialArgs,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init_from_env(
        env_logger::Env::default().filter_or("RUST_LOG", "info")
    );

    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Analyze(cli.analyze)) {
        Commands::Analyze(args) => {
            let credentials = load_credentials(&args.credentials)?;
            run_analyze(&args, &credentials)
        }
        Commands::Check { credentials } => {
            let credentials = load_credentials(&credentials)?;
            check_client(&credentials)
        }
    }
}

/// Missing credential files end the process with status 1 before any network activity
fn load_credentials(args: &CredentialArgs) -> Result<Credentials> {
    match Credentials::load(&args.key_file, &args.endpoint_file) {
        Ok(credentials) => Ok(credentials),
        Err(e @ CredentialError::Missing { .. }) => {
            println!("{}", e);
            std::process::exit(1);
        }
        Err(e) => Err(e.into()),
    }
}

fn run_analyze(args: &AnalyzeArgs, credentials: &Credentials) -> Result<()> {
    let timeout = args.timeout.map(Duration::from_secs);

    let result = if args.blocking {
        analyze_blocking(credentials, &args.image, &args.features, timeout)?
    } else {
        analyze_async(credentials, &args.image, &args.features, timeout)?
    };

    print!("{}", report::format_report(&result));

    if !args.no_save {
        report::save_json(&result, &args.output)?;
        println!("\nAnalysis results saved to '{}'", args.output.display());
    }

    Ok(())
}

/// One awaited request on a current-thread runtime that lives only for this call
fn analyze_async(
    credentials: &Credentials,
    image: &Path,
    features: &[VisualFeature],
    timeout: Option<Duration>,
) -> Result<AnalysisResult> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async {
        let client = VisionClient::new(credentials, timeout)?;
        let image_data = tokio::fs::read(image)
            .await
            .with_context(|| format!("failed to read image '{}'", image.display()))?;

        let request = AnalysisRequest::new(image_data, features);
        let result = client
            .analyze(&request)
            .await
            .with_context(|| format!("analysis of '{}' via {} failed", image.display(), client.endpoint()))?;
        Ok::<_, anyhow::Error>(result)
    })
}

fn analyze_blocking(
    credentials: &Credentials,
    image: &Path,
    features: &[VisualFeature],
    timeout: Option<Duration>,
) -> Result<AnalysisResult> {
    let client = BlockingVisionClient::new(credentials, timeout)?;
    let image_data = std::fs::read(image)
        .with_context(|| format!("failed to read image '{}'", image.display()))?;

    let request = AnalysisRequest::new(image_data, features);
    let result = client
        .analyze(&request)
        .with_context(|| format!("analysis of '{}' via {} failed", image.display(), client.endpoint()))?;
    Ok(result)
}

fn check_client(credentials: &Credentials) -> Result<()> {
    let client = BlockingVisionClient::new(credentials, None)?;
    info!("Client constructed, no request issued");
    println!("Image Analysis client ready for {}", client.endpoint());
    Ok(())
}
