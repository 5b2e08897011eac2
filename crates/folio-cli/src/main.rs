//! folio - TEI document generation for the corpus.
//!
//! Two modes: `generate` fetches the full record snapshot and renders TEI
//! documents (everything, one named series, or the series matching files in
//! an input directory); `update-motifs` re-applies only the motif taxonomy
//! to existing documents.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio_client::CorpusClient;
use folio_core::defaults;
use folio_tei::{pipeline, SeriesSelection, TeiContext};

#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about = "TEI document generation for the corpus")]
#[command(propagate_version = true)]
struct Cli {
    /// Base URL of the corpus API (overrides FOLIO_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch records and generate TEI documents
    Generate {
        /// Regenerate every series
        #[arg(long)]
        all: bool,

        /// Regenerate one series by title
        #[arg(short, long, conflicts_with = "all")]
        series: Option<String>,

        /// Directory whose .xml files select the series to regenerate
        /// (default mode when neither --all nor --series is given)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for generated documents
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Re-apply the motif taxonomy to existing documents
    UpdateMotifs {
        /// Patch exactly this file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Directory of documents to patch (used when --file is absent)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory for patched documents
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = match cli.api_base {
        Some(base) => CorpusClient::new(base),
        None => CorpusClient::from_env(),
    };
    let ctx = TeiContext::from_env();

    match cli.command {
        Commands::Generate {
            all,
            series,
            input,
            output,
        } => {
            let output = resolve_dir(output, "FOLIO_OUTPUT_DIR", defaults::OUTPUT_DIR);
            let selection = if all {
                SeriesSelection::All
            } else if let Some(title) = series {
                SeriesSelection::ByTitle(title)
            } else {
                SeriesSelection::FromInputDir(resolve_dir(
                    input,
                    "FOLIO_INPUT_DIR",
                    defaults::INPUT_DIR,
                ))
            };
            pipeline::generate(&client, selection, &output, &ctx)
                .await
                .context("generating TEI documents")?;
        }
        Commands::UpdateMotifs {
            file,
            input,
            output,
        } => {
            let output = resolve_dir(output, "FOLIO_OUTPUT_DIR", defaults::OUTPUT_DIR);
            match file {
                Some(file) => {
                    pipeline::update_motifs_file(&client, &file, &output, &ctx)
                        .await
                        .context("updating motif taxonomy")?;
                }
                None => {
                    let input = resolve_dir(input, "FOLIO_INPUT_DIR", defaults::INPUT_DIR);
                    pipeline::update_motifs_dir(&client, &input, &output, &ctx)
                        .await
                        .context("updating motif taxonomy")?;
                }
            }
        }
    }

    Ok(())
}

/// Flag → environment variable → compiled-in default.
fn resolve_dir(flag: Option<PathBuf>, env_var: &str, default: &str) -> PathBuf {
    flag.or_else(|| std::env::var(env_var).ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(default))
}
