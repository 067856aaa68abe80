mod decode;
mod estimate;
mod prepare;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use morphdisamb_core::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "disamb", about = "Bigram Viterbi disambiguation of morphological analyses")]
struct Args {
    /// TOML configuration; defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Read the tagged corpus and write roots.txt, igs.txt and stats.txt.
    Prepare {
        #[arg(long)]
        corpus_dir: Option<PathBuf>,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Run the external estimator over roots.txt and igs.txt.
    Estimate {
        #[arg(long)]
        lm_dir: Option<PathBuf>,
    },
    /// Decode lattices read from JSON, or the built-in sample sentences.
    Decode {
        /// JSON file with one sentence object or an array of them. Without it the
        /// built-in sentences are used; their IG keys only match the sample tables.
        #[arg(long)]
        lattice: Option<PathBuf>,
        /// Score with the built-in sample count tables instead of the ARPA models.
        #[arg(long)]
        demo_model: bool,
        #[arg(long)]
        lm_dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load_toml(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => Config::default(),
    };

    match args.command {
        Command::Prepare { corpus_dir, out_dir } => {
            let corpus_dir = corpus_dir.unwrap_or_else(|| PathBuf::from(&config.corpus_dir));
            let out_dir = out_dir.unwrap_or_else(|| PathBuf::from(&config.lm_corpus_dir));
            prepare::run(&config, &corpus_dir, &out_dir)
        }
        Command::Estimate { lm_dir } => {
            let lm_dir = lm_dir.unwrap_or_else(|| PathBuf::from(&config.lm_corpus_dir));
            estimate::run(&config, &lm_dir)
        }
        Command::Decode {
            lattice,
            demo_model,
            lm_dir,
        } => {
            let lm_dir = lm_dir.unwrap_or_else(|| PathBuf::from(&config.lm_corpus_dir));
            decode::run(&config, lattice.as_deref(), demo_model, &lm_dir)
        }
    }
}
