//! verikyc CLI - Identity document classifier and KYC reconciler
//!
//! Usage:
//!   verikyc classify              Move recognized documents into verification_documents
//!   verikyc kyc                   Build user_kyc.json from classified documents
//!   verikyc verify                Classify, then build user_kyc.json
//!   verikyc score FILE            Show classification scores for one file
//!   verikyc paths                 Show resolved directories

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let dirs = commands::DirArgs {
        config: cli.config.as_deref(),
        outputs: cli.outputs.as_deref(),
        verification_dir: cli.verification_dir.as_deref(),
    };

    match cli.command {
        Commands::Classify { submission } => {
            let (layout, _) = commands::resolve_layout(&dirs, submission.as_deref())?;
            commands::cmd_classify(&layout)
        }
        Commands::Kyc { submission } => {
            let (layout, _) = commands::resolve_layout(&dirs, submission.as_deref())?;
            commands::cmd_kyc(&layout)
        }
        Commands::Verify { submission, json } => {
            let (layout, _) = commands::resolve_layout(&dirs, submission.as_deref())?;
            commands::cmd_verify(&layout, submission.as_deref(), json)
        }
        Commands::Score { file } => commands::cmd_score(&file),
        Commands::Paths { submission } => {
            let (layout, source) = commands::resolve_layout(&dirs, submission.as_deref())?;
            commands::cmd_paths(&layout, &source)
        }
    }
}
