//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// verikyc - Sort extracted identity documents and consolidate KYC details
#[derive(Parser)]
#[command(name = "verikyc")]
#[command(about = "Identity document classifier and KYC reconciler", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (default: data-dir override, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding extracted document JSON (overrides config)
    #[arg(long, global = true)]
    pub outputs: Option<PathBuf>,

    /// Directory for canonical documents and user_kyc.json
    ///
    /// Defaults to a `verification_documents` directory beside the outputs directory.
    #[arg(long, global = true)]
    pub verification_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify extracted documents into canonical per-type files
    Classify {
        /// Submission ID (reads outputs/<id>, writes verification_documents/<id>)
        #[arg(short, long)]
        submission: Option<String>,
    },

    /// Build user_kyc.json from classified documents
    Kyc {
        /// Submission ID
        #[arg(short, long)]
        submission: Option<String>,
    },

    /// Classify documents, then build user_kyc.json
    #[command(alias = "get-kyc")]
    Verify {
        /// Submission ID
        #[arg(short, long)]
        submission: Option<String>,

        /// Print a machine-readable status object instead of a report
        #[arg(long)]
        json: bool,
    },

    /// Show classification scores for a single file without moving it
    Score {
        /// Extracted document JSON file
        file: PathBuf,
    },

    /// Show resolved directories and where the config came from
    Paths {
        /// Submission ID
        #[arg(short, long)]
        submission: Option<String>,
    },
}
