//! Layout resolution shared by every command
//!
//! This module contains:
//! - `resolve_layout` - Combine config file, CLI overrides and submission id
//! - `cmd_paths` - Print the resolved directories

use std::path::Path;

use anyhow::{Context, Result};
use verikyc_core::{ConfigSource, Layout, LayoutConfig};

/// Directory-related global flags
#[derive(Debug, Default, Clone, Copy)]
pub struct DirArgs<'a> {
    pub config: Option<&'a Path>,
    pub outputs: Option<&'a Path>,
    pub verification_dir: Option<&'a Path>,
}

/// Resolve the directories a command operates on
///
/// CLI flags override the config file; the submission id namespaces both
/// directories after overrides are applied.
pub fn resolve_layout(args: &DirArgs, submission: Option<&str>) -> Result<(Layout, ConfigSource)> {
    let (mut config, source) =
        LayoutConfig::load(args.config).context("Failed to load configuration")?;

    if let Some(outputs) = args.outputs {
        config.outputs_dir = outputs.to_path_buf();
    }

    let mut layout = config.layout();
    if let Some(dir) = args.verification_dir {
        layout.verification_dir = dir.to_path_buf();
    }

    let layout = layout.scoped(submission).context("Invalid --submission")?;
    Ok((layout, source))
}

pub fn cmd_paths(layout: &Layout, source: &ConfigSource) -> Result<()> {
    println!("Config:        {}", source);
    println!("Outputs:       {}", layout.outputs_dir.display());
    println!("Verification:  {}", layout.verification_dir.display());
    Ok(())
}
