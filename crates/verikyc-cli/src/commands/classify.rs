//! Classification commands

use std::path::Path;

use anyhow::{Context, Result};
use verikyc_core::{classify_directory, score_file, DocumentType, FileOutcome, Layout};

pub fn cmd_classify(layout: &Layout) -> Result<()> {
    println!(
        "🔍 Classifying documents in {}...",
        layout.outputs_dir.display()
    );

    let summary = classify_directory(&layout.outputs_dir, &layout.verification_dir)
        .with_context(|| {
            format!(
                "Failed to classify documents in {}",
                layout.outputs_dir.display()
            )
        })?;

    for (path, outcome) in &summary.files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match outcome {
            FileOutcome::Classified { doc_type, replaced } => {
                let note = if *replaced { " (replaced existing)" } else { "" };
                println!("   {} → {}{}", name, doc_type.filename(), note);
            }
            FileOutcome::Unclassified { best, score } => {
                println!("   {} left in place (best: {} at {})", name, best, score);
            }
            FileOutcome::Skipped { reason } => {
                println!("   {} skipped: {}", name, reason);
            }
        }
    }

    println!("✅ Classification complete!");
    println!("   Classified: {}", summary.classified());
    println!("   Unclassified: {}", summary.unclassified());
    println!("   Skipped: {}", summary.skipped());
    println!("   Canonical files in {}", layout.verification_dir.display());

    Ok(())
}

pub fn cmd_score(file: &Path) -> Result<()> {
    let score =
        score_file(file).with_context(|| format!("Failed to score {}", file.display()))?;

    println!("📊 Scores for {}", file.display());
    for doc_type in DocumentType::all() {
        let marker = if score.primary_seen(*doc_type) {
            " (identifier present)"
        } else {
            ""
        };
        println!(
            "   {:<16} {:>3}{}",
            doc_type.label(),
            score.score(*doc_type),
            marker
        );
    }

    match score.decision() {
        Some(doc_type) => println!("   Decision: {} → {}", doc_type.label(), doc_type.filename()),
        None => println!("   Decision: unclassified (left in place)"),
    }

    Ok(())
}
