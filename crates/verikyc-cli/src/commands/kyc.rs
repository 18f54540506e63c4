//! KYC commands

use anyhow::{Context, Result};
use serde_json::json;
use verikyc_core::{classify_directory, reconcile, KycRecord, Layout, KYC_FILENAME};

fn print_kyc(kyc: &KycRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(kyc)?;
    println!("{}", json);
    Ok(())
}

pub fn cmd_kyc(layout: &Layout) -> Result<()> {
    println!(
        "🪪 Building KYC record from {}...",
        layout.verification_dir.display()
    );

    let kyc = reconcile(&layout.verification_dir).with_context(|| {
        format!(
            "Failed to write {}",
            layout.verification_dir.join(KYC_FILENAME).display()
        )
    })?;

    println!("   Resolved {} of 7 fields", kyc.filled_fields());
    print_kyc(&kyc)
}

/// Classify then reconcile, reporting each stage independently
///
/// A failed classification pass does not stop reconciliation: canonical files
/// from earlier runs may still be present.
pub fn cmd_verify(layout: &Layout, submission: Option<&str>, as_json: bool) -> Result<()> {
    let classification = classify_directory(&layout.outputs_dir, &layout.verification_dir);
    let kyc = reconcile(&layout.verification_dir);
    let kyc_file = layout.verification_dir.join(KYC_FILENAME);

    if as_json {
        let status = json!({
            "submission_id": submission,
            "classification": match &classification {
                Ok(_) => "success".to_string(),
                Err(e) => format!("error: {}", e),
            },
            "kyc": match &kyc {
                Ok(_) => "success".to_string(),
                Err(e) => format!("error: {}", e),
            },
            "classified": classification.as_ref().map(|s| s.classified()).unwrap_or(0),
            "unclassified": classification.as_ref().map(|s| s.unclassified()).unwrap_or(0),
            "skipped": classification.as_ref().map(|s| s.skipped()).unwrap_or(0),
            "verification_dir": layout.verification_dir.display().to_string(),
            "kyc_file": kyc_file.display().to_string(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    match &classification {
        Ok(summary) => {
            println!("🔍 Classification complete!");
            println!("   Classified: {}", summary.classified());
            println!("   Unclassified: {}", summary.unclassified());
            println!("   Skipped: {}", summary.skipped());
        }
        Err(e) => println!("⚠️  Classification failed: {}", e),
    }

    println!();
    match kyc {
        Ok(kyc) => {
            println!("🪪 Wrote {}", kyc_file.display());
            println!("   Resolved {} of 7 fields", kyc.filled_fields());
            print_kyc(&kyc)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to write {}", kyc_file.display())),
    }
}
