//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::Path;

use clap::Parser;
use verikyc_core::test_utils::{
    read_dir_names, sample_aadhaar, sample_driving_licence, sample_pan, sample_passport,
    sample_voter, temp_layout, write_json,
};
use verikyc_core::{KycRecord, KYC_FILENAME};

use crate::cli::{Cli, Commands};
use crate::commands::{self, DirArgs};

fn read_kyc(dir: &Path) -> KycRecord {
    let content = fs::read_to_string(dir.join(KYC_FILENAME)).unwrap();
    serde_json::from_str(&content).unwrap()
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_verify_with_submission() {
    let cli = Cli::parse_from(["verikyc", "verify", "--submission", "S1", "--json"]);
    match cli.command {
        Commands::Verify { submission, json } => {
            assert_eq!(submission.as_deref(), Some("S1"));
            assert!(json);
        }
        _ => panic!("expected verify"),
    }
}

#[test]
fn test_parse_get_kyc_alias_and_globals() {
    let cli = Cli::parse_from(["verikyc", "get-kyc", "--outputs", "/tmp/out", "-v"]);
    assert!(matches!(cli.command, Commands::Verify { .. }));
    assert_eq!(cli.outputs.as_deref(), Some(Path::new("/tmp/out")));
    assert!(cli.verbose);
}

// ========== Layout Tests ==========

#[test]
fn test_resolve_layout_overrides() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("verikyc.toml");
    fs::write(&config, "[paths]\nverification_dir_name = \"kyc\"\n").unwrap();
    let outputs = dir.path().join("extract");

    let args = DirArgs {
        config: Some(&config),
        outputs: Some(&outputs),
        verification_dir: None,
    };
    let (layout, _) = commands::resolve_layout(&args, Some("S7")).unwrap();
    assert_eq!(layout.outputs_dir, outputs.join("S7"));
    assert_eq!(layout.verification_dir, dir.path().join("kyc").join("S7"));

    let explicit = dir.path().join("elsewhere");
    let args = DirArgs {
        verification_dir: Some(&explicit),
        ..args
    };
    let (layout, _) = commands::resolve_layout(&args, None).unwrap();
    assert_eq!(layout.verification_dir, explicit);
}

#[test]
fn test_resolve_layout_rejects_traversal() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("verikyc.toml");
    fs::write(&config, "").unwrap();
    let args = DirArgs {
        config: Some(&config),
        ..Default::default()
    };
    assert!(commands::resolve_layout(&args, Some("../other")).is_err());
}

// ========== Command Tests ==========

#[test]
fn test_cmd_classify_then_kyc() {
    let (_root, layout) = temp_layout();
    write_json(&layout.outputs_dir, "1.json", &sample_aadhaar());
    write_json(&layout.outputs_dir, "2.json", &sample_pan());
    write_json(&layout.outputs_dir, "3.json", &sample_passport());
    write_json(&layout.outputs_dir, "4.json", &sample_voter());
    write_json(&layout.outputs_dir, "5.json", &sample_driving_licence());

    commands::cmd_classify(&layout).unwrap();
    assert!(read_dir_names(&layout.outputs_dir).is_empty());
    assert_eq!(read_dir_names(&layout.verification_dir).len(), 5);

    commands::cmd_kyc(&layout).unwrap();
    let kyc = read_kyc(&layout.verification_dir);
    assert_eq!(kyc.full_name.as_deref(), Some("Asha Verma"));
    assert_eq!(kyc.father_name.as_deref(), Some("Ramesh Kumar"));
    assert_eq!(kyc.aadhaar_number.as_deref(), Some("2345 6789 0123"));
    assert_eq!(kyc.pan_number.as_deref(), Some("ABCPV1234D"));
    assert_eq!(kyc.dl_number.as_deref(), Some("DL-0420110149646"));
    assert_eq!(kyc.date_of_birth.as_deref(), Some("14/08/1991"));
}

#[test]
fn test_cmd_classify_missing_outputs_fails() {
    let (_root, layout) = temp_layout();
    fs::remove_dir(&layout.outputs_dir).unwrap();
    assert!(commands::cmd_classify(&layout).is_err());
}

#[test]
fn test_cmd_verify_passport_only() {
    let (_root, layout) = temp_layout();
    write_json(&layout.outputs_dir, "pp.json", &sample_passport());

    commands::cmd_verify(&layout, None, false).unwrap();
    let kyc = read_kyc(&layout.verification_dir);
    assert_eq!(kyc.full_name.as_deref(), Some("ASHA VERMA"));
    assert_eq!(kyc.father_name.as_deref(), Some("RAMESH KUMAR"));
    assert_eq!(
        kyc.address.as_deref(),
        Some("12 PARK LANE, NEW DELHI, DELHI, INDIA")
    );
    assert_eq!(kyc.aadhaar_number, None);
}

#[test]
fn test_cmd_verify_reconciles_even_when_classification_fails() {
    let (_root, layout) = temp_layout();
    fs::remove_dir(&layout.outputs_dir).unwrap();
    write_json(
        &layout.verification_dir,
        "pan.json",
        &serde_json::json!({"pan": "ABCDE1234F"}),
    );

    commands::cmd_verify(&layout, Some("S1"), true).unwrap();
    let kyc = read_kyc(&layout.verification_dir);
    assert_eq!(kyc.pan_number.as_deref(), Some("ABCDE1234F"));
}

#[test]
fn test_cmd_score_reports_without_moving() {
    let (_root, layout) = temp_layout();
    let path = write_json(&layout.outputs_dir, "dl.json", &sample_driving_licence());

    commands::cmd_score(&path).unwrap();
    assert!(path.exists());
    assert!(commands::cmd_score(&layout.outputs_dir.join("missing.json")).is_err());
}
