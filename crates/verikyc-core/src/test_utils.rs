//! Fixture helpers for classifier and reconciler tests
//!
//! Enabled for unit tests and, through the `test-utils` feature, for
//! integration tests and dependent crates.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

use crate::config::Layout;

/// Write `value` as pretty JSON to `dir/name`, creating `dir` if needed
pub fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    fs::create_dir_all(dir).expect("create fixture dir");
    let path = dir.join(name);
    let content = serde_json::to_string_pretty(value).expect("serialize fixture");
    fs::write(&path, content).expect("write fixture");
    path
}

/// Sorted file names directly under `dir` (empty when it does not exist)
pub fn read_dir_names(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Temporary `outputs` / `verification_documents` pair
///
/// The `TempDir` must be kept alive for as long as the layout is used.
pub fn temp_layout() -> (TempDir, Layout) {
    let root = tempfile::tempdir().expect("create temp dir");
    let layout = Layout::new(&root.path().join("outputs"), "verification_documents");
    fs::create_dir_all(&layout.outputs_dir).expect("create outputs dir");
    (root, layout)
}

/// Aadhaar extraction as the OCR service returns it
pub fn sample_aadhaar() -> Value {
    serde_json::json!({
        "Document_Type": "Aadhaar Card",
        "Aadhaar_Number": "2345 6789 0123",
        "Name_English": "Asha Verma",
        "DOB": "14/08/1991",
        "Address_English": "W/O Sunil, S/O: Ramesh Kumar, 12 Park Lane, New Delhi - 110001"
    })
}

/// PAN card extraction
pub fn sample_pan() -> Value {
    serde_json::json!({
        "document_type": "Income Tax Department - PAN",
        "permanent_account_number": "ABCPV1234D",
        "name": "ASHA VERMA",
        "father_name": "RAMESH KUMAR",
        "date_of_birth": "14/08/1991"
    })
}

/// Passport extraction split over two pages
pub fn sample_passport() -> Value {
    serde_json::json!([
        {
            "passport_number": "Z1234567",
            "surname": "VERMA",
            "given_names": "ASHA",
            "date_of_birth": "14/08/1991",
            "place_of_birth": "DELHI",
            "mrz_line1": "P<INDVERMA<<ASHA<<<<<<<<<<<<<<<<<<<<<<<<<<<<"
        },
        {
            "father_legal_guardian_name": "RAMESH KUMAR",
            "address_building": "12 PARK LANE",
            "address_city": "NEW DELHI",
            "address_state": "DELHI",
            "address_country": "INDIA"
        }
    ])
}

/// Voter ID extraction
pub fn sample_voter() -> Value {
    serde_json::json!({
        "document_type": "Election Commission of India - Elector Photo Identity Card",
        "epic_number": "XYZ1234567",
        "name_english": "Asha Verma",
        "father_s_name": "Ramesh Kumar",
        "address": "Ward 9, Karol Bagh, New Delhi",
        "assembly_constituency_name": "Karol Bagh"
    })
}

/// Driving licence extraction
pub fn sample_driving_licence() -> Value {
    serde_json::json!({
        "document_type": "Driving Licence",
        "dl_number": "DL-0420110149646",
        "name": "ASHA VERMA",
        "father_or_husband_name": "RAMESH KUMAR",
        "dob": "14-08-1991",
        "issuing_authority": "RTO DELHI",
        "class_lmv_issued_on": "01-02-2012"
    })
}
