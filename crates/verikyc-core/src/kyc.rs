//! KYC reconciliation across canonical identity documents
//!
//! Reads the per-type canonical files produced by the classifier and resolves
//! each output field from a fixed document priority. A field takes the first
//! present value found, scanning documents by priority, then the key variants
//! listed for that document, then records in file order.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::Result;
use crate::models::{DocumentType, KycRecord};
use crate::records::{first_text, is_present, load_optional_records, Record};

/// Output file written into the verification directory
pub const KYC_FILENAME: &str = "user_kyc.json";

// Aadhaar
const AADHAAR_NAME: &[&str] = &["name_english", "name", "name_hindi", "full_name"];
const AADHAAR_NUMBER: &[&str] = &["aadhaar_number", "aadhaar no", "uid", "uidai_number"];
const AADHAAR_ADDRESS: &[&str] = &[
    "address_english",
    "address",
    "address_line1_english",
    "address_line1",
    "address_line2",
    "address_line3",
];
const AADHAAR_FATHER: &[&str] = &[
    "s_o_name_english",
    "s_o_name",
    "s_o",
    "father_or_husband_name",
    "father_name",
];
const AADHAAR_DOB: &[&str] = &["date_of_birth", "dob", "birth_date"];
/// Address fields searched for an "S/O" marker
const AADHAAR_SO_SOURCES: &[&str] = &["address_english", "address"];

// Voter ID
const VOTER_NAME: &[&str] = &["name_english", "name"];
const VOTER_FATHER: &[&str] = &["father_s_name", "father_name"];
const VOTER_ADDRESS: &[&str] = &["address", "address_english"];

// PAN
const PAN_NAME: &[&str] = &["name", "name_english"];
const PAN_NUMBER: &[&str] = &["pan_number", "pan no", "pan", "permanent_account_number"];
const PAN_FATHER: &[&str] = &["father_name"];
const PAN_ADDRESS: &[&str] = &["address"];

// Driving licence
const DL_NAME: &[&str] = &["name", "name_english"];
const DL_NUMBER: &[&str] = &[
    "dl_number",
    "dl_no",
    "driving_licence_number",
    "driving_license_number",
    "licence_number",
];
const DL_FATHER: &[&str] = &["father_or_husband_name", "father_name"];
const DL_ADDRESS: &[&str] = &["address"];

// Passport
const PASSPORT_GIVEN: &[&str] = &["given_names", "given_name"];
const PASSPORT_SURNAME: &[&str] = &["surname", "family_name"];
const PASSPORT_NAME: &[&str] = &["name"];
const PASSPORT_FATHER: &[&str] = &["father_legal_guardian_name", "father_name"];
const PASSPORT_ADDRESS_PARTS: &[&str] = &[
    "address_building",
    "address_city",
    "address_state",
    "address_country",
];

const DOB: &[&str] = &["date_of_birth", "dob"];

/// Records loaded from each canonical file; a missing file has no records
#[derive(Debug, Clone, Default)]
pub struct CanonicalDocuments {
    pub aadhaar: Vec<Record>,
    pub voter: Vec<Record>,
    pub pan: Vec<Record>,
    pub driving_licence: Vec<Record>,
    pub passport: Vec<Record>,
}

impl CanonicalDocuments {
    /// Load whichever canonical files exist in `dir`
    ///
    /// Missing files are empty. A file that exists but does not parse is also
    /// treated as empty so one corrupt document cannot block the others.
    pub fn load(dir: &Path) -> Self {
        let load = |doc_type: DocumentType| {
            let path = dir.join(doc_type.filename());
            load_optional_records(&path).unwrap_or_else(|e| {
                debug!("Ignoring unreadable {}: {}", path.display(), e);
                Vec::new()
            })
        };
        Self {
            aadhaar: load(DocumentType::Aadhaar),
            voter: load(DocumentType::Voter),
            pan: load(DocumentType::Pan),
            driving_licence: load(DocumentType::DrivingLicence),
            passport: load(DocumentType::Passport),
        }
    }

    pub fn records(&self, doc_type: DocumentType) -> &[Record] {
        match doc_type {
            DocumentType::Aadhaar => &self.aadhaar,
            DocumentType::Voter => &self.voter,
            DocumentType::Pan => &self.pan,
            DocumentType::DrivingLicence => &self.driving_licence,
            DocumentType::Passport => &self.passport,
        }
    }

    /// Document types that contributed at least one record
    pub fn present_types(&self) -> Vec<DocumentType> {
        DocumentType::all()
            .iter()
            .copied()
            .filter(|t| !self.records(*t).is_empty())
            .collect()
    }

    /// Resolve every KYC field from the loaded documents
    pub fn build_kyc(&self) -> KycRecord {
        KycRecord {
            full_name: self.full_name(),
            father_name: self.father_name(),
            aadhaar_number: first_text(&self.aadhaar, AADHAAR_NUMBER),
            pan_number: first_text(&self.pan, PAN_NUMBER),
            dl_number: first_text(&self.driving_licence, DL_NUMBER),
            date_of_birth: self.date_of_birth(),
            address: self.address(),
        }
    }

    fn full_name(&self) -> Option<String> {
        first_text(&self.aadhaar, AADHAAR_NAME)
            .or_else(|| first_text(&self.voter, VOTER_NAME))
            .or_else(|| first_text(&self.pan, PAN_NAME))
            .or_else(|| first_text(&self.driving_licence, DL_NAME))
            .or_else(|| passport_full_name(&self.passport))
    }

    fn father_name(&self) -> Option<String> {
        aadhaar_father_name(&self.aadhaar)
            .or_else(|| first_text(&self.voter, VOTER_FATHER))
            .or_else(|| first_text(&self.pan, PAN_FATHER))
            .or_else(|| first_text(&self.driving_licence, DL_FATHER))
            .or_else(|| first_text(&self.passport, PASSPORT_FATHER))
    }

    fn date_of_birth(&self) -> Option<String> {
        first_text(&self.passport, DOB)
            .or_else(|| first_text(&self.aadhaar, AADHAAR_DOB))
            .or_else(|| first_text(&self.voter, DOB))
            .or_else(|| first_text(&self.pan, DOB))
            .or_else(|| first_text(&self.driving_licence, DOB))
    }

    fn address(&self) -> Option<String> {
        first_text(&self.aadhaar, AADHAAR_ADDRESS)
            .or_else(|| first_text(&self.voter, VOTER_ADDRESS))
            .or_else(|| first_text(&self.pan, PAN_ADDRESS))
            .or_else(|| first_text(&self.driving_licence, DL_ADDRESS))
            .or_else(|| passport_address(&self.passport))
    }
}

/// Given names plus surname, given names alone, or the plain name field
fn passport_full_name(records: &[Record]) -> Option<String> {
    match first_text(records, PASSPORT_GIVEN) {
        Some(given) => match first_text(records, PASSPORT_SURNAME) {
            Some(surname) => Some(format!("{} {}", given, surname).trim().to_string()),
            None => Some(given),
        },
        None => first_text(records, PASSPORT_NAME),
    }
}

/// Non-blank address parts joined with ", "
fn passport_address(records: &[Record]) -> Option<String> {
    let parts: Vec<String> = PASSPORT_ADDRESS_PARTS
        .iter()
        .filter_map(|key| {
            records
                .iter()
                .filter_map(|rec| rec.get(*key))
                .find(|v| is_present(v))
        })
        .filter_map(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

fn son_of_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // "S/O", "S O", "S/O:" followed by the name, up to , - ( / \ | or newline.
        // A bare "SO" (sub office) is not a marker.
        Regex::new(r"(?i)\bS(?:\s*/\s*|\s+)O[\s:]*([^,\-(/\\|\r\n]+)").expect("valid regex")
    })
}

/// Father's name from an "S/O" marker in Aadhaar address text
pub fn extract_son_of(address: &str) -> Option<String> {
    son_of_pattern()
        .captures_iter(address)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|name| !name.is_empty())
        .map(str::to_string)
}

/// Aadhaar father name: "S/O" in the address first, explicit fields second
fn aadhaar_father_name(records: &[Record]) -> Option<String> {
    records
        .iter()
        .flat_map(|rec| AADHAAR_SO_SOURCES.iter().filter_map(move |key| rec.get(*key)))
        .filter_map(|v| v.as_str())
        .filter(|addr| !addr.trim().is_empty())
        .find_map(extract_son_of)
        .or_else(|| first_text(records, AADHAAR_FATHER))
}

/// Build the KYC record from `base_dir` and write `user_kyc.json`
///
/// Creates `base_dir` if needed. The output is fully overwritten on every run.
pub fn reconcile(base_dir: &Path) -> Result<KycRecord> {
    fs::create_dir_all(base_dir)?;

    let documents = CanonicalDocuments::load(base_dir);
    let kyc = documents.build_kyc();

    let out_path = base_dir.join(KYC_FILENAME);
    let json = serde_json::to_string_pretty(&kyc)?;
    fs::write(&out_path, json)?;

    info!(
        "Wrote {} ({} of 7 fields from {} documents)",
        out_path.display(),
        kyc.filled_fields(),
        documents.present_types().len()
    );
    Ok(kyc)
}

/// Best-effort reconciliation
///
/// Never fails: KYC consolidation is enrichment, so a write failure simply
/// leaves no artifact. Use [`reconcile`] to observe errors.
pub fn generate_user_kyc(base_dir: &Path) {
    if let Err(e) = reconcile(base_dir) {
        debug!(
            "KYC reconciliation in {} abandoned: {}",
            base_dir.display(),
            e
        );
    }
}
