//! Heuristic classifier for identity documents
//!
//! Each JSON file in the extraction output directory is scored against every
//! `DocumentType` using weighted key presence:
//! - +12 when a record carries the type's primary identifier
//! - +1 per corroborating field group (name, address, date of birth, ...)
//! - a small bonus when the free-text `document_type` field or the passport
//!   MRZ line mentions the type
//!
//! Scores are summed across all records of a file. A file whose best score
//! clears the threshold is moved verbatim to `<target>/<type>.json`; anything
//! else stays where it is. A pass never fails on a single bad file.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::models::{ClassificationScore, DocumentType, PRIMARY_WEIGHT};
use crate::records::{has_any, lowercase_text, records_from_value, Record};

/// Scoring table for one document type
struct TypeRules {
    doc_type: DocumentType,
    /// Alternate spellings of the type's identifier field
    primary: &'static [&'static str],
    /// Corroborating groups, each worth at most one point per record
    secondary: &'static [&'static [&'static str]],
    /// Substrings of `document_type` that hint at this type
    text_tokens: &'static [&'static str],
    text_bonus: u32,
}

const DOB: &[&str] = &["dob", "date_of_birth", "birth_date"];

const RULES: [TypeRules; 5] = [
    TypeRules {
        doc_type: DocumentType::Aadhaar,
        primary: &[
            "aadhaar_number",
            "aadhaar no",
            "aadhaar card",
            "uid",
            "uidai",
            "uidai_number",
            "aadhaarid",
            "aadhaarid_number",
            "aadhaaridno",
            "unique identification number",
            "aadhaar_ref",
            "aadhaar reference",
        ],
        secondary: &[
            &["name", "name_english", "name_hindi", "full_name"],
            &[
                "s_o_name_english",
                "s_o_name_hindi",
                "s_o",
                "s/o",
                "father_or_husband_name",
                "father_name",
            ],
            &[
                "address",
                "address_english",
                "address_line1_english",
                "address_line1",
            ],
            DOB,
        ],
        text_tokens: &["aadhaar", "uidai"],
        text_bonus: 1,
    },
    TypeRules {
        doc_type: DocumentType::Passport,
        primary: &[
            "passport_number",
            "passport no",
            "passport",
            "passport card",
            "document_number",
            "passportid",
            "passportid_number",
            "passportidno",
            "passport reference",
            "passport code",
        ],
        secondary: &[
            &["given_names", "surname", "name"],
            &["place_of_issue", "place_of_birth", "address_city"],
            DOB,
        ],
        text_tokens: &["passport"],
        text_bonus: 2,
    },
    TypeRules {
        doc_type: DocumentType::Voter,
        primary: &[
            "epic_number",
            "epic no",
            "voter_id",
            "voterid",
            "voterid_number",
            "voteridno",
            "voter id no",
            "voter card",
            "voter_card",
            "voteridcard",
            "voter reference",
            "eci number",
            "election commission",
            "epic",
            "epic card",
        ],
        secondary: &[
            &["assembly_constituency_name", "part_number", "part_name"],
            &["name", "name_english"],
            &["address", "address_english"],
            &["dob", "date_of_birth"],
        ],
        text_tokens: &["elector", "voter", "epic"],
        text_bonus: 1,
    },
    TypeRules {
        doc_type: DocumentType::DrivingLicence,
        primary: &[
            "dl_number",
            "dl_no",
            "driving_licence_number",
            "driving_license_number",
            "licence_number",
            "licence_no",
            "drivinglicence_number",
            "drivinglicence_no",
            "drivinglicence",
            "dlid",
            "dlid_number",
            "dlidno",
            "driver's license",
            "driver licence",
            "driving licence card",
            "driving license card",
        ],
        secondary: &[
            &[
                "class_lmv_issued_on",
                "class_mcwg_issued_on",
                "issued_on_lmv",
                "issued_on_mcwg",
                "issued_on",
            ],
            &[
                "issuing_authority",
                "issuing_authority_signature",
                "issuing_authority_name",
            ],
            &["name", "name_english", "name_hindi"],
            DOB,
            &["state", "issuing_state", "state_code"],
        ],
        text_tokens: &["driving", "licence"],
        text_bonus: 4,
    },
    TypeRules {
        doc_type: DocumentType::Pan,
        primary: &[
            "pan_number",
            "pan no",
            "pan",
            "pan card",
            "pan id",
            "panid",
            "panid_number",
            "panidno",
            "permanent_account_number",
            "pan ref",
            "pan reference",
        ],
        secondary: &[
            &["name", "name_english"],
            &["father_name", "father_or_husband_name"],
            &["dob", "date_of_birth"],
        ],
        text_tokens: &["pan", "income tax"],
        text_bonus: 1,
    },
];

/// Passport machine-readable zone lines; their presence alone scores as an identifier
const MRZ_KEYS: [&str; 2] = ["mrz_line1", "mrz_line2"];

/// Add one record's evidence to the running score
pub fn score_record(record: &Record, score: &mut ClassificationScore) {
    let doc_type_text = lowercase_text(record, "document_type");

    for rules in &RULES {
        let primary = has_any(record, rules.primary);
        if primary {
            score.mark_primary(rules.doc_type);
        }

        let mut points = 0;
        let mrz_present = rules.doc_type == DocumentType::Passport
            && MRZ_KEYS.iter().any(|k| record.contains_key(*k));
        if primary || mrz_present {
            points += PRIMARY_WEIGHT;
        }

        points += rules
            .secondary
            .iter()
            .filter(|group| has_any(record, group))
            .count() as u32;

        let text_hit = rules
            .text_tokens
            .iter()
            .any(|token| doc_type_text.contains(token));
        let mrz_hit = rules.doc_type == DocumentType::Passport
            && lowercase_text(record, "mrz_line1").contains("p<");
        if text_hit || mrz_hit {
            points += rules.text_bonus;
        }

        score.add(rules.doc_type, points);
    }
}

/// Aggregate score for all records of one file
pub fn score_records(records: &[Record]) -> ClassificationScore {
    let mut score = ClassificationScore::new();
    for record in records {
        score_record(record, &mut score);
    }
    score
}

/// What happened to one input file during a pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// Moved into the canonical slot; `replaced` is set when an earlier
    /// canonical file of the same type was overwritten
    Classified {
        doc_type: DocumentType,
        replaced: bool,
    },
    /// Evidence stayed below both thresholds; file left in place
    Unclassified { best: DocumentType, score: u32 },
    /// Unreadable, malformed, empty, or could not be moved; file left in place
    Skipped { reason: String },
}

/// Per-file results of a classification pass
#[derive(Debug, Clone, Default)]
pub struct ClassifySummary {
    pub files: Vec<(PathBuf, FileOutcome)>,
}

impl ClassifySummary {
    pub fn examined(&self) -> usize {
        self.files.len()
    }

    pub fn classified(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Classified { .. }))
    }

    pub fn unclassified(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Unclassified { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Skipped { .. }))
    }

    /// Document types written during the pass, in processing order
    pub fn classified_types(&self) -> Vec<DocumentType> {
        self.files
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                FileOutcome::Classified { doc_type, .. } => Some(*doc_type),
                _ => None,
            })
            .collect()
    }

    /// Outcome recorded for a file name, if it was examined
    pub fn outcome_for(&self, file_name: &str) -> Option<&FileOutcome> {
        self.files
            .iter()
            .find(|(path, _)| path.file_name().is_some_and(|n| n == file_name))
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.files.iter().filter(|(_, o)| pred(o)).count()
    }
}

/// Classify every `*.json` file directly under `source_dir` into `target_dir`
///
/// Files are visited in ascending name order, so when two files classify as the
/// same type the later name ends up in the canonical slot. Only failures that
/// stop the whole pass (unreadable source directory, uncreatable target
/// directory) are returned as errors.
pub fn classify_directory(source_dir: &Path, target_dir: &Path) -> Result<ClassifySummary> {
    fs::create_dir_all(target_dir)?;

    let mut candidates: Vec<PathBuf> = fs::read_dir(source_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_json_file(path))
        .collect();
    candidates.sort();

    let mut summary = ClassifySummary::default();
    for path in candidates {
        let outcome = match classify_file(&path, target_dir) {
            Ok(outcome) => outcome,
            Err(e) => FileOutcome::Skipped {
                reason: e.to_string(),
            },
        };
        debug!("{}: {:?}", path.display(), outcome);
        summary.files.push((path, outcome));
    }

    info!(
        "Classification pass over {}: {} classified, {} unclassified, {} skipped",
        source_dir.display(),
        summary.classified(),
        summary.unclassified(),
        summary.skipped()
    );
    Ok(summary)
}

/// Best-effort classification pass
///
/// Never fails and returns nothing: classification runs opportunistically over
/// a noisy directory and partial success is the normal outcome. Use
/// [`classify_directory`] to observe what happened.
pub fn classify_verification_documents(source_dir: &Path, target_dir: &Path) {
    if let Err(e) = classify_directory(source_dir, target_dir) {
        debug!(
            "Classification of {} abandoned: {}",
            source_dir.display(),
            e
        );
    }
}

/// Score a single file without moving it
pub fn score_file(path: &Path) -> Result<ClassificationScore> {
    let content = fs::read(path)?;
    let value: Value = serde_json::from_slice(&content)?;
    let records = records_from_value(&value);
    if records.is_empty() {
        return Err(Error::UnsupportedShape(path.to_path_buf()));
    }
    Ok(score_records(&records))
}

fn is_json_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.to_lowercase().ends_with(".json"))
}

fn classify_file(path: &Path, target_dir: &Path) -> Result<FileOutcome> {
    let content = fs::read(path)?;
    let value: Value = serde_json::from_slice(&content)?;
    let records = records_from_value(&value);
    if records.is_empty() {
        return Err(Error::UnsupportedShape(path.to_path_buf()));
    }

    let score = score_records(&records);
    let Some(doc_type) = score.decision() else {
        let (best, score) = score.best();
        return Ok(FileOutcome::Unclassified { best, score });
    };

    let dest = target_dir.join(doc_type.filename());
    let replaced = place_canonical(path, &dest, &content)?;
    Ok(FileOutcome::Classified { doc_type, replaced })
}

/// Move `src` into the canonical slot `dest`, removing any previous occupant
///
/// Returns whether an existing canonical file was replaced.
fn place_canonical(src: &Path, dest: &Path, content: &[u8]) -> Result<bool> {
    if src == dest {
        return Ok(false);
    }

    let replaced = dest.exists();
    if replaced {
        if let Ok(existing) = fs::read(dest) {
            if content_digest(&existing) != content_digest(content) {
                warn!(
                    "Replacing {} with different content from {}",
                    dest.display(),
                    src.display()
                );
            }
        }
        fs::remove_file(dest).map_err(|source| Error::TargetLocked {
            path: dest.to_path_buf(),
            source,
        })?;
    }

    move_file(src, dest)?;
    Ok(replaced)
}

/// Rename, falling back to copy + delete across filesystems
fn move_file(src: &Path, dest: &Path) -> Result<()> {
    if fs::rename(src, dest).is_ok() {
        return Ok(());
    }
    fs::copy(src, dest)?;
    if let Err(e) = fs::remove_file(src) {
        // Keep the source as the only copy so the file reads as unmoved
        let _ = fs::remove_file(dest);
        return Err(Error::Io(e));
    }
    Ok(())
}

fn content_digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}
