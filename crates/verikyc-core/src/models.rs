//! Domain models for verikyc

use serde::{Deserialize, Serialize};

/// Score awarded when a record carries a document type's primary identifier
pub const PRIMARY_WEIGHT: u32 = 12;

/// Minimum score accepted when the winning type's primary identifier was seen
pub const ACCEPT_WITH_PRIMARY: u32 = 12;

/// Minimum score accepted regardless of primary identifiers
pub const ACCEPT_WITHOUT_PRIMARY: u32 = 10;

/// Identity documents recognized by the classifier
///
/// Declaration order is the tie-break order: when two types share the highest
/// score, the one listed first wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Aadhaar,
    Passport,
    Voter,
    DrivingLicence,
    Pan,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar",
            Self::Passport => "passport",
            Self::Voter => "voter",
            Self::DrivingLicence => "driving_licence",
            Self::Pan => "pan",
        }
    }

    /// Canonical filename in the verification directory
    pub fn filename(&self) -> &'static str {
        match self {
            Self::Aadhaar => "aadhaar.json",
            Self::Passport => "passport.json",
            Self::Voter => "voter.json",
            Self::DrivingLicence => "driving_licence.json",
            Self::Pan => "pan.json",
        }
    }

    /// Human-readable label for CLI output
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aadhaar => "Aadhaar",
            Self::Passport => "Passport",
            Self::Voter => "Voter ID",
            Self::DrivingLicence => "Driving Licence",
            Self::Pan => "PAN",
        }
    }

    /// All document types, in tie-break order
    pub fn all() -> &'static [DocumentType] {
        &[
            Self::Aadhaar,
            Self::Passport,
            Self::Voter,
            Self::DrivingLicence,
            Self::Pan,
        ]
    }

    fn index(&self) -> usize {
        match self {
            Self::Aadhaar => 0,
            Self::Passport => 1,
            Self::Voter => 2,
            Self::DrivingLicence => 3,
            Self::Pan => 4,
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aadhaar" | "aadhar" => Ok(Self::Aadhaar),
            "passport" => Ok(Self::Passport),
            "voter" | "voter_id" | "epic" => Ok(Self::Voter),
            "driving_licence" | "driving_license" | "dl" => Ok(Self::DrivingLicence),
            "pan" => Ok(Self::Pan),
            _ => Err(format!("Unknown document type: {}", s)),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-type evidence accumulated over every record of one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassificationScore {
    scores: [u32; 5],
    primary_seen: [bool; 5],
}

impl ClassificationScore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, doc_type: DocumentType, points: u32) {
        self.scores[doc_type.index()] += points;
    }

    pub fn mark_primary(&mut self, doc_type: DocumentType) {
        self.primary_seen[doc_type.index()] = true;
    }

    pub fn score(&self, doc_type: DocumentType) -> u32 {
        self.scores[doc_type.index()]
    }

    /// Whether any record carried this type's primary identifier
    pub fn primary_seen(&self, doc_type: DocumentType) -> bool {
        self.primary_seen[doc_type.index()]
    }

    /// Highest-scoring type; ties resolve to the earliest in `DocumentType::all()`
    pub fn best(&self) -> (DocumentType, u32) {
        let mut best = (DocumentType::Aadhaar, self.score(DocumentType::Aadhaar));
        for &doc_type in &DocumentType::all()[1..] {
            let score = self.score(doc_type);
            if score > best.1 {
                best = (doc_type, score);
            }
        }
        best
    }

    /// Accepted type, or None when the evidence stays below both thresholds
    pub fn decision(&self) -> Option<DocumentType> {
        let (doc_type, score) = self.best();
        if self.primary_seen(doc_type) && score >= ACCEPT_WITH_PRIMARY {
            return Some(doc_type);
        }
        if score >= ACCEPT_WITHOUT_PRIMARY {
            return Some(doc_type);
        }
        None
    }
}

/// Consolidated identity record written to `user_kyc.json`
///
/// Every field is always serialized; absent values become `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KycRecord {
    #[serde(rename = "Full Name")]
    pub full_name: Option<String>,
    #[serde(rename = "Father Name")]
    pub father_name: Option<String>,
    #[serde(rename = "Aadhaar Number")]
    pub aadhaar_number: Option<String>,
    #[serde(rename = "PAN Number")]
    pub pan_number: Option<String>,
    #[serde(rename = "DL Number")]
    pub dl_number: Option<String>,
    #[serde(rename = "Date of Birth")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
}

impl KycRecord {
    /// Number of fields that resolved to a value
    pub fn filled_fields(&self) -> usize {
        [
            &self.full_name,
            &self.father_name,
            &self.aadhaar_number,
            &self.pan_number,
            &self.dl_number,
            &self.date_of_birth,
            &self.address,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_round_trip_names() {
        for doc_type in DocumentType::all() {
            assert_eq!(doc_type.as_str().parse::<DocumentType>().unwrap(), *doc_type);
            assert_eq!(doc_type.filename(), format!("{}.json", doc_type.as_str()));
        }
        assert!("ration_card".parse::<DocumentType>().is_err());
    }

    #[test]
    fn test_best_prefers_earliest_on_tie() {
        let mut score = ClassificationScore::new();
        score.add(DocumentType::Voter, 5);
        score.add(DocumentType::Pan, 5);
        assert_eq!(score.best(), (DocumentType::Voter, 5));

        score.add(DocumentType::Aadhaar, 5);
        assert_eq!(score.best(), (DocumentType::Aadhaar, 5));
    }

    #[test]
    fn test_decision_thresholds() {
        let mut score = ClassificationScore::new();
        score.add(DocumentType::Pan, 9);
        assert_eq!(score.decision(), None);

        score.add(DocumentType::Pan, 1);
        assert_eq!(score.decision(), Some(DocumentType::Pan));

        let mut primary = ClassificationScore::new();
        primary.add(DocumentType::Passport, 12);
        primary.mark_primary(DocumentType::Passport);
        assert_eq!(primary.decision(), Some(DocumentType::Passport));
    }

    #[test]
    fn test_kyc_record_serializes_all_keys() {
        let record = KycRecord {
            full_name: Some("Asha Verma".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 7);
        assert_eq!(obj["Full Name"], "Asha Verma");
        assert!(obj["Address"].is_null());
        assert_eq!(record.filled_fields(), 1);
    }

    #[test]
    fn test_kyc_record_key_order() {
        let json = serde_json::to_string(&KycRecord::default()).unwrap();
        let keys = [
            "Full Name",
            "Father Name",
            "Aadhaar Number",
            "PAN Number",
            "DL Number",
            "Date of Birth",
            "Address",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
