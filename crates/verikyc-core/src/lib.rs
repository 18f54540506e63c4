//! verikyc Core Library
//!
//! Identity-document handling for KYC verification:
//! - Record loading and key normalization for OCR-extracted JSON
//! - Heuristic classifier for Aadhaar, passport, voter ID, driving licence and PAN
//! - KYC reconciler that merges canonical documents into one record
//! - Directory layout configuration (outputs / verification_documents)

pub mod classify;
pub mod config;
pub mod error;
pub mod kyc;
pub mod models;
pub mod records;

/// Test utilities for building fixture directories
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use classify::{
    classify_directory, classify_verification_documents, score_file, ClassifySummary,
    FileOutcome,
};
pub use config::{ConfigSource, Layout, LayoutConfig};
pub use error::{Error, Result};
pub use kyc::{generate_user_kyc, reconcile, CanonicalDocuments, KYC_FILENAME};
pub use models::{ClassificationScore, DocumentType, KycRecord};
pub use records::Record;
