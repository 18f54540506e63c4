//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Layout resolution shared by every command, and `paths`
//! - `classify` - Classification pass and single-file scoring
//! - `kyc` - KYC reconciliation and the combined verify flow

pub mod classify;
pub mod core;
pub mod kyc;

// Re-export command functions for main.rs
pub use classify::*;
pub use core::*;
pub use kyc::*;
