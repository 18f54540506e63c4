//! Directory layout configuration
//!
//! Extraction output lands in an `outputs` directory; classified documents and
//! `user_kyc.json` go to a `verification_documents` directory created next to
//! it. Both can be namespaced per submission:
//! `outputs/<id>/` → `verification_documents/<id>/`.
//!
//! ## Configuration Resolution
//!
//! 1. Explicit path (CLI `--config`)
//! 2. Override in data dir (~/.local/share/verikyc/config/verikyc.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/verikyc.toml");

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "built-in defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Directory layout settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Directory holding extracted per-document JSON files
    pub outputs_dir: PathBuf,
    /// Name of the verification directory, created beside `outputs_dir`
    pub verification_dir_name: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            outputs_dir: PathBuf::from("outputs"),
            verification_dir_name: "verification_documents".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Load configuration, returning where it came from
    ///
    /// An explicit path must exist; the data-dir override is optional.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read {}: {}", path.display(), e))
            })?;
            return Ok((parse_config(&content)?, ConfigSource::File(path.to_path_buf())));
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                let content = fs::read_to_string(&path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                return Ok((parse_config(&content)?, ConfigSource::File(path)));
            }
        }

        Ok((parse_config(DEFAULT_CONFIG)?, ConfigSource::Embedded))
    }

    /// Resolve the concrete directories
    pub fn layout(&self) -> Layout {
        Layout::new(&self.outputs_dir, &self.verification_dir_name)
    }
}

/// Concrete source and target directories for one pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Where unclassified extraction output is read from
    pub outputs_dir: PathBuf,
    /// Where canonical documents and `user_kyc.json` are written
    pub verification_dir: PathBuf,
}

impl Layout {
    /// Place the verification directory beside `outputs_dir`
    pub fn new(outputs_dir: &Path, verification_dir_name: &str) -> Self {
        let verification_dir = if outputs_dir.file_name().is_some() {
            outputs_dir
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(verification_dir_name)
        } else {
            // "." / ".." / "/" have no name to strip; step up instead
            outputs_dir.join("..").join(verification_dir_name)
        };
        Self {
            outputs_dir: outputs_dir.to_path_buf(),
            verification_dir,
        }
    }

    /// Namespace both directories under a submission id
    pub fn for_submission(&self, submission_id: &str) -> Result<Self> {
        validate_submission_id(submission_id)?;
        Ok(Self {
            outputs_dir: self.outputs_dir.join(submission_id),
            verification_dir: self.verification_dir.join(submission_id),
        })
    }

    /// Apply an optional submission id
    pub fn scoped(&self, submission_id: Option<&str>) -> Result<Self> {
        match submission_id {
            Some(id) => self.for_submission(id),
            None => Ok(self.clone()),
        }
    }
}

/// A submission id must be exactly one normal path component
pub fn validate_submission_id(id: &str) -> Result<()> {
    let mut components = Path::new(id).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) if !id.contains(['/', '\\']) => Ok(()),
        _ => Err(Error::InvalidData(format!("Invalid submission id: {:?}", id))),
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("verikyc").join("config").join("verikyc.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    paths: Option<RawPaths>,
}

#[derive(Debug, Deserialize)]
struct RawPaths {
    outputs_dir: Option<PathBuf>,
    verification_dir_name: Option<String>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<LayoutConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = LayoutConfig::default();

    if let Some(paths) = raw.paths {
        if let Some(outputs_dir) = paths.outputs_dir {
            config.outputs_dir = outputs_dir;
        }
        if let Some(name) = paths.verification_dir_name {
            validate_submission_id(&name).map_err(|_| {
                Error::Config(format!(
                    "verification_dir_name must be a plain directory name: {:?}",
                    name
                ))
            })?;
            config.verification_dir_name = name;
        }
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_config() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = parse_config("[paths]\noutputs_dir = \"/srv/extract\"\n").unwrap();
        assert_eq!(config.outputs_dir, PathBuf::from("/srv/extract"));
        assert_eq!(config.verification_dir_name, "verification_documents");

        let config = parse_config("").unwrap();
        assert_eq!(config, LayoutConfig::default());
    }

    #[test]
    fn test_parse_rejects_bad_config() {
        assert!(parse_config("[paths\n").is_err());
        assert!(parse_config("[paths]\nverification_dir_name = \"../x\"\n").is_err());
    }

    #[test]
    fn test_layout_sibling_directory() {
        let layout = LayoutConfig::default().layout();
        assert_eq!(layout.outputs_dir, PathBuf::from("outputs"));
        assert_eq!(layout.verification_dir, PathBuf::from("verification_documents"));

        let layout = Layout::new(Path::new("/data/run/outputs"), "verification_documents");
        assert_eq!(
            layout.verification_dir,
            PathBuf::from("/data/run/verification_documents")
        );
    }

    #[test]
    fn test_layout_from_current_dir() {
        let layout = Layout::new(Path::new("."), "verification_documents");
        assert_eq!(
            layout.verification_dir,
            PathBuf::from("./../verification_documents")
        );
    }

    #[test]
    fn test_layout_for_submission() {
        let layout = Layout::new(Path::new("/data/outputs"), "verification_documents")
            .for_submission("sub-42")
            .unwrap();
        assert_eq!(layout.outputs_dir, PathBuf::from("/data/outputs/sub-42"));
        assert_eq!(
            layout.verification_dir,
            PathBuf::from("/data/verification_documents/sub-42")
        );
    }

    #[test]
    fn test_submission_id_validation() {
        assert!(validate_submission_id("abc_123").is_ok());
        assert!(validate_submission_id("").is_err());
        assert!(validate_submission_id("..").is_err());
        assert!(validate_submission_id(".").is_err());
        assert!(validate_submission_id("a/b").is_err());
        assert!(validate_submission_id("a\\b").is_err());
        assert!(validate_submission_id("/abs").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[paths]\nverification_dir_name = \"kyc_docs\"\n").unwrap();

        let (config, source) = LayoutConfig::load(Some(&path)).unwrap();
        assert_eq!(config.verification_dir_name, "kyc_docs");
        assert_eq!(source, ConfigSource::File(path));

        assert!(LayoutConfig::load(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
