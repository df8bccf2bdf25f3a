use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::SteelGrade;
use crate::domain::plate::{DEFAULT_LENGTH_MM, DEFAULT_THICKNESS_MM, DEFAULT_WIDTH_MM};
use crate::preview::DEFAULT_OPACITY;

fn default_width() -> f64 {
    DEFAULT_WIDTH_MM
}
fn default_length() -> f64 {
    DEFAULT_LENGTH_MM
}
fn default_thickness() -> f64 {
    DEFAULT_THICKNESS_MM
}
fn default_opacity() -> f64 {
    DEFAULT_OPACITY
}
fn default_out_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Defaults read from `plate3d.toml`; command-line flags override every key
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_length")]
    pub length: f64,
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    #[serde(default)]
    pub grade: SteelGrade,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,
    #[serde(default)]
    pub ascii: bool,
    #[serde(default)]
    pub preview: Option<PathBuf>,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            length: default_length(),
            thickness: default_thickness(),
            grade: SteelGrade::default(),
            opacity: default_opacity(),
            out_dir: default_out_dir(),
            ascii: false,
            preview: None,
            verbose: false,
        }
    }
}

/// A config file that was found but could not be used
#[derive(Debug, Clone)]
pub struct RejectedConfig {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of searching for a config file
///
/// Rejected files are returned rather than logged so the caller can report
/// them once logging is set up.
#[derive(Debug, Default)]
pub struct ConfigLookup {
    pub config: Option<FileConfig>,
    pub rejected: Vec<RejectedConfig>,
}

impl FileConfig {
    /// Search the usual locations and return the first config that parses
    pub fn load() -> ConfigLookup {
        Self::load_from(&get_config_paths())
    }

    /// Return the first of `paths` that exists and parses
    pub fn load_from(paths: &[PathBuf]) -> ConfigLookup {
        let mut lookup = ConfigLookup::default();

        for path in paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        lookup.config = Some(config);
                        break;
                    }
                    Err(e) => lookup.rejected.push(RejectedConfig {
                        path: path.clone(),
                        error: e.to_string(),
                    }),
                }
            }
        }
        lookup
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("plate3d.toml"));
    paths.push(PathBuf::from(".plate3d.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("plate3d").join("config.toml"));
    }

    if let Some(home_dir) = dirs::home_dir() {
        paths.push(home_dir.join(".plate3d.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.width, 100.0);
        assert_eq!(config.length, 100.0);
        assert_eq!(config.thickness, 10.0);
        assert_eq!(config.grade, SteelGrade::Sae1020);
        assert_eq!(config.opacity, 1.0);
        assert_eq!(config.out_dir, PathBuf::from("."));
        assert!(!config.ascii);
        assert!(config.preview.is_none());
    }

    #[test]
    fn test_partial_config() {
        let config: FileConfig = toml::from_str(
            r#"
            thickness = 6.35
            grade = "aisi-316"
            out_dir = "build"
            "#,
        )
        .unwrap();

        assert_eq!(config.thickness, 6.35);
        assert_eq!(config.grade, SteelGrade::Aisi316);
        assert_eq!(config.out_dir, PathBuf::from("build"));
        assert_eq!(config.width, 100.0);
    }

    #[test]
    fn test_unknown_grade_rejected() {
        let result: Result<FileConfig, _> = toml::from_str(r#"grade = "S355""#);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("S355"));
    }

    #[test]
    fn test_default_matches_empty_file() {
        let parsed: FileConfig = toml::from_str("").unwrap();
        let built = FileConfig::default();
        assert_eq!(parsed.width, built.width);
        assert_eq!(parsed.grade, built.grade);
        assert_eq!(parsed.opacity, built.opacity);
    }

    #[test]
    fn test_malformed_file_is_reported_and_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let broken = dir.path().join("plate3d.toml");
        let valid = dir.path().join(".plate3d.toml");
        std::fs::write(&broken, r#"width = "oops""#).unwrap();
        std::fs::write(&valid, "thickness = 3.0").unwrap();

        let lookup = FileConfig::load_from(&[broken.clone(), valid]);

        assert_eq!(lookup.config.unwrap().thickness, 3.0);
        assert_eq!(lookup.rejected.len(), 1);
        assert_eq!(lookup.rejected[0].path, broken);
        assert!(lookup.rejected[0].error.contains("width"));
    }

    #[test]
    fn test_missing_files_give_no_config() {
        let dir = tempfile::tempdir().unwrap();

        let lookup = FileConfig::load_from(&[dir.path().join("absent.toml")]);

        assert!(lookup.config.is_none());
        assert!(lookup.rejected.is_empty());
    }

    #[test]
    fn test_config_paths_start_local() {
        let paths = get_config_paths();
        assert_eq!(paths[0], PathBuf::from("plate3d.toml"));
        assert_eq!(paths[1], PathBuf::from(".plate3d.toml"));
    }
}
