//! Input and output locations for a digest run.

use std::path::PathBuf;

/// Report folder used when nothing else is configured.
pub const DEFAULT_INPUT_DIR: &str = "docs/reports";

/// Digest file used when nothing else is configured.
pub const DEFAULT_OUTPUT_PATH: &str = "docs/data.json";

pub const INPUT_DIR_ENV: &str = "DIGEST_INPUT_DIR";
pub const OUTPUT_PATH_ENV: &str = "DIGEST_OUTPUT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigestConfig {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
}

impl Default for DigestConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }
}

impl DigestConfig {
    /// Defaults overridden by `DIGEST_INPUT_DIR` / `DIGEST_OUTPUT`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DigestConfig::from_env`] with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(INPUT_DIR_ENV).filter(|v| !v.is_empty()) {
            config.input_dir = PathBuf::from(dir);
        }
        if let Some(path) = lookup(OUTPUT_PATH_ENV).filter(|v| !v.is_empty()) {
            config.output_path = PathBuf::from(path);
        }
        config
    }

    /// Apply command-line overrides on top.
    pub fn with_overrides(mut self, input_dir: Option<PathBuf>, output_path: Option<PathBuf>) -> Self {
        if let Some(dir) = input_dir {
            self.input_dir = dir;
        }
        if let Some(path) = output_path {
            self.output_path = path;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DigestConfig::from_lookup(|_| None);
        assert_eq!(config, DigestConfig::default());
        assert_eq!(config.input_dir, PathBuf::from("docs/reports"));
        assert_eq!(config.output_path, PathBuf::from("docs/data.json"));
    }

    #[test]
    fn test_env_overrides_defaults() {
        let config = DigestConfig::from_lookup(|key| match key {
            INPUT_DIR_ENV => Some("site/reports".to_string()),
            OUTPUT_PATH_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.input_dir, PathBuf::from("site/reports"));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
    }

    #[test]
    fn test_flags_override_env() {
        let config = DigestConfig::from_lookup(|key| match key {
            INPUT_DIR_ENV => Some("env/reports".to_string()),
            OUTPUT_PATH_ENV => Some("env/data.json".to_string()),
            _ => None,
        })
        .with_overrides(Some(PathBuf::from("cli/reports")), None);
        assert_eq!(config.input_dir, PathBuf::from("cli/reports"));
        assert_eq!(config.output_path, PathBuf::from("env/data.json"));
    }
}
