use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_NOTE: &str = "PDW/PDW Config.md";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid ignore pattern {pattern:?}: {source}")]
    InvalidIgnorePattern {
        pattern: String,
        source: glob::PatternError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub vault_path: PathBuf,
    /// Vault config note, relative to `vault_path`.
    #[serde(default = "default_config_note")]
    pub config_note: PathBuf,
    #[serde(default = "default_true")]
    pub include_empty_blocks: bool,
    /// Glob patterns, relative to the vault, for folders and notes to skip
    /// (templates, attachments).
    #[serde(default)]
    pub ignore: Vec<String>,
}

fn default_config_note() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_NOTE)
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn new(vault_path: impl Into<PathBuf>) -> Self {
        Self {
            vault_path: vault_path.into(),
            config_note: default_config_note(),
            include_empty_blocks: true,
            ignore: vec![],
        }
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded vault path
        config.vault_path = Self::expand_path(&config.vault_path).unwrap_or(config.vault_path);
        config.ignore_patterns()?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/vault-blocks");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    /// Absolute location of the vault config note.
    pub fn config_note_path(&self) -> PathBuf {
        self.vault_path.join(&self.config_note)
    }

    /// Compiles `ignore` into glob patterns.
    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>, ConfigError> {
        self.ignore
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|source| ConfigError::InvalidIgnorePattern {
                    pattern: p.clone(),
                    source,
                })
            })
            .collect()
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/vault-blocks/config.toml"));
    }

    #[test]
    fn test_defaults_for_optional_fields() {
        let config: Config = toml::from_str(r#"vault_path = "/vault""#).unwrap();

        assert_eq!(config, Config::new("/vault"));
        assert_eq!(config.config_note, PathBuf::from("PDW/PDW Config.md"));
        assert!(config.include_empty_blocks);
        assert!(config.ignore.is_empty());
    }

    #[test]
    fn test_config_note_path_joins_vault() {
        let config = Config::new("/vault");
        assert_eq!(
            config.config_note_path(),
            PathBuf::from("/vault/PDW/PDW Config.md")
        );
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = Config::expand_path(Path::new("~/test/path")).unwrap();

        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        assert_eq!(Config::expand_path(&path).unwrap(), path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_load_expands_env_var() {
        unsafe {
            env::set_var("VAULT_BLOCKS_TEST_ROOT", "/custom/vaults");
        }

        let temp_dir = TempDir::new().unwrap();
        let path = write_config(
            &temp_dir,
            r#"
vault_path = "$VAULT_BLOCKS_TEST_ROOT/main"
config_note = "Meta/Config.md"
include_empty_blocks = false
ignore = ["Templates", "**/attachments"]
"#,
        );

        let config = Config::load_from_path(&path).unwrap().unwrap();

        assert_eq!(config.vault_path, PathBuf::from("/custom/vaults/main"));
        assert_eq!(config.config_note, PathBuf::from("Meta/Config.md"));
        assert!(!config.include_empty_blocks);
        assert_eq!(config.ignore_patterns().unwrap().len(), 2);

        unsafe {
            env::remove_var("VAULT_BLOCKS_TEST_ROOT");
        }
    }

    #[test]
    fn test_invalid_ignore_pattern_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "vault_path = \"/vault\"\nignore = [\"[\"]\n");

        let err = Config::load_from_path(&path).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::InvalidIgnorePattern { ref pattern, .. } if pattern == "["
        ));
    }

    #[test]
    fn test_parse_error_names_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_config(&temp_dir, "include_empty_blocks = true\n");

        let err = Config::load_from_path(&path).unwrap_err();

        assert!(matches!(err, ConfigError::ConfigParseError { .. }));
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("nested/config.toml");
        let mut test_config = Config::new("/tmp/test-vault");
        test_config.ignore = vec!["Templates".into()];

        test_config.save_to_path(&config_file).unwrap();
        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }
}
