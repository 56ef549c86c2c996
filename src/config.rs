use crate::controller::replace::ReplaceScope;
use crate::dict::loader::{DictionarySource, DEFAULT_BASE_URL};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub locale: String,
    pub dictionary_url: String,
    pub dictionary_dir: Option<PathBuf>,
    pub max_suggestions: usize,
    pub debounce_ms: u64,
    pub toast_ms: u64,
    pub suggestion_scope: ReplaceScope,
    pub correct_all_scope: ReplaceScope,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en_US".to_string(),
            dictionary_url: DEFAULT_BASE_URL.to_string(),
            dictionary_dir: None,
            max_suggestions: 5,
            debounce_ms: 300,
            toast_ms: 3000,
            suggestion_scope: ReplaceScope::FirstIgnoreCase,
            correct_all_scope: ReplaceScope::AllMatchCase,
        }
    }
}

/// One config file; keys it leaves out keep their value from lower layers
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartialConfig {
    pub locale: Option<String>,
    pub dictionary_url: Option<String>,
    pub dictionary_dir: Option<PathBuf>,
    pub max_suggestions: Option<usize>,
    pub debounce_ms: Option<u64>,
    pub toast_ms: Option<u64>,
    pub suggestion_scope: Option<ReplaceScope>,
    pub correct_all_scope: Option<ReplaceScope>,
}

impl PartialConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Values given on the command line; `None` leaves the file value in place
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub locale: Option<String>,
    pub dictionary_url: Option<String>,
    pub dictionary_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration with priority: CLI args > local config > global config > defaults
    pub fn load(overrides: Overrides) -> Result<Self> {
        let mut config = Self::default();

        // Load global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                config = config.apply(PartialConfig::from_file(&global_path)?);
            }
        }

        // Load local config (overrides global)
        let local_path = PathBuf::from(".spelcheck.toml");
        if local_path.exists() {
            config = config.apply(PartialConfig::from_file(&local_path)?);
        }

        // Apply CLI overrides
        if let Some(locale) = overrides.locale {
            config.locale = locale;
        }
        if let Some(url) = overrides.dictionary_url {
            config.dictionary_url = url;
            // An explicit URL wins over a configured directory
            config.dictionary_dir = None;
        }
        if let Some(dir) = overrides.dictionary_dir {
            config.dictionary_dir = Some(dir);
        }

        if config.max_suggestions == 0 {
            anyhow::bail!("max_suggestions must be at least 1");
        }

        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        Ok(Self::default().apply(PartialConfig::from_file(path)?))
    }

    /// Layer the keys present in `partial` over this config
    fn apply(mut self, partial: PartialConfig) -> Self {
        if let Some(locale) = partial.locale {
            self.locale = locale;
        }
        if let Some(url) = partial.dictionary_url {
            self.dictionary_url = url;
        }
        if let Some(dir) = partial.dictionary_dir {
            self.dictionary_dir = Some(dir);
        }
        if let Some(max) = partial.max_suggestions {
            self.max_suggestions = max;
        }
        if let Some(ms) = partial.debounce_ms {
            self.debounce_ms = ms;
        }
        if let Some(ms) = partial.toast_ms {
            self.toast_ms = ms;
        }
        if let Some(scope) = partial.suggestion_scope {
            self.suggestion_scope = scope;
        }
        if let Some(scope) = partial.correct_all_scope {
            self.correct_all_scope = scope;
        }
        self
    }

    /// A configured directory takes precedence over the remote URL
    pub fn dictionary_source(&self) -> DictionarySource {
        match &self.dictionary_dir {
            Some(dir) => DictionarySource::Local { dir: dir.clone() },
            None => DictionarySource::Remote {
                base_url: self.dictionary_url.clone(),
            },
        }
    }

    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spelcheck").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
