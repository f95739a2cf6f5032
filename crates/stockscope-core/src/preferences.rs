//! Persisted user selections: language, theme, and chart period.
//!
//! Storage is a narrow string key-value capability ([`PreferenceStore`]);
//! [`Preferences`] layers typed accessors and defaults on top of it.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::{ChartPeriod, Language, PreferenceError, ValidationError};

pub const LANGUAGE_KEY: &str = "language";
pub const THEME_KEY: &str = "theme";
pub const CHART_PERIOD_KEY: &str = "chartPeriod";

/// String key-value storage that survives process restarts.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError>;
}

/// Colour theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl Display for Theme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ValidationError::InvalidTheme {
                value: other.to_owned(),
            }),
        }
    }
}

/// In-process store; contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: RwLock<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.write().map_err(|_| PreferenceError::Poisoned)?;
        values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Store backed by a JSON object file.
///
/// The file is read once on open and rewritten in full on every `set`, through
/// a sibling temp file that is renamed over the existing one.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl FilePreferenceStore {
    /// Opens `path`, treating a missing file as an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PreferenceError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => return Err(error.into()),
        };
        tracing::debug!(path = %path.display(), entries = values.len(), "preferences loaded");

        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, values: &BTreeMap<String, String>) -> Result<(), PreferenceError> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        let mut file = std::fs::File::create(&temp_path)?;
        file.write_all(serde_json::to_string_pretty(values)?.as_bytes())?;
        file.sync_all()?;
        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        let mut values = self.values.write().map_err(|_| PreferenceError::Poisoned)?;
        let previous = values.insert(key.to_owned(), value.to_owned());
        if let Err(error) = self.persist(&values) {
            match previous {
                Some(previous) => values.insert(key.to_owned(), previous),
                None => values.remove(key),
            };
            return Err(error);
        }
        Ok(())
    }
}

/// Typed view over a [`PreferenceStore`].
#[derive(Debug)]
pub struct Preferences<S> {
    store: S,
    locale_hint: Option<String>,
}

impl<S: PreferenceStore> Preferences<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            locale_hint: None,
        }
    }

    /// Locale used to pick a language when none has been saved, e.g. `ja_JP.UTF-8`.
    pub fn with_locale_hint(mut self, locale: impl Into<String>) -> Self {
        self.locale_hint = Some(locale.into());
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Saved language, else the locale hint, else English.
    pub fn language(&self) -> Language {
        self.store
            .get(LANGUAGE_KEY)
            .and_then(|saved| saved.parse().ok())
            .unwrap_or_else(|| {
                self.locale_hint
                    .as_deref()
                    .map(Language::from_locale)
                    .unwrap_or_default()
            })
    }

    pub fn set_language(&self, language: Language) -> Result<(), PreferenceError> {
        self.store.set(LANGUAGE_KEY, language.tag())
    }

    pub fn toggle_language(&self) -> Result<Language, PreferenceError> {
        let next = self.language().toggled();
        self.set_language(next)?;
        Ok(next)
    }

    pub fn theme(&self) -> Theme {
        self.store
            .get(THEME_KEY)
            .and_then(|saved| saved.parse().ok())
            .unwrap_or_default()
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), PreferenceError> {
        self.store.set(THEME_KEY, theme.as_str())
    }

    pub fn toggle_theme(&self) -> Result<Theme, PreferenceError> {
        let next = self.theme().toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    /// Saved chart period. A saved value that is not a known key is ignored.
    pub fn chart_period(&self) -> ChartPeriod {
        match self.store.get(CHART_PERIOD_KEY) {
            Some(saved) => saved.parse().unwrap_or_else(|_| {
                tracing::debug!(saved = %saved, "ignoring unrecognised saved chart period");
                ChartPeriod::default()
            }),
            None => ChartPeriod::default(),
        }
    }

    pub fn set_chart_period(&self, period: ChartPeriod) -> Result<(), PreferenceError> {
        self.store.set(CHART_PERIOD_KEY, period.as_str())
    }
}
