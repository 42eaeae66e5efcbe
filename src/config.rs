//! Configuration file handling for gofinances.
//!
//! The configuration file is stored at `$GOFINANCES_HOME/config.json` and holds the locale and
//! currency summaries are rendered in, plus the location of the key-value storage directory.

use crate::storage::{FileStore, KeyValueStore};
use crate::summary::{Currency, Formatting, Locale};
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const APP_NAME: &str = "gofinances";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const STORAGE: &str = "storage";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$GOFINANCES_HOME` and from there it loads `$GOFINANCES_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    storage: PathBuf,
}

impl Config {
    /// Creates the home directory, the storage directory and an initial `config.json`.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory, e.g.
    ///   `$HOME/gofinances`
    /// - `locale` - How amounts, dates and labels are written
    /// - `currency` - Which currency symbol amounts carry
    ///
    /// # Errors
    /// - Returns an error if a config file already exists in `dir`.
    /// - Returns an error if any file operations fail.
    pub async fn create(
        dir: impl Into<PathBuf>,
        locale: Locale,
        currency: Currency,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the gofinances home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if config_path.exists() {
            bail!(
                "A config file already exists at '{}'",
                config_path.display()
            )
        }

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            locale,
            currency,
            storage_path: None,
        };
        config_file.save(&config_path).await?;

        let storage = resolve(&root, config_file.storage_path());
        utils::make_dir(&storage).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
            storage,
        })
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load the config file
    /// - return the loaded configuration object
    ///
    /// The storage directory does not need to exist yet, it is created on the first write.
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The gofinances home directory is missing, run 'gofinances init'")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!(
                "The config file is missing '{}', run 'gofinances init'",
                config_path.display()
            )
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let storage = resolve(&root, config_file.storage_path());

        Ok(Self {
            root,
            config_path,
            config_file,
            storage,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// The directory the key-value store keeps its files in.
    pub fn storage(&self) -> &Path {
        &self.storage
    }

    pub fn locale(&self) -> Locale {
        self.config_file.locale
    }

    pub fn currency(&self) -> Currency {
        self.config_file.currency
    }

    /// The formatting parameters summaries are rendered with.
    pub fn formatting(&self) -> Formatting {
        Formatting::new(self.locale(), self.currency())
    }

    /// Opens the key-value store backed by the storage directory.
    pub fn key_value_store(&self) -> Arc<dyn KeyValueStore> {
        Arc::new(FileStore::new(self.storage.clone()))
    }
}

/// Returns `p` if it is absolute, otherwise `p` relative to `root`.
fn resolve(root: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() {
        return p;
    }
    root.join(p)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "gofinances",
///   "config_version": 1,
///   "locale": "pt-BR",
///   "currency": "BRL",
///   "storage_path": "storage"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "gofinances"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Locale used for amounts, dates and labels
    #[serde(default)]
    locale: Locale,

    /// Currency symbol used for amounts
    #[serde(default)]
    currency: Currency,

    /// Path to the key-value storage directory (optional, relative to the home directory or
    /// absolute). Defaults to $GOFINANCES_HOME/storage if not specified
    #[serde(skip_serializing_if = "Option::is_none")]
    storage_path: Option<PathBuf>,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            locale: Locale::default(),
            currency: Currency::default(),
            storage_path: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it belongs to another app
    /// or a newer version of this one.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        anyhow::ensure!(
            config.config_version <= CONFIG_VERSION,
            "Config file version {} is newer than the supported version {}",
            config.config_version,
            CONFIG_VERSION
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }

    /// Gets the storage path.
    ///
    /// If the path is relative, it should be interpreted as relative to the home directory.
    /// If None, defaults to $GOFINANCES_HOME/storage
    pub fn storage_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(STORAGE))
    }
}
