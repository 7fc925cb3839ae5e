//! Settings supplying provider credentials and endpoint overrides

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::error::{MindlinkError, Result};

/// Settings consulted by provider constructors
///
/// The API key here is a fallback: an explicit key passed to the constructor
/// always wins. `base_url` overrides the provider's default endpoint, which
/// is how OpenAI-compatible servers (and tests) are pointed at.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// OpenAI API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub openai_api_key: Option<String>,

    /// Custom API endpoint (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Settings {
    /// Resolve settings from the environment
    ///
    /// Loads a `.env` file if one is present, then reads `OPENAI_API_KEY`.
    #[must_use]
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();

        Self {
            openai_api_key: std::env::var("OPENAI_API_KEY").ok(),
            base_url: std::env::var("OPENAI_BASE_URL").ok(),
        }
    }

    /// Load settings from a JSON file
    ///
    /// A missing file yields default (empty) settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| MindlinkError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| MindlinkError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save settings to a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Fluent helper used mostly in tests and examples
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(key.into());
        self
    }
}
