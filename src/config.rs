use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TRANSCRIPT_BASE_URL: &str = "https://www.youtube-transcript.io";

/// Values read from the optional config file; everything may be omitted
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfigFile {
    pub port: Option<u16>,
    pub host: Option<String>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub gemini_base_url: Option<String>,
    pub transcript_api_key: Option<String>,
    pub transcript_base_url: Option<String>,
}

impl ConfigFile {
    /// Load the config file at `path`, or an empty one if it doesn't exist
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
            let file: ConfigFile =
                toml::from_str(&content).wrap_err_with(|| format!("failed to parse {}", path.display()))?;
            Ok(file)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(ConfigFile::default())
        }
    }
}

/// Resolved runtime configuration, immutable for the life of the process
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub transcript_api_key: Option<String>,
    pub transcript_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            transcript_api_key: None,
            transcript_base_url: DEFAULT_TRANSCRIPT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    /// Load the config file and the process environment, env winning.
    ///
    /// Call [`load_dotenv`] first so `.env` values are part of the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(config_path);
        let file = ConfigFile::load(&path)?;
        let config = Self::resolve(file, |key| std::env::var(key).ok())?;
        config.warn_missing_keys();
        Ok(config)
    }

    /// Merge file values with environment lookups; env wins
    pub fn resolve(file: ConfigFile, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let port = match env("PORT") {
            Some(raw) => raw.parse::<u16>().wrap_err_with(|| format!("invalid PORT value: {raw}"))?,
            None => file.port.unwrap_or(defaults.port),
        };

        Ok(Self {
            host: env("HOST").or(file.host).unwrap_or(defaults.host),
            port,
            gemini_api_key: env("GEMINI_API_KEY").or(file.gemini_api_key),
            gemini_model: env("GEMINI_MODEL")
                .or(file.gemini_model)
                .unwrap_or(defaults.gemini_model),
            gemini_base_url: env("GEMINI_BASE_URL")
                .or(file.gemini_base_url)
                .unwrap_or(defaults.gemini_base_url),
            transcript_api_key: env("YT_TRANSCRIPT_API_KEY").or(file.transcript_api_key),
            transcript_base_url: env("YT_TRANSCRIPT_BASE_URL")
                .or(file.transcript_base_url)
                .unwrap_or(defaults.transcript_base_url),
        })
    }

    fn warn_missing_keys(&self) {
        if self.gemini_api_key.is_none() {
            warn!("GEMINI_API_KEY is not set; summarization requests will fail");
        }
        if self.transcript_api_key.is_none() {
            warn!("YT_TRANSCRIPT_API_KEY is not set; transcript lookups will fail");
        }
    }
}

/// Load `.env` from the working directory into the process environment.
///
/// Existing variables are not overridden. Runs before logging is set up, so
/// the outcome is returned for the caller to log.
pub fn load_dotenv() -> std::result::Result<PathBuf, dotenvy::Error> {
    dotenvy::dotenv()
}

/// Load a specific env file into the process environment
pub fn load_dotenv_from(path: &Path) -> std::result::Result<PathBuf, dotenvy::Error> {
    dotenvy::from_path(path).map(|()| path.to_path_buf())
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytsum")
        .join("config.toml")
}
