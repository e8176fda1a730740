//! Configuration loading and credential resolution
//!
//! Bootstrap settings come from a TOML file; every field is optional and a
//! missing or unreadable file degrades to built-in defaults with a warning.
//!
//! Upstream credentials resolve with priority **Environment → TOML**. The
//! environment variable names match the ones the hosted deployment uses
//! (`NASA_API_KEY`, `OPENAI_API_KEY`, `YOUTUBE_API_KEY`, `FAL_KEY`).

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable overriding the root folder
pub const ROOT_FOLDER_ENV: &str = "COSMIC_ROOT_FOLDER";

/// Directory name used under the platform config/data directories
const APP_DIR_NAME: &str = "cosmic-journey";

/// Journal database file name inside the root folder
const DATABASE_FILE_NAME: &str = "cosmic-journey.db";

/// Bootstrap configuration loaded from TOML
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct TomlConfig {
    /// HTTP server port (CLI and `PORT` take precedence)
    #[serde(default)]
    pub port: Option<u16>,

    /// Root folder holding the journal database
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,

    /// Upstream credentials (environment variables take precedence)
    #[serde(default)]
    pub api_keys: ApiKeysConfig,

    /// Upstream base URLs
    #[serde(default)]
    pub endpoints: UpstreamEndpoints,

    /// Language model settings
    #[serde(default)]
    pub openai: OpenAiConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Credentials as written in the TOML file
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApiKeysConfig {
    #[serde(default)]
    pub nasa: Option<String>,
    #[serde(default)]
    pub openai: Option<String>,
    #[serde(default)]
    pub youtube: Option<String>,
    #[serde(default)]
    pub fal: Option<String>,
}

/// Base URLs of every upstream service
///
/// Overridable so a deployment can point at a proxy, and so tests can point
/// at local stand-ins.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamEndpoints {
    /// Celestial-body data API (`{base}/bodies/{name}`)
    pub solar_system: String,
    /// NASA open APIs (`{base}/planetary/apod`)
    pub nasa_api: String,
    /// NASA image library (`{base}/search`)
    pub nasa_images: String,
    /// YouTube Data API v3 (`{base}/search`)
    pub youtube: String,
    /// OpenAI REST API (`{base}/chat/completions`)
    pub openai: String,
    /// fal.ai synchronous runner (`{base}/{model_id}`)
    pub fal: String,
}

impl Default for UpstreamEndpoints {
    fn default() -> Self {
        Self {
            solar_system: "https://api.le-systeme-solaire.net/rest".to_string(),
            nasa_api: "https://api.nasa.gov".to_string(),
            nasa_images: "https://images-api.nasa.gov".to_string(),
            youtube: "https://www.googleapis.com/youtube/v3".to_string(),
            openai: "https://api.openai.com/v1".to_string(),
            fal: "https://fal.run".to_string(),
        }
    }
}

/// Language model settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OpenAiConfig {
    /// Chat completion model
    pub model: String,
    /// Azure OpenAI resource name (Azure mode needs both fields)
    pub azure_resource: Option<String>,
    /// Azure OpenAI deployment id
    pub azure_deployment: Option<String>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            azure_resource: None,
            azure_deployment: None,
        }
    }
}

impl OpenAiConfig {
    /// Azure `(resource, deployment)` pair when both are configured
    pub fn azure(&self) -> Option<(&str, &str)> {
        match (&self.azure_resource, &self.azure_deployment) {
            (Some(resource), Some(deployment))
                if is_valid_key(resource) && is_valid_key(deployment) =>
            {
                Some((resource.as_str(), deployment.as_str()))
            }
            _ => None,
        }
    }
}

impl TomlConfig {
    /// Load and parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }

    /// Load configuration, falling back to defaults
    ///
    /// A missing file is normal (all settings have defaults); an unreadable
    /// or malformed file logs a warning. Neither stops startup.
    pub fn load_or_default(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            warn!("Could not determine config directory, using built-in defaults");
            return Self::default();
        };

        if !path.exists() {
            info!("No config file at {}, using built-in defaults", path.display());
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}; using built-in defaults", e);
                Self::default()
            }
        }
    }
}

/// Default config file location (`<config_dir>/cosmic-journey/config.toml`)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("config.toml"))
}

/// Validate a credential value (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}

// ============================================================================
// Credentials
// ============================================================================

/// Server-held upstream credential
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credential {
    Nasa,
    OpenAi,
    YouTube,
    Fal,
}

impl Credential {
    pub const ALL: [Credential; 4] = [
        Credential::Nasa,
        Credential::OpenAi,
        Credential::YouTube,
        Credential::Fal,
    ];

    /// Environment variable holding this credential
    pub fn env_var(self) -> &'static str {
        match self {
            Credential::Nasa => "NASA_API_KEY",
            Credential::OpenAi => "OPENAI_API_KEY",
            Credential::YouTube => "YOUTUBE_API_KEY",
            Credential::Fal => "FAL_KEY",
        }
    }

    /// Human-readable service name
    pub fn service(self) -> &'static str {
        match self {
            Credential::Nasa => "NASA",
            Credential::OpenAi => "OpenAI",
            Credential::YouTube => "YouTube",
            Credential::Fal => "fal.ai",
        }
    }

    fn toml_value(self, keys: &ApiKeysConfig) -> Option<&String> {
        match self {
            Credential::Nasa => keys.nasa.as_ref(),
            Credential::OpenAi => keys.openai.as_ref(),
            Credential::YouTube => keys.youtube.as_ref(),
            Credential::Fal => keys.fal.as_ref(),
        }
    }
}

/// Resolve one credential with priority Environment → TOML
///
/// Blank values count as absent.
pub fn resolve_credential(credential: Credential, keys: &ApiKeysConfig) -> Option<String> {
    let env_key = std::env::var(credential.env_var())
        .ok()
        .filter(|k| is_valid_key(k));
    let toml_key = credential
        .toml_value(keys)
        .filter(|k| is_valid_key(k))
        .cloned();

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "{} found in both environment and TOML. Using environment (highest priority).",
            credential.env_var()
        );
    }

    env_key.or(toml_key)
}

/// Resolved set of upstream credentials
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    nasa: Option<String>,
    openai: Option<String>,
    youtube: Option<String>,
    fal: Option<String>,
}

impl Credentials {
    /// Resolve every credential from environment and TOML
    pub fn resolve(keys: &ApiKeysConfig) -> Self {
        let mut credentials = Self::default();
        for credential in Credential::ALL {
            if let Some(value) = resolve_credential(credential, keys) {
                credentials = credentials.with(credential, value);
            }
        }
        credentials
    }

    /// Set a credential (builder style)
    pub fn with(mut self, credential: Credential, value: impl Into<String>) -> Self {
        let value = Some(value.into()).filter(|k| is_valid_key(k));
        match credential {
            Credential::Nasa => self.nasa = value,
            Credential::OpenAi => self.openai = value,
            Credential::YouTube => self.youtube = value,
            Credential::Fal => self.fal = value,
        }
        self
    }

    pub fn get(&self, credential: Credential) -> Option<&str> {
        match credential {
            Credential::Nasa => self.nasa.as_deref(),
            Credential::OpenAi => self.openai.as_deref(),
            Credential::YouTube => self.youtube.as_deref(),
            Credential::Fal => self.fal.as_deref(),
        }
    }

    pub fn is_configured(&self, credential: Credential) -> bool {
        self.get(credential).is_some()
    }

    /// Log which credentials are present (never their values)
    pub fn log_presence(&self) {
        for credential in Credential::ALL {
            info!(
                "{} configured: {}",
                credential.env_var(),
                self.is_configured(credential)
            );
        }
    }
}

// ============================================================================
// Root Folder
// ============================================================================

/// Root folder resolution
///
/// Priority order:
/// 1. Command-line argument
/// 2. `COSMIC_ROOT_FOLDER` environment variable
/// 3. TOML `root_folder`
/// 4. OS-dependent default (`<data_local_dir>/cosmic-journey`)
#[derive(Debug, Clone, Default)]
pub struct RootFolderResolver {
    cli_arg: Option<PathBuf>,
    toml_root: Option<PathBuf>,
}

impl RootFolderResolver {
    pub fn new(cli_arg: Option<PathBuf>, toml_root: Option<PathBuf>) -> Self {
        Self { cli_arg, toml_root }
    }

    pub fn resolve(&self) -> PathBuf {
        if let Some(path) = &self.cli_arg {
            return path.clone();
        }

        if let Ok(path) = std::env::var(ROOT_FOLDER_ENV) {
            if is_valid_key(&path) {
                return PathBuf::from(path);
            }
        }

        if let Some(path) = &self.toml_root {
            return path.clone();
        }

        default_root_folder()
    }
}

/// OS-dependent default root folder
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("./cosmic_journey_data"))
}

/// Creates the root folder and locates the journal database inside it
#[derive(Debug, Clone)]
pub struct RootFolderInitializer {
    root: PathBuf,
}

impl RootFolderInitializer {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Create the root folder if missing (idempotent)
    pub fn ensure_directory_exists(&self) -> Result<()> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root)?;
            info!("Created root folder: {}", self.root.display());
        }
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_FILE_NAME)
    }
}
