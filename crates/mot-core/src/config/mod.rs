use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::conversation::{SessionHandle, DEFAULT_SESSION_FILE};
use crate::error::MotError;
use crate::llm::{GenerationParams, DEFAULT_ENDPOINT};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub inference: InferenceSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InferenceSettings {
    pub endpoint: String,
    /// Name of the environment variable holding the bearer token.
    pub api_key_env: String,
    pub max_new_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub directory: PathBuf,
    pub default_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub theme: String,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        let params = GenerationParams::default();
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key_env: "HF_API_KEY".to_string(),
            max_new_tokens: params.max_new_tokens,
            temperature: params.temperature,
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("chats"),
            default_file: DEFAULT_SESSION_FILE.to_string(),
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: "soft".to_string(),
        }
    }
}

/// Everything the components need, resolved once at startup. Nothing below
/// this point reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_token: String,
    pub storage_directory: PathBuf,
    pub endpoint: String,
    pub generation: GenerationParams,
    pub initial_handle: SessionHandle,
}

impl Config {
    pub fn new(api_token: impl Into<String>, storage_directory: impl Into<PathBuf>) -> Self {
        let defaults = InferenceSettings::default();
        Self {
            api_token: api_token.into(),
            storage_directory: storage_directory.into(),
            endpoint: defaults.endpoint,
            generation: GenerationParams::default(),
            initial_handle: SessionHandle::default(),
        }
    }
}

impl Settings {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mot")
            .join("config.toml")
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(settings) => return settings,
                    Err(e) => tracing::warn!("Ignoring malformed config {}: {e}", path.display()),
                },
                Err(e) => tracing::warn!("Could not read config {}: {e}", path.display()),
            }
        }
        Self::default()
    }

    pub fn save_to(&self, path: &Path) -> Result<(), MotError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| MotError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn save(&self) -> Result<(), MotError> {
        self.save_to(&Self::config_path())
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams {
            max_new_tokens: self.inference.max_new_tokens,
            temperature: self.inference.temperature,
        }
    }

    /// Resolve against the process environment. Fails fast without a token.
    pub fn resolve(&self) -> Result<Config, MotError> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    /// Resolve using `lookup` in place of the environment.
    pub fn resolve_with<F>(&self, lookup: F) -> Result<Config, MotError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_name = self.inference.api_key_env.as_str();
        let api_token = lookup(env_name)
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| MotError::MissingCredential(env_name.to_string()))?;

        if self.storage.default_file.trim().is_empty() {
            return Err(MotError::Config("storage.default_file must not be empty".into()));
        }

        Ok(Config {
            api_token,
            storage_directory: self.storage.directory.clone(),
            endpoint: self.inference.endpoint.clone(),
            generation: self.generation_params(),
            initial_handle: SessionHandle::new(self.storage.default_file.clone()),
        })
    }
}
