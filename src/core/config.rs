use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

pub const TRIPLEX_DIR: &str = ".triplex";
pub const CONFIG_FILE: &str = "config.toml";

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo-instruct";
pub const DEFAULT_TEMPERATURE: f64 = 0.9;
pub const DEFAULT_MAX_TOKENS: u32 = 256;
pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TriplexConfig {
    pub model: String,
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for TriplexConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl TriplexConfig {
    /// Reads `path` if it exists, otherwise falls back to defaults.
    /// A file that exists but does not parse is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: TriplexConfig = toml::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// `OPENAI_API_BASE` overrides the configured endpoint.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base) = env::var("OPENAI_API_BASE") {
            if !base.trim().is_empty() {
                self.api_base = base;
            }
        }
        self
    }
}

/// Provider credentials, read once at startup.
///
/// A missing key is not an error here: it surfaces when a request is made.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub key_var: String,
    pub api_key: Option<String>,
    pub organization: Option<String>,
}

impl Credentials {
    pub fn from_env(key_var: &str) -> Self {
        Self {
            key_var: key_var.to_string(),
            api_key: non_empty_var(key_var),
            organization: non_empty_var("OPENAI_ORGANIZATION"),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Writes the default config into `root/.triplex` and ignores the directory in git.
/// Returns false when the directory already exists.
pub fn init_workspace(root: &Path) -> Result<bool> {
    let dir = root.join(TRIPLEX_DIR);
    if dir.exists() {
        return Ok(false);
    }
    fs::create_dir_all(&dir)?;
    let toml = toml::to_string_pretty(&TriplexConfig::default())?;
    fs::write(dir.join(CONFIG_FILE), toml)?;

    let gitignore_path = root.join(".gitignore");
    let mut gitignore = if gitignore_path.exists() {
        fs::read_to_string(&gitignore_path)?
    } else {
        String::new()
    };
    if !gitignore.contains(TRIPLEX_DIR) {
        gitignore.push_str("\n# triplex\n.triplex/\n");
        fs::write(&gitignore_path, gitignore)?;
    }
    Ok(true)
}
