use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const ENV_AI_API_KEY: &str = "MISSIVE_AI_API_KEY";
const ENV_AI_MODEL: &str = "MISSIVE_AI_MODEL";
const ENV_STORE_PROJECT_ID: &str = "MISSIVE_STORE_PROJECT_ID";
const ENV_STORE_API_KEY: &str = "MISSIVE_STORE_API_KEY";
const ENV_RELAY_SERVICE_ID: &str = "MISSIVE_RELAY_SERVICE_ID";
const ENV_RELAY_TEMPLATE_ID: &str = "MISSIVE_RELAY_TEMPLATE_ID";
const ENV_RELAY_PUBLIC_KEY: &str = "MISSIVE_RELAY_PUBLIC_KEY";

/// Resolved application configuration.
///
/// Built once at startup (file, then environment overrides) and handed to the
/// components that call out. Nothing else reads the environment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Generative-text service used for polishing
    #[serde(default)]
    pub ai: AiConfig,
    /// Document store that receives every submitted message
    #[serde(default)]
    pub store: StoreConfig,
    /// Mail relay that sends the notification email
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// Generative-text service configuration (Gemini)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// API key; polish reports an error without it
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_ai_model")]
    pub model: String,
    #[serde(default = "default_ai_endpoint")]
    pub endpoint: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_ai_model(),
            endpoint: default_ai_endpoint(),
        }
    }
}

impl AiConfig {
    /// Check whether an API key is present
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Document store configuration (Firestore)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_store_endpoint")]
    pub endpoint: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            api_key: None,
            database: default_database(),
            endpoint: default_store_endpoint(),
        }
    }
}

/// Mail relay configuration (EmailJS)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub public_key: String,
    #[serde(default = "default_relay_endpoint")]
    pub endpoint: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            endpoint: default_relay_endpoint(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: ThemeVariant,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeVariant {
    #[default]
    Dark,
    #[serde(rename = "high-contrast")]
    HighContrast,
}

fn default_ai_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_ai_endpoint() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_database() -> String {
    "(default)".to_string()
}

fn default_store_endpoint() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_relay_endpoint() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}

/// Treat empty values as unset
fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("missive");
        Ok(dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load the config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    fn load_file() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            tracing::info!(
                "No config file at {}, using defaults and environment",
                path.display()
            );
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        config.ai.api_key = non_empty(config.ai.api_key);
        config.store.api_key = non_empty(config.store.api_key);
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in production).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| non_empty(lookup(name));

        if let Some(key) = get(ENV_AI_API_KEY) {
            self.ai.api_key = Some(key);
        }
        if let Some(model) = get(ENV_AI_MODEL) {
            self.ai.model = model;
        }
        if let Some(project_id) = get(ENV_STORE_PROJECT_ID) {
            self.store.project_id = project_id;
        }
        if let Some(key) = get(ENV_STORE_API_KEY) {
            self.store.api_key = Some(key);
        }
        if let Some(service_id) = get(ENV_RELAY_SERVICE_ID) {
            self.relay.service_id = service_id;
        }
        if let Some(template_id) = get(ENV_RELAY_TEMPLATE_ID) {
            self.relay.template_id = template_id;
        }
        if let Some(public_key) = get(ENV_RELAY_PUBLIC_KEY) {
            self.relay.public_key = public_key;
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let dir = Self::config_dir()?;

        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(Self::config_dir()?)?;
        Ok(())
    }

    /// Human-readable summary of which settings are present (secrets redacted)
    pub fn describe(&self) -> String {
        fn presence(set: bool) -> &'static str {
            if set { "set" } else { "missing" }
        }
        fn value(v: &str) -> &str {
            if v.is_empty() { "<missing>" } else { v }
        }

        let mut lines = Vec::new();
        lines.push("Configuration status:".to_string());
        lines.push(format!("  AI API key ({}): {}", ENV_AI_API_KEY, presence(self.ai.is_configured())));
        lines.push(format!("  AI model: {}", self.ai.model));
        lines.push(format!("  Store project ({}): {}", ENV_STORE_PROJECT_ID, value(&self.store.project_id)));
        lines.push(format!(
            "  Store API key ({}): {}",
            ENV_STORE_API_KEY,
            presence(self.store.api_key.is_some())
        ));
        lines.push(format!("  Relay service ({}): {}", ENV_RELAY_SERVICE_ID, value(&self.relay.service_id)));
        lines.push(format!("  Relay template ({}): {}", ENV_RELAY_TEMPLATE_ID, value(&self.relay.template_id)));
        lines.push(format!(
            "  Relay public key ({}): {}",
            ENV_RELAY_PUBLIC_KEY,
            presence(!self.relay.public_key.is_empty())
        ));
        lines.join("\n")
    }
}
