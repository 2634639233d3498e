use onboard_core::{CompletionOptions, DEFAULT_BASE_URL, Mode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct AgentsConfig {
    #[serde(default)]
    pub defaults: AgentDefaults,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AgentDefaults {
    #[serde(default)]
    pub mode: Mode,
    #[serde(default = "AgentDefaults::default_model")]
    pub model: String,
    #[serde(default = "AgentDefaults::default_max_tokens")]
    pub max_tokens: usize,
    #[serde(default = "AgentDefaults::default_temperature")]
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for AgentDefaults {
    fn default() -> Self {
        Self {
            mode: Mode::default(),
            model: Self::default_model(),
            max_tokens: Self::default_max_tokens(),
            temperature: Self::default_temperature(),
            system_prompt: None,
        }
    }
}

impl AgentDefaults {
    fn default_model() -> String {
        CompletionOptions::default().model
    }

    fn default_max_tokens() -> usize {
        CompletionOptions::default().max_tokens
    }

    fn default_temperature() -> f32 {
        CompletionOptions::default().temperature
    }

    /// Sampling options for remote requests, with an optional model override.
    #[must_use]
    pub fn completion_options(&self, model: Option<String>) -> CompletionOptions {
        CompletionOptions {
            model: model.unwrap_or_else(|| self.model.clone()),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub openai: ProviderConfig,
}

/// Remote provider settings. The key itself is read from the environment.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    #[serde(default = "ProviderConfig::default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "ProviderConfig::default_base_url")]
    pub base_url: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key_env: Self::default_api_key_env(),
            base_url: Self::default_base_url(),
        }
    }
}

impl ProviderConfig {
    fn default_api_key_env() -> String {
        "OPENAI_API_KEY".to_string()
    }

    fn default_base_url() -> String {
        DEFAULT_BASE_URL.to_string()
    }

    /// The API key from the process environment, if set and non-empty.
    #[must_use]
    pub fn api_key(&self) -> Option<String> {
        self.api_key_from(|name| std::env::var(name).ok())
    }

    /// The API key from `lookup`, if set and non-empty.
    #[must_use]
    pub fn api_key_from(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        lookup(&self.api_key_env)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DisplayConfig {
    #[serde(default = "DisplayConfig::default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            preview_chars: Self::default_preview_chars(),
        }
    }
}

impl DisplayConfig {
    const fn default_preview_chars() -> usize {
        800
    }
}

const CONFIG_TEMPLATE: &str = r#"{
  "agents": {
    "defaults": {
      "mode": "local",
      "model": "gpt-4o-mini",
      "max_tokens": 500,
      "temperature": 0.1
    }
  },
  "providers": {
    "openai": {
      "api_key_env": "OPENAI_API_KEY",
      "base_url": "https://api.openai.com/v1"
    }
  },
  "display": {
    "preview_chars": 800
  }
}
"#;

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join("legacyonboard"))
    }

    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load `~/legacyonboard/config.json`, or defaults when it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        let config_path = Self::create_config_at(&config_dir.join("config.json"))?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Export your API key: export OPENAI_API_KEY=...");
        println!("   2. Set agents.defaults.mode to \"remote\" to use the completion API");
        println!("   3. Run 'legacyonboard chat --file <document.txt>' to start onboarding");
        println!();
        Ok(())
    }

    /// Write the config template to `path`, refusing to overwrite.
    pub fn create_config_at(path: &Path) -> anyhow::Result<PathBuf> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        std::fs::write(path, CONFIG_TEMPLATE)?;
        Ok(path.to_path_buf())
    }
}
