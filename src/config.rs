//! Configuration types for the assistant and the completion relay.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level configuration for the assistant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Completion relay server settings.
    pub relay: RelayConfig,
    /// Language model provider settings.
    pub llm: LlmConfig,
    /// Speech capture/synthesis settings.
    pub speech: SpeechSettings,
}

/// Completion relay server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Host to bind the relay server to.
    pub host: String,
    /// Port to bind (0 = auto-assign).
    pub port: u16,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8787,
        }
    }
}

/// Language model provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Base URL of the OpenAI-compatible provider.
    pub api_url: String,
    /// Model name to request from the provider.
    pub api_model: String,
    /// Environment variable holding the provider API key.
    ///
    /// The key itself is never stored in the config file.
    pub api_key_env: String,
    /// Sampling temperature (0.0 = greedy, higher = more random).
    pub temperature: f64,
    /// Bound on a single provider call, in milliseconds.
    ///
    /// The relay never waits longer than this for a completion.
    pub request_timeout_ms: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com".to_owned(),
            api_model: "gpt-4o-mini".to_owned(),
            api_key_env: "OPENAI_API_KEY".to_owned(),
            temperature: 0.7,
            request_timeout_ms: 15_000,
        }
    }
}

impl LlmConfig {
    /// Provider call timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Resolve the provider API key from the process environment.
    ///
    /// Returns `None` when the variable is unset or blank. The relay treats
    /// an absent key as a configuration error at request time, not a panic.
    #[must_use]
    pub fn resolve_api_key(&self) -> Option<String> {
        let value = std::env::var(&self.api_key_env).ok()?;
        if value.trim().is_empty() {
            return None;
        }
        Some(value)
    }
}

/// Speech capture and synthesis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechSettings {
    /// BCP-47 language tag for continuous speech recognition.
    pub language: String,
    /// Speaking rate for synthesized output (1.0 = normal).
    pub rate: f32,
    /// Voice pitch for synthesized output (1.0 = normal).
    pub pitch: f32,
}

impl Default for SpeechSettings {
    fn default() -> Self {
        Self {
            language: "en-US".to_owned(),
            rate: 0.9,
            pitch: 1.0,
        }
    }
}

impl AssistantConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| crate::error::AssistantError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &std::path::Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::error::AssistantError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `~/.config/parlance/config.toml`.
    pub fn default_config_path() -> PathBuf {
        if let Some(config) = std::env::var_os("XDG_CONFIG_HOME") {
            PathBuf::from(config).join("parlance").join("config.toml")
        } else if let Some(home) = std::env::var_os("HOME") {
            PathBuf::from(home)
                .join(".config")
                .join("parlance")
                .join("config.toml")
        } else {
            PathBuf::from("/tmp/parlance-config/config.toml")
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = AssistantConfig::default();
        assert!(!config.relay.host.is_empty());
        assert!(!config.llm.api_url.is_empty());
        assert!(!config.llm.api_model.is_empty());
        assert!(!config.llm.api_key_env.is_empty());
        assert!(config.llm.temperature >= 0.0);
        assert!(config.llm.request_timeout_ms > 0);
        assert!(!config.speech.language.is_empty());
        assert!(config.speech.rate > 0.0);
        assert!(config.speech.pitch > 0.0);
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AssistantConfig::default();
        config.relay.port = 9090;
        config.llm.temperature = 1.5;
        config.speech.language = "fr-FR".to_owned();

        config.save_to_file(&path).unwrap();
        assert!(path.exists());

        let loaded = AssistantConfig::from_file(&path).unwrap();
        assert_eq!(loaded.relay.port, 9090);
        assert!((loaded.llm.temperature - 1.5).abs() < f64::EPSILON);
        assert_eq!(loaded.speech.language, "fr-FR");
    }

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(
            &path,
            r#"
[llm]
api_model = "gpt-4o"
"#,
        )
        .unwrap();

        let loaded = AssistantConfig::from_file(&path).unwrap();
        assert_eq!(loaded.llm.api_model, "gpt-4o");
        // Untouched sections keep their defaults.
        assert_eq!(loaded.llm.api_key_env, "OPENAI_API_KEY");
        assert_eq!(loaded.relay.port, 8787);
    }

    #[test]
    fn resolve_api_key_ignores_blank_values() {
        let config = LlmConfig {
            api_key_env: "PARLANCE_TEST_BLANK_KEY".to_owned(),
            ..Default::default()
        };
        unsafe { std::env::set_var("PARLANCE_TEST_BLANK_KEY", "   ") };
        assert!(config.resolve_api_key().is_none());
        unsafe { std::env::remove_var("PARLANCE_TEST_BLANK_KEY") };
    }
}
