use crate::error::ConfigError;
use crate::outcome::ErrorPolicy;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

pub const DEFAULT_CONFIG_PATH: &str = "simulator.toml";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub reddit: RedditConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub simulator: SimulatorConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedditConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Only needed for the submit flow (password grant).
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_completion_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulatorConfig {
    #[serde(default = "default_subreddit")]
    pub default_subreddit: String,
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

fn default_user_agent() -> String {
    "SeattleSimulator/1.0".to_string()
}

fn default_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_completion_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_subreddit() -> String {
    "Seattle".to_string()
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            user_agent: default_user_agent(),
            username: None,
            password: None,
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_completion_base_url(),
        }
    }
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            default_subreddit: default_subreddit(),
            on_error: ErrorPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file, then apply environment
    /// overrides and validate.
    ///
    /// With no explicit path, `simulator.toml` is read when present and
    /// the built-in defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        Ok(toml::from_str(&raw)?)
    }

    fn apply_env_overrides(&mut self) {
        override_from_env(&mut self.reddit.client_id, "REDDIT_CLIENT_ID");
        override_from_env(&mut self.reddit.client_secret, "REDDIT_CLIENT_SECRET");
        override_from_env(&mut self.reddit.user_agent, "REDDIT_USER_AGENT");
        override_opt_from_env(&mut self.reddit.username, "REDDIT_USERNAME");
        override_opt_from_env(&mut self.reddit.password, "REDDIT_PASSWORD");
        override_from_env(&mut self.completion.api_key, "GROQ_API_KEY");
        override_from_env(&mut self.simulator.default_subreddit, "DEFAULT_SUBREDDIT");
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reddit.client_id.is_empty() {
            return Err(ConfigError::MissingField {
                field: "reddit.client_id".to_string(),
            });
        }
        if self.reddit.client_secret.is_empty() {
            return Err(ConfigError::MissingField {
                field: "reddit.client_secret".to_string(),
            });
        }
        if self.completion.api_key.is_empty() {
            return Err(ConfigError::MissingField {
                field: "completion.api_key".to_string(),
            });
        }
        if self.simulator.default_subreddit.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "simulator.default_subreddit".to_string(),
                value: "<empty>".to_string(),
            });
        }
        Ok(())
    }

    /// Username/password pair for the submit flow, when both are present.
    pub fn posting_credentials(&self) -> Option<(&str, &str)> {
        match (&self.reddit.username, &self.reddit.password) {
            (Some(user), Some(pass)) if !user.is_empty() && !pass.is_empty() => {
                Some((user.as_str(), pass.as_str()))
            }
            _ => None,
        }
    }
}

fn override_from_env(field: &mut String, var: &str) {
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            debug!("Overriding config value from {}", var);
            *field = value;
        }
    }
}

fn override_opt_from_env(field: &mut Option<String>, var: &str) {
    if let Ok(value) = std::env::var(var) {
        if !value.is_empty() {
            debug!("Overriding config value from {}", var);
            *field = Some(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let raw = r#"
            [reddit]
            client_id = "abc"
            client_secret = "def"
            user_agent = "test-agent/1.0"
            username = "poster"
            password = "hunter2"

            [completion]
            api_key = "gsk_test"
            model = "llama-3.1-8b-instant"

            [simulator]
            default_subreddit = "SeattleWA"
            on_error = "propagate"
        "#;

        let config: AppConfig = toml::from_str(raw).unwrap();
        assert_eq!(config.reddit.client_id, "abc");
        assert_eq!(config.reddit.user_agent, "test-agent/1.0");
        assert_eq!(config.completion.model, "llama-3.1-8b-instant");
        assert_eq!(config.simulator.default_subreddit, "SeattleWA");
        assert_eq!(config.simulator.on_error, ErrorPolicy::Propagate);
        assert!(config.validate().is_ok());
        assert_eq!(config.posting_credentials(), Some(("poster", "hunter2")));
    }

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.reddit.user_agent, "SeattleSimulator/1.0");
        assert_eq!(config.completion.model, "llama-3.1-8b-instant");
        assert_eq!(config.completion.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.simulator.default_subreddit, "Seattle");
        assert_eq!(config.simulator.on_error, ErrorPolicy::Degrade);
        assert_eq!(config.posting_credentials(), None);
    }

    #[test]
    fn test_validate_rejects_missing_credentials() {
        let config = AppConfig::default();
        match config.validate() {
            Err(ConfigError::MissingField { field }) => {
                assert_eq!(field, "reddit.client_id");
            }
            other => panic!("Expected MissingField error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_default_subreddit() {
        let raw = r#"
            [reddit]
            client_id = "abc"
            client_secret = "def"

            [completion]
            api_key = "gsk_test"

            [simulator]
            default_subreddit = ""
        "#;

        let config: AppConfig = toml::from_str(raw).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
