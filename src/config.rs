//! Loading service configuration from TOML.
//!
//! Every section is optional; a missing file (or a broken one) means defaults.
//!
//! ```toml
//! [chat]
//! reply_delay_ms = 1000
//! reply_text = "..."
//! greeting = "..."
//!
//! [quiz]
//! max_questions = 20
//!
//! [static_files]
//! dir = "./static"
//! ```

use std::time::Duration;

use serde::Deserialize;
use tracing::{error, info};

use crate::error::AppError;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub static_files: StaticConfig,
}

/// Simulated assistant behaviour for the chat page.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub reply_delay_ms: u64,
    pub reply_text: String,
    pub greeting: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: 1000,
            reply_text: "I'm processing your question. This is a simulated response.".into(),
            greeting: "Hello! I'm your AI teaching assistant. How can I help you today?".into(),
        }
    }
}

impl ChatConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub max_questions: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self { max_questions: 20 }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct StaticConfig {
    pub dir: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self { dir: "./static".into() }
    }
}

pub fn parse_config(src: &str) -> Result<AppConfig, AppError> {
    toml::from_str::<AppConfig>(src).map_err(|e| AppError::Config(e.to_string()))
}

/// Load `AppConfig` from EDU_CONFIG_PATH. Any IO/parse error is logged and defaults are used.
pub fn load_config_from_env() -> AppConfig {
    let Ok(path) = std::env::var("EDU_CONFIG_PATH") else {
        return AppConfig::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(s) => match parse_config(&s) {
            Ok(cfg) => {
                info!(target: "edu_assistant", %path, "Loaded config (TOML)");
                cfg
            }
            Err(e) => {
                error!(target: "edu_assistant", %path, error = %e, "Failed to parse TOML config; using defaults");
                AppConfig::default()
            }
        },
        Err(e) => {
            error!(target: "edu_assistant", %path, error = %e, "Failed to read TOML config file; using defaults");
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.chat.reply_delay_ms, 1000);
        assert_eq!(cfg.quiz.max_questions, 20);
        assert_eq!(cfg.static_files.dir, "./static");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let cfg = parse_config("[chat]\nreply_delay_ms = 250\n").unwrap();
        assert_eq!(cfg.chat.reply_delay(), Duration::from_millis(250));
        assert!(cfg.chat.reply_text.contains("simulated response"));
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = parse_config("[chat\n").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
