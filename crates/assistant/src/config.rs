use serde::Deserialize;

/// Environment variables consulted when no key is configured.
pub const API_KEY_FALLBACKS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    /// Language the advice is written in.
    pub advice_language: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-3-flash-preview".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_secs: 30,
            advice_language: "Chinese".to_string(),
        }
    }
}

impl GeminiConfig {
    /// The configured key, else the first non-empty fallback variable.
    #[must_use]
    pub fn resolved_api_key(&self) -> Option<String> {
        self.resolve_with(|name| std::env::var(name).ok())
    }

    fn resolve_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        self.api_key
            .iter()
            .cloned()
            .chain(API_KEY_FALLBACKS.iter().filter_map(|name| lookup(name)))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
    }

    pub(crate) fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_key_wins_over_environment() {
        let config = GeminiConfig {
            api_key: Some("from-file".to_string()),
            ..GeminiConfig::default()
        };
        let key = config.resolve_with(|_| Some("from-env".to_string()));
        assert_eq!(key.as_deref(), Some("from-file"));
    }

    #[test]
    fn blank_key_falls_back_in_order() {
        let config = GeminiConfig {
            api_key: Some("  ".to_string()),
            ..GeminiConfig::default()
        };
        let key = config.resolve_with(|name| match name {
            "GEMINI_API_KEY" => Some(String::new()),
            "API_KEY" => Some("legacy".to_string()),
            _ => None,
        });
        assert_eq!(key.as_deref(), Some("legacy"));
        assert_eq!(GeminiConfig::default().resolve_with(|_| None), None);
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let config = GeminiConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..GeminiConfig::default()
        };
        assert_eq!(
            config.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-3-flash-preview:generateContent"
        );
    }
}
