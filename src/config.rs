use std::env;
use std::time::Duration;

use secrecy::SecretString;

const DEFAULT_GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

#[derive(Clone, Debug)]
pub struct Config {
    pub gemini_api_key: Option<SecretString>,
    pub gemini_api_base_url: String,
    pub gemini_model: String,
    pub gemini_timeout: Option<Duration>,
    pub session_ttl: Duration,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub cors_allowed_origin: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            gemini_api_key: env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty())
                .map(SecretString::from),
            gemini_api_base_url: env::var("GEMINI_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_API_BASE_URL.to_string()),
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_timeout: env::var("GEMINI_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
            session_ttl: Duration::from_secs(
                env::var("SESSION_TTL_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .filter(|secs| *secs > 0)
                    .unwrap_or(DEFAULT_SESSION_TTL_SECS),
            ),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        }
    }

    /// Full `generateContent` endpoint for the configured model, without the key.
    pub fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.gemini_api_base_url.trim_end_matches('/'),
            self.gemini_model
        )
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            gemini_api_key: Some(SecretString::from("test_api_key".to_string())),
            gemini_api_base_url: "http://127.0.0.1:9/v1beta".to_string(),
            gemini_model: "gemini-test".to_string(),
            gemini_timeout: Some(Duration::from_secs(1)),
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            cors_allowed_origin: "http://localhost:5173".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.gemini_api_base_url.is_empty());
        assert!(!config.gemini_model.is_empty());
        assert!(!config.web_server_host.is_empty());
        assert!(config.session_ttl > Duration::ZERO);
    }

    #[test]
    fn test_generate_content_url() {
        let mut config = Config::test_config();
        config.gemini_api_base_url = "https://example.test/v1beta/".to_string();

        assert_eq!(
            config.generate_content_url(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_api_key_is_redacted_in_debug_output() {
        let config = Config::test_config();
        let debug = format!("{:?}", config);

        assert!(!debug.contains("test_api_key"));
    }
}
