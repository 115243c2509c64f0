//! LLM configuration parsed from environment variables.

use super::types::LlmError;

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_LLM_REQUEST_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_LLM_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProviderKind {
    Gemini,
    Anthropic,
}

impl LlmProviderKind {
    /// Parse a provider name as accepted by `LLM_PROVIDER` and `--provider`.
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::ConfigParse`] for unknown names.
    pub fn parse(raw: &str) -> Result<Self, LlmError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "anthropic" => Ok(Self::Anthropic),
            other => Err(LlmError::ConfigParse(format!(
                "unknown LLM_PROVIDER: {other} (expected 'gemini' or 'anthropic')"
            ))),
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::Anthropic => "anthropic",
        }
    }

    fn default_key_var(self) -> &'static str {
        match self {
            Self::Gemini => "GEMINI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
        }
    }

    fn default_model(self) -> &'static str {
        match self {
            Self::Gemini => "gemini-2.5-flash",
            Self::Anthropic => "claude-sonnet-4-5-20250929",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LlmTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub provider: LlmProviderKind,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub gemini_base_url: String,
    pub timeouts: LlmTimeouts,
}

/// Command-line values that take precedence over the environment.
#[derive(Debug, Clone, Default)]
pub struct LlmOverrides {
    pub provider: Option<String>,
    pub model: Option<String>,
}

impl LlmConfig {
    /// Build typed LLM config from environment variables.
    ///
    /// Optional:
    /// - `LLM_PROVIDER`: `gemini` (default) or `anthropic`
    /// - `LLM_API_KEY_ENV`: names the env var holding the key
    ///   (`GEMINI_API_KEY` / `ANTHROPIC_API_KEY` when absent)
    /// - `LLM_MODEL`: provider default when absent
    /// - `LLM_GEMINI_BASE_URL`: default Gemini API base URL
    /// - `LLM_MAX_TOKENS`: default 4096
    /// - `LLM_REQUEST_TIMEOUT_SECS`: default 120
    /// - `LLM_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown provider or a missing API key.
    pub fn from_env(overrides: &LlmOverrides) -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok(), overrides)
    }

    /// Same as [`LlmConfig::from_env`] over an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown provider or a missing API key.
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        overrides: &LlmOverrides,
    ) -> Result<Self, LlmError> {
        let provider = match overrides.provider.clone().or_else(|| lookup("LLM_PROVIDER")) {
            Some(raw) => LlmProviderKind::parse(&raw)?,
            None => LlmProviderKind::Gemini,
        };

        let key_var = lookup("LLM_API_KEY_ENV").unwrap_or_else(|| provider.default_key_var().to_string());
        let api_key = lookup(key_var.as_str())
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmError::MissingApiKey { var: key_var.clone() })?;

        let model = overrides
            .model
            .clone()
            .or_else(|| lookup("LLM_MODEL"))
            .unwrap_or_else(|| provider.default_model().to_string());
        let gemini_base_url = lookup("LLM_GEMINI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let max_tokens = parse_or(&lookup, "LLM_MAX_TOKENS", DEFAULT_LLM_MAX_TOKENS);
        let timeouts = LlmTimeouts {
            request_secs: parse_or(&lookup, "LLM_REQUEST_TIMEOUT_SECS", DEFAULT_LLM_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_or(&lookup, "LLM_CONNECT_TIMEOUT_SECS", DEFAULT_LLM_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { provider, api_key, model, max_tokens, gemini_base_url, timeouts })
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
