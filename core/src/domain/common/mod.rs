use std::time::Duration;

pub mod entities;
pub mod services;

pub const DEFAULT_BASE_URL: &str = "https://gpt.soruxgpt.com/api/api/v1";
pub const DEFAULT_TEXT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TEXT_TIMEOUT_SECS: f64 = 120.0;
pub const DEFAULT_IMAGE_TIMEOUT_SECS: f64 = 180.0;
pub const CONNECT_TIMEOUT_SECS: f64 = 10.0;

#[derive(Clone, Debug)]
pub struct MenuScanConfig {
    pub llm: LLMConfig,
}

/// Resolved settings for the chat-completion upstream.
#[derive(Clone, Debug)]
pub struct LLMConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    pub text_timeouts: ChatTimeouts,
    pub image_timeouts: ChatTimeouts,
}

/// Raw, unvalidated settings as read from the environment or command line.
#[derive(Clone, Debug, Default)]
pub struct RawLLMSettings {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub text_model: Option<String>,
    pub image_model: Option<String>,
    pub timeout_seconds: Option<String>,
    pub text_timeout_seconds: Option<String>,
    pub image_timeout_seconds: Option<String>,
}

/// Timeouts for one class of upstream call.
///
/// reqwest has no separate write or pool-acquire timeout; `total` bounds the
/// whole request, including both.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChatTimeouts {
    pub total: Duration,
    pub connect: Duration,
    pub read: Duration,
}

impl ChatTimeouts {
    pub fn new(bound: Duration) -> Self {
        Self {
            total: bound,
            connect: Duration::from_secs_f64(CONNECT_TIMEOUT_SECS),
            read: bound,
        }
    }
}

impl LLMConfig {
    pub fn resolve(raw: RawLLMSettings) -> Self {
        let api_key = non_blank(raw.api_key.as_deref());
        let base_url = non_blank(raw.base_url.as_deref())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let text_model = non_blank(raw.text_model.as_deref())
            .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string());
        let image_model =
            non_blank(raw.image_model.as_deref()).unwrap_or_else(|| text_model.clone());

        let text_default = seconds_or(
            raw.timeout_seconds.as_deref(),
            Duration::from_secs_f64(DEFAULT_TEXT_TIMEOUT_SECS),
        );
        let image_default = seconds_or(
            raw.timeout_seconds.as_deref(),
            Duration::from_secs_f64(DEFAULT_IMAGE_TIMEOUT_SECS),
        );
        let text_timeout = seconds_or(raw.text_timeout_seconds.as_deref(), text_default);
        let image_timeout = seconds_or(raw.image_timeout_seconds.as_deref(), image_default);

        Self {
            api_key,
            base_url,
            text_model,
            image_model,
            text_timeouts: ChatTimeouts::new(text_timeout),
            image_timeouts: ChatTimeouts::new(image_timeout),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Strips surrounding whitespace, then double quotes, then single quotes.
pub fn unquote(raw: &str) -> String {
    raw.trim().trim_matches('"').trim_matches('\'').to_string()
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(unquote).filter(|value| !value.is_empty())
}

/// Parses a positive number of seconds, falling back on blank, invalid,
/// non-positive or out-of-range input.
pub fn seconds_or(raw: Option<&str>, fallback: Duration) -> Duration {
    let Some(value) = non_blank(raw) else {
        return fallback;
    };

    match value.parse::<f64>() {
        Ok(secs) if secs > 0.0 => Duration::try_from_secs_f64(secs).unwrap_or_else(|e| {
            tracing::warn!("Ignoring out-of-range timeout value {:?}: {}", value, e);
            fallback
        }),
        Ok(_) => fallback,
        Err(_) => {
            tracing::warn!("Ignoring invalid timeout value {:?}", value);
            fallback
        }
    }
}
