use clap::{Args as ClapArgs, Parser};
use menuscan_core::domain::common::{LLMConfig, MenuScanConfig, RawLLMSettings};

#[derive(Debug, Clone, Parser)]
#[command(name = "menuscan-api", version, about = "Menu and food photo risk analysis API")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub llm: LLMArgs,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 8000)]
    pub port: u16,

    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    /// Comma-separated CORS origins; `*` allows any origin.
    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "*"
    )]
    pub allowed_origins: Vec<String>,

    #[arg(long = "disable-metrics", env = "DISABLE_METRICS")]
    pub disable_metrics: bool,
}

/// Upstream chat-completion settings. Values are kept raw here and resolved
/// (quote stripping, defaults, lenient timeouts) by [`LLMConfig::resolve`].
#[derive(Debug, Clone, ClapArgs)]
pub struct LLMArgs {
    #[arg(long = "llm-api-key", env = "LLM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long = "llm-base-url", env = "LLM_BASE_URL")]
    pub base_url: Option<String>,

    #[arg(long = "llm-text-model", env = "LLM_TEXT_MODEL")]
    pub text_model: Option<String>,

    #[arg(long = "llm-image-model", env = "LLM_IMAGE_MODEL")]
    pub image_model: Option<String>,

    #[arg(long = "llm-timeout-seconds", env = "LLM_TIMEOUT_SECONDS")]
    pub timeout_seconds: Option<String>,

    #[arg(long = "llm-text-timeout-seconds", env = "LLM_TEXT_TIMEOUT_SECONDS")]
    pub text_timeout_seconds: Option<String>,

    #[arg(long = "llm-image-timeout-seconds", env = "LLM_IMAGE_TIMEOUT_SECONDS")]
    pub image_timeout_seconds: Option<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    /// Default tracing filter, overridden by `RUST_LOG`.
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON")]
    pub json: bool,
}

impl From<LLMArgs> for RawLLMSettings {
    fn from(args: LLMArgs) -> Self {
        Self {
            api_key: args.api_key,
            base_url: args.base_url,
            text_model: args.text_model,
            image_model: args.image_model,
            timeout_seconds: args.timeout_seconds,
            text_timeout_seconds: args.text_timeout_seconds,
            image_timeout_seconds: args.image_timeout_seconds,
        }
    }
}

impl From<Args> for MenuScanConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig::resolve(args.llm.into()),
        }
    }
}
