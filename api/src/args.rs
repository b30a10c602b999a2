use std::fmt;

use clap::{Args as ClapArgs, Parser};
use snapcalorie_core::domain::common::{
    DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, LLMConfig, REDACTED, SnapCalorieConfig,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "snapcalorie-api", version, about = "SnapCalorie meal analysis server")]
pub struct Args {
    #[command(flatten)]
    pub server: ServerArgs,

    #[command(flatten)]
    pub log: LogArgs,

    #[command(flatten)]
    pub llm: LlmArgs,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct ServerArgs {
    #[arg(long = "server-host", env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long = "server-port", env = "SERVER_PORT", default_value_t = 8501)]
    pub port: u16,

    /// Prefix for every route, e.g. `/snapcalorie`.
    #[arg(long = "server-root-path", env = "SERVER_ROOT_PATH", default_value = "")]
    pub root_path: String,

    #[arg(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = "http://localhost:8501"
    )]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, ClapArgs)]
pub struct LogArgs {
    #[arg(long = "log-filter", env = "LOG_FILTER", default_value = "info")]
    pub filter: String,

    #[arg(long = "log-json", env = "LOG_JSON", default_value_t = false)]
    pub json: bool,
}

#[derive(Clone, ClapArgs)]
pub struct LlmArgs {
    #[arg(long = "gemini-api-key", env = "GOOGLE_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    #[arg(long = "gemini-model", env = "GEMINI_MODEL", default_value = DEFAULT_GEMINI_MODEL)]
    pub gemini_model: String,

    #[arg(long = "gemini-base-url", env = "GEMINI_BASE_URL", default_value = DEFAULT_GEMINI_BASE_URL)]
    pub gemini_base_url: String,

    /// Ask Gemini for schema-constrained JSON output.
    #[arg(
        long = "gemini-structured-output",
        env = "GEMINI_STRUCTURED_OUTPUT",
        default_value_t = false
    )]
    pub structured_output: bool,
}

impl fmt::Debug for LlmArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmArgs")
            .field("gemini_api_key", &self.gemini_api_key.as_ref().map(|_| REDACTED))
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("structured_output", &self.structured_output)
            .finish()
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            server: ServerArgs {
                host: "0.0.0.0".to_string(),
                port: 8501,
                root_path: String::new(),
                allowed_origins: vec!["http://localhost:8501".to_string()],
            },
            log: LogArgs {
                filter: "info".to_string(),
                json: false,
            },
            llm: LlmArgs {
                gemini_api_key: None,
                gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
                gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
                structured_output: false,
            },
        }
    }
}

impl From<Args> for SnapCalorieConfig {
    fn from(args: Args) -> Self {
        Self {
            llm: LLMConfig {
                gemini_api_key: args.llm.gemini_api_key,
                gemini_model: args.llm.gemini_model,
                gemini_base_url: args.llm.gemini_base_url,
                structured_output: args.llm.structured_output,
            },
        }
    }
}
