//! Client configuration module

use clap::Args;

use crate::{api::HttpCartApiConfig, surface::OutputFormat};

pub(crate) mod api;
pub(crate) mod observability;

pub use api::ApiConfig;
pub use observability::{LogFormat, LoggingConfig};

/// PetGo cart client configuration
#[derive(Debug, Args)]
pub struct AppConfig {
    /// Storefront API settings.
    #[command(flatten)]
    pub api: ApiConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Output format for rendered pages
    #[arg(
        long,
        global = true,
        env = "PETGO_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Table
    )]
    pub format: OutputFormat,
}

impl AppConfig {
    /// HTTP client settings for the storefront API.
    #[must_use]
    pub fn http_client(&self) -> HttpCartApiConfig {
        HttpCartApiConfig {
            base_url: self.api.api_url.clone(),
            session_cookie: self.api.session_cookie.clone(),
        }
    }
}
