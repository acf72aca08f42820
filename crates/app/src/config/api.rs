//! API Config

use clap::Args;
use reqwest::Url;

/// Storefront API settings.
#[derive(Debug, Args)]
pub struct ApiConfig {
    /// Storefront base URL
    #[arg(long, env = "PETGO_API_URL", default_value = "http://localhost:5000")]
    pub api_url: Url,

    /// Session cookie of a logged-in user (`session=<value>` or the bare value)
    #[arg(long, env = "PETGO_SESSION_COOKIE", hide_env_values = true)]
    pub session_cookie: Option<String>,
}
