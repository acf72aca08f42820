//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    api::{ApiError, CartApi, HttpCartApi},
    config::AppConfig,
    dispatcher::CartDispatcher,
    notifier::{Notifier, TracingNotifier},
    surface::{BufferedSurface, CartSurface},
};

/// Errors that can occur while wiring the client.
#[derive(Debug, Error)]
pub enum AppInitError {
    /// The HTTP client could not be built.
    #[error("failed to build API client")]
    Api(#[source] ApiError),
}

/// Wired collaborators for one client session.
#[derive(Clone)]
pub struct AppContext {
    /// Storefront API
    pub api: Arc<dyn CartApi>,

    /// Cart dispatcher
    pub dispatcher: Arc<CartDispatcher>,

    /// Surface holding the latest rendered page
    pub surface: Arc<BufferedSurface>,
}

impl AppContext {
    /// Build the application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AppInitError> {
        let api: Arc<dyn CartApi> =
            Arc::new(HttpCartApi::new(config.http_client()).map_err(AppInitError::Api)?);
        let surface = Arc::new(BufferedSurface::new(config.format));
        let notifier: Arc<dyn Notifier> = Arc::new(TracingNotifier);

        let dispatcher = Arc::new(CartDispatcher::new(
            Arc::clone(&api),
            notifier,
            Arc::clone(&surface) as Arc<dyn CartSurface>,
        ));

        Ok(Self {
            api,
            dispatcher,
            surface,
        })
    }
}
