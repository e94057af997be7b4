//! Server configuration module

use clap::Parser;

use healthcert_app::context::AppSettings;

use crate::config::{
    backend::BackendConfig,
    certificates::CertificatesConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod backend;
pub(crate) mod certificates;
pub(crate) mod observability;
pub(crate) mod server;

/// Health Certificate JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "healthcert-json", about = "Health Certificate JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Hosted backend settings.
    #[command(flatten)]
    pub backend: BackendConfig,

    /// Certificate issuance settings.
    #[command(flatten)]
    pub certificates: CertificatesConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for assembling the application context.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            backend: self.backend.supabase(),
            public_origin: self.certificates.public_origin.clone(),
            defaults: self.certificates.defaults(),
        }
    }
}
