//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    payment::PaymentConfig,
    server::ServerRuntimeConfig,
    shipping::ShippingConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod payment;
pub(crate) mod server;
pub(crate) mod shipping;

/// Pustaka JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "pustaka-json", about = "Pustaka JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// Payment processor settings.
    #[command(flatten)]
    pub payment: PaymentConfig,

    /// Carrier rate API settings.
    #[command(flatten)]
    pub shipping: ShippingConfig,
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
}
