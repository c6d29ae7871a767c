//! Carrier Rate API Config

use clap::Args;

/// Carrier rate API settings.
#[derive(Debug, Args)]
pub struct ShippingConfig {
    /// Base URL of the carrier rate API
    #[arg(long, env = "SHIPPING_RATE_API_BASE_URL")]
    pub rate_api_base_url: String,

    /// API key for the carrier rate API
    #[arg(long, env = "SHIPPING_RATE_API_KEY", hide_env_values = true)]
    pub rate_api_key: String,

    /// Rate API request timeout in seconds
    #[arg(long, env = "SHIPPING_RATE_API_TIMEOUT_SECONDS", default_value_t = 5_u64)]
    pub rate_api_timeout_seconds: u64,

    /// Warehouse region code shipments originate from
    #[arg(long, env = "SHIPPING_ORIGIN_ID")]
    pub origin_id: String,
}
