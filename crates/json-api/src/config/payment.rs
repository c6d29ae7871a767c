//! Payment Processor Config

use clap::Args;

/// Payment processor settings.
#[derive(Debug, Args)]
pub struct PaymentConfig {
    /// Server key shared with the payment processor, used to verify
    /// webhook notification signatures.
    #[arg(long, env = "PAYMENT_SERVER_KEY", hide_env_values = true)]
    pub server_key: String,
}
