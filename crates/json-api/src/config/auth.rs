//! Auth Config

use clap::Args;

/// Token signing and cart cookie settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Secret key bearer tokens are signed and verified with
    #[arg(long, env = "SECRET_KEY", hide_env_values = true)]
    pub secret_key: String,

    /// Days an issued bearer token stays valid
    #[arg(long, env = "TOKEN_TTL_DAYS", default_value = "180")]
    pub token_ttl_days: i64,

    /// Days the `Cart` cookie stays alive
    #[arg(long, env = "CART_TTL_DAYS", default_value = "3")]
    pub cart_ttl_days: i64,
}
