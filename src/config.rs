//! Configuration for the commerce backend connection

/// Default storefront API host.
pub const DEFAULT_SHOP_HOST: &str = "https://api.moltin.com";

/// Connection settings for the commerce backend. Token acquisition and
/// refresh happen before construction; this crate only carries the result.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub base_url: String,
    pub access_token: String,
}

impl ShopConfig {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Read `SHOP_API_BASE` and `SHOP_ACCESS_TOKEN` from the environment.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("SHOP_API_BASE")
                .unwrap_or_else(|_| DEFAULT_SHOP_HOST.to_string()),
            access_token: std::env::var("SHOP_ACCESS_TOKEN").unwrap_or_default(),
        }
    }
}
