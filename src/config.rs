use std::env;

use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Commission percentage preloaded into the checkout form when the
    /// request does not carry one.
    pub default_commission_pct: Decimal,
    /// Load the demo fixtures into the store on startup.
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let default_commission_pct = env::var("APP_DEFAULT_COMMISSION_PCT")
            .ok()
            .and_then(|p| p.parse::<Decimal>().ok())
            .unwrap_or(Decimal::from(40));
        let seed_demo_data = env::var("APP_SEED_DEMO_DATA")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        Ok(Self {
            host,
            port,
            default_commission_pct,
            seed_demo_data,
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            default_commission_pct: Decimal::from(40),
            seed_demo_data: true,
        }
    }
}
