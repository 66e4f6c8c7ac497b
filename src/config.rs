use std::time::Duration;

use reqwest::Url;

use crate::error::{BuylistError, Result};

pub const CDN_BASE: &str = "https://mtgjson.com/api/v5";
pub const PRICES_FILE: &str = "AllPricesToday.json";
pub const META_FILE: &str = "Meta.json";

/// `Cache-Control` advertised on successful reports.
pub const CACHE_CONTROL: &str = "s-maxage=300, stale-while-revalidate=600";

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Runtime settings for the server and its outbound client.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    /// Base URL of the MTGJSON API, without a trailing slash.
    pub cdn_base: String,
    /// Price snapshot file under `cdn_base`. A `.gz` suffix is gunzipped.
    pub prices_file: String,
    /// Per-request timeout for outbound fetches.
    pub timeout: Duration,
    /// How long a fetched price snapshot may be reused. Zero disables reuse.
    pub price_cache_ttl: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND.to_string(),
            cdn_base: CDN_BASE.to_string(),
            prices_file: PRICES_FILE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            price_cache_ttl: Duration::ZERO,
        }
    }
}

impl Config {
    /// Build a config from `CKBUYLIST_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys keep their
    /// defaults; malformed numbers are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(bind) = lookup("CKBUYLIST_BIND") {
            config.bind_addr = bind;
        }
        if let Some(base) = lookup("CKBUYLIST_CDN_BASE") {
            config.cdn_base = base.trim_end_matches('/').to_string();
        }
        if let Some(file) = lookup("CKBUYLIST_PRICES_FILE") {
            config.prices_file = file.trim_start_matches('/').to_string();
        }
        if let Some(secs) = lookup("CKBUYLIST_TIMEOUT_SECS") {
            config.timeout = Duration::from_secs(parse_secs("CKBUYLIST_TIMEOUT_SECS", &secs)?);
        }
        if let Some(secs) = lookup("CKBUYLIST_PRICE_CACHE_SECS") {
            config.price_cache_ttl =
                Duration::from_secs(parse_secs("CKBUYLIST_PRICE_CACHE_SECS", &secs)?);
        }

        Ok(config)
    }

    /// `{cdn_base}/{CODE}.json`, with the code encoded as one path segment.
    pub fn set_url(&self, set_code: &str) -> Result<Url> {
        let mut url = Url::parse(&self.cdn_base)
            .map_err(|e| BuylistError::InvalidConfig(format!("CKBUYLIST_CDN_BASE: {e}")))?;
        let not_a_base = || {
            BuylistError::InvalidConfig(format!("CKBUYLIST_CDN_BASE: {} has no path", self.cdn_base))
        };
        url.path_segments_mut()
            .map_err(|_| not_a_base())?
            .pop_if_empty()
            .push(&format!("{set_code}.json"));
        Ok(url)
    }

    pub fn prices_url(&self) -> String {
        format!("{}/{}", self.cdn_base, self.prices_file)
    }

    pub fn meta_url(&self) -> String {
        format!("{}/{}", self.cdn_base, META_FILE)
    }
}

fn parse_secs(key: &str, raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| BuylistError::InvalidConfig(format!("{key}={raw:?}: {e}")))
}
