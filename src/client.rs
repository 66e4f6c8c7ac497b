//! Async HTTP client for the two MTGJSON documents a report needs.
//!
//! Transport failures, timeouts and non-success statuses are classified per
//! document (`SetNotFound` for the set file, `PriceFetchFailed` for the
//! price snapshot). A body that arrives but does not decode is a JSON error.

use std::io::Read;

use flate2::read::GzDecoder;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{BuylistError, Result};
use crate::models::{PricesDocument, SetDocument};

/// Dataset version info from `Meta.json`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
pub struct DatasetMeta {
    pub version: String,
    pub date: String,
}

#[derive(Deserialize)]
struct MetaEnvelope {
    data: Option<DatasetMeta>,
    meta: Option<DatasetMeta>,
}

/// Fetches set and price documents from the MTGJSON CDN.
#[derive(Debug, Clone)]
pub struct MtgjsonClient {
    http: Client,
    config: Config,
}

impl MtgjsonClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .gzip(true)
            .build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch `{CODE}.json`. `set_code` is used as given; callers upper-case it.
    pub async fn fetch_set(&self, set_code: &str) -> Result<SetDocument> {
        let url = self.config.set_url(set_code)?;
        let bytes = self
            .get_bytes(url.as_str())
            .await
            .map_err(|_| BuylistError::SetNotFound(set_code.to_string()))?;
        decode_json(bytes).await
    }

    /// Fetch the full price snapshot, gunzipping it when the configured
    /// file name ends in `.gz`.
    pub async fn fetch_prices(&self) -> Result<PricesDocument> {
        let url = self.config.prices_url();
        let mut bytes = self
            .get_bytes(&url)
            .await
            .map_err(|e| BuylistError::PriceFetchFailed(e.to_string()))?;

        if self.config.prices_file.ends_with(".gz") {
            bytes = gunzip(bytes).await?;
        }
        decode_json(bytes).await
    }

    /// Fetch the dataset version and build date.
    pub async fn fetch_meta(&self) -> Result<DatasetMeta> {
        let url = self.config.meta_url();
        let bytes = self.get_bytes(&url).await?;
        let envelope: MetaEnvelope = serde_json::from_slice(&bytes)?;
        envelope
            .data
            .or(envelope.meta)
            .ok_or_else(|| BuylistError::Unexpected("Meta.json has no data node".into()))
    }

    async fn get_bytes(&self, url: &str) -> std::result::Result<Vec<u8>, reqwest::Error> {
        log::info!("Fetching {}", url);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status());

        let resp = match resp {
            Ok(resp) => resp,
            Err(e) => {
                log::warn!("Fetch of {} failed: {}", url, e);
                return Err(e);
            }
        };

        match resp.bytes().await {
            Ok(bytes) => Ok(bytes.to_vec()),
            Err(e) => {
                log::warn!("Reading body of {} failed: {}", url, e);
                Err(e)
            }
        }
    }
}

/// Decode off the async workers; the price snapshot is tens of megabytes.
async fn decode_json<T>(bytes: Vec<u8>) -> Result<T>
where
    T: DeserializeOwned + Send + 'static,
{
    tokio::task::spawn_blocking(move || -> Result<T> { Ok(serde_json::from_slice(&bytes)?) })
        .await
        .map_err(|e| BuylistError::Unexpected(format!("Task join error: {e}")))?
}

async fn gunzip(bytes: Vec<u8>) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || -> Result<Vec<u8>> {
        let mut decoder = GzDecoder::new(bytes.as_slice());
        let mut out = Vec::new();
        decoder.read_to_end(&mut out)?;
        Ok(out)
    })
    .await
    .map_err(|e| BuylistError::Unexpected(format!("Task join error: {e}")))?
}
