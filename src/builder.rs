//! Joins a set's card list with the price snapshot and keeps the latest
//! Card Kingdom buylist price per card and finish.

use std::collections::HashMap;

use crate::cache::PriceCache;
use crate::client::MtgjsonClient;
use crate::error::{BuylistError, Result};
use crate::models::{latest_point, CardRecord, PricesDocument, Report, ReportRow, SetDocument};
use crate::render::{render, OutputFormat};

/// A rendered report ready to be written to the response.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub format: OutputFormat,
    pub count: usize,
    pub body: String,
}

/// Builds buylist reports from live MTGJSON data.
pub struct BuylistReportBuilder {
    client: MtgjsonClient,
    prices: PriceCache,
}

impl BuylistReportBuilder {
    pub fn new(client: MtgjsonClient) -> Self {
        let prices = PriceCache::new(client.config().price_cache_ttl);
        Self { client, prices }
    }

    pub fn client(&self) -> &MtgjsonClient {
        &self.client
    }

    /// Build and render the report for `set_code`.
    ///
    /// The set code is trimmed and upper-cased; the finish filter is
    /// lower-cased and ignored when blank.
    pub async fn build(
        &self,
        set_code: Option<&str>,
        format: OutputFormat,
        finish_filter: Option<&str>,
    ) -> Result<RenderedReport> {
        let report = self.report(set_code, finish_filter).await?;
        let body = render(&report, format)?;
        log::info!(
            "Built {} report for {}: {} rows (finish={})",
            match format {
                OutputFormat::Csv => "csv",
                OutputFormat::Json => "json",
            },
            report.set,
            report.count,
            finish_filter.unwrap_or("*")
        );
        Ok(RenderedReport {
            format,
            count: report.count,
            body,
        })
    }

    /// Fetch both documents and join them into a [`Report`].
    pub async fn report(&self, set_code: Option<&str>, finish_filter: Option<&str>) -> Result<Report> {
        let set_code = normalize_set_code(set_code)?;
        let filter = normalize_finish(finish_filter);

        let (set_doc, prices) = tokio::join!(
            self.client.fetch_set(&set_code),
            self.prices.get_or_fetch(|| self.client.fetch_prices()),
        );

        // An unreachable price snapshot wins over any set-side failure; a
        // snapshot that arrived but did not decode is reported after them.
        let prices = match prices {
            Err(e @ BuylistError::PriceFetchFailed(_)) => return Err(e),
            other => other,
        };
        let set_doc = set_doc?;
        if set_doc.cards().is_empty() {
            return Err(BuylistError::NoCardsInSet(set_code));
        }
        let prices = prices?;

        let rows = collect_rows(&set_code, &set_doc, &prices, filter.as_deref());
        Ok(Report::new(set_code, rows))
    }
}

pub fn normalize_set_code(raw: Option<&str>) -> Result<String> {
    match raw.map(str::trim) {
        Some(code) if !code.is_empty() => Ok(code.to_uppercase()),
        _ => Err(BuylistError::MissingParameter),
    }
}

fn normalize_finish(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_lowercase)
}

/// Join the set's cards with their buylist histories.
///
/// Cards are visited in first-appearance order of their uuid; when a uuid
/// repeats, the later card's metadata wins. Finishes are visited in the
/// order the price document lists them and emitted lower-cased. Cards
/// without buylist data and finishes with empty histories produce no rows.
pub fn collect_rows(
    set_code: &str,
    set_doc: &SetDocument,
    prices: &PricesDocument,
    finish_filter: Option<&str>,
) -> Vec<ReportRow> {
    let mut order: Vec<&str> = Vec::new();
    let mut meta: HashMap<&str, &CardRecord> = HashMap::new();
    for card in set_doc.cards() {
        if meta.insert(card.uuid.as_str(), card).is_none() {
            order.push(card.uuid.as_str());
        }
    }

    let mut rows = Vec::new();
    for uuid in order {
        let (Some(card), Some(buylist)) = (meta.get(uuid), prices.cardkingdom_buylist(uuid)) else {
            continue;
        };

        for (finish, history) in buylist.iter() {
            let finish = finish.to_lowercase();
            if finish_filter.is_some_and(|f| f != finish) {
                continue;
            }
            let Some((date, price)) = history.and_then(latest_point) else {
                continue;
            };

            rows.push(ReportRow {
                set: set_code.to_string(),
                number: card.number.clone(),
                name: card.name.clone(),
                uuid: uuid.to_string(),
                scryfall_id: card.scryfall_id().to_string(),
                finish,
                price: price.clone(),
                price_date: date.to_string(),
            });
        }
    }
    rows
}
