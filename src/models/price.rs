use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// PricesDocument — `AllPricesToday.json`
// ---------------------------------------------------------------------------

/// The snapshot document: `data -> uuid -> paper -> provider -> channel ->
/// finish -> date -> price`.
///
/// Only paper Card Kingdom prices are decoded; every other format and
/// provider is skipped by serde.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PricesDocument {
    #[serde(default)]
    pub data: HashMap<String, CardPriceFormats>,
}

impl PricesDocument {
    /// Card Kingdom buylist histories for a card, if it has any.
    pub fn cardkingdom_buylist(&self, uuid: &str) -> Option<&FinishHistories> {
        self.data
            .get(uuid)?
            .paper
            .as_ref()?
            .cardkingdom
            .as_ref()?
            .buylist
            .as_ref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardPriceFormats {
    #[serde(default)]
    pub paper: Option<PaperProviders>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaperProviders {
    #[serde(default)]
    pub cardkingdom: Option<ProviderPrices>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderPrices {
    #[serde(default)]
    pub buylist: Option<FinishHistories>,
}

// ---------------------------------------------------------------------------
// FinishHistories — finish name -> dated prices, in document order
// ---------------------------------------------------------------------------

/// Date (`YYYY-MM-DD`) to price. Sorted by key, so the last entry is the
/// latest date. Prices are kept as raw JSON; one odd value in the snapshot
/// must not fail the whole decode.
pub type PriceHistory = BTreeMap<String, Value>;

/// Finish entries of one provider channel, kept in the order the document
/// lists them. Keys differing only by case stay distinct entries. A history
/// that is not a JSON object is kept as `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FinishHistories(pub Vec<(String, Option<PriceHistory>)>);

impl FinishHistories {
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&PriceHistory>)> {
        self.0.iter().map(|(finish, hist)| (finish.as_str(), hist.as_ref()))
    }
}

impl<'de> Deserialize<'de> for FinishHistories {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = FinishHistories;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of finish name to price history")
            }

            fn visit_map<A>(self, mut access: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(3));
                while let Some((finish, hist)) = access.next_entry::<String, Value>()? {
                    let hist = match hist {
                        Value::Object(points) => Some(points.into_iter().collect()),
                        _ => None,
                    };
                    entries.push((finish, hist));
                }
                Ok(FinishHistories(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

/// The latest `(date, price)` in a history, by plain string ordering of the
/// date keys.
pub fn latest_point(history: &PriceHistory) -> Option<(&str, &Value)> {
    history
        .iter()
        .next_back()
        .map(|(date, price)| (date.as_str(), price))
}
