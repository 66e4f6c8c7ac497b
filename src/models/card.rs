use serde::Deserialize;

// ---------------------------------------------------------------------------
// SetDocument — `{CODE}.json` envelope
// ---------------------------------------------------------------------------

/// The `{"data": {...}}` envelope of a single-set file.
///
/// Only the card list is read; a missing or `null` `data` or `cards` node
/// decodes as an empty list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetDocument {
    #[serde(default)]
    pub data: Option<SetData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SetData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub cards: Vec<CardRecord>,
}

impl SetDocument {
    pub fn cards(&self) -> &[CardRecord] {
        self.data.as_ref().map(|d| d.cards.as_slice()).unwrap_or(&[])
    }
}

// ---------------------------------------------------------------------------
// CardRecord — one printing in the set
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    #[serde(default, deserialize_with = "null_as_default")]
    pub uuid: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub number: String,
    #[serde(default)]
    pub identifiers: Option<CardIdentifiers>,
}

impl CardRecord {
    /// Scryfall id from the identifier block, or `""` when absent.
    pub fn scryfall_id(&self) -> &str {
        self.identifiers
            .as_ref()
            .and_then(|ids| ids.scryfall_id.as_deref())
            .unwrap_or("")
    }
}

/// Cross-reference identifiers. Only the Scryfall id is carried into reports.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIdentifiers {
    pub scryfall_id: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
