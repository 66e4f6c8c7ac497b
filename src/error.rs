use reqwest::StatusCode;

/// Every way a buylist request can fail.
///
/// The first four variants are the request-level failure kinds; the rest
/// fold into the catch-all 500 class.
#[derive(Debug, thiserror::Error)]
pub enum BuylistError {
    #[error("Missing ?set=CODE")]
    MissingParameter,

    #[error("Bad set code {0}")]
    SetNotFound(String),

    #[error("No cards for set {0}")]
    NoCardsInSet(String),

    #[error("Failed to fetch prices: {0}")]
    PriceFetchFailed(String),

    #[error("Upstream fetch failed: {0}")]
    Upstream(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error: {0}")]
    Unexpected(String),
}

impl BuylistError {
    /// HTTP status the server answers with for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            BuylistError::MissingParameter => StatusCode::BAD_REQUEST,
            BuylistError::SetNotFound(_) | BuylistError::NoCardsInSet(_) => StatusCode::NOT_FOUND,
            BuylistError::PriceFetchFailed(_) | BuylistError::Upstream(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type Result<T> = std::result::Result<T, BuylistError>;
