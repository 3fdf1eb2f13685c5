use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinderError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no location found for \"{address}\"")]
    NotFound { address: String },

    #[error("unexpected response from {service}: {reason}")]
    BadResponse {
        service: &'static str,
        reason: String,
    },

    #[error("all {attempts} Overpass mirrors failed; last error: {last_error}")]
    AllMirrorsUnavailable {
        attempts: usize,
        #[source]
        last_error: Box<FinderError>,
    },

    #[error("Overpass mirror {mirror} rejected the query with HTTP {status}")]
    QueryRejected { mirror: String, status: u16 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("search superseded by a newer request")]
    Superseded,
}

impl FinderError {
    /// Stable machine-readable kind, used by API error bodies and logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound { .. } => "not_found",
            Self::BadResponse { .. } | Self::Deserialize { .. } => "bad_response",
            Self::AllMirrorsUnavailable { .. } => "all_mirrors_unavailable",
            Self::QueryRejected { .. } => "query_rejected",
            Self::UnexpectedStatus { .. } | Self::Http(_) => "upstream_error",
            Self::Superseded => "superseded",
        }
    }
}
