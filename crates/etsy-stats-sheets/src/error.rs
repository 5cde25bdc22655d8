use thiserror::Error;

/// Errors returned by the Sheets client and publisher.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Sheets API answered with a non-2xx status.
    #[error("Sheets API {operation} failed with status {status}: {message}")]
    Api {
        operation: String,
        status: u16,
        message: String,
    },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid Sheets base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Publishing was requested without a required setting.
    #[error("missing Sheets setting: {0}")]
    MissingConfig(&'static str),
}
