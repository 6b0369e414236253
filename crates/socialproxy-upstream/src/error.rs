use thiserror::Error;

/// Errors returned by the upstream relay client.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network or TLS failure, or a non-2xx status from the upstream.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not JSON, or did not match the expected shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid upstream endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}
