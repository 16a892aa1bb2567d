use thiserror::Error;

/// Top-level error type for the `asuswrt-api` crate.
///
/// The firmware's failure modes are narrow: either the transport fails,
/// or a body that must be JSON isn't. Missing fields inside an otherwise
/// valid response are never errors -- the decoders substitute defaults
/// (see [`crate::decode`]).
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, timeout, TLS failure).
    /// Propagated unchanged; never caught or translated internally.
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or client construction error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Data ────────────────────────────────────────────────────────
    /// A body that had to be JSON wasn't. Carries the raw body for
    /// debugging against whatever the firmware actually sent.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// An action payload could not be serialized to JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
}
