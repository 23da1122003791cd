//! Error types for the domain record client.
//!
//! # Design
//! Input errors (`InvalidRecordType`, `InvalidField`) are raised while
//! building a request, so no network call happens. `NotFound` gets a dedicated
//! variant because callers frequently distinguish "the record or domain does
//! not exist" from "the server returned an unexpected status." All other
//! non-2xx responses land in `Http` with the raw status code and body.

use thiserror::Error;

/// Errors returned by `DomainRecordClient` and `DomainRecordApi`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The record type is not one of A, AAAA, CNAME, TXT, NS, SRV, MX, CAA.
    #[error("the domain record type is invalid: {0:?}")]
    InvalidRecordType(String),

    /// A numeric field was supplied as a string that is not an integer.
    #[error("invalid value for `{field}`: {value:?} is not an integer")]
    InvalidField { field: &'static str, value: String },

    /// The server returned 404 for the domain or record.
    #[error("resource not found: {message}")]
    NotFound { message: String },

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The transport could not complete the round-trip.
    #[error("transport error: {0}")]
    Transport(String),

    /// The client configuration is unusable.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
