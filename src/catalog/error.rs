//! Error types shared by the upstream catalog client.

use reqwest::StatusCode;
use thiserror::Error;

/// Convenient result alias returning [`CatalogError`] failures.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Failures that can occur while talking to the catalog provider.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Client-credentials flow attempted without configured credentials.
    #[error("catalog credentials not configured")]
    MissingCredentials,
    /// Building the HTTP client failed (invalid TLS setup, etc).
    #[error("failed to build catalog client")]
    ClientBuilder {
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// A request could not be sent.
    #[error("failed to send catalog request to `{path}`")]
    RequestSend {
        /// Request path relative to the API base.
        path: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The provider returned an unexpected status code.
    #[error("unexpected catalog response status {status} for `{path}`")]
    RequestStatus {
        /// Request path relative to the API base.
        path: String,
        /// HTTP status received.
        status: StatusCode,
    },
    /// Response payload could not be parsed into JSON.
    #[error("failed to decode catalog response for `{path}`")]
    DecodeResponse {
        /// Request path relative to the API base.
        path: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },
    /// The token endpoint rejected the credential exchange.
    #[error("catalog token exchange failed with status {status}")]
    TokenExchange {
        /// HTTP status received from the token endpoint.
        status: StatusCode,
    },
}
