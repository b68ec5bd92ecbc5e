//! Error types for Confluence publishing.

use std::io;
use std::path::PathBuf;

/// Error while loading the publication metadata file.
///
/// Always fatal at startup; there is no partial or degraded load.
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// Metadata file does not exist.
    #[error("Metadata file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Metadata file could not be read.
    #[error("Could not read metadata file {}: {source}", .path.display())]
    Io {
        /// Path to the metadata file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Metadata file is not well-formed JSON or does not match the schema.
    #[error("Malformed metadata file {}: {source}", .path.display())]
    Parse {
        /// Path to the metadata file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// Metadata parsed but violates a structural requirement.
    #[error("Invalid metadata: {0}")]
    Validation(String),
}

/// Error from a publish run.
///
/// Every variant is fatal: the first failure aborts the entire run with no
/// retries and no continuation to sibling pages. Remote content created
/// before the failure stays in place.
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// Metadata loading failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// A referenced content or attachment file is missing or unreadable.
    #[error("Could not read content file {}: {source}", .path.display())]
    ContentRead {
        /// Resolved path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Transport-level failure sending a request (network error, timeout).
    #[error("Request could not be sent: {0}")]
    Request(#[from] ureq::Error),

    /// The remote service returned a non-200 status, or a success response
    /// that could not be interpreted (unparsable body, missing `id`).
    #[error("Remote error: {status} {reason}")]
    Response {
        /// HTTP status code.
        status: u16,
        /// Reason text for diagnostics.
        reason: String,
    },

    /// Request payload could not be serialized. Indicates a defect rather
    /// than an environmental failure.
    #[error("Could not serialize request payload: {0}")]
    Serialization(#[from] serde_json::Error),
}
