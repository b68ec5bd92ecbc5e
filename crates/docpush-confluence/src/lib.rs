//! Confluence page-tree publishing.
//!
//! This crate provides:
//! - [`PublishMetadata`]: the page tree loaded from a JSON metadata file
//! - [`ConfluenceClient`]: REST API client with optional basic authentication
//! - [`Publisher`]: depth-first realization of the tree as remote content
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use docpush_confluence::{ConfluenceClient, Publisher};
//!
//! let client = ConfluenceClient::new(
//!     "https://confluence.example.com/rest/api",
//!     "publisher",
//!     "secret",
//! );
//! let publisher = Publisher::from_metadata_file(&client, Path::new("docs/metadata.json"))?;
//! publisher.publish()?;
//! # Ok(())
//! # }
//! ```
//!
//! Publishing is fail-fast and non-idempotent: every run creates new
//! pages, and the first failure aborts the run leaving already-created
//! content in place.

// API client
mod client;
pub use client::ConfluenceClient;

mod error;
pub use error::{MetadataError, PublishError};

mod metadata;
pub use metadata::{LoadedMetadata, PageMetadata, PublishMetadata};

mod publisher;
pub use publisher::{ContentApi, Publisher};

// Wire payloads
mod types;
pub use types::{Ancestor, Body, CreatedContent, NewPage, Space, Storage};
