//! Page-tree publisher.
//!
//! Walks the metadata page tree depth-first, pre-order, and realizes it
//! as remote content: create each page, upload its attachments, then
//! recurse into its children with the freshly assigned content id as
//! their parent. The first failing operation aborts the entire run; no
//! retries, no continuation to siblings, no rollback of content already
//! created on the server.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::client::ConfluenceClient;
use crate::error::PublishError;
use crate::metadata::{PageMetadata, PublishMetadata};
use crate::types::NewPage;

/// Remote operations needed by the publisher.
///
/// Implemented by [`ConfluenceClient`] for production use.
pub trait ContentApi {
    /// Create a page and return the content id assigned by the server.
    fn create_page(&self, page: &NewPage) -> Result<String, PublishError>;

    /// Upload one attachment to an existing content item.
    fn upload_attachment(
        &self,
        content_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), PublishError>;
}

impl ContentApi for ConfluenceClient {
    fn create_page(&self, page: &NewPage) -> Result<String, PublishError> {
        Self::create_page(self, page)
    }

    fn upload_attachment(
        &self,
        content_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), PublishError> {
        Self::upload_attachment(self, content_id, filename, data)
    }
}

/// Publishes a local page tree as new remote content.
///
/// Every run creates brand-new pages; there is no duplicate detection
/// and no update-in-place.
pub struct Publisher<'a, A: ContentApi> {
    api: &'a A,
    metadata: PublishMetadata,
    content_root: PathBuf,
}

impl<'a, A: ContentApi> Publisher<'a, A> {
    /// Load metadata from `metadata_path` and prepare a publisher.
    ///
    /// The directory containing the metadata file becomes the root for
    /// resolving every relative content and attachment path.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Metadata`] if the metadata file is
    /// missing, unreadable, or malformed.
    pub fn from_metadata_file(api: &'a A, metadata_path: &Path) -> Result<Self, PublishError> {
        let loaded = PublishMetadata::load(metadata_path)?;
        Ok(Self {
            api,
            metadata: loaded.metadata,
            content_root: loaded.content_root,
        })
    }

    /// The loaded metadata. Never mutated by the publisher.
    pub fn metadata(&self) -> &PublishMetadata {
        &self.metadata
    }

    /// Publish the whole page tree.
    ///
    /// # Errors
    ///
    /// Returns the first [`PublishError`] encountered; the run stops at
    /// that point and content already created stays in place.
    pub fn publish(&self) -> Result<(), PublishError> {
        self.publish_subtree(
            &self.metadata.pages,
            self.metadata.parent_content_id.as_deref(),
        )
    }

    fn publish_subtree(
        &self,
        pages: &[PageMetadata],
        parent_id: Option<&str>,
    ) -> Result<(), PublishError> {
        for page in pages {
            let content = self.read_content(&page.content_file_path)?;
            let payload = NewPage::new(
                &page.title,
                &self.metadata.space_key,
                content,
                effective_parent(parent_id),
            );

            let content_id = self.api.create_page(&payload)?;
            info!("Created page '{}' (id={})", page.title, content_id);

            self.upload_attachments(&content_id, &page.attachments)?;
            self.publish_subtree(&page.children, Some(&content_id))?;
        }
        Ok(())
    }

    fn upload_attachments(
        &self,
        content_id: &str,
        attachments: &[String],
    ) -> Result<(), PublishError> {
        for attachment in attachments {
            let path = self.content_root.join(attachment);
            let data = std::fs::read(&path)
                .map_err(|source| PublishError::ContentRead { path, source })?;
            self.api
                .upload_attachment(content_id, file_name(attachment), &data)?;
        }
        Ok(())
    }

    fn read_content(&self, relative_path: &str) -> Result<String, PublishError> {
        let path = self.content_root.join(relative_path);
        std::fs::read_to_string(&path).map_err(|source| PublishError::ContentRead { path, source })
    }
}

/// Treat a blank parent id as no ancestor at all.
fn effective_parent(parent_id: Option<&str>) -> Option<&str> {
    parent_id.filter(|id| !id.trim().is_empty())
}

/// Final path component, used as the multipart filename.
fn file_name(relative_path: &str) -> &str {
    Path::new(relative_path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(relative_path)
}
