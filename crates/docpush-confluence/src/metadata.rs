//! Publication metadata model and loader.
//!
//! The metadata file is a JSON document describing the space key, an
//! optional existing ancestor, and an ordered forest of page nodes.
//! The directory containing the file becomes the content root for
//! resolving every relative content and attachment path.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::MetadataError;

/// Page tree description loaded from a metadata file.
///
/// Immutable for the whole publish run; sibling order is publish order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishMetadata {
    /// Key of the target Confluence space.
    pub space_key: String,
    /// Id of an existing content item that becomes the parent of all
    /// top-level pages. Absent or blank means no ancestor.
    #[serde(default)]
    pub parent_content_id: Option<String>,
    /// Top-level pages, in publish order.
    #[serde(default)]
    pub pages: Vec<PageMetadata>,
}

/// One node of the page tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    /// Remote page title.
    pub title: String,
    /// Path to the page body file, relative to the content root.
    /// Mandatory even for pages with children.
    pub content_file_path: String,
    /// Attachment file paths, relative to the content root.
    #[serde(default)]
    pub attachments: Vec<String>,
    /// Child pages, in publish order.
    #[serde(default)]
    pub children: Vec<PageMetadata>,
}

/// Metadata together with its path-resolution root.
#[derive(Debug, Clone)]
pub struct LoadedMetadata {
    /// The parsed page tree.
    pub metadata: PublishMetadata,
    /// Directory containing the metadata file.
    pub content_root: PathBuf,
}

impl PublishMetadata {
    /// Load and validate metadata from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError`] if the file is missing, unreadable,
    /// malformed, or structurally invalid.
    pub fn load(path: &Path) -> Result<LoadedMetadata, MetadataError> {
        if !path.exists() {
            return Err(MetadataError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path).map_err(|source| MetadataError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let metadata: Self =
            serde_json::from_str(&content).map_err(|source| MetadataError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        metadata.validate()?;

        let content_root = path.parent().map_or_else(PathBuf::new, Path::to_path_buf);
        Ok(LoadedMetadata {
            metadata,
            content_root,
        })
    }

    /// Total number of pages in the tree.
    pub fn page_count(&self) -> usize {
        count_pages(&self.pages)
    }

    /// Total number of attachments across all pages.
    pub fn attachment_count(&self) -> usize {
        count_attachments(&self.pages)
    }

    fn validate(&self) -> Result<(), MetadataError> {
        if self.space_key.trim().is_empty() {
            return Err(MetadataError::Validation(
                "spaceKey cannot be blank".to_owned(),
            ));
        }
        validate_pages(&self.pages)
    }
}

fn validate_pages(pages: &[PageMetadata]) -> Result<(), MetadataError> {
    for page in pages {
        if page.title.trim().is_empty() {
            return Err(MetadataError::Validation(
                "page title cannot be blank".to_owned(),
            ));
        }
        if page.content_file_path.trim().is_empty() {
            return Err(MetadataError::Validation(format!(
                "page '{}' has no contentFilePath",
                page.title
            )));
        }
        validate_pages(&page.children)?;
    }
    Ok(())
}

fn count_pages(pages: &[PageMetadata]) -> usize {
    pages
        .iter()
        .map(|page| 1 + count_pages(&page.children))
        .sum()
}

fn count_attachments(pages: &[PageMetadata]) -> usize {
    pages
        .iter()
        .map(|page| page.attachments.len() + count_attachments(&page.children))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_metadata(dir: &Path, json: &str) -> PathBuf {
        let path = dir.join("metadata.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    #[test]
    fn test_load_full_tree() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_metadata(
            dir.path(),
            r#"{
                "spaceKey": "DOCS",
                "parentContentId": "1234",
                "pages": [
                    {
                        "title": "Overview",
                        "contentFilePath": "overview.xhtml",
                        "attachments": ["diagrams/arch.png"],
                        "children": [
                            {"title": "Details", "contentFilePath": "details.xhtml"}
                        ]
                    }
                ]
            }"#,
        );

        let loaded = PublishMetadata::load(&path).unwrap();
        assert_eq!(loaded.content_root, dir.path());

        let metadata = loaded.metadata;
        assert_eq!(metadata.space_key, "DOCS");
        assert_eq!(metadata.parent_content_id.as_deref(), Some("1234"));
        assert_eq!(metadata.pages.len(), 1);
        assert_eq!(metadata.pages[0].title, "Overview");
        assert_eq!(metadata.pages[0].attachments, vec!["diagrams/arch.png"]);
        assert_eq!(metadata.pages[0].children[0].title, "Details");
        assert!(metadata.pages[0].children[0].attachments.is_empty());
        assert_eq!(metadata.page_count(), 2);
        assert_eq!(metadata.attachment_count(), 1);
    }

    #[test]
    fn test_parent_content_id_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_metadata(
            dir.path(),
            r#"{"spaceKey": "DOCS", "pages": [{"title": "A", "contentFilePath": "a.xhtml"}]}"#,
        );

        let loaded = PublishMetadata::load(&path).unwrap();
        assert_eq!(loaded.metadata.parent_content_id, None);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = PublishMetadata::load(Path::new("/nonexistent/metadata.json")).unwrap_err();
        assert!(matches!(err, MetadataError::NotFound(_)));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_metadata(dir.path(), "{not json");

        let err = PublishMetadata::load(&path).unwrap_err();
        assert!(matches!(err, MetadataError::Parse { .. }));
    }

    #[test]
    fn test_blank_space_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_metadata(dir.path(), r#"{"spaceKey": "  ", "pages": []}"#);

        let err = PublishMetadata::load(&path).unwrap_err();
        assert!(matches!(err, MetadataError::Validation(_)));
    }

    #[test]
    fn test_nested_page_without_content_path_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_metadata(
            dir.path(),
            r#"{
                "spaceKey": "DOCS",
                "pages": [
                    {
                        "title": "A",
                        "contentFilePath": "a.xhtml",
                        "children": [{"title": "B", "contentFilePath": ""}]
                    }
                ]
            }"#,
        );

        let err = PublishMetadata::load(&path).unwrap_err();
        match err {
            MetadataError::Validation(msg) => assert!(msg.contains('B')),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
