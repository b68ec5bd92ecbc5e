//! Create-page request and response payloads.

use serde::{Deserialize, Serialize};

/// Create-page request payload.
///
/// Absent values are omitted from the serialized form entirely. In
/// particular a page with no parent carries no `ancestors` field at all,
/// not an empty list and not a null.
#[derive(Debug, Clone, Serialize)]
pub struct NewPage {
    /// Content type (always "page").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Target space.
    pub space: Space,
    /// Parent reference; empty means top-level.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<Ancestor>,
    /// Page body content.
    pub body: Body,
}

impl NewPage {
    /// Build a create-page payload.
    ///
    /// `ancestor_id`, when present, places the new page under that
    /// existing content item.
    pub fn new(title: &str, space_key: &str, content: String, ancestor_id: Option<&str>) -> Self {
        Self {
            content_type: "page".to_owned(),
            title: title.to_owned(),
            space: Space {
                key: space_key.to_owned(),
            },
            ancestors: ancestor_id
                .map(|id| Ancestor { id: id.to_owned() })
                .into_iter()
                .collect(),
            body: Body {
                storage: Storage {
                    value: content,
                    representation: "storage".to_owned(),
                },
            },
        }
    }
}

/// Target space reference.
#[derive(Debug, Clone, Serialize)]
pub struct Space {
    /// Space key.
    pub key: String,
}

/// Reference to the parent content item.
#[derive(Debug, Clone, Serialize)]
pub struct Ancestor {
    /// Content id of the parent.
    pub id: String,
}

/// Page body wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct Body {
    /// Storage format content.
    pub storage: Storage,
}

/// Storage format representation.
#[derive(Debug, Clone, Serialize)]
pub struct Storage {
    /// Markup in Confluence storage format.
    pub value: String,
    /// Content representation (always "storage").
    pub representation: String,
}

/// Create-page response.
///
/// Only the content id is read; serde ignores every other field the API
/// returns.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedContent {
    /// Content id assigned by the server.
    pub id: String,
}
