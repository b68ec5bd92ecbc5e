//! Wire types for the Confluence content API.

mod page;

pub use page::{Ancestor, Body, CreatedContent, NewPage, Space, Storage};
