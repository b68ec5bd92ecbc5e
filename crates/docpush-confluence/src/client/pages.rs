//! Page operations for the Confluence content API.

use tracing::info;

use super::{ConfluenceClient, status_error};
use crate::error::PublishError;
use crate::types::{CreatedContent, NewPage};

impl ConfluenceClient {
    /// Create a new page, returning the content id assigned by the server.
    ///
    /// Requires HTTP 200 exactly; any other status is fatal. A success
    /// response whose body cannot be interpreted, or which lacks the `id`
    /// field, is fatal as well.
    pub(crate) fn create_page(&self, page: &NewPage) -> Result<String, PublishError> {
        let url = format!("{}/content", self.endpoint);

        info!("Creating page '{}'", page.title);

        let payload = serde_json::to_vec(page)?;

        let mut request = self
            .agent
            .post(&url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json");
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", &auth);
        }
        let response = request.send(&payload[..])?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(status_error(status));
        }

        let body = response.into_body().read_to_string()?;
        let created: CreatedContent =
            serde_json::from_str(&body).map_err(|e| PublishError::Response {
                status: 200,
                reason: format!("invalid create-page response: {e}"),
            })?;

        Ok(created.id)
    }
}
