//! Attachment operations for the Confluence content API.

use rand::RngExt;
use tracing::info;

use super::{ConfluenceClient, status_error};
use crate::error::PublishError;

impl ConfluenceClient {
    /// Upload one attachment to an existing content item.
    ///
    /// Sends a single multipart/form-data request with exactly one part
    /// named `file`. The `X-Atlassian-Token: no-check` header is required
    /// by Confluence to accept multipart uploads without an XSRF check.
    pub(crate) fn upload_attachment(
        &self,
        content_id: &str,
        filename: &str,
        data: &[u8],
    ) -> Result<(), PublishError> {
        let url = format!("{}/content/{}/child/attachment", self.endpoint, content_id);

        info!("Uploading attachment '{}' to content {}", filename, content_id);

        let boundary = format!("----DocpushFormBoundary{:016x}", rand::rng().random::<u64>());
        let body = multipart_body(&boundary, filename, data);

        let mut request = self
            .agent
            .post(&url)
            .header(
                "Content-Type",
                &format!("multipart/form-data; charset=UTF-8; boundary={boundary}"),
            )
            .header("X-Atlassian-Token", "no-check")
            .header("Accept", "application/json");
        if let Some(auth) = self.auth_header() {
            request = request.header("Authorization", &auth);
        }
        let response = request.send(&body[..])?;

        let status = response.status();
        if status.as_u16() != 200 {
            return Err(status_error(status));
        }

        Ok(())
    }
}

/// Assemble a browser-compatible multipart body with one `file` part.
fn multipart_body(boundary: &str, filename: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();

    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
            .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(data);
    body.extend_from_slice(b"\r\n");
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_multipart_body_layout() {
        let body = multipart_body("----XYZ", "img.png", b"\x89PNG");
        let text = String::from_utf8_lossy(&body);

        assert!(text.starts_with("------XYZ\r\n"));
        assert!(text.contains(
            "Content-Disposition: form-data; name=\"file\"; filename=\"img.png\"\r\n"
        ));
        assert!(text.ends_with("------XYZ--\r\n"));
    }

    #[test]
    fn test_multipart_body_contains_raw_bytes() {
        let data = [0u8, 159, 146, 150];
        let body = multipart_body("----XYZ", "blob.bin", &data);
        assert!(body.windows(data.len()).any(|w| w == data));
    }

    #[test]
    fn test_multipart_body_has_single_file_part() {
        let body = multipart_body("----XYZ", "img.png", b"data");
        let text = String::from_utf8_lossy(&body);
        assert_eq!(text.matches("Content-Disposition").count(), 1);
    }
}
