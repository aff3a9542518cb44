//! File upload operations.

use crate::error::{transport_error, ApiError, Result};
use crate::types::UploadedFile;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

/// Files client for the community API.
pub struct FilesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
    timeout: Duration,
}

impl<'a> FilesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str, timeout: Duration) -> Self {
        Self {
            http,
            base_url,
            timeout,
        }
    }

    /// Upload a file from memory.
    pub async fn upload(
        &self,
        file_name: &str,
        contents: Vec<u8>,
        content_type: &str,
    ) -> Result<UploadedFile> {
        let url = format!("{}/files", self.base_url);
        let size = contents.len();
        debug!(url = %url, file = %file_name, size, "Uploading file");

        let part = Part::bytes(contents)
            .file_name(file_name.to_string())
            .mime_str(content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if status.is_success() {
            let uploaded: UploadedFile = response.json().await.map_err(|e| {
                ApiError::Parse(format!("Failed to parse upload response: {}", e))
            })?;
            info!(file_id = uploaded.id, file = %file_name, size, "File uploaded");
            Ok(uploaded)
        } else if status.as_u16() == 401 {
            Err(ApiError::AuthRequired)
        } else if status.as_u16() == 413 {
            Err(ApiError::Server {
                status: 413,
                message: "File too large".to_string(),
            })
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(ApiError::Server {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }

    /// Upload a file from disk, inferring the content type from the
    /// extension.
    pub async fn upload_path(&self, file_path: &Path) -> Result<UploadedFile> {
        if !file_path.exists() {
            return Err(ApiError::FileNotFound(file_path.display().to_string()));
        }

        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let mut file = File::open(file_path).await?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents).await?;

        self.upload(&file_name, contents, mime_type_for_file(file_path))
            .await
    }
}

/// Best-effort content type from the file extension.
fn mime_type_for_file(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mime_types_for_common_images() {
        assert_eq!(mime_type_for_file(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_type_for_file(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(mime_type_for_file(Path::new("a.png")), "image/png");
        assert_eq!(
            mime_type_for_file(Path::new("a.bin")),
            "application/octet-stream"
        );
        assert_eq!(
            mime_type_for_file(Path::new("noext")),
            "application/octet-stream"
        );
    }
}
