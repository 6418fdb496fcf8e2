//! Image-host upload client
//!
//! The [`Uploader`] trait is the seam between the excuse pipeline and the
//! hosting service; [`ImgurUploader`] is the production implementation,
//! posting the rendered PNG to imgur's anonymous image endpoint.

use std::path::Path;

use async_trait::async_trait;
use reqwest::header;
use serde::Deserialize;

use crate::errors::UploadError;

const IMGUR_UPLOAD_URL: &str = "https://api.imgur.com/3/image";

#[async_trait]
pub trait Uploader: Send + Sync {
    /// Sends the file at `image_path` to the hosting service and returns
    /// the public URL it ends up at.
    async fn upload(&self, image_path: &Path) -> Result<String, UploadError>;
}

pub struct ImgurUploader {
    client: reqwest::Client,
    client_id: String,
}

impl ImgurUploader {
    pub fn new(client_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id,
        }
    }
}

#[async_trait]
impl Uploader for ImgurUploader {
    async fn upload(&self, image_path: &Path) -> Result<String, UploadError> {
        let bytes = tokio::fs::read(image_path)
            .await
            .map_err(|source| UploadError::FileRead {
                path: image_path.to_path_buf(),
                source,
            })?;

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name("excuse.png")
            .mime_str("image/png")?;
        let form = reqwest::multipart::Form::new().part("image", part);

        let response = self
            .client
            .post(IMGUR_UPLOAD_URL)
            .header(
                header::AUTHORIZATION,
                format!("Client-ID {}", self.client_id),
            )
            .multipart(form)
            .send()
            .await?;

        let body = response.bytes().await?;
        parse_hosted_url(&body)
    }
}

/// Response envelope for the upload endpoint, trimmed to the fields the
/// service consumes.
#[derive(Debug, Deserialize)]
struct ImgurEnvelope {
    success: bool,
    status: i32,
    data: Option<ImgurImage>,
}

#[derive(Debug, Deserialize)]
struct ImgurImage {
    #[serde(default)]
    link: String,
}

fn parse_hosted_url(body: &[u8]) -> Result<String, UploadError> {
    let envelope: ImgurEnvelope =
        serde_json::from_slice(body).map_err(|e| UploadError::MalformedResponse {
            detail: e.to_string(),
        })?;

    if !envelope.success {
        return Err(UploadError::Rejected {
            status: envelope.status,
        });
    }

    match envelope.data {
        Some(image) if !image.link.is_empty() => Ok(image.link),
        _ => Err(UploadError::MalformedResponse {
            detail: "successful upload carried no image link".to_string(),
        }),
    }
}
