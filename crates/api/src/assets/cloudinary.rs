//! Cloudinary upload API client.
//!
//! Uses signed uploads: the request parameters (minus `file`, `api_key` and
//! the signature fields) are sorted, joined as `k=v&k=v`, suffixed with the
//! API secret, and hashed with SHA-256.

use async_trait::async_trait;
use folio_core::error::CoreError;
use folio_core::hashing::sha256_hex;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use super::{AssetHost, ImageUpload, UploadedAsset};
use crate::config::CloudinaryConfig;

const DEFAULT_API_URL: &str = "https://api.cloudinary.com/v1_1";

/// Fields of the upload response we use.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    public_id: String,
    secure_url: String,
    width: u32,
    height: u32,
}

pub struct CloudinaryHost {
    client: reqwest::Client,
    api_url: String,
    config: CloudinaryConfig,
}

impl CloudinaryHost {
    pub fn new(config: CloudinaryConfig) -> Self {
        Self::with_client(reqwest::Client::new(), DEFAULT_API_URL.to_string(), config)
    }

    /// Reuse an existing [`reqwest::Client`] and point at a different API base.
    pub fn with_client(client: reqwest::Client, api_url: String, config: CloudinaryConfig) -> Self {
        Self {
            client,
            api_url,
            config,
        }
    }

    fn upload_url(&self) -> String {
        format!("{}/{}/image/upload", self.api_url, self.config.cloud_name)
    }
}

/// SHA-256 signature over the sorted `params` followed by `api_secret`.
pub fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<_> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));
    let joined = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    sha256_hex(format!("{joined}{api_secret}").as_bytes())
}

#[async_trait]
impl AssetHost for CloudinaryHost {
    async fn upload_image(&self, image: ImageUpload) -> Result<UploadedAsset, CoreError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signed = [
            ("folder", self.config.folder.clone()),
            ("public_id", image.public_id.clone()),
            ("timestamp", timestamp.clone()),
        ];
        let signature = sign_params(&signed, &self.config.api_secret);

        let file = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| CoreError::Validation(format!("Invalid file type: {e}")))?;

        let mut form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (name, value) in signed {
            if !value.is_empty() {
                form = form.text(name, value);
            }
        }

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| CoreError::Internal(format!("Asset upload request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(CoreError::Internal(format!(
                "Asset host rejected upload ({status}): {body}"
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| CoreError::Internal(format!("Unexpected asset host response: {e}")))?;

        tracing::info!(public_id = %uploaded.public_id, "Image uploaded");
        Ok(UploadedAsset {
            public_id: uploaded.public_id,
            url: uploaded.secure_url,
            width: uploaded.width,
            height: uploaded.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CloudinaryConfig {
        CloudinaryConfig {
            cloud_name: "demo".into(),
            api_key: "key".into(),
            api_secret: "abcd".into(),
            folder: "blog/projects".into(),
        }
    }

    #[test]
    fn signature_sorts_params_and_appends_secret() {
        let params = [
            ("timestamp", "1315060510".to_string()),
            ("public_id", "sample_image".to_string()),
            ("eager", "w_400,h_300,c_pad|w_260,h_200,c_crop".to_string()),
        ];
        let expected = sha256_hex(
            b"eager=w_400,h_300,c_pad|w_260,h_200,c_crop&public_id=sample_image&timestamp=1315060510abcd",
        );
        assert_eq!(sign_params(&params, "abcd"), expected);
    }

    #[test]
    fn empty_params_are_not_signed() {
        let with_empty = [
            ("folder", String::new()),
            ("timestamp", "1".to_string()),
        ];
        assert_eq!(sign_params(&with_empty, "s"), sha256_hex(b"timestamp=1s"));
    }

    #[test]
    fn upload_url_includes_cloud_name() {
        let host = CloudinaryHost::with_client(
            reqwest::Client::new(),
            "http://localhost:9".into(),
            config(),
        );
        assert_eq!(host.upload_url(), "http://localhost:9/demo/image/upload");
    }
}
