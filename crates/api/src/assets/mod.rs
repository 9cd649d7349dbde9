//! Third-party image hosting for project images.

pub mod cloudinary;

use async_trait::async_trait;
use folio_core::error::CoreError;
use serde::Serialize;

/// An image accepted by the asset host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedAsset {
    pub public_id: String,
    /// Public HTTPS URL of the stored image.
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Image payload handed to an [`AssetHost`].
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub public_id: String,
    pub content_type: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait AssetHost: Send + Sync {
    async fn upload_image(&self, image: ImageUpload) -> Result<UploadedAsset, CoreError>;
}

/// Stand-in used when no asset host credentials are configured.
pub struct UnconfiguredAssetHost;

#[async_trait]
impl AssetHost for UnconfiguredAssetHost {
    async fn upload_image(&self, _image: ImageUpload) -> Result<UploadedAsset, CoreError> {
        Err(CoreError::Configuration(
            "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY and CLOUDINARY_API_SECRET must be set for uploads"
                .into(),
        ))
    }
}
