use std::path::Path;

use anyhow::Result;
use log::info;
use serde::Serialize;

use crate::{
    constants::MAX_URI_LENGTH,
    data::{MetadataDocument, NftDescriptor},
};

pub mod errors;
mod memory;
mod pinata;

pub use errors::UploadError;
pub use memory::MemoryStorage;
pub use pinata::PinataStorage;

/// A content store that hands back a locator for every upload.
pub trait Storage {
    fn upload(&self, file: &StorageFile) -> Result<String, UploadError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl StorageFile {
    pub fn read(path: &Path) -> Result<Self, UploadError> {
        let bytes = std::fs::read(path).map_err(|source| UploadError::ReadImage {
            path: path.to_path_buf(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            content_type: content_type_for(path).to_string(),
            file_name,
            bytes,
        })
    }

    pub fn json<T: Serialize>(file_name: &str, value: &T) -> Result<Self, UploadError> {
        Ok(Self {
            file_name: file_name.to_string(),
            content_type: "application/json".to_string(),
            bytes: serde_json::to_vec(value)?,
        })
    }
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// A validated descriptor with its image already read from disk.
#[derive(Debug, Clone)]
pub struct LoadedAsset {
    pub descriptor: NftDescriptor,
    pub image: StorageFile,
}

impl LoadedAsset {
    pub fn load(descriptor: NftDescriptor, image_dir: &Path) -> Result<Self> {
        descriptor.validate()?;
        let image = StorageFile::read(&image_dir.join(&descriptor.image_file))?;

        Ok(Self { descriptor, image })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMetadata {
    pub image_uri: String,
    pub uri: String,
}

/// Uploads the image, then the JSON document pointing at it.
///
/// Nothing is rolled back if the second upload fails.
pub fn upload_metadata<S: Storage + ?Sized>(
    storage: &S,
    asset: &LoadedAsset,
) -> Result<UploadedMetadata> {
    let image_uri = storage.upload(&asset.image)?;
    if image_uri.is_empty() {
        return Err(UploadError::EmptyLocator(asset.image.file_name.clone()).into());
    }
    info!("Image uri: {}", image_uri);

    let document = MetadataDocument::new(&asset.descriptor, &image_uri);
    let file = StorageFile::json("metadata.json", &document)?;

    let uri = storage.upload(&file)?;
    if uri.is_empty() {
        return Err(UploadError::EmptyLocator(file.file_name).into());
    }
    if uri.len() > MAX_URI_LENGTH {
        return Err(UploadError::LocatorTooLong(uri, MAX_URI_LENGTH).into());
    }
    info!("Metadata uri: {}", uri);

    Ok(UploadedMetadata { image_uri, uri })
}
