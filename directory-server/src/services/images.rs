//! Profile image storage
//!
//! Uploaded images are validated, re-encoded to JPEG and stored under a
//! content hash, so identical uploads share one file.

use sha2::{Digest, Sha256};
use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Supported image formats
pub const SUPPORTED_FORMATS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Public URL prefix of stored images
pub const PUBLIC_PREFIX: &str = "/uploads";

/// JPEG quality for stored images
const JPEG_QUALITY: u8 = 85;

/// An image file received with a request
#[derive(Debug, Clone)]
pub struct ImageUpload {
    /// Client-side file name (used for the extension check)
    pub file_name: Option<String>,
    pub data: Vec<u8>,
}

/// Content-addressed image directory
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Validate, compress and store an upload
    ///
    /// Returns the public path (`/uploads/<sha256>.jpg`) to record on the
    /// employee.
    pub async fn save(&self, upload: ImageUpload) -> AppResult<String> {
        let ext = upload
            .file_name
            .as_deref()
            .and_then(|name| Path::new(name).extension())
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_string();

        let original_size = upload.data.len();
        let compressed = tokio::task::spawn_blocking(move || {
            validate_image(&upload.data, &ext)?;
            process_and_compress_image(&upload.data)
        })
        .await
        .map_err(|e| AppError::internal(format!("Image processing task failed: {}", e)))??;

        let file_hash = calculate_hash(&compressed);
        let filename = format!("{}.jpg", file_hash);
        let file_path = self.dir.join(&filename);

        if tokio::fs::try_exists(&file_path).await.unwrap_or(false) {
            tracing::info!(file = %filename, "Duplicate image detected, reusing existing file");
        } else {
            tokio::fs::create_dir_all(&self.dir)
                .await
                .map_err(|e| AppError::internal(format!("Failed to create uploads directory: {}", e)))?;
            tokio::fs::write(&file_path, &compressed)
                .await
                .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;
            tracing::info!(
                file = %filename,
                original_size,
                stored_size = compressed.len(),
                "Image stored"
            );
        }

        Ok(format!("{}/{}", PUBLIC_PREFIX, filename))
    }

    /// Resolve a requested file name inside the store
    ///
    /// Rejects anything that could leave the directory.
    pub fn resolve(&self, filename: &str) -> AppResult<PathBuf> {
        if filename.is_empty()
            || filename.contains("..")
            || filename.contains('/')
            || filename.contains('\\')
        {
            return Err(AppError::invalid_request("Invalid filename"));
        }
        Ok(self.dir.join(filename))
    }
}

/// Calculate SHA256 hash of data
fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Validate image file
fn validate_image(data: &[u8], ext: &str) -> AppResult<()> {
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided").with_detail("field", "profile_image"));
    }

    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {} bytes ({}MB)",
            MAX_FILE_SIZE,
            MAX_FILE_SIZE / 1024 / 1024
        ))
        .with_detail("field", "profile_image"));
    }

    let ext_lower = ext.to_lowercase();
    if !SUPPORTED_FORMATS.contains(&ext_lower.as_str()) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext_lower,
            SUPPORTED_FORMATS.join(", ")
        ))
        .with_detail("field", "profile_image"));
    }

    Ok(())
}

/// Decode and re-encode as JPEG
fn process_and_compress_image(data: &[u8]) -> AppResult<Vec<u8>> {
    let img = image::load_from_memory(data).map_err(|e| {
        AppError::validation(format!("Invalid image file: {}", e)).with_detail("field", "profile_image")
    })?;

    let mut buffer = Vec::new();
    {
        let mut cursor = Cursor::new(&mut buffer);
        let rgb_img = img.to_rgb8();
        let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        rgb_img
            .write_with_encoder(encoder)
            .map_err(|e| AppError::internal(format!("Failed to compress image: {}", e)))?;
    }

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ErrorCode;

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([200, 10, 10]));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), image::ImageFormat::Png)
            .unwrap();
        buffer
    }

    #[tokio::test]
    async fn test_save_reencodes_and_dedups() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());

        let upload = ImageUpload {
            file_name: Some("avatar.PNG".to_string()),
            data: png_bytes(),
        };
        let first = store.save(upload.clone()).await.unwrap();
        let second = store.save(upload).await.unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("/uploads/"));
        assert!(first.ends_with(".jpg"));

        let filename = first.trim_start_matches("/uploads/");
        let stored = std::fs::read(tmp.path().join(filename)).unwrap();
        assert_eq!(image::guess_format(&stored).unwrap(), image::ImageFormat::Jpeg);
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_rejects_unsupported_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());
        let err = store
            .save(ImageUpload {
                file_name: Some("avatar.bmp".to_string()),
                data: png_bytes(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn test_rejects_non_image_content() {
        let tmp = tempfile::tempdir().unwrap();
        let store = ImageStore::new(tmp.path());
        let err = store
            .save(ImageUpload {
                file_name: Some("avatar.png".to_string()),
                data: b"definitely not a png".to_vec(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_rejects_oversized_file() {
        let data = vec![0u8; MAX_FILE_SIZE + 1];
        let err = validate_image(&data, "png").unwrap_err();
        assert!(err.message.starts_with("File too large"));
    }

    #[test]
    fn test_resolve_rejects_traversal() {
        let store = ImageStore::new("/srv/uploads");
        assert!(store.resolve("../secret").is_err());
        assert!(store.resolve("a/b.jpg").is_err());
        assert!(store.resolve("a\\b.jpg").is_err());
        assert!(store.resolve("").is_err());
        assert_eq!(
            store.resolve("abc.jpg").unwrap(),
            PathBuf::from("/srv/uploads/abc.jpg")
        );
    }
}
