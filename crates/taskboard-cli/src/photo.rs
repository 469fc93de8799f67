/*
[INPUT]:  Image file path chosen by the worker
[OUTPUT]: PhotoData data URI ready to attach on approval
[POS]:    CLI photo input - the only asynchronous read before a status update
[UPDATE]: When accepted image types change
*/

use anyhow::{Context, Result};
use std::path::Path;

use taskboard_core::PhotoData;

/// MIME type for image file extensions accepted as photos
pub fn image_mime(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => return None,
    };
    Some(mime)
}

/// Read an image file and encode it as a data URI
pub async fn read_photo(path: &Path) -> Result<PhotoData> {
    let mime = image_mime(path)
        .with_context(|| format!("{} is not a supported image file", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("read photo {}", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), mime, "photo read");
    Ok(PhotoData::from_image_bytes(mime, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_image_mime_by_extension() {
        assert_eq!(image_mime(Path::new("shot.PNG")), Some("image/png"));
        assert_eq!(image_mime(Path::new("a/b/c.jpeg")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("notes.txt")), None);
        assert_eq!(image_mime(Path::new("no_extension")), None);
    }

    #[tokio::test]
    async fn test_read_photo_builds_data_uri() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("receipt.png");
        std::fs::write(&path, [0u8, 0, 0]).unwrap();

        let photo = read_photo(&path).await.unwrap();
        assert_eq!(photo.as_str(), "data:image/png;base64,AAAA");
    }

    #[tokio::test]
    async fn test_read_photo_rejects_non_images() {
        let tmp_dir = TempDir::new().unwrap();
        let path = tmp_dir.path().join("notes.txt");
        std::fs::write(&path, "hello").unwrap();

        let err = read_photo(&path).await.unwrap_err();
        assert!(err.to_string().contains("not a supported image file"));
    }
}
