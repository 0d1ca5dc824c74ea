use std::fmt::Display;
use axum::body::Bytes;
use futures_util::{pin_mut, Stream, StreamExt};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};

/// Path an avatar for `member_id` is stored at, e.g. "static/images/7.png".
pub fn member_image_path(images_dir: &str, member_id: i64) -> String {
    format!("{}/{}.png", images_dir.trim_end_matches('/'), member_id)
}

/// Copy an upload byte stream verbatim to the member's avatar path,
/// replacing any previous file. Returns the path written.
///
/// The bytes are not inspected and the member id is not checked against
/// storage.
pub async fn save_member_image<S, E>(
    images_dir: &str,
    member_id: i64,
    chunks: S,
) -> Result<String>
where
    S: Stream<Item = std::result::Result<Bytes, E>>,
    E: Display,
{
    pin_mut!(chunks);

    fs::create_dir_all(images_dir).await.map_err(|e| {
        AppError::Internal(format!("Failed to create images directory: {}", e))
    })?;

    let file_path = member_image_path(images_dir, member_id);

    let mut file = fs::File::create(&file_path).await.map_err(|e| {
        AppError::Internal(format!("Failed to create file: {}", e))
    })?;

    while let Some(chunk) = chunks.next().await {
        let chunk = chunk.map_err(|e| {
            AppError::BadRequest(format!("Failed to read upload: {}", e))
        })?;

        file.write_all(&chunk).await.map_err(|e| {
            AppError::Internal(format!("Failed to write file: {}", e))
        })?;
    }

    file.flush().await.map_err(|e| {
        AppError::Internal(format!("Failed to write file: {}", e))
    })?;

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    #[test]
    fn test_member_image_path() {
        assert_eq!(member_image_path("static/images", 7), "static/images/7.png");
        assert_eq!(member_image_path("static/images/", 7), "static/images/7.png");
    }

    #[tokio::test]
    async fn test_save_member_image_writes_bytes_verbatim() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let images_dir = dir.path().join("nested/images");
        let images_dir = images_dir.to_str().unwrap();

        let chunks = stream::iter(vec![
            Ok::<_, std::io::Error>(Bytes::from_static(b"not really ")),
            Ok(Bytes::from_static(b"a png")),
        ]);
        let path = save_member_image(images_dir, 3, chunks).await?;

        assert_eq!(path, member_image_path(images_dir, 3));
        assert_eq!(tokio::fs::read(&path).await?, b"not really a png");

        // A second upload overwrites the first
        let chunks = stream::iter(vec![Ok::<_, std::io::Error>(Bytes::from_static(b"v2"))]);
        save_member_image(images_dir, 3, chunks).await?;
        assert_eq!(tokio::fs::read(&path).await?, b"v2");

        Ok(())
    }

    #[tokio::test]
    async fn test_save_member_image_stream_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let images_dir = dir.path().to_str().unwrap();

        let chunks = stream::iter(vec![
            Ok(Bytes::from_static(b"partial")),
            Err(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "connection reset")),
        ]);
        let result = save_member_image(images_dir, 1, chunks).await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        Ok(())
    }
}
