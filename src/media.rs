//! Media Sideload: stores uploaded photos on disk under generated names and
//! hands back the relative path the static file layer serves them from.

use std::path::Path;

use rand::Rng;

use crate::errors::{AppError, AppResult};

/// Builds a collision-resistant file name from the current time and a random
/// suffix, preserving the original extension when there is one.
fn generate_name(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);

    match Path::new(original_name).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{millis}-{suffix:09}.{ext}"),
        None => format!("{millis}-{suffix:09}"),
    }
}

/// Writes the uploaded bytes under `upload_dir` and returns the relative
/// retrieval path (`/uploads/<name>`).
pub async fn store_upload(
    upload_dir: &str,
    original_name: &str,
    data: &[u8],
) -> AppResult<String> {
    let name = generate_name(original_name);

    tokio::fs::create_dir_all(upload_dir)
        .await
        .map_err(|e| AppError::Upload(format!("cannot create upload dir: {e}")))?;

    let dest = Path::new(upload_dir).join(&name);
    tokio::fs::write(&dest, data)
        .await
        .map_err(|e| AppError::Upload(format!("cannot write {}: {e}", dest.display())))?;

    tracing::debug!(file = %dest.display(), bytes = data.len(), "photo stored");

    Ok(format!("/uploads/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_preserves_extension() {
        let name = generate_name("dog.jpeg");
        assert!(name.ends_with(".jpeg"));
    }

    #[test]
    fn name_without_extension_stays_bare() {
        let name = generate_name("photo");
        assert!(!name.contains('.'));
    }

    #[test]
    fn names_do_not_collide() {
        let a = generate_name("x.png");
        let b = generate_name("x.png");
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn stores_bytes_and_returns_uploads_path() {
        let dir = std::env::temp_dir().join(format!(
            "rescue-media-test-{}-{}",
            std::process::id(),
            rand::thread_rng().gen::<u32>()
        ));
        let dir = dir.to_str().unwrap().to_string();

        let path = store_upload(&dir, "cat.png", b"not really a png")
            .await
            .unwrap();
        assert!(path.starts_with("/uploads/"));
        assert!(path.ends_with(".png"));

        let name = path.strip_prefix("/uploads/").unwrap();
        let stored = tokio::fs::read(Path::new(&dir).join(name)).await.unwrap();
        assert_eq!(stored, b"not really a png");

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }
}
