//! Partner logo uploads to public object storage.

use kontrola_core::upload::{logo_object_path, DEFAULT_CONTENT_TYPE, LOGO_BUCKET};

use super::write_failed;
use crate::store::{Store, WriteError};

/// Stores partner logos and hands back their public URLs.
pub struct LogoRepo;

impl LogoRepo {
    /// Upload an already decoded and size-checked logo.
    ///
    /// Creates the public `partners` bucket on first use. Returns the
    /// public URL of the stored object.
    pub async fn upload(
        store: &Store,
        file_name: &str,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Result<String, WriteError> {
        let objects = store.object_writer()?;

        if let Err(e) = objects.ensure_bucket(LOGO_BUCKET).await {
            tracing::warn!(bucket = LOGO_BUCKET, error = %e, "Could not ensure logo bucket");
        }

        let path = logo_object_path(chrono::Utc::now().timestamp_millis(), file_name);
        let content_type = content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or(DEFAULT_CONTENT_TYPE);

        objects
            .upload(LOGO_BUCKET, &path, bytes, content_type)
            .await
            .map_err(|e| write_failed("storage.objects", "upload", e))?;

        tracing::info!(bucket = LOGO_BUCKET, %path, "Partner logo uploaded");
        Ok(objects.public_url(LOGO_BUCKET, &path))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::memory::MemoryStore;

    #[tokio::test]
    async fn upload_creates_bucket_and_returns_public_url() {
        let memory = Arc::new(MemoryStore::new());
        let store = Store::new(memory.clone(), true).with_objects(memory.clone());

        let url = LogoRepo::upload(&store, "my logo.png", Some("image/png"), vec![1, 2, 3])
            .await
            .unwrap();

        assert!(memory.has_bucket(LOGO_BUCKET));
        let path = url.strip_prefix("memory://partners/").unwrap();
        assert!(path.ends_with("_my_logo.png"));
        let object = memory.object(LOGO_BUCKET, path).unwrap();
        assert_eq!(object.bytes, vec![1, 2, 3]);
        assert_eq!(object.content_type, "image/png");
    }

    #[tokio::test]
    async fn missing_content_type_falls_back() {
        let memory = Arc::new(MemoryStore::new());
        let store = Store::new(memory.clone(), true).with_objects(memory.clone());

        let url = LogoRepo::upload(&store, "a.bin", None, vec![0]).await.unwrap();
        let path = url.strip_prefix("memory://partners/").unwrap();
        assert_eq!(
            memory.object(LOGO_BUCKET, path).unwrap().content_type,
            DEFAULT_CONTENT_TYPE
        );
    }

    #[tokio::test]
    async fn upload_requires_service_role() {
        let memory = Arc::new(MemoryStore::new());
        let store = Store::new(memory.clone(), false).with_objects(memory);
        let err = LogoRepo::upload(&store, "a.png", None, vec![0]).await.unwrap_err();
        assert_eq!(err, WriteError::MissingServiceRole);
    }
}
