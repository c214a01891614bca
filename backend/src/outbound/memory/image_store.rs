//! In-memory image binary store.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::catalog::StoredImage;
use crate::domain::ports::{ImageStore, ImageStoreError};

/// Image store holding binaries in process memory.
///
/// Handles look like `img_<uuid>` and URLs are served under a `memory://`
/// scheme, keeping test assertions honest about what is a handle and what
/// is a URL.
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStore {
    binaries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl InMemoryImageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>, ImageStoreError> {
        self.binaries
            .lock()
            .map_err(|_| ImageStoreError::backend("image store mutex poisoned"))
    }

    /// Whether a binary is currently stored under `image_id`.
    #[must_use]
    pub fn contains(&self, image_id: &str) -> bool {
        self.binaries
            .lock()
            .map(|binaries| binaries.contains_key(image_id))
            .unwrap_or(false)
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn save(&self, bytes: &[u8]) -> Result<StoredImage, ImageStoreError> {
        if bytes.is_empty() {
            return Err(ImageStoreError::rejected("empty payload"));
        }
        let mut binaries = self.lock()?;
        let image_id = format!("img_{}", Uuid::new_v4());
        binaries.insert(image_id.clone(), bytes.to_vec());
        Ok(StoredImage {
            url: format!("memory://{image_id}"),
            image_id,
        })
    }

    async fn delete(&self, image_id: &str) -> Result<(), ImageStoreError> {
        let mut binaries = self.lock()?;
        // Already-gone is success: detach retries delete blindly.
        binaries.remove(image_id);
        Ok(())
    }
}
