//! Gallery service - append, list and delete on the gallery sorted set

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::gallery::{decode_image_base64, validate_prompt, GalleryConfig};
use crate::domain::{DomainError, GalleryItem, KeyValueStore, StoredEntry};

/// Gallery service over a sorted set scored by insertion time
#[derive(Debug, Clone)]
pub struct GalleryService {
    store: Arc<dyn KeyValueStore>,
    config: GalleryConfig,
    remote_configured: bool,
}

impl GalleryService {
    pub fn new(store: Arc<dyn KeyValueStore>, config: GalleryConfig) -> Self {
        Self {
            store,
            config,
            remote_configured: true,
        }
    }

    /// Records whether the store runs on real remote credentials
    pub fn with_remote_configured(mut self, configured: bool) -> Self {
        self.remote_configured = configured;
        self
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Archive a new image, stamped with the current time
    pub async fn append(
        &self,
        prompt: &str,
        image_base64: &str,
    ) -> Result<GalleryItem, DomainError> {
        let item = GalleryItem::new(prompt, image_base64, Utc::now());
        self.append_item(item).await
    }

    /// Archive an item using its `created_at` as the recency score
    pub async fn append_item(&self, item: GalleryItem) -> Result<GalleryItem, DomainError> {
        validate_prompt(&item.prompt)?;
        decode_image_base64(&item.image_base64)?;

        let member = item.to_member()?;
        self.store
            .append(&self.config.set_key, item.score(), &member)
            .await?;

        info!(
            set_key = %self.config.set_key,
            score = item.score(),
            "Gallery item added"
        );

        Ok(item)
    }

    /// List the configured number of latest items, most recent first
    pub async fn list(&self) -> Result<Vec<GalleryItem>, DomainError> {
        if !self.remote_configured && self.config.empty_when_unconfigured {
            debug!("Gallery store not configured, returning empty listing");
            return Ok(Vec::new());
        }

        self.list_latest(self.config.list_limit).await
    }

    /// List up to `count` items, most recent first.
    ///
    /// Entries that fail to normalize are skipped.
    pub async fn list_latest(&self, count: usize) -> Result<Vec<GalleryItem>, DomainError> {
        let members = self
            .store
            .range_latest(&self.config.set_key, count)
            .await?;

        Ok(members
            .iter()
            .filter_map(|raw| match StoredEntry::parse(raw) {
                Ok(entry) => Some(entry.item),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable gallery entry");
                    None
                }
            })
            .collect())
    }

    /// Remove the first item whose image content equals `image_base64`.
    ///
    /// Scans the whole set, not just the latest page, and removes by the
    /// exact stored string.
    pub async fn delete_by_image_content(&self, image_base64: &str) -> Result<(), DomainError> {
        if image_base64.trim().is_empty() {
            return Err(DomainError::validation("Missing imageBase64"));
        }

        let members = self.store.range_all(&self.config.set_key).await?;

        let matched = members.iter().find_map(|raw| match StoredEntry::parse(raw) {
            Ok(entry) if entry.item.image_base64 == image_base64 => Some(entry),
            Ok(_) => None,
            Err(e) => {
                warn!(error = %e, "Skipping unreadable gallery entry during deletion");
                None
            }
        });

        let Some(entry) = matched else {
            return Err(DomainError::not_found("Image not found in gallery"));
        };

        // A concurrent delete may have removed the member since the scan
        if !self.store.remove(&self.config.set_key, &entry.raw).await? {
            return Err(DomainError::not_found("Image not found in gallery"));
        }

        info!(set_key = %self.config.set_key, "Gallery item removed");
        Ok(())
    }
}
