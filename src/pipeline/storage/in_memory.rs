use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::debug;

use crate::app::ports::StoragePort;
use crate::domain::CanonicalRecord;
use crate::error::Result;

/// In-memory storage implementation for development/testing.
///
/// Implements the storage collaborator's insert-or-refresh-counters contract:
/// on key conflict only `likes`, `comments`, and `scraped_at` are updated.
pub struct InMemoryStore {
    posts: Arc<Mutex<HashMap<(String, String), CanonicalRecord>>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a stored record by its uniqueness key.
    pub fn get(&self, post_id: &str, platform: &str) -> Option<CanonicalRecord> {
        self.posts
            .lock()
            .unwrap()
            .get(&(post_id.to_string(), platform.to_string()))
            .cloned()
    }
}

#[async_trait]
impl StoragePort for InMemoryStore {
    async fn upsert_batch(&self, records: &[CanonicalRecord]) -> Result<usize> {
        let mut posts = self.posts.lock().unwrap();
        for record in records {
            match posts.get_mut(&record.key()) {
                Some(existing) => {
                    // Only the mutable engagement counters refresh; the rest
                    // of the record is immutable once first inserted.
                    existing.likes = record.likes;
                    existing.comments = record.comments;
                    existing.scraped_at = record.scraped_at.clone();
                    debug!(post_id = %record.post_id, "refreshed counters");
                }
                None => {
                    debug!(post_id = %record.post_id, platform = %record.platform, "inserted record");
                    posts.insert(record.key(), record.clone());
                }
            }
        }
        Ok(records.len())
    }

    async fn exists(&self, post_id: &str, platform: &str) -> Result<bool> {
        let posts = self.posts.lock().unwrap();
        Ok(posts.contains_key(&(post_id.to_string(), platform.to_string())))
    }
}
