//! Cached classifier id with explicit invalidation

use qa_domain::ClassifierId;
use tokio::sync::RwLock;

/// Holds the classifier id once it is known.
///
/// Unresolved until [`set`](Self::set) is called; stays resolved until
/// [`reset`](Self::reset). Failed resolutions are never stored, so the next
/// caller retries. Concurrent setters race and the last write wins.
#[derive(Debug, Default)]
pub struct ClassifierIdCache {
    inner: RwLock<Option<ClassifierId>>,
}

impl ClassifierIdCache {
    pub fn new(initial: Option<ClassifierId>) -> Self {
        Self {
            inner: RwLock::new(initial),
        }
    }

    pub async fn get(&self) -> Option<ClassifierId> {
        self.inner.read().await.clone()
    }

    pub async fn set(&self, id: ClassifierId) {
        *self.inner.write().await = Some(id);
    }

    /// Forget the cached id; returns the id that was cached.
    pub async fn reset(&self) -> Option<ClassifierId> {
        self.inner.write().await.take()
    }
}
