//! Page-lifetime CSRF token cache. The token is fetched at most once and
//! reused for every state-changing call; `reset` (invoked on logout) is the
//! only teardown. A failed fetch degrades to "proceed without the header"
//! so it can never block a user flow.

use std::sync::{Arc, Mutex};

use super::client;

#[derive(Clone, Debug, Default)]
pub struct CsrfCache {
    token: Arc<Mutex<Option<String>>>,
}

impl CsrfCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cached(&self) -> Option<String> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    /// Cached token, or one fetch attempt with the short CSRF deadline.
    pub async fn get_or_fetch(&self) -> Option<String> {
        if let Some(token) = self.cached() {
            return Some(token);
        }
        match client::fetch_csrf_token().await {
            Ok(token) if !token.is_empty() => {
                self.store(Some(token.clone()));
                Some(token)
            }
            Ok(_) => None,
            Err(err) => {
                log::warn!("CSRF token fetch failed, continuing without it: {err}");
                None
            }
        }
    }

    pub fn reset(&self) {
        self.store(None);
    }

    fn store(&self, value: Option<String>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::CsrfCache;

    #[test]
    fn cached_token_is_reused_without_fetching() {
        let cache = CsrfCache::new();
        cache.store(Some("csrf-1".to_string()));

        assert_eq!(block_on(cache.get_or_fetch()), Some("csrf-1".to_string()));
        assert_eq!(cache.cached(), Some("csrf-1".to_string()));
    }

    #[test]
    fn reset_clears_the_cache() {
        let cache = CsrfCache::new();
        cache.store(Some("csrf-1".to_string()));

        cache.reset();
        assert_eq!(cache.cached(), None);
    }

    #[test]
    fn clones_share_one_cache() {
        let cache = CsrfCache::new();
        let clone = cache.clone();
        cache.store(Some("csrf-1".to_string()));

        assert_eq!(clone.cached(), Some("csrf-1".to_string()));
        clone.reset();
        assert_eq!(cache.cached(), None);
    }

    #[test]
    fn fetch_failure_degrades_to_none() {
        // Native builds have no transport, so the fetch path fails and the
        // cache must stay empty instead of erroring.
        let cache = CsrfCache::new();
        assert_eq!(block_on(cache.get_or_fetch()), None);
        assert_eq!(cache.cached(), None);
    }
}
