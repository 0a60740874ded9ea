//! Memoized bundle loading
//!
//! The first caller loads the bundle while holding the slot lock; callers
//! arriving meanwhile block on the lock and then share the loaded `Arc`.
//! A failed load leaves the slot empty so a later call can retry.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::bundle::ModelBundle;
use crate::error::{AdvisorError, Result};

pub struct BundleCache {
    path: PathBuf,
    slot: Mutex<Option<Arc<ModelBundle>>>,
}

impl BundleCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            slot: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Shared bundle, loading it from disk on first use
    pub fn get_or_load(&self) -> Result<Arc<ModelBundle>> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| AdvisorError::model("bundle cache lock poisoned"))?;

        if let Some(bundle) = slot.as_ref() {
            return Ok(Arc::clone(bundle));
        }

        tracing::info!("Loading classifier bundle from {:?}", self.path);
        let bundle = Arc::new(ModelBundle::load(&self.path)?);
        *slot = Some(Arc::clone(&bundle));
        Ok(bundle)
    }

    pub fn is_loaded(&self) -> bool {
        self.slot.lock().map(|s| s.is_some()).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_not_cached() {
        let cache = BundleCache::new("/nonexistent/npk_model.json");
        assert_eq!(cache.path(), Path::new("/nonexistent/npk_model.json"));
        assert!(matches!(cache.get_or_load(), Err(AdvisorError::ModelUnavailable(_))));
        assert!(!cache.is_loaded());
    }
}
