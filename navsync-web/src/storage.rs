use navsync_core::error::{NavsyncError, Result};
use navsync_core::PreferenceStore;

use crate::dom::{js_error_message, local_storage};

/// [`PreferenceStore`] backed by `window.localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStore;

impl PreferenceStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        local_storage()
            .and_then(|storage| storage.get_item(key))
            .map_err(|e| NavsyncError::Storage(js_error_message(&e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        local_storage()
            .and_then(|storage| storage.set_item(key, value))
            .map_err(|e| NavsyncError::Storage(js_error_message(&e)))
    }
}
