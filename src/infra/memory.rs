use std::sync::Mutex;

use crate::usecase::ports::session::{SessionStore, SessionStoreError};

/// Process-lifetime token store, used when no data directory is available.
#[derive(Default)]
pub struct MemorySessionStore {
    token: Mutex<Option<String>>,
}

impl MemorySessionStore {
    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>, SessionStoreError> {
        self.token
            .lock()
            .map_err(|_| SessionStoreError::Message("session lock poisoned".to_string()))
    }
}

impl SessionStore for MemorySessionStore {
    fn load_token(&self) -> Result<Option<String>, SessionStoreError> {
        Ok(self.slot()?.clone())
    }

    fn save_token(&self, token: &str) -> Result<(), SessionStoreError> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear_token(&self) -> Result<(), SessionStoreError> {
        *self.slot()? = None;
        Ok(())
    }
}
