use std::sync::{Arc, RwLock};

use crate::domain::claims::{decode_claims, token_is_expired, TokenClaims};
use crate::usecase::ports::session::{SessionStore, SessionStoreError, TokenSource};

/// The one place the auth token lives. Pages and the route guard read it
/// through this handle instead of touching storage directly.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn SessionStore>,
    token: Arc<RwLock<Option<String>>>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let token = match store.load_token() {
            Ok(token) => token,
            Err(err) => {
                log::warn!("could not restore saved session: {err}");
                None
            }
        };
        Self {
            store,
            token: Arc::new(RwLock::new(token)),
        }
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replaces the token in memory, then persists it. The in-memory value
    /// is kept even when persisting fails.
    pub fn set_token(&self, token: &str) -> Result<(), SessionStoreError> {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(token.to_string());
        self.store.save_token(token)
    }

    pub fn clear_token(&self) {
        *self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
        if let Err(err) = self.store.clear_token() {
            log::warn!("could not clear saved session: {err}");
        }
    }

    pub fn claims(&self) -> Option<TokenClaims> {
        self.token().and_then(|token| decode_claims(&token).ok())
    }

    pub fn user_id(&self) -> Option<String> {
        self.claims().and_then(|claims| claims.user_id)
    }

    /// Missing and undecodable tokens count as expired.
    pub fn is_expired_at(&self, now_epoch_secs: i64) -> bool {
        match self.token() {
            Some(token) => token_is_expired(&token, now_epoch_secs),
            None => true,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(chrono::Utc::now().timestamp())
    }
}

impl TokenSource for SessionContext {
    fn bearer_token(&self) -> Option<String> {
        self.token()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::claims::encode_test_token;
    use crate::infra::memory::MemorySessionStore;

    #[test]
    fn starts_signed_out_and_expired() {
        let session = SessionContext::new(Arc::new(MemorySessionStore::default()));
        assert_eq!(session.token(), None);
        assert!(session.is_expired_at(0));
    }

    #[test]
    fn set_token_exposes_claims_until_expiry() {
        let session = SessionContext::new(Arc::new(MemorySessionStore::default()));
        let token = encode_test_token(r#"{"id":"admin-1","exp":1000}"#);

        session.set_token(&token).expect("memory store should accept token");

        assert_eq!(session.user_id().as_deref(), Some("admin-1"));
        assert!(!session.is_expired_at(999));
        assert!(session.is_expired_at(1000));
    }

    #[test]
    fn clear_token_signs_out_every_clone() {
        let session = SessionContext::new(Arc::new(MemorySessionStore::default()));
        let other_page = session.clone();
        session
            .set_token(&encode_test_token(r#"{"exp":4102444800}"#))
            .expect("memory store should accept token");

        other_page.clear_token();

        assert_eq!(session.token(), None);
        assert_eq!(session.bearer_token(), None);
    }

    #[test]
    fn restores_token_from_store() {
        let store = Arc::new(MemorySessionStore::default());
        store.save_token("a.b.c").expect("save");

        let session = SessionContext::new(store);
        assert_eq!(session.token().as_deref(), Some("a.b.c"));
        assert!(session.is_expired_at(0), "garbage payload counts as expired");
    }
}
