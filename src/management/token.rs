use std::sync::{Arc, RwLock};

/// Process-wide slot for the current access token.
///
/// Cloning a `TokenStore` hands out another handle to the same slot. The
/// callback listener is the single writer; the session loop and every API call
/// read from it. Reads never wait on network I/O: the lock is only held for the
/// duration of a clone or an assignment.
///
/// Once a token has been stored the slot is never emptied again, so
/// [`TokenStore::is_ready`] stays `true` for the rest of the process.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    /// Creates an empty store. Nothing is ready until [`TokenStore::set`] runs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `token`, replacing any previous value.
    pub fn set(&self, token: impl Into<String>) {
        let mut slot = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(token.into());
    }

    /// Returns the current token without waiting.
    ///
    /// # Returns
    ///
    /// - `Some(token)` once a token has been stored, the latest one if `set`
    ///   ran more than once
    /// - `None` while the login has not completed
    pub fn get(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Whether a token has been stored.
    ///
    /// Once this returns `true` it keeps returning `true` for every handle of
    /// this store.
    pub fn is_ready(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Value for an `Authorization` header, once a token is available.
    pub fn bearer_header(&self) -> Option<String> {
        self.get().map(|token| format!("Bearer {}", token))
    }
}
