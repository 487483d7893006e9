//! Shared handler state.

use std::sync::Arc;
use std::time::Instant;

use tienda_auth::{AccountService, TokenIssuer};
use tienda_core::Store;

/// State shared by every request handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    /// Users, catalogue and orders
    pub store: Arc<Store>,
    /// Login accounts
    pub accounts: Arc<AccountService>,
    /// Access-token signer/verifier
    pub tokens: Arc<TokenIssuer>,
    started_at: Instant,
}

impl AppState {
    /// Fresh state with an empty store and account registry.
    pub fn new(tokens: TokenIssuer) -> Self {
        Self::with_parts(Store::new(), AccountService::new(), tokens)
    }

    /// State assembled from existing components.
    pub fn with_parts(store: Store, accounts: AccountService, tokens: TokenIssuer) -> Self {
        Self {
            store: Arc::new(store),
            accounts: Arc::new(accounts),
            tokens: Arc::new(tokens),
            started_at: Instant::now(),
        }
    }

    /// Seconds since this state was created.
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
