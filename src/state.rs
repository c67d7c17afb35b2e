use std::sync::Arc;

use crate::config::SigningSecret;
use crate::store::Store;

/// Shared, read-only handles every handler needs. Registered once through
/// `web::Data`.
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub secret: SigningSecret,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, secret: SigningSecret) -> Self {
        Self { store, secret }
    }
}
