//! Shared application state

use std::sync::Arc;

use shorturl_shared::UrlStore;

use crate::{config::Config, dns::HostLookup, validation::UrlValidator};

/// State handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn UrlStore>,
    pub validator: UrlValidator,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn UrlStore>, lookup: Arc<dyn HostLookup>) -> Self {
        Self {
            config: Arc::new(config),
            store,
            validator: UrlValidator::new(lookup),
        }
    }
}
