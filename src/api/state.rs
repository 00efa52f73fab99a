use std::sync::Arc;

use tokio::sync::Mutex;

use crate::services::controller::Controller;

/// Shared application state
///
/// Every handler locks the controller for the whole operation, searches
/// included, so overlapping requests are applied one after another.
#[derive(Clone)]
pub struct AppState {
    pub inner: Arc<Mutex<Controller>>,
    /// Base URL of the public catalog site, used for outbound game links
    pub site_url: Arc<str>,
}

impl AppState {
    pub fn new(controller: Controller, site_url: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
            site_url: Arc::from(site_url),
        }
    }
}
