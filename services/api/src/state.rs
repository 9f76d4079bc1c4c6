//! Application state shared across handlers

use std::sync::Arc;

use crate::media::MediaUploader;
use crate::repositories::UserStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub user_store: Arc<dyn UserStore>,
    pub media: MediaUploader,
}
