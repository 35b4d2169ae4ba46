use std::sync::Arc;

use crate::application::ports::{MediaConverter, TranscriptionClient};
use crate::application::services::TranscriptionPipeline;
use crate::infrastructure::storage::MediaLibrary;
use crate::presentation::auth::TokenStore;
use crate::presentation::config::Settings;

pub struct AppState<C, T>
where
    C: MediaConverter,
    T: TranscriptionClient,
{
    pub pipeline: Arc<TranscriptionPipeline<C, T>>,
    pub library: Arc<MediaLibrary>,
    pub token_store: Arc<TokenStore>,
    pub settings: Settings,
}

impl<C, T> Clone for AppState<C, T>
where
    C: MediaConverter,
    T: TranscriptionClient,
{
    fn clone(&self) -> Self {
        Self {
            pipeline: Arc::clone(&self.pipeline),
            library: Arc::clone(&self.library),
            token_store: Arc::clone(&self.token_store),
            settings: self.settings.clone(),
        }
    }
}
