//! Application state shared by every handler.

use gallery_core::Config;
use gallery_db::{AnalyticsRepository, ImageRepository};
use gallery_storage::Storage;
use std::sync::Arc;

use crate::services::{AnalyticsService, IngestService};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub images: Arc<dyn ImageRepository>,
    pub ingest: IngestService,
    pub analytics: AnalyticsService,
}

impl AppState {
    /// Wire the services around the given store and content directory.
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        images: Arc<dyn ImageRepository>,
        analytics: Arc<dyn AnalyticsRepository>,
    ) -> Arc<Self> {
        let ingest = IngestService::new(storage.clone(), images.clone(), config.max_file_size_bytes);
        let analytics = AnalyticsService::new(analytics, storage.clone());

        Arc::new(Self {
            config,
            storage,
            images,
            ingest,
            analytics,
        })
    }
}
