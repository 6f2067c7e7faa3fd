use gallery_core::models::{
    AnalyticsSummary, AuthorStats, GalleryStats, StorageStats, TimelineDay, UsageBucket,
    UsagePeriod,
};
use gallery_core::AppError;
use gallery_db::{AnalyticsRepository, TIMELINE_DAYS};
use gallery_storage::Storage;
use std::sync::Arc;

/// Read-only analytics over the record store and the content directory.
#[derive(Clone)]
pub struct AnalyticsService {
    repo: Arc<dyn AnalyticsRepository>,
    storage: Arc<dyn Storage>,
}

impl AnalyticsService {
    pub fn new(repo: Arc<dyn AnalyticsRepository>, storage: Arc<dyn Storage>) -> Self {
        Self { repo, storage }
    }

    /// Content directory totals. A directory that cannot be read reports zeros.
    pub async fn storage_stats(&self) -> StorageStats {
        match self.storage.usage().await {
            Ok(usage) => StorageStats::new(usage.file_count, usage.total_bytes),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read storage usage");
                StorageStats::default()
            }
        }
    }

    pub async fn summary(&self) -> Result<AnalyticsSummary, AppError> {
        let (database, authors) =
            tokio::try_join!(self.repo.database_stats(), self.repo.author_stats())?;
        let storage = self.storage_stats().await;

        Ok(AnalyticsSummary::build(database, storage, authors))
    }

    pub async fn stats(&self) -> Result<GalleryStats, AppError> {
        let database = self.repo.database_stats().await?;
        let storage = self.storage_stats().await;
        Ok(GalleryStats { database, storage })
    }

    pub async fn usage(&self, period: UsagePeriod) -> Result<Vec<UsageBucket>, AppError> {
        self.repo.usage(period).await
    }

    pub async fn authors(&self) -> Result<Vec<AuthorStats>, AppError> {
        self.repo.author_stats().await
    }

    pub async fn timeline(&self) -> Result<Vec<TimelineDay>, AppError> {
        self.repo.timeline(TIMELINE_DAYS).await
    }
}
