use async_trait::async_trait;
use gallery_core::models::{AuthorStats, DatabaseStats, TimelineDay, UsageBucket, UsagePeriod};
use gallery_core::AppError;
use sqlx::{PgPool, Postgres};

/// Default number of days returned by [`AnalyticsRepository::timeline`].
pub const TIMELINE_DAYS: i64 = 30;

/// Trait for analytics repository operations
///
/// All queries are read-only aggregates over the images table.
#[async_trait]
pub trait AnalyticsRepository: Send + Sync {
    async fn database_stats(&self) -> Result<DatabaseStats, AppError>;

    /// Upload counts grouped by `period`, oldest bucket first.
    async fn usage(&self, period: UsagePeriod) -> Result<Vec<UsageBucket>, AppError>;

    /// Per-author totals for records with a non-empty author, busiest first.
    async fn author_stats(&self) -> Result<Vec<AuthorStats>, AppError>;

    /// Up to `limit` most recent days with uploads, newest first.
    async fn timeline(&self, limit: i64) -> Result<Vec<TimelineDay>, AppError>;
}

/// Bucket label expression for a usage period. Timestamps are bucketed in UTC.
fn usage_bucket_expr(period: UsagePeriod) -> &'static str {
    match period {
        UsagePeriod::Hourly => {
            "to_char(date_trunc('hour', created_at AT TIME ZONE 'UTC'), 'YYYY-MM-DD HH24:00:00')"
        }
        UsagePeriod::Daily => "to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD')",
        UsagePeriod::Weekly => "to_char(created_at AT TIME ZONE 'UTC', 'IYYY-\"W\"IW')",
        UsagePeriod::Monthly => "to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM')",
    }
}

#[derive(Clone)]
pub struct PgAnalyticsRepository {
    pool: PgPool,
}

impl PgAnalyticsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalyticsRepository for PgAnalyticsRepository {
    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "aggregate"))]
    async fn database_stats(&self) -> Result<DatabaseStats, AppError> {
        let stats = sqlx::query_as::<Postgres, DatabaseStats>(
            r#"
            SELECT
                COUNT(*) AS total_images,
                COALESCE(AVG(CHAR_LENGTH(name)), 0)::DOUBLE PRECISION AS avg_name_length,
                COALESCE(AVG(CHAR_LENGTH(description)), 0)::DOUBLE PRECISION AS avg_description_length,
                COUNT(DISTINCT author) AS unique_authors,
                MIN(created_at) AS oldest_image,
                MAX(created_at) AS newest_image
            FROM images
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(stats)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "aggregate", period = period.as_str()))]
    async fn usage(&self, period: UsagePeriod) -> Result<Vec<UsageBucket>, AppError> {
        let sql = format!(
            r#"
            SELECT
                {bucket} AS time_period,
                COUNT(*) AS uploads_count,
                COUNT(DISTINCT author) AS unique_authors
            FROM images
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
            bucket = usage_bucket_expr(period)
        );

        let buckets = sqlx::query_as::<Postgres, UsageBucket>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(buckets)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "aggregate"))]
    async fn author_stats(&self) -> Result<Vec<AuthorStats>, AppError> {
        let authors = sqlx::query_as::<Postgres, AuthorStats>(
            r#"
            SELECT
                author,
                COUNT(*) AS images_count,
                COALESCE(AVG(CHAR_LENGTH(description)), 0)::DOUBLE PRECISION AS avg_description_length,
                MIN(created_at) AS first_upload,
                MAX(created_at) AS last_upload
            FROM images
            WHERE author <> ''
            GROUP BY author
            ORDER BY images_count DESC, author ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "aggregate"))]
    async fn timeline(&self, limit: i64) -> Result<Vec<TimelineDay>, AppError> {
        let days = sqlx::query_as::<Postgres, TimelineDay>(
            r#"
            SELECT
                (created_at AT TIME ZONE 'UTC')::DATE AS date,
                COUNT(*) AS uploads,
                COALESCE(STRING_AGG(DISTINCT NULLIF(author, ''), ', '), '') AS authors,
                COALESCE(STRING_AGG(name, ', ' ORDER BY name), '') AS image_names
            FROM images
            GROUP BY 1
            ORDER BY 1 DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(days)
    }
}
