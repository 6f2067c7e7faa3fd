use async_trait::async_trait;
use gallery_core::models::{ImageRecord, NewImage};
use gallery_core::AppError;
use sqlx::{PgPool, Postgres};

/// Persistence for image records.
#[async_trait]
pub trait ImageRepository: Send + Sync {
    /// Insert a record and return it with its assigned `id` and `created_at`.
    async fn insert(&self, image: NewImage) -> Result<ImageRecord, AppError>;

    /// All records, most recently created first.
    async fn list_newest_first(&self) -> Result<Vec<ImageRecord>, AppError>;

    /// Round-trip to the store, used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

#[derive(Clone)]
pub struct PgImageRepository {
    pool: PgPool,
}

impl PgImageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ImageRepository for PgImageRepository {
    #[tracing::instrument(
        skip(self, image),
        fields(db.table = "images", db.operation = "insert", path = %image.path)
    )]
    async fn insert(&self, image: NewImage) -> Result<ImageRecord, AppError> {
        let record = sqlx::query_as::<Postgres, ImageRecord>(
            r#"
            INSERT INTO images (name, description, author, path)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, author, path, created_at
            "#,
        )
        .bind(&image.name)
        .bind(&image.description)
        .bind(&image.author)
        .bind(&image.path)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }

    #[tracing::instrument(skip(self), fields(db.table = "images", db.operation = "select"))]
    async fn list_newest_first(&self) -> Result<Vec<ImageRecord>, AppError> {
        let records = sqlx::query_as::<Postgres, ImageRecord>(
            "SELECT id, name, description, author, path, created_at FROM images ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(records)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
