use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[cfg(feature = "sqlx")]
use sqlx::FromRow;

/// Number of authors listed in the summary's `top_authors`.
pub const TOP_AUTHORS_LIMIT: usize = 5;

/// Aggregate statistics over the whole images table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct DatabaseStats {
    pub total_images: i64,
    pub avg_name_length: f64,
    pub avg_description_length: f64,
    pub unique_authors: i64,
    pub oldest_image: Option<DateTime<Utc>>,
    pub newest_image: Option<DateTime<Utc>>,
}

/// Bucket width for upload usage statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UsagePeriod {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl UsagePeriod {
    /// Parse a period name; anything unrecognised falls back to [`UsagePeriod::Daily`].
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("hourly") => UsagePeriod::Hourly,
            Some("weekly") => UsagePeriod::Weekly,
            Some("monthly") => UsagePeriod::Monthly,
            _ => UsagePeriod::Daily,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UsagePeriod::Hourly => "hourly",
            UsagePeriod::Daily => "daily",
            UsagePeriod::Weekly => "weekly",
            UsagePeriod::Monthly => "monthly",
        }
    }
}

/// Uploads grouped into one time bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct UsageBucket {
    pub time_period: String,
    pub uploads_count: i64,
    pub unique_authors: i64,
}

/// Per-author upload statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct AuthorStats {
    pub author: String,
    pub images_count: i64,
    pub avg_description_length: f64,
    pub first_upload: DateTime<Utc>,
    pub last_upload: DateTime<Utc>,
}

/// Uploads on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[cfg_attr(feature = "sqlx", derive(FromRow))]
pub struct TimelineDay {
    pub date: NaiveDate,
    pub uploads: i64,
    pub authors: String,
    pub image_names: String,
}

/// Size of the content directory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StorageStats {
    pub total_files: u64,
    pub total_size_bytes: u64,
    pub total_size_mb: f64,
    pub average_file_size_bytes: u64,
}

impl StorageStats {
    pub fn new(total_files: u64, total_size_bytes: u64) -> Self {
        let average_file_size_bytes = if total_files > 0 {
            (total_size_bytes as f64 / total_files as f64).round() as u64
        } else {
            0
        };
        Self {
            total_files,
            total_size_bytes,
            total_size_mb: round2(total_size_bytes as f64 / (1024.0 * 1024.0)),
            average_file_size_bytes,
        }
    }
}

/// Database and storage statistics served together.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GalleryStats {
    pub database: DatabaseStats,
    pub storage: StorageStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DateRange {
    pub oldest: Option<DateTime<Utc>>,
    pub newest: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SummaryTotals {
    pub total_images: i64,
    pub unique_authors: i64,
    pub total_storage_mb: f64,
    pub average_daily_uploads: f64,
    pub date_range: DateRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldLengthInfo {
    pub avg_name_length: f64,
    pub avg_description_length: f64,
}

/// Combined analytics view used by the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsSummary {
    pub summary: SummaryTotals,
    pub storage: StorageStats,
    pub top_authors: Vec<AuthorStats>,
    pub database_info: FieldLengthInfo,
}

impl AnalyticsSummary {
    pub fn build(database: DatabaseStats, storage: StorageStats, authors: Vec<AuthorStats>) -> Self {
        let average_daily_uploads = if database.total_images > 0 {
            let days = days_spanned(database.oldest_image, database.newest_image).max(1);
            round2(database.total_images as f64 / days as f64)
        } else {
            0.0
        };

        Self {
            summary: SummaryTotals {
                total_images: database.total_images,
                unique_authors: database.unique_authors,
                total_storage_mb: storage.total_size_mb,
                average_daily_uploads,
                date_range: DateRange {
                    oldest: database.oldest_image,
                    newest: database.newest_image,
                },
            },
            storage,
            top_authors: authors.into_iter().take(TOP_AUTHORS_LIMIT).collect(),
            database_info: FieldLengthInfo {
                avg_name_length: round2(database.avg_name_length),
                avg_description_length: round2(database.avg_description_length),
            },
        }
    }
}

/// Whole days covered by `[start, end]`, counting both ends; 1 when either is missing.
pub fn days_spanned(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> i64 {
    const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

    match (start, end) {
        (Some(start), Some(end)) => {
            let millis = (end - start).num_milliseconds().abs();
            (millis + MILLIS_PER_DAY - 1) / MILLIS_PER_DAY + 1
        }
        _ => 1,
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
