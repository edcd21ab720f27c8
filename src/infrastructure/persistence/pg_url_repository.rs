//! PostgreSQL implementation of the url repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::domain::entities::{NewUrl, Url};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// Name of the unique constraint on `urls.short_code`.
const SHORT_CODE_CONSTRAINT: &str = "urls_short_code_key";

/// Row shape of the `urls` table.
#[derive(Debug, FromRow)]
struct UrlRow {
    id: i64,
    short_code: String,
    long_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<UrlRow> for Url {
    fn from(row: UrlRow) -> Self {
        Url::new(
            row.id,
            row.short_code,
            row.long_url,
            row.clicks,
            row.created_at,
            row.updated_at,
        )
    }
}

/// PostgreSQL repository for url storage and retrieval.
///
/// Uses bound parameters throughout. The pool is owned by the caller and
/// shared with any other component that needs it.
#[derive(Clone)]
pub struct PgUrlRepository {
    pool: PgPool,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Returns true if `e` is a unique violation on the short code column.
fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SHORT_CODE_CONSTRAINT))
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn create(&self, new_url: NewUrl) -> Result<Url, AppError> {
        let result = sqlx::query_as::<_, UrlRow>(
            r#"
            INSERT INTO urls (short_code, long_url)
            VALUES ($1, $2)
            RETURNING id, short_code, long_url, clicks, created_at, updated_at
            "#,
        )
        .bind(&new_url.short_code)
        .bind(&new_url.long_url)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation_on_code(&e) => {
                Err(AppError::DuplicateCode(new_url.short_code))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_short_code(&self, short_code: &str) -> Result<Option<Url>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, short_code, long_url, clicks, created_at, updated_at
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Url::from))
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE urls
            SET clicks = clicks + 1, updated_at = NOW()
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!(short_code, "Click increment matched no rows");
        }

        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Url>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT id, short_code, long_url, clicks, created_at, updated_at
            FROM urls
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Url::from).collect())
    }
}
