use crate::models::{canonical_pair, MatchRecord, SwipeDirection, SwipeRecord};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when interacting with the swipe ledger
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Duplicate swipe: {0} -> {1}")]
    DuplicateSwipe(String, String),

    #[error("Swipe record not found: {0}")]
    RecordNotFound(String),
}

/// A swipe that has been committed to the ledger, together with the match
/// it produced, if the swipe completed a reciprocal right-swipe pair.
#[derive(Debug, Clone)]
pub struct CommittedSwipe {
    pub record: SwipeRecord,
    pub matched: Option<MatchRecord>,
}

/// Persistence boundary for swipe and match records.
///
/// Implementations must make `commit_swipe` and `revert_swipe` atomic: a
/// swipe insert and its match creation (or a swipe delete and its match
/// retraction) either both take effect or neither does.
#[async_trait]
pub trait SwipeStore: Send + Sync {
    /// Insert a swipe record, detecting reciprocity in the same transaction.
    ///
    /// Returns `DuplicateSwipe` when the (swiper, target) pair is already in
    /// the ledger; the existing record is never overwritten.
    async fn commit_swipe(
        &self,
        swiper_id: &str,
        target_id: &str,
        direction: SwipeDirection,
    ) -> Result<CommittedSwipe, LedgerError>;

    /// All target ids the given user has swiped on.
    async fn swiped_target_ids(&self, swiper_id: &str) -> Result<Vec<String>, LedgerError>;

    /// Delete a swipe record and, when it produced a match, the match record,
    /// in one transaction.
    async fn revert_swipe(
        &self,
        record: &SwipeRecord,
        match_id: Option<&str>,
    ) -> Result<(), LedgerError>;

    /// Whether the backing store is reachable.
    async fn health_check(&self) -> Result<bool, LedgerError>;
}

/// PostgreSQL-backed swipe ledger
///
/// Source of truth for exclusion and undo. Rows in `swipes` are append-only
/// except for single-level undo; `matches` holds one row per canonicalized
/// pair, guarded by a uniqueness constraint.
pub struct PostgresLedger {
    pool: PgPool,
}

impl PostgresLedger {
    /// Create a new ledger from a connection string
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, LedgerError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new ledger from settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, LedgerError> {
        tracing::info!("Connecting to PostgreSQL ledger");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }
}

#[async_trait]
impl SwipeStore for PostgresLedger {
    async fn commit_swipe(
        &self,
        swiper_id: &str,
        target_id: &str,
        direction: SwipeDirection,
    ) -> Result<CommittedSwipe, LedgerError> {
        let mut tx = self.pool.begin().await?;

        let swipe_id = uuid::Uuid::new_v4().to_string();
        let inserted = sqlx::query(
            r#"
            INSERT INTO swipes (id, swiper_id, target_id, direction, created_at)
            VALUES ($1, $2, $3, $4, NOW())
            ON CONFLICT (swiper_id, target_id) DO NOTHING
            RETURNING created_at
            "#,
        )
        .bind(&swipe_id)
        .bind(swiper_id)
        .bind(target_id)
        .bind(direction)
        .fetch_optional(&mut *tx)
        .await?;

        // No row back means the pair already exists; dropping the
        // transaction rolls back.
        let Some(row) = inserted else {
            return Err(LedgerError::DuplicateSwipe(
                swiper_id.to_string(),
                target_id.to_string(),
            ));
        };

        let record = SwipeRecord {
            id: swipe_id,
            swiper_id: swiper_id.to_string(),
            target_id: target_id.to_string(),
            direction,
            created_at: row.get("created_at"),
        };

        let mut matched = None;
        if direction == SwipeDirection::Right {
            let reciprocal = sqlx::query(
                r#"
                SELECT id FROM swipes
                WHERE swiper_id = $1 AND target_id = $2 AND direction = 'right'
                "#,
            )
            .bind(target_id)
            .bind(swiper_id)
            .fetch_optional(&mut *tx)
            .await?;

            if reciprocal.is_some() {
                let (user_a, user_b) = canonical_pair(swiper_id, target_id);
                let match_id = uuid::Uuid::new_v4().to_string();

                // The unique constraint arbitrates concurrent reciprocal
                // commits; the loser re-selects the winner's row.
                sqlx::query(
                    r#"
                    INSERT INTO matches (id, user_a_id, user_b_id, created_at)
                    VALUES ($1, $2, $3, NOW())
                    ON CONFLICT (user_a_id, user_b_id) DO NOTHING
                    "#,
                )
                .bind(&match_id)
                .bind(user_a)
                .bind(user_b)
                .execute(&mut *tx)
                .await?;

                let row = sqlx::query(
                    r#"
                    SELECT id, user_a_id, user_b_id, created_at FROM matches
                    WHERE user_a_id = $1 AND user_b_id = $2
                    "#,
                )
                .bind(user_a)
                .bind(user_b)
                .fetch_one(&mut *tx)
                .await?;

                matched = Some(MatchRecord {
                    id: row.get("id"),
                    user_a_id: row.get("user_a_id"),
                    user_b_id: row.get("user_b_id"),
                    created_at: row.get("created_at"),
                });
            }
        }

        tx.commit().await?;

        tracing::debug!(
            "Committed swipe {} -> {} ({:?}, matched: {})",
            swiper_id,
            target_id,
            direction,
            matched.is_some()
        );

        Ok(CommittedSwipe { record, matched })
    }

    async fn swiped_target_ids(&self, swiper_id: &str) -> Result<Vec<String>, LedgerError> {
        let rows = sqlx::query(
            r#"
            SELECT target_id FROM swipes
            WHERE swiper_id = $1
            "#,
        )
        .bind(swiper_id)
        .fetch_all(&self.pool)
        .await?;

        let target_ids: Vec<String> = rows.iter().map(|row| row.get("target_id")).collect();

        tracing::debug!("User {} has swiped {} targets", swiper_id, target_ids.len());

        Ok(target_ids)
    }

    async fn revert_swipe(
        &self,
        record: &SwipeRecord,
        match_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("DELETE FROM swipes WHERE id = $1")
            .bind(&record.id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::RecordNotFound(record.id.clone()));
        }

        if let Some(match_id) = match_id {
            sqlx::query("DELETE FROM matches WHERE id = $1")
                .bind(match_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(
            "Reverted swipe {} -> {} (match retracted: {})",
            record.swiper_id,
            record.target_id,
            match_id.is_some()
        );

        Ok(())
    }

    async fn health_check(&self) -> Result<bool, LedgerError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
