//! SQLite-backed economy storage.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePoolOptions, SqliteRow,
};
use lootforge_domain::{
    Adventure, AdventureId, AdventureStatus, LootBox, Prize, PrizeName, PrizeType, PrizeTypeId,
    Rarity, User, UserId, Username,
};
use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool, Transaction};
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::schema::SCHEMA;
use crate::infrastructure::ports::{EconomyStore, RepoError, UnitOfWork};

const ADVENTURE_COLUMNS: &str = "id, user_id, timestamp, rng_score, material, status";
const PRIZE_TYPE_COLUMNS: &str = "id, name, rarity, quantity, number_claimed";
const MAX_CONNECTIONS: u32 = 4;

/// SQLite implementation of [`EconomyStore`].
///
/// Units of work are serialized through an in-process lock held for the
/// lifetime of each [`SqliteUnitOfWork`].
#[derive(Clone)]
pub struct SqliteEconomyStore {
    pool: SqlitePool,
    write_lock: Arc<Mutex<()>>,
    lock_timeout: Duration,
}

impl SqliteEconomyStore {
    /// Open (creating if needed) the database at `db_path` and apply the schema.
    pub async fn open(
        db_path: impl AsRef<Path>,
        busy_timeout: Duration,
    ) -> Result<Self, RepoError> {
        let db_path = db_path.as_ref();
        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(busy_timeout)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await
            .map_err(|e| RepoError::database("open", e))?;

        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .map_err(|e| RepoError::database("migrate", e))?;
        }

        tracing::info!(path = %db_path.display(), "SQLite economy store ready");

        Ok(Self {
            pool,
            write_lock: Arc::new(Mutex::new(())),
            lock_timeout: busy_timeout,
        })
    }
}

#[async_trait]
impl EconomyStore for SqliteEconomyStore {
    async fn begin(&self) -> Result<Box<dyn UnitOfWork>, RepoError> {
        let guard = tokio::time::timeout(self.lock_timeout, self.write_lock.clone().lock_owned())
            .await
            .map_err(|_| RepoError::database("begin", "timed out waiting for another unit of work"))?;

        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("begin", e))?;

        Ok(Box::new(SqliteUnitOfWork {
            tx: Some(tx),
            guard: Some(guard),
        }))
    }
}

// =============================================================================
// Unit of Work
// =============================================================================

/// One open SQLite transaction.
///
/// The store lock is released as soon as `commit` or `rollback` finishes.
/// Dropping it without either rolls the transaction back, then releases
/// the lock.
pub struct SqliteUnitOfWork {
    // Field order matters: the transaction is dropped before the guard.
    tx: Option<Transaction<'static, Sqlite>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl SqliteUnitOfWork {
    fn conn(&mut self) -> Result<&mut SqliteConnection, RepoError> {
        self.tx
            .as_deref_mut()
            .ok_or_else(|| RepoError::database("unit_of_work", "unit of work already finished"))
    }
}

#[async_trait]
impl UnitOfWork for SqliteUnitOfWork {
    // =========================================================================
    // Users
    // =========================================================================

    async fn get_user(&mut self, id: UserId) -> Result<Option<User>, RepoError> {
        let row = sqlx::query(
            "SELECT id, username, current_threshold, reset_threshold, created_at \
             FROM users WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(self.conn()?)
        .await
        .map_err(|e| RepoError::database("get_user", e))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn insert_user(&mut self, user: &User) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO users (id, username, current_threshold, reset_threshold, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(user.id().to_string())
        .bind(user.username().as_str())
        .bind(user.current_threshold())
        .bind(user.reset_threshold())
        .bind(encode_timestamp(user.created_at()))
        .execute(self.conn()?)
        .await
        .map_err(|e| map_write_error("insert_user", e))?;
        Ok(())
    }

    async fn save_user(&mut self, user: &User) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE users SET current_threshold = ?, reset_threshold = ? WHERE id = ?",
        )
        .bind(user.current_threshold())
        .bind(user.reset_threshold())
        .bind(user.id().to_string())
        .execute(self.conn()?)
        .await
        .map_err(|e| RepoError::database("save_user", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("User", user.id()));
        }
        Ok(())
    }

    // =========================================================================
    // Adventures
    // =========================================================================

    async fn latest_adventure(&mut self, user_id: UserId) -> Result<Option<Adventure>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {ADVENTURE_COLUMNS} FROM adventures WHERE user_id = ? \
             ORDER BY timestamp DESC, seq DESC LIMIT 1"
        ))
        .bind(user_id.to_string())
        .fetch_optional(self.conn()?)
        .await
        .map_err(|e| RepoError::database("latest_adventure", e))?;

        row.as_ref().map(row_to_adventure).transpose()
    }

    async fn list_adventures(&mut self, user_id: UserId) -> Result<Vec<Adventure>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {ADVENTURE_COLUMNS} FROM adventures WHERE user_id = ? \
             ORDER BY timestamp DESC, seq DESC"
        ))
        .bind(user_id.to_string())
        .fetch_all(self.conn()?)
        .await
        .map_err(|e| RepoError::database("list_adventures", e))?;

        rows.iter().map(row_to_adventure).collect()
    }

    async fn get_adventures(&mut self, ids: &[AdventureId]) -> Result<Vec<Adventure>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {ADVENTURE_COLUMNS} FROM adventures WHERE id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(self.conn()?)
            .await
            .map_err(|e| RepoError::database("get_adventures", e))?;

        rows.iter().map(row_to_adventure).collect()
    }

    async fn insert_adventure(&mut self, adventure: &Adventure) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO adventures (id, user_id, timestamp, rng_score, material, status) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(adventure.id().to_string())
        .bind(adventure.user_id().to_string())
        .bind(encode_timestamp(adventure.timestamp()))
        .bind(adventure.rng_score())
        .bind(adventure.material().map(|rarity| rarity.as_str()))
        .bind(adventure.status().as_str())
        .execute(self.conn()?)
        .await
        .map_err(|e| map_write_error("insert_adventure", e))?;
        Ok(())
    }

    async fn consume_materials(
        &mut self,
        user_id: UserId,
        ids: &[AdventureId],
    ) -> Result<u64, RepoError> {
        let mut consumed = 0;
        for id in ids {
            let result = sqlx::query(
                "UPDATE adventures SET status = ? \
                 WHERE id = ? AND user_id = ? AND status = ?",
            )
            .bind(AdventureStatus::UsedMaterial.as_str())
            .bind(id.to_string())
            .bind(user_id.to_string())
            .bind(AdventureStatus::UnusedMaterial.as_str())
            .execute(self.conn()?)
            .await
            .map_err(|e| RepoError::database("consume_materials", e))?;
            consumed += result.rows_affected();
        }
        Ok(consumed)
    }

    // =========================================================================
    // Loot boxes
    // =========================================================================

    async fn insert_loot_box(&mut self, loot_box: &LootBox) -> Result<(), RepoError> {
        sqlx::query("INSERT INTO loot_boxes (id, user_id, rarity, created_at) VALUES (?, ?, ?, ?)")
            .bind(loot_box.id().to_string())
            .bind(loot_box.user_id().to_string())
            .bind(loot_box.rarity().as_str())
            .bind(encode_timestamp(loot_box.created_at()))
            .execute(self.conn()?)
            .await
            .map_err(|e| map_write_error("insert_loot_box", e))?;
        Ok(())
    }

    // =========================================================================
    // Prize catalog
    // =========================================================================

    async fn first_available_prize_type(
        &mut self,
        rarity: Rarity,
    ) -> Result<Option<PrizeType>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {PRIZE_TYPE_COLUMNS} FROM prize_types \
             WHERE rarity = ? AND number_claimed < quantity \
             ORDER BY seq ASC LIMIT 1"
        ))
        .bind(rarity.as_str())
        .fetch_optional(self.conn()?)
        .await
        .map_err(|e| RepoError::database("first_available_prize_type", e))?;

        row.as_ref().map(row_to_prize_type).transpose()
    }

    async fn claim_prize_unit(&mut self, id: PrizeTypeId) -> Result<bool, RepoError> {
        let result = sqlx::query(
            "UPDATE prize_types SET number_claimed = number_claimed + 1 \
             WHERE id = ? AND number_claimed < quantity",
        )
        .bind(id.to_string())
        .execute(self.conn()?)
        .await
        .map_err(|e| RepoError::database("claim_prize_unit", e))?;

        Ok(result.rows_affected() == 1)
    }

    async fn insert_prize(&mut self, prize: &Prize) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO prizes (id, user_id, prize_type_id, loot_box_id, awarded_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(prize.id().to_string())
        .bind(prize.user_id().to_string())
        .bind(prize.prize_type_id().to_string())
        .bind(prize.loot_box_id().to_string())
        .bind(encode_timestamp(prize.awarded_at()))
        .execute(self.conn()?)
        .await
        .map_err(|e| map_write_error("insert_prize", e))?;
        Ok(())
    }

    async fn insert_prize_type(&mut self, prize_type: &PrizeType) -> Result<(), RepoError> {
        sqlx::query(
            "INSERT INTO prize_types (id, name, rarity, quantity, number_claimed) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(prize_type.id().to_string())
        .bind(prize_type.name().as_str())
        .bind(prize_type.rarity().as_str())
        .bind(i64::from(prize_type.quantity()))
        .bind(i64::from(prize_type.number_claimed()))
        .execute(self.conn()?)
        .await
        .map_err(|e| map_write_error("insert_prize_type", e))?;
        Ok(())
    }

    async fn list_prize_types(&mut self) -> Result<Vec<PrizeType>, RepoError> {
        let rows = sqlx::query(&format!(
            "SELECT {PRIZE_TYPE_COLUMNS} FROM prize_types ORDER BY seq ASC"
        ))
        .fetch_all(self.conn()?)
        .await
        .map_err(|e| RepoError::database("list_prize_types", e))?;

        rows.iter().map(row_to_prize_type).collect()
    }

    // =========================================================================
    // Completion
    // =========================================================================

    async fn commit(&mut self) -> Result<(), RepoError> {
        let tx = self
            .tx
            .take()
            .ok_or_else(|| RepoError::database("commit", "unit of work already finished"))?;
        let result = tx
            .commit()
            .await
            .map_err(|e| RepoError::database("commit", e));
        self.guard.take();
        result
    }

    async fn rollback(&mut self) -> Result<(), RepoError> {
        let result = match self.tx.take() {
            Some(tx) => tx
                .rollback()
                .await
                .map_err(|e| RepoError::database("rollback", e)),
            None => Ok(()),
        };
        self.guard.take();
        result
    }
}

// =============================================================================
// Row mapping
// =============================================================================

fn encode_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_timestamp(raw: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| RepoError::serialization(format!("bad timestamp '{}': {}", raw, e)))
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepoError>
where
    T: sqlx::Decode<'r, Sqlite> + sqlx::Type<Sqlite>,
{
    row.try_get(name).map_err(RepoError::serialization)
}

fn parse<T>(raw: &str) -> Result<T, RepoError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse().map_err(RepoError::serialization)
}

fn count(row: &SqliteRow, name: &str) -> Result<u32, RepoError> {
    let raw: i64 = column(row, name)?;
    u32::try_from(raw).map_err(|e| RepoError::serialization(format!("{}: {}", name, e)))
}

fn row_to_user(row: &SqliteRow) -> Result<User, RepoError> {
    let id: String = column(row, "id")?;
    let username: String = column(row, "username")?;
    let created_at: String = column(row, "created_at")?;

    Ok(User::from_storage(
        parse(&id)?,
        Username::new(username).map_err(RepoError::serialization)?,
        column(row, "current_threshold")?,
        column(row, "reset_threshold")?,
        decode_timestamp(&created_at)?,
    ))
}

fn row_to_adventure(row: &SqliteRow) -> Result<Adventure, RepoError> {
    let id: String = column(row, "id")?;
    let user_id: String = column(row, "user_id")?;
    let timestamp: String = column(row, "timestamp")?;
    let material: Option<String> = column(row, "material")?;
    let status: String = column(row, "status")?;

    Ok(Adventure::from_storage(
        parse(&id)?,
        parse(&user_id)?,
        decode_timestamp(&timestamp)?,
        column(row, "rng_score")?,
        material.as_deref().map(parse::<Rarity>).transpose()?,
        parse(&status)?,
    ))
}

fn row_to_prize_type(row: &SqliteRow) -> Result<PrizeType, RepoError> {
    let id: String = column(row, "id")?;
    let name: String = column(row, "name")?;
    let rarity: String = column(row, "rarity")?;

    PrizeType::from_storage(
        parse(&id)?,
        PrizeName::new(name).map_err(RepoError::serialization)?,
        parse(&rarity)?,
        count(row, "quantity")?,
        count(row, "number_claimed")?,
    )
    .map_err(RepoError::serialization)
}

fn map_write_error(operation: &'static str, error: sqlx::Error) -> RepoError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() || db.is_check_violation() => {
            RepoError::constraint(db.message())
        }
        _ => RepoError::database(operation, error),
    }
}
