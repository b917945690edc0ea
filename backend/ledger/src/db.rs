//! Database layer — migrations, world-state loading, and the transaction log.

use std::collections::HashMap;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::info;

use crate::errors::{LedgerError, Result};
use crate::records::{NewTransaction, TransactionDetail, TransactionRecord, WriteRecord};
use crate::world_state::WorldState;

/// Establish a SQLite connection pool and run pending migrations.
pub async fn init_pool(database_url: &str) -> Result<SqlitePool> {
    let url = if database_url.starts_with("sqlite:") {
        database_url.to_string()
    } else {
        format!("sqlite:{database_url}")
    };

    // Every connection to `:memory:` opens its own empty database.
    let max_connections = if url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied successfully");
    Ok(pool)
}

// ─────────────────────────────────────────────────────────
// World state
// ─────────────────────────────────────────────────────────

/// Load every key of the world state together with the last committed sequence.
pub async fn load_world_state(pool: &SqlitePool) -> Result<WorldState> {
    let rows: Vec<(String, Vec<u8>)> = sqlx::query_as("SELECT state_key, value FROM world_state")
        .fetch_all(pool)
        .await?;
    let (sequence,): (i64,) = sqlx::query_as("SELECT COALESCE(MAX(sequence), 0) FROM transactions")
        .fetch_one(pool)
        .await?;

    let state: HashMap<String, Vec<u8>> = rows.into_iter().collect();
    Ok(WorldState::new(state, sequence))
}

// ─────────────────────────────────────────────────────────
// Transaction writes
// ─────────────────────────────────────────────────────────

/// Append `tx` to the log and apply its writes to `world_state`, all in one
/// database transaction. Either every write lands or none does.
pub async fn commit_transaction(pool: &SqlitePool, tx: &NewTransaction) -> Result<()> {
    let args = serde_json::to_string(&tx.args)?;
    let (event_name, event_payload) = match &tx.event {
        Some((name, payload)) => (
            Some(name.as_str()),
            Some(String::from_utf8_lossy(payload).into_owned()),
        ),
        None => (None, None),
    };

    let mut db_tx = pool.begin().await?;

    sqlx::query(
        r#"
        INSERT INTO transactions
            (sequence, tx_id, function, args, event_name, event_payload, committed_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
        "#,
    )
    .bind(tx.sequence)
    .bind(&tx.tx_id)
    .bind(&tx.function)
    .bind(&args)
    .bind(event_name)
    .bind(event_payload.as_deref())
    .bind(tx.committed_at)
    .execute(&mut *db_tx)
    .await?;

    for (key, value) in &tx.writes {
        sqlx::query("INSERT INTO state_writes (tx_id, state_key, value) VALUES (?1, ?2, ?3)")
            .bind(&tx.tx_id)
            .bind(key)
            .bind(value)
            .execute(&mut *db_tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO world_state (state_key, value, tx_id)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (state_key) DO UPDATE SET value = excluded.value, tx_id = excluded.tx_id
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&tx.tx_id)
        .execute(&mut *db_tx)
        .await?;
    }

    db_tx.commit().await?;
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Transaction reads
// ─────────────────────────────────────────────────────────

/// Fetch the whole transaction log, oldest first.
pub async fn get_transactions(pool: &SqlitePool) -> Result<Vec<TransactionRecord>> {
    let rows = sqlx::query_as::<_, TransactionRecord>(
        r#"
        SELECT sequence, tx_id, function, args, event_name, event_payload, committed_at
        FROM   transactions
        ORDER  BY sequence ASC
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Fetch one transaction and the keys it wrote, in write order.
pub async fn get_transaction(pool: &SqlitePool, tx_id: &str) -> Result<TransactionDetail> {
    let transaction = sqlx::query_as::<_, TransactionRecord>(
        r#"
        SELECT sequence, tx_id, function, args, event_name, event_payload, committed_at
        FROM   transactions
        WHERE  tx_id = ?1
        "#,
    )
    .bind(tx_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| LedgerError::TransactionNotFound(tx_id.to_string()))?;

    let writes = sqlx::query_as::<_, WriteRecord>(
        "SELECT state_key, value FROM state_writes WHERE tx_id = ?1 ORDER BY id ASC",
    )
    .bind(tx_id)
    .fetch_all(pool)
    .await?;

    Ok(TransactionDetail {
        transaction,
        writes: writes.into_iter().map(Into::into).collect(),
    })
}
