// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Relational persistence over `sqlx`.
//!
//! The store uses the `Any` driver so the same code runs against PostgreSQL
//! (production) and SQLite (local runs, tests); the backend is selected by
//! the `DATABASE_URL` scheme at runtime. Queries use the runtime API, so no
//! database is needed at compile time.
//!
//! Wide numerics (difficulty, value) are stored as decimal TEXT to stay
//! exact; hashes, addresses, and payloads as 0x-prefixed hex TEXT; narrow
//! numerics as BIGINT.

use async_trait::async_trait;
use sqlx::any::AnyPoolOptions;
use sqlx::{AnyPool, Row};
use tracing::{debug, info};

use crate::errors::StoreError;
use crate::store::BlockStore;
use crate::types::{BlockRecord, TransactionRecord};

const CREATE_BLOCKS: &str = "\
CREATE TABLE IF NOT EXISTS blocks (
    number            BIGINT PRIMARY KEY,
    hash              TEXT   NOT NULL,
    parent_hash       TEXT   NOT NULL,
    timestamp         BIGINT NOT NULL,
    difficulty        TEXT   NOT NULL,
    gas_used          BIGINT NOT NULL,
    gas_limit         BIGINT NOT NULL,
    miner             TEXT   NOT NULL,
    nonce             TEXT,
    size              TEXT,
    state_root        TEXT   NOT NULL,
    receipts_root     TEXT   NOT NULL,
    transactions_root TEXT   NOT NULL,
    logs_bloom        TEXT   NOT NULL
)";

const CREATE_TRANSACTIONS: &str = "\
CREATE TABLE IF NOT EXISTS transactions (
    hash              TEXT   PRIMARY KEY,
    block_number      BIGINT NOT NULL REFERENCES blocks(number),
    from_address      TEXT   NOT NULL,
    to_address        TEXT,
    gas               BIGINT NOT NULL,
    gas_price         TEXT,
    nonce             BIGINT NOT NULL,
    input             TEXT   NOT NULL,
    transaction_index BIGINT NOT NULL,
    value             TEXT   NOT NULL
)";

const INSERT_BLOCK: &str = "\
INSERT INTO blocks (
    number, hash, parent_hash, timestamp, difficulty, gas_used, gas_limit,
    miner, nonce, size, state_root, receipts_root, transactions_root, logs_bloom
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)";

const INSERT_TRANSACTION: &str = "\
INSERT INTO transactions (
    hash, block_number, from_address, to_address, gas, gas_price,
    nonce, input, transaction_index, value
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)";

const SELECT_RANGE: &str =
    "SELECT number FROM blocks WHERE number >= $1 AND number <= $2 ORDER BY number";

/// SQL-backed [`BlockStore`] over a connection pool.
///
/// Each worker task draws its own pooled connection for the duration of one
/// per-block transaction, so concurrent workers never share a session.
///
/// # Examples
///
/// ```rust,ignore
/// use semioindex::store::SqlStore;
///
/// // PostgreSQL in production
/// let store = SqlStore::connect("postgres://localhost/chaindata", 8).await?;
///
/// // SQLite for a local backfill
/// let store = SqlStore::connect("sqlite://chaindata.db?mode=rwc", 1).await?;
///
/// store.ensure_schema().await?;
/// ```
#[derive(Debug, Clone)]
pub struct SqlStore {
    pool: AnyPool,
}

impl SqlStore {
    /// Connect to the database named by `url`.
    ///
    /// The backend is chosen by the URL scheme (`postgres://`, `sqlite:`).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the pool cannot be
    /// established.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        sqlx::any::install_default_drivers();

        let pool = AnyPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map_err(|source| StoreError::Connection { source })?;

        info!(max_connections = max_connections, "Connected block store");
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub fn from_pool(pool: AnyPool) -> Self {
        Self { pool }
    }

    /// Create the `blocks` and `transactions` tables if absent.
    ///
    /// Convenience bootstrap for fresh databases; real schema management
    /// belongs to the deployment, not this crate.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Schema`] if table creation fails.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for statement in [CREATE_BLOCKS, CREATE_TRANSACTIONS] {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|source| StoreError::Schema { source })?;
        }
        debug!("Block store schema ensured");
        Ok(())
    }

    /// The underlying pool, for callers that need ad-hoc queries.
    #[must_use]
    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    fn classify_insert_error(block_number: u64, error: sqlx::Error) -> StoreError {
        if let sqlx::Error::Database(db) = &error {
            if db.is_unique_violation() {
                return StoreError::Duplicate { block_number };
            }
        }
        StoreError::insert(block_number, error)
    }
}

#[async_trait]
impl BlockStore for SqlStore {
    async fn insert_block(
        &self,
        block: &BlockRecord,
        transactions: &[TransactionRecord],
    ) -> Result<(), StoreError> {
        let number = block.number;

        let mut db_tx = self
            .pool
            .begin()
            .await
            .map_err(|source| StoreError::Connection { source })?;

        let block_result = sqlx::query(INSERT_BLOCK)
            .bind(number as i64)
            .bind(format!("{:#x}", block.hash))
            .bind(format!("{:#x}", block.parent_hash))
            .bind(block.timestamp as i64)
            .bind(block.difficulty.to_string())
            .bind(block.gas_used as i64)
            .bind(block.gas_limit as i64)
            .bind(format!("{:#x}", block.miner))
            .bind(block.nonce.map(|n| format!("{n:#x}")))
            .bind(block.size.map(|s| s.to_string()))
            .bind(format!("{:#x}", block.state_root))
            .bind(format!("{:#x}", block.receipts_root))
            .bind(format!("{:#x}", block.transactions_root))
            .bind(format!("{:#x}", block.logs_bloom))
            .execute(&mut *db_tx)
            .await;

        if let Err(error) = block_result {
            let _ = db_tx.rollback().await;
            return Err(Self::classify_insert_error(number, error));
        }

        for record in transactions {
            let tx_result = sqlx::query(INSERT_TRANSACTION)
                .bind(format!("{:#x}", record.hash))
                .bind(record.block_number as i64)
                .bind(format!("{:#x}", record.from))
                .bind(record.to.map(|to| format!("{to:#x}")))
                .bind(record.gas as i64)
                .bind(record.gas_price.map(|p| p.to_string()))
                .bind(record.nonce as i64)
                .bind(format!("{:#x}", record.input))
                .bind(record.transaction_index as i64)
                .bind(record.value.to_string())
                .execute(&mut *db_tx)
                .await;

            if let Err(error) = tx_result {
                let _ = db_tx.rollback().await;
                return Err(Self::classify_insert_error(number, error));
            }
        }

        db_tx
            .commit()
            .await
            .map_err(|error| Self::classify_insert_error(number, error))?;

        debug!(
            block_number = number,
            transactions = transactions.len(),
            "Committed block"
        );
        Ok(())
    }

    async fn existing_in_range(&self, bottom: u64, top: u64) -> Result<Vec<u64>, StoreError> {
        let rows = sqlx::query(SELECT_RANGE)
            .bind(bottom as i64)
            .bind(top as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(|source| {
                StoreError::query(format!("existing_in_range {bottom}-{top}"), source)
            })?;

        rows.iter()
            .map(|row| {
                row.try_get::<i64, _>(0)
                    .map(|n| n as u64)
                    .map_err(|source| StoreError::query("existing_in_range decode", source))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "sql"
    }
}
