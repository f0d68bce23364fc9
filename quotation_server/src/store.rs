//! Persistence of fetched quotations.
//!
//! The store is append-only: one row per successful upstream fetch, never
//! updated or deleted. `QuotationStore` is the seam the handler talks to;
//! `SqliteStore` is the production implementation over a pooled SQLite handle,
//! which synchronizes concurrent inserts on its own.
//!
//! Deadlines are applied by [`save_quotation`], not by the implementations, so
//! every store gets the same timeout behaviour.
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use quotation_common::Deadline;
use quotation_common::model::Quotation;
use sqlx::Row;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::error::StoreError;

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS cotacao(
        code TEXT,
        code_in TEXT,
        name TEXT,
        high TEXT,
        low TEXT,
        var_bid TEXT,
        pct_change TEXT,
        bid TEXT,
        ask TEXT,
        timestamp TEXT,
        create_date TEXT
    )"#;

const INSERT_SQL: &str = r#"
    INSERT INTO cotacao(
        code,
        code_in,
        name,
        high,
        low,
        var_bid,
        pct_change,
        bid,
        ask,
        timestamp,
        create_date
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#;

const SELECT_SQL: &str = r#"
    SELECT code, code_in, name, high, low, var_bid, pct_change, bid, ask, timestamp, create_date
    FROM cotacao
    ORDER BY rowid"#;

/// Somewhere quotations can be recorded.
#[async_trait]
pub trait QuotationStore: Send + Sync {
    /// Record one quotation as one row.
    async fn insert(&self, quotation: &Quotation) -> Result<(), StoreError>;
}

/// Insert `quotation` under a deadline of `budget`, bounded by `parent`.
///
/// The deadline is derived when this is called, so time already spent by the
/// caller on other work does not eat into the persistence budget unless the
/// parent deadline itself is that close.
pub async fn save_quotation<S>(
    store: &S,
    quotation: &Quotation,
    parent: Option<Deadline>,
    budget: Duration,
) -> Result<(), StoreError>
where
    S: QuotationStore + ?Sized,
{
    let deadline = Deadline::within(parent, budget);
    deadline
        .run(store.insert(quotation))
        .await
        .map_err(|_| StoreError::Timeout(budget.into()))?
}

/// SQLite-backed store.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .connect_with(options)
            .await
            .map_err(StoreError::Open)?;
        Ok(Self { pool })
    }

    /// Private in-memory database. A single connection is kept alive for the
    /// lifetime of the pool, otherwise the data would vanish with it.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(StoreError::Open)?;
        Ok(Self { pool })
    }

    /// Underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create the `cotacao` table if it does not exist yet. Safe to repeat.
    pub async fn create_table(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE_SQL)
            .execute(&self.pool)
            .await
            .map_err(StoreError::Schema)?;
        Ok(())
    }

    /// All recorded quotations, oldest first.
    pub async fn quotations(&self) -> Result<Vec<Quotation>, StoreError> {
        let rows = sqlx::query(SELECT_SQL)
            .fetch_all(&self.pool)
            .await
            .map_err(StoreError::Execute)?;

        rows.iter()
            .map(|row| -> Result<Quotation, sqlx::Error> {
                Ok(Quotation {
                    code: row.try_get("code")?,
                    code_in: row.try_get("code_in")?,
                    name: row.try_get("name")?,
                    high: row.try_get("high")?,
                    low: row.try_get("low")?,
                    var_bid: row.try_get("var_bid")?,
                    pct_change: row.try_get("pct_change")?,
                    bid: row.try_get("bid")?,
                    ask: row.try_get("ask")?,
                    timestamp: row.try_get("timestamp")?,
                    create_date: row.try_get("create_date")?,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(StoreError::Execute)
    }
}

#[async_trait]
impl QuotationStore for SqliteStore {
    async fn insert(&self, quotation: &Quotation) -> Result<(), StoreError> {
        sqlx::query(INSERT_SQL)
            .bind(quotation.code.as_str())
            .bind(quotation.code_in.as_str())
            .bind(quotation.name.as_str())
            .bind(quotation.high.as_str())
            .bind(quotation.low.as_str())
            .bind(quotation.var_bid.as_str())
            .bind(quotation.pct_change.as_str())
            .bind(quotation.bid.as_str())
            .bind(quotation.ask.as_str())
            .bind(quotation.timestamp.as_str())
            .bind(quotation.create_date.as_str())
            .execute(&self.pool)
            .await
            .map_err(StoreError::Execute)?;
        Ok(())
    }
}
