use crate::DbError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use core_types::{Side, Trade, TradeQuery};
use sqlx::sqlite::{Sqlite, SqlitePool};
use sqlx::{FromRow, QueryBuilder};
use uuid::Uuid;

/// Persistence contract for journal trades.
///
/// This trait is what the importer and other callers write against, so the
/// SQLite implementation can be swapped for a test double.
#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Inserts the trade or replaces the row with the same id.
    ///
    /// An empty id is replaced by a freshly generated one. `created_at` is set
    /// on the first persist of an id and kept afterwards; `updated_at` is set
    /// on every call. Returns the trade as stored.
    async fn upsert(&self, trade: Trade) -> Result<Trade, DbError>;

    /// Returns the trades matching every supplied filter, ascending by entry time.
    async fn list(&self, query: &TradeQuery) -> Result<Vec<Trade>, DbError>;

    /// Removes the trade with this id. Unknown ids are not an error.
    async fn delete(&self, id: &str) -> Result<(), DbError>;
}

/// The `DbRepository` is the SQLite-backed trade store. It owns the single
/// logical connection and encapsulates all SQL.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: SqlitePool,
}

/// Database-specific trade struct that matches the trades table schema
#[derive(Debug, Clone, FromRow)]
struct DbTrade {
    id: String,
    symbol: String,
    side: String,
    entry_time: DateTime<Utc>,
    exit_time: Option<DateTime<Utc>>,
    entry_price: f64,
    exit_price: Option<f64>,
    qty: f64,
    fees: f64,
    notes: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DbTrade> for Trade {
    fn from(row: DbTrade) -> Self {
        Trade {
            id: row.id,
            symbol: row.symbol,
            side: Side::parse_lenient(&row.side),
            entry_time: row.entry_time,
            exit_time: row.exit_time,
            entry_price: row.entry_price,
            exit_price: row.exit_price,
            quantity: row.qty,
            fees: row.fees,
            notes: row.notes,
            created_at: Some(row.created_at),
            updated_at: Some(row.updated_at),
        }
    }
}

const SELECT_TRADES: &str = "SELECT id, symbol, side, entry_time, exit_time, entry_price, exit_price, \
     qty, fees, notes, created_at, updated_at FROM trades WHERE 1=1";

impl DbRepository {
    /// Creates a new `DbRepository` over an open connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Releases the connection. Every later operation fails with `Uninitialized`.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn live_pool(&self) -> Result<&SqlitePool, DbError> {
        if self.pool.is_closed() {
            return Err(DbError::Uninitialized);
        }
        Ok(&self.pool)
    }
}

#[async_trait]
impl TradeStore for DbRepository {
    async fn upsert(&self, mut trade: Trade) -> Result<Trade, DbError> {
        let pool = self.live_pool()?;

        if trade.id.is_empty() {
            trade.id = Uuid::new_v4().to_string();
        }
        let now = Utc::now();

        // `created_at` is deliberately absent from the update list.
        let (created_at, updated_at): (DateTime<Utc>, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO trades (
                id, symbol, side, entry_time, exit_time, entry_price, exit_price,
                qty, fees, notes, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                symbol = excluded.symbol,
                side = excluded.side,
                entry_time = excluded.entry_time,
                exit_time = excluded.exit_time,
                entry_price = excluded.entry_price,
                exit_price = excluded.exit_price,
                qty = excluded.qty,
                fees = excluded.fees,
                notes = excluded.notes,
                updated_at = excluded.updated_at
            RETURNING created_at, updated_at
            "#,
        )
        .bind(&trade.id)
        .bind(&trade.symbol)
        .bind(trade.side.as_str())
        .bind(trade.entry_time)
        .bind(trade.exit_time)
        .bind(trade.entry_price)
        .bind(trade.exit_price)
        .bind(trade.quantity)
        .bind(trade.fees)
        .bind(&trade.notes)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        trade.created_at = Some(created_at);
        trade.updated_at = Some(updated_at);
        tracing::debug!(id = %trade.id, symbol = %trade.symbol, "Upserted trade.");
        Ok(trade)
    }

    async fn list(&self, query: &TradeQuery) -> Result<Vec<Trade>, DbError> {
        let pool = self.live_pool()?;

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(SELECT_TRADES);
        if let Some(symbol) = query.symbol_filter() {
            builder.push(" AND symbol = ").push_bind(symbol.to_string());
        }
        if let Some(side) = query.side {
            builder.push(" AND side = ").push_bind(side.as_str());
        }
        if let Some(start) = query.start_time {
            builder.push(" AND entry_time >= ").push_bind(start);
        }
        if let Some(end) = query.end_time {
            builder.push(" AND entry_time < ").push_bind(end);
        }
        builder.push(" ORDER BY entry_time ASC");

        // SQLite only accepts OFFSET after a LIMIT; -1 means unbounded.
        if query.limit > 0 || query.offset > 0 {
            let limit = if query.limit > 0 { i64::from(query.limit) } else { -1 };
            builder.push(" LIMIT ").push_bind(limit);
            if query.offset > 0 {
                builder.push(" OFFSET ").push_bind(i64::from(query.offset));
            }
        }

        let rows = builder.build_query_as::<DbTrade>().fetch_all(pool).await?;
        Ok(rows.into_iter().map(Trade::from).collect())
    }

    async fn delete(&self, id: &str) -> Result<(), DbError> {
        let pool = self.live_pool()?;
        sqlx::query("DELETE FROM trades WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
