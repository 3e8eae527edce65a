use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("The trade store has no live database connection.")]
    Uninitialized,

    #[error("Invalid database connection settings: {0}")]
    ConnectionConfig(String),

    #[error("Database operation failed: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
