use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod store;

pub use store::ScoreStore;

use error::{Result, StorageError};
use repository::score::ScoreRepository;

/// Handle on the PostgreSQL connection pool.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connects eagerly; fails with `StorageError::Connection` if the server
    /// cannot be reached.
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(StorageError::Connection)?;

        Ok(Self { pool })
    }

    /// Builds a pool that only connects when a query needs it. Used when the
    /// server is down at startup: every call then fails on its own instead of
    /// taking the process down.
    pub fn new_lazy(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_lazy(database_url)
            .map_err(StorageError::Connection)?;

        Ok(Self { pool })
    }

    /// Creates the scores table and its indexes if they do not exist yet.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    /// Connects and brings the schema up to date. Safe to call on every start.
    pub async fn initialize(database_url: &str, max_connections: u32) -> Result<Self> {
        let db = Self::new(database_url, max_connections).await?;
        db.run_migrations().await?;
        Ok(db)
    }

    pub fn score_store(&self) -> ScoreRepository {
        ScoreRepository::new(&self.pool)
    }
}
