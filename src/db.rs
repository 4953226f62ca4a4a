use std::{future::Future, pin::Pin};

use migration::Migrator;
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbErr,
    TransactionTrait,
    sqlx::sqlite::{SqliteJournalMode, SqliteSynchronous},
};
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info, warn};

use crate::{
    config::DatabaseConfig,
    error::{StoreError, StoreResult},
};

pub async fn connect_and_migrate(config: &DatabaseConfig) -> StoreResult<DatabaseConnection> {
    let mut opts = ConnectOptions::new(config.url.clone());
    opts.max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .connect_timeout(config.connect_timeout)
        .acquire_timeout(config.acquire_timeout)
        .sqlx_logging(false)
        // Applied to every pooled SQLite connection; ignored by other backends.
        .map_sqlx_sqlite_opts(|o| {
            o.journal_mode(SqliteJournalMode::Wal).synchronous(SqliteSynchronous::Normal)
        });

    let db = Database::connect(opts).await.map_err(StoreError::Connection)?;

    create_tables(&db).await?;
    Ok(db)
}

/// Creates film, film_actor, store and availability if they do not exist yet.
/// Existing tables are left untouched.
pub async fn create_tables(db: &DatabaseConnection) -> StoreResult<()> {
    Migrator::up(db, None).await.map_err(StoreError::Schema)?;
    info!(backend = ?db.get_database_backend(), "schema ready");
    Ok(())
}

type TxnFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, DbErr>> + Send + 'c>>;

/// Runs each unit of work in its own transaction on a pooled connection.
#[derive(Clone, Debug)]
pub struct Executor {
    db: DatabaseConnection,
}

impl Executor {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Commits when `work` succeeds, rolls back when it fails.
    pub async fn run<T, F>(&self, op: &'static str, work: F) -> StoreResult<T>
    where
        T: Send,
        F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, T> + Send,
    {
        debug!(op, "executing");
        self.db.transaction(work).await.map_err(|err| {
            let err = StoreError::from(err);
            warn!(op, error = %err, "statement failed");
            err
        })
    }
}
