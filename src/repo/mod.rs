//! Parameterized CRUD and search statements, one transaction per call.
//!
//! Updates report a missing row as `Ok(None)` and deletes report the number
//! of rows removed; neither treats an unknown id as an error.

mod availability;
mod film_actors;
mod films;
mod search;
mod stores;

use crate::db::Executor;

#[derive(Clone, Debug)]
pub struct Repository {
    exec: Executor,
}

impl Repository {
    pub fn new(exec: Executor) -> Self {
        Self { exec }
    }
}

#[cfg(test)]
pub(crate) async fn test_repository() -> Repository {
    use crate::{config::DatabaseConfig, db};

    let conn = db::connect_and_migrate(&DatabaseConfig::in_memory()).await.unwrap();
    Repository::new(Executor::new(conn))
}
