//! SQLite pool for the lead store.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool, PoolError, PooledConnection};
use diesel::sqlite::SqliteConnection;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Pragmas applied to every connection handed out by the pool.
#[derive(Clone, Debug)]
pub struct PoolSettings {
    pub max_size: u32,
    /// Write-ahead logging lets list reads proceed during a bulk delete.
    pub wal: bool,
    pub busy_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_size: 10,
            wal: true,
            busy_timeout: Duration::from_secs(30),
        }
    }
}

impl PoolSettings {
    fn pragmas(&self) -> String {
        let mut sql = String::new();
        if self.wal {
            sql.push_str("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL; ");
        }
        sql.push_str(&format!(
            "PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ));
        sql
    }
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for PoolSettings {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&self.pragmas())
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a pool with [`PoolSettings::default`].
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    establish_pool_with(database_url, PoolSettings::default())
}

pub fn establish_pool_with(database_url: &str, settings: PoolSettings) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(settings.max_size)
        .connection_customizer(Box::new(settings))
        .build(manager)
}

/// Retrieve a connection from the pool, logging failures.
pub fn get_connection(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().inspect_err(|e| {
        log::error!("Failed to get connection from pool: {e}");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pragmas_follow_settings() {
        let settings = PoolSettings {
            wal: false,
            busy_timeout: Duration::from_millis(250),
            ..PoolSettings::default()
        };
        assert_eq!(settings.pragmas(), "PRAGMA busy_timeout = 250;");
        assert!(PoolSettings::default().pragmas().contains("journal_mode = WAL"));
    }

    #[test]
    fn in_memory_pool_hands_out_connections() {
        let settings = PoolSettings {
            max_size: 1,
            ..PoolSettings::default()
        };
        let pool = establish_pool_with(":memory:", settings).unwrap();
        assert!(get_connection(&pool).is_ok());
    }
}
