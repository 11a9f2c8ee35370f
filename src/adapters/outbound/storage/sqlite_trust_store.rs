use crate::ports::outbound::{Clock, TrustStore};
use crate::shared::error::TrustError;
use crate::shared::Result;
use crate::trust_evaluation::domain::{DependencyEcosystem, TrustedDependency};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS trusted_dependencies (\
     ecosystem TEXT NOT NULL,\
     id TEXT NOT NULL,\
     version TEXT NOT NULL,\
     trusted_at TEXT NOT NULL,\
     PRIMARY KEY (ecosystem, id, version));";

/// TrustStore adapter persisting trust records in SQLite
///
/// One connection is shared behind a mutex; every statement runs on the
/// blocking thread pool. Upserts and deletes are single statements, so each
/// (ecosystem, id, version) key changes atomically.
pub struct SqliteTrustStore {
    connection: Arc<Mutex<Connection>>,
    clock: Arc<dyn Clock>,
}

impl SqliteTrustStore {
    /// Opens (or creates) the database at `path` and initialises the schema
    ///
    /// # Errors
    /// Returns [`TrustError::Storage`] when the file cannot be opened
    pub fn open(path: &Path, clock: Arc<dyn Clock>) -> Result<Self> {
        let connection = Connection::open(path).map_err(storage_error)?;
        Self::with_connection(connection, clock)
    }

    /// An ephemeral database that lives as long as the store
    pub fn open_in_memory(clock: Arc<dyn Clock>) -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(storage_error)?;
        Self::with_connection(connection, clock)
    }

    fn with_connection(connection: Connection, clock: Arc<dyn Clock>) -> Result<Self> {
        connection.execute_batch(SCHEMA).map_err(storage_error)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            clock,
        })
    }

    async fn run<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> rusqlite::Result<T> + Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        tokio::task::spawn_blocking(move || {
            let guard = connection.lock().map_err(|_| TrustError::Storage {
                details: "trust store lock poisoned".to_string(),
            })?;
            let outcome = operation(&guard);
            outcome.map_err(storage_error)
        })
        .await
        .map_err(|e| TrustError::Storage {
            details: e.to_string(),
        })?
    }
}

fn storage_error(error: rusqlite::Error) -> anyhow::Error {
    TrustError::Storage {
        details: error.to_string(),
    }
    .into()
}

#[async_trait]
impl TrustStore for SqliteTrustStore {
    async fn trust(&self, ecosystem: DependencyEcosystem, id: &str, version: &str) -> Result<()> {
        let trusted_at = self.clock.now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let (id, version) = (id.to_string(), version.to_string());

        self.run(move |conn| {
            conn.execute(
                "INSERT INTO trusted_dependencies (ecosystem, id, version, trusted_at) \
                 VALUES (?1, ?2, ?3, ?4) \
                 ON CONFLICT (ecosystem, id, version) DO UPDATE SET trusted_at = excluded.trusted_at",
                params![ecosystem.as_str(), id, version, trusted_at],
            )
            .map(|_| ())
        })
        .await
    }

    async fn distrust(
        &self,
        ecosystem: DependencyEcosystem,
        id: &str,
        version: &str,
    ) -> Result<()> {
        let (id, version) = (id.to_string(), version.to_string());

        self.run(move |conn| {
            conn.execute(
                "DELETE FROM trusted_dependencies WHERE ecosystem = ?1 AND id = ?2 AND version = ?3",
                params![ecosystem.as_str(), id, version],
            )
            .map(|_| ())
        })
        .await
    }

    async fn is_trusted(
        &self,
        ecosystem: DependencyEcosystem,
        id: &str,
        version: &str,
    ) -> Result<bool> {
        let (id, version) = (id.to_string(), version.to_string());

        self.run(move |conn| {
            conn.query_row(
                "SELECT 1 FROM trusted_dependencies WHERE ecosystem = ?1 AND id = ?2 AND version = ?3",
                params![ecosystem.as_str(), id, version],
                |row| row.get::<_, i64>(0),
            )
            .optional()
            .map(|row| row.is_some())
        })
        .await
    }

    async fn get_trust(&self, ecosystem: DependencyEcosystem) -> Result<Vec<TrustedDependency>> {
        self.run(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, version, trusted_at FROM trusted_dependencies WHERE ecosystem = ?1",
            )?;
            let rows = stmt.query_map(params![ecosystem.as_str()], |row| {
                let trusted_at: String = row.get(2)?;
                Ok(TrustedDependency::new(
                    row.get(0)?,
                    row.get(1)?,
                    DateTime::parse_from_rfc3339(&trusted_at)
                        .ok()
                        .map(|t| t.with_timezone(&Utc)),
                ))
            })?;
            rows.collect()
        })
        .await
    }
}
