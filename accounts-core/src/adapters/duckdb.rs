//! DuckDB store implementation
//!
//! Same contract as the in-memory store, backed by the `accounts` table.
//! Uniqueness is enforced by the primary key rather than a read-then-write
//! check, and renames run inside one transaction.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Result as AnyResult};
use async_trait::async_trait;
use duckdb::{params, Connection};
use parking_lot::Mutex;

use crate::domain::{Account, Error, Result};
use crate::ports::AccountStore;
use crate::services::MigrationService;

/// Maximum number of attempts when the database file is locked
const MAX_RETRIES: u32 = 5;

/// Initial retry delay in milliseconds (doubles each retry: 50, 100, 200, 400ms)
const INITIAL_RETRY_DELAY_MS: u64 = 50;

/// Check if an error message indicates a file locking issue that should be retried
fn is_retryable_error(err_msg: &str) -> bool {
    let lower = err_msg.to_lowercase();
    lower.contains("being used by another process")
        || lower.contains("cannot access the file")
        || lower.contains("resource temporarily unavailable")
        || lower.contains("database is locked")
        || lower.contains("could not set lock on file")
        || lower.contains("file is already open")
}

/// Open a database file, retrying with exponential backoff while another
/// process holds its lock
pub(crate) fn open_with_retry(db_path: &Path) -> AnyResult<Connection> {
    let mut last_error = None;

    for attempt in 0..MAX_RETRIES {
        match try_open_connection(db_path) {
            Ok(conn) => return Ok(conn),
            Err(e) => {
                let err_msg = e.to_string();
                if is_retryable_error(&err_msg) && attempt < MAX_RETRIES - 1 {
                    let delay = Duration::from_millis(INITIAL_RETRY_DELAY_MS * 2u64.pow(attempt));
                    tracing::warn!(
                        "Database busy, retrying in {}ms (attempt {}/{}): {}",
                        delay.as_millis(),
                        attempt + 1,
                        MAX_RETRIES,
                        err_msg
                    );
                    thread::sleep(delay);
                    last_error = Some(e);
                    continue;
                }
                return Err(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| anyhow!("Failed to open database after {} retries", MAX_RETRIES)))
}

fn try_open_connection(db_path: &Path) -> AnyResult<Connection> {
    // Extension autoloading pulls from the user's cache; nothing here needs it
    let config = duckdb::Config::default().enable_autoload_extension(false)?;
    Ok(Connection::open_with_flags(db_path, config)?)
}

/// DuckDB-backed account store
pub struct DuckDbAccountStore {
    conn: Arc<Mutex<Connection>>,
    db_path: Option<PathBuf>,
}

impl DuckDbAccountStore {
    /// Open (or create) a database file and bring its schema up to date
    pub fn open(db_path: &Path) -> AnyResult<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(open_with_retry(db_path)?)),
            db_path: Some(db_path.to_path_buf()),
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Private in-memory database, mostly for tests
    pub fn open_in_memory() -> AnyResult<Self> {
        let config = duckdb::Config::default().enable_autoload_extension(false)?;
        let conn = Connection::open_in_memory_with_flags(config)?;
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: None,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Run pending migrations
    pub fn ensure_schema(&self) -> AnyResult<()> {
        let conn = self.conn.lock();
        let result = MigrationService::new(&conn).run_pending()?;
        if !result.applied.is_empty() {
            tracing::info!("Applied migrations: {}", result.applied.join(", "));
        }
        Ok(())
    }

    /// Path of the backing file, `None` for in-memory databases
    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    /// Run `f` against the connection on the blocking pool
    async fn with_conn<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let mut guard = conn.lock();
            f(&mut guard)
        })
        .await
        .map_err(|e| Error::database(format!("storage task failed: {}", e)))?
    }
}

fn find_amount(conn: &Connection, name: &str) -> Result<Option<i64>> {
    match conn.query_row(
        "SELECT amount FROM accounts WHERE name = ?",
        params![name],
        |row| row.get::<_, i64>(0),
    ) {
        Ok(amount) => Ok(Some(amount)),
        Err(duckdb::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

#[async_trait]
impl AccountStore for DuckDbAccountStore {
    async fn create(&self, account: Account) -> Result<()> {
        self.with_conn(move |conn| {
            let inserted = conn.execute(
                "INSERT INTO accounts (name, amount) VALUES (?, ?) ON CONFLICT DO NOTHING",
                params![account.name, account.amount],
            )?;
            if inserted == 0 {
                return Err(Error::account_exists());
            }
            Ok(())
        })
        .await
    }

    async fn get(&self, name: &str) -> Result<Account> {
        let name = name.to_string();
        self.with_conn(move |conn| match find_amount(conn, &name)? {
            Some(amount) => Ok(Account::new(name, amount)),
            None => Err(Error::account_not_found()),
        })
        .await
    }

    async fn delete(&self, name: &str) -> Result<()> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let deleted = conn.execute("DELETE FROM accounts WHERE name = ?", params![name])?;
            if deleted == 0 {
                return Err(Error::account_not_found());
            }
            Ok(())
        })
        .await
    }

    async fn set_amount(&self, name: &str, amount: i64) -> Result<()> {
        let name = name.to_string();
        self.with_conn(move |conn| {
            let updated = conn.execute(
                "UPDATE accounts SET amount = ? WHERE name = ?",
                params![amount, name],
            )?;
            if updated == 0 {
                return Err(Error::account_not_found());
            }
            Ok(())
        })
        .await
    }

    async fn rename(&self, name: &str, new_name: &str) -> Result<()> {
        let name = name.to_string();
        let new_name = new_name.to_string();
        self.with_conn(move |conn| {
            // Dropping the transaction on an early return rolls it back
            let tx = conn.transaction()?;

            let Some(amount) = find_amount(&tx, &name)? else {
                return Err(Error::account_not_found());
            };
            if name == new_name {
                return Ok(());
            }
            if find_amount(&tx, &new_name)?.is_some() {
                return Err(Error::account_exists());
            }

            tx.execute("DELETE FROM accounts WHERE name = ?", params![name])?;
            tx.execute(
                "INSERT INTO accounts (name, amount) VALUES (?, ?)",
                params![new_name, amount],
            )?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn list(&self) -> Result<Vec<Account>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT name, amount FROM accounts ORDER BY name")?;
            let rows = stmt.query_map([], |row| {
                Ok(Account {
                    name: row.get(0)?,
                    amount: row.get(1)?,
                })
            })?;

            let mut accounts = Vec::new();
            for row in rows {
                accounts.push(row?);
            }
            Ok(accounts)
        })
        .await
    }
}
