//! Model run persistence.
//!
//! A run is the serialized solution for one canonical grid. Rows are written
//! once and never updated: a racing insert for the same grid is dropped by
//! the unique constraint and the first stored value wins.

use super::connection::CacheDb;
use super::hash::compute_run_hash;
use super::store::RunStore;
use crate::Error;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// A persisted solver run.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ModelRun {
    pub id: i64,
    pub hash: String,
    pub input: String,
    pub output: String,
    pub created_at: String,
}

/// Aggregate figures over the stored runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub entries: u64,
    pub oldest: Option<String>,
    pub newest: Option<String>,
}

impl CacheDb {
    /// Store a run unless one already exists for `input`.
    ///
    /// Returns `true` when a new row was written.
    pub async fn insert_run(&self, input: &str, output: &str) -> Result<bool, Error> {
        let hash = compute_run_hash(input);
        let input = input.to_string();
        let output = output.to_string();
        let created_at = chrono::Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.conn
            .call(move |conn| -> Result<bool, Error> {
                let inserted = conn.execute(
                    "INSERT INTO model_runs (hash, input, output, created_at)
                     VALUES (?1, ?2, ?3, ?4)
                     ON CONFLICT DO NOTHING",
                    params![hash, input, output, created_at],
                )?;
                Ok(inserted == 1)
            })
            .await
            .map_err(Error::from)
    }

    /// Get the stored output for a canonical input.
    pub async fn get_run_output(&self, input: &str) -> Result<Option<String>, Error> {
        let input = input.to_string();
        self.conn
            .call(move |conn| -> Result<Option<String>, Error> {
                let mut stmt = conn.prepare("SELECT output FROM model_runs WHERE input = ?1")?;

                match stmt.query_row(params![input], |row| row.get(0)) {
                    Ok(output) => Ok(Some(output)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Get a full run record by content hash.
    pub async fn get_run_by_hash(&self, hash: &str) -> Result<Option<ModelRun>, Error> {
        let hash = hash.to_string();
        self.conn
            .call(move |conn| -> Result<Option<ModelRun>, Error> {
                let mut stmt =
                    conn.prepare("SELECT id, hash, input, output, created_at FROM model_runs WHERE hash = ?1")?;

                let result = stmt.query_row(params![hash], |row| {
                    Ok(ModelRun {
                        id: row.get(0)?,
                        hash: row.get(1)?,
                        input: row.get(2)?,
                        output: row.get(3)?,
                        created_at: row.get(4)?,
                    })
                });

                match result {
                    Ok(run) => Ok(Some(run)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// Count stored runs and report the creation time range.
    pub async fn run_stats(&self) -> Result<RunStats, Error> {
        self.conn
            .call(|conn| -> Result<RunStats, Error> {
                let stats = conn.query_row(
                    "SELECT COUNT(*), MIN(created_at), MAX(created_at) FROM model_runs",
                    [],
                    |row| {
                        Ok(RunStats {
                            entries: row.get::<_, i64>(0)? as u64,
                            oldest: row.get(1)?,
                            newest: row.get(2)?,
                        })
                    },
                )?;
                Ok(stats)
            })
            .await
            .map_err(Error::from)
    }
}

#[async_trait::async_trait]
impl RunStore for CacheDb {
    async fn get(&self, key: &str) -> Result<Option<String>, Error> {
        self.get_run_output(key).await
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), Error> {
        if !self.insert_run(key, value).await? {
            tracing::debug!(hash = %compute_run_hash(key), "run already stored, keeping existing value");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "[[5,-4],[1,0]]";
    const OUTPUT: &str = r#"{"minimumHP":1,"path":[[0,0],[1,0],[1,1]]}"#;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = CacheDb::open_in_memory().await.unwrap();

        assert!(db.insert_run(INPUT, OUTPUT).await.unwrap());
        let output = db.get_run_output(INPUT).await.unwrap();
        assert_eq!(output.as_deref(), Some(OUTPUT));
    }

    #[tokio::test]
    async fn test_get_missing() {
        let db = CacheDb::open_in_memory().await.unwrap();
        assert!(db.get_run_output("[[0]]").await.unwrap().is_none());
        assert!(db.get_run_by_hash(&compute_run_hash("[[0]]")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_keeps_first_value() {
        let db = CacheDb::open_in_memory().await.unwrap();

        assert!(db.insert_run(INPUT, OUTPUT).await.unwrap());
        assert!(!db.insert_run(INPUT, "{}").await.unwrap());

        assert_eq!(db.get_run_output(INPUT).await.unwrap().as_deref(), Some(OUTPUT));
        assert_eq!(db.run_stats().await.unwrap().entries, 1);
    }

    #[tokio::test]
    async fn test_store_put_tolerates_existing_key() {
        let db = CacheDb::open_in_memory().await.unwrap();

        db.put(INPUT, OUTPUT).await.unwrap();
        db.put(INPUT, OUTPUT).await.unwrap();

        assert_eq!(db.get(INPUT).await.unwrap().as_deref(), Some(OUTPUT));
    }

    #[tokio::test]
    async fn test_get_by_hash() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.insert_run(INPUT, OUTPUT).await.unwrap();

        let run = db.get_run_by_hash(&compute_run_hash(INPUT)).await.unwrap().unwrap();
        assert_eq!(run.input, INPUT);
        assert_eq!(run.output, OUTPUT);
        assert!(chrono::DateTime::parse_from_rfc3339(&run.created_at).is_ok());
    }

    #[tokio::test]
    async fn test_stats() {
        let db = CacheDb::open_in_memory().await.unwrap();
        assert_eq!(db.run_stats().await.unwrap(), RunStats::default());

        db.insert_run("[[0]]", OUTPUT).await.unwrap();
        db.insert_run(INPUT, OUTPUT).await.unwrap();

        let stats = db.run_stats().await.unwrap();
        assert_eq!(stats.entries, 2);
        assert!(stats.oldest.is_some());
        assert!(stats.oldest <= stats.newest);
    }
}
