use rusqlite::{Connection, params};
use tracing::info;

use super::error::HistoryError;
use super::history::Application;

/// Scalar counts over the loaded APPS table. `total_applications` counts
/// distinct application ids while the attempt counters count rows, so the
/// attempt columns do not have to sum to the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateCounts {
    pub total_applications: i64,
    pub completed_attempts: i64,
    pub incomplete_attempts: i64,
}

/// Process-scoped aggregation buffer. One row per (application, attempt)
/// pair; APP_ID is a plain column, not unique.
pub struct AppStore {
    conn: Connection,
}

impl AppStore {
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        let conn = Connection::open_in_memory().map_err(HistoryError::store("open"))?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS APPS (
                ID INTEGER PRIMARY KEY,
                APP_ID TEXT NOT NULL,
                NAME TEXT NOT NULL,
                DURATION INTEGER,
                IS_COMPLETED INTEGER,
                USERSTART_T TEXT,
                END_T TEXT,
                LAST_UPDATED_T TEXT,
                START_E INTEGER,
                END_E INTEGER,
                LAST_UPDATED_E INTEGER
            )",
            [],
        )
        .map_err(HistoryError::store("create table"))?;
        Ok(Self { conn })
    }

    /// Bulk-insert every attempt inside a single transaction. A failing
    /// statement aborts the whole load; nothing is committed partially.
    pub fn load(&mut self, apps: &[Application]) -> Result<usize, HistoryError> {
        let tx = self
            .conn
            .transaction()
            .map_err(HistoryError::store("begin load"))?;
        let mut inserted = 0usize;
        {
            let mut stmt = tx
                .prepare(
                    "INSERT INTO APPS (APP_ID, NAME, DURATION, IS_COMPLETED, USERSTART_T, \
                     END_T, LAST_UPDATED_T, START_E, END_E, LAST_UPDATED_E) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                )
                .map_err(HistoryError::store("prepare insert"))?;
            for app in apps {
                for attempt in &app.attempts {
                    stmt.execute(params![
                        app.id,
                        app.name,
                        attempt.duration as i64,
                        attempt.completed,
                        attempt.start_time,
                        attempt.end_time,
                        attempt.last_updated,
                        attempt.start_time_epoch,
                        attempt.end_time_epoch,
                        attempt.last_updated_epoch,
                    ])
                    .map_err(HistoryError::store("insert attempt"))?;
                    inserted += 1;
                }
            }
        }
        tx.commit().map_err(HistoryError::store("commit load"))?;
        info!("Loaded {} attempt rows", inserted);
        Ok(inserted)
    }

    pub fn total_applications(&self) -> Result<i64, HistoryError> {
        self.conn
            .query_row("SELECT COUNT(DISTINCT APP_ID) FROM APPS", [], |row| {
                row.get(0)
            })
            .map_err(HistoryError::store("count applications"))
    }

    pub fn count_attempts(&self, completed: bool) -> Result<i64, HistoryError> {
        self.conn
            .query_row(
                "SELECT COUNT(ID) FROM APPS WHERE IS_COMPLETED = ?1",
                params![completed],
                |row| row.get(0),
            )
            .map_err(HistoryError::store("count attempts"))
    }

    pub fn aggregate(&self) -> Result<AggregateCounts, HistoryError> {
        Ok(AggregateCounts {
            total_applications: self.total_applications()?,
            completed_attempts: self.count_attempts(true)?,
            incomplete_attempts: self.count_attempts(false)?,
        })
    }
}
