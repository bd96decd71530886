use anyhow::Result;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::rusqlite::{params, OpenFlags};
use r2d2_sqlite::SqliteConnectionManager;

use crate::storage::area::StorageArea;

/// SQLite-based storage area. One database file holds one area.
pub struct SqliteArea {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteArea {
    /// Opens (or creates) the SQLite database at `path`.
    pub fn open(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path)
            .with_flags(
                OpenFlags::SQLITE_OPEN_READ_WRITE |
                    OpenFlags::SQLITE_OPEN_CREATE |
                    OpenFlags::SQLITE_OPEN_URI
            )
            .with_init(|c| {
                c.busy_timeout(std::time::Duration::from_millis(500))?;
                c.pragma_update(None, "journal_mode", &"WAL")?;
                c.execute_batch(
                    "CREATE TABLE IF NOT EXISTS local_storage (
                        key TEXT NOT NULL PRIMARY KEY,
                        value TEXT NOT NULL,
                        updated_at INTEGER NOT NULL DEFAULT (strftime('%s','now'))
                    );"
                )?;
                Ok(())
            });

        let pool = Pool::builder()
            .max_size(4)
            .connection_timeout(std::time::Duration::from_secs(5))
            .build(manager)?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

impl StorageArea for SqliteArea {
    fn get_item(&self, key: &str) -> Option<String> {
        let conn = self.conn().ok()?;
        conn.query_row(
            "SELECT value FROM local_storage WHERE key=?1",
            params![key],
            |row| row.get::<_, String>(0),
        ).ok()
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO local_storage(key,value) VALUES (?1,?2)
             ON CONFLICT(key) DO UPDATE
             SET value=excluded.value, updated_at=strftime('%s','now')",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM local_storage WHERE key=?1", params![key])?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute("DELETE FROM local_storage", [])?;
        Ok(())
    }

    fn len(&self) -> usize {
        let conn = match self.conn() { Ok(c) => c, Err(_) => return 0 };
        conn.query_row::<u32, _, _>(
            "SELECT COUNT(*) FROM local_storage",
            [],
            |row| row.get(0),
        ).unwrap_or(0) as usize
    }

    fn keys(&self) -> Vec<String> {
        let conn = match self.conn() { Ok(c) => c, Err(_) => return vec![] };
        let mut stmt = match conn.prepare("SELECT key FROM local_storage ORDER BY key") {
            Ok(s) => s,
            Err(_) => return vec![],
        };

        let rows = match stmt.query_map([], |row| row.get::<_, String>(0)) {
            Ok(r) => r,
            Err(_) => return vec![],
        };

        rows.filter_map(Result::ok).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::area::contract::storagearea_basic_contract;

    fn db_path(dir: &tempfile::TempDir) -> String {
        dir.path().join("local.db").to_string_lossy().into_owned()
    }

    #[test]
    fn area_contract() {
        let dir = tempfile::tempdir().unwrap();
        let area = SqliteArea::open(&db_path(&dir)).unwrap();
        storagearea_basic_contract(&area);
    }

    #[test]
    fn data_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = db_path(&dir);

        {
            let area = SqliteArea::open(&path).unwrap();
            area.set_item("bookings", "[]").unwrap();
            area.set_item("bookings", "[{\"id\":1}]").unwrap();
        }

        let area = SqliteArea::open(&path).unwrap();
        assert_eq!(area.get_item("bookings").as_deref(), Some("[{\"id\":1}]"));
        assert_eq!(area.keys(), vec!["bookings"]);
    }
}
