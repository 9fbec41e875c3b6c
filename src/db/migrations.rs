use anyhow::Result;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS entries (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            metric     TEXT NOT NULL CHECK(metric IN ('water','weight','meditation')),
            date       TEXT NOT NULL,
            value      REAL NOT NULL DEFAULT 0,
            created_at TEXT DEFAULT (datetime('now')),
            updated_at TEXT DEFAULT (datetime('now')),
            UNIQUE(metric, date)
        );

        CREATE TABLE IF NOT EXISTS weekly_menu (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            day  TEXT NOT NULL CHECK(day IN
                  ('monday','tuesday','wednesday','thursday','friday','saturday','sunday')),
            slot TEXT NOT NULL CHECK(slot IN ('breakfast','lunch','dinner')),
            dish TEXT NOT NULL,
            UNIQUE(day, slot)
        );

        CREATE TABLE IF NOT EXISTS shopping_items (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            quantity   TEXT,
            done       INTEGER DEFAULT 0,
            created_at TEXT DEFAULT (datetime('now'))
        );
    ",
    )?;

    log::debug!("database migrations applied");
    Ok(())
}
