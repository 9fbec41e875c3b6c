use anyhow::Result;
use rusqlite::{Connection, OptionalExtension, params};
use std::str::FromStr;

use crate::models::{Entry, MealSlot, MenuDay, MenuEntry, Metric, ShoppingItem};

// ─── Entry repo ──────────────────────────────────────────────────────────────

pub struct EntryRepo;

impl EntryRepo {
    /// Record a measurement for one day. A second write for the same day
    /// replaces the earlier value (last write wins).
    pub fn upsert(conn: &Connection, metric: Metric, date: &str, value: f64) -> Result<()> {
        conn.execute(
            "INSERT INTO entries (metric, date, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(metric, date) DO UPDATE SET
                value = ?3, updated_at = datetime('now')",
            params![metric.as_str(), date, value],
        )?;
        Ok(())
    }

    /// Full history for one metric, oldest first.
    pub fn get_all(conn: &Connection, metric: Metric) -> Result<Vec<Entry>> {
        let mut stmt = conn.prepare(
            "SELECT date, value FROM entries WHERE metric = ?1 ORDER BY date",
        )?;

        let rows = stmt.query_map(params![metric.as_str()], |row| {
            Ok(Entry {
                date: row.get::<_, String>(0)?,
                value: row.get::<_, f64>(1)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn get_range(
        conn: &Connection,
        metric: Metric,
        start: &str,
        end: &str,
    ) -> Result<Vec<Entry>> {
        let mut stmt = conn.prepare(
            "SELECT date, value FROM entries
             WHERE metric = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date",
        )?;

        let rows = stmt.query_map(params![metric.as_str(), start, end], |row| {
            Ok(Entry {
                date: row.get::<_, String>(0)?,
                value: row.get::<_, f64>(1)?,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    pub fn get_for_date(conn: &Connection, metric: Metric, date: &str) -> Result<Option<f64>> {
        conn.query_row(
            "SELECT value FROM entries WHERE metric = ?1 AND date = ?2",
            params![metric.as_str(), date],
            |row| row.get(0),
        )
        .optional()
        .map_err(anyhow::Error::from)
    }
}

// ─── Menu repo ───────────────────────────────────────────────────────────────

pub struct MenuRepo;

impl MenuRepo {
    pub fn set(conn: &Connection, day: MenuDay, slot: MealSlot, dish: &str) -> Result<()> {
        conn.execute(
            "INSERT INTO weekly_menu (day, slot, dish) VALUES (?1, ?2, ?3)
             ON CONFLICT(day, slot) DO UPDATE SET dish = ?3",
            params![day.as_str(), slot.as_str(), dish],
        )?;
        Ok(())
    }

    pub fn unset(conn: &Connection, day: MenuDay, slot: MealSlot) -> Result<bool> {
        let removed = conn.execute(
            "DELETE FROM weekly_menu WHERE day = ?1 AND slot = ?2",
            params![day.as_str(), slot.as_str()],
        )?;
        Ok(removed > 0)
    }

    pub fn clear(conn: &Connection) -> Result<()> {
        conn.execute("DELETE FROM weekly_menu", [])?;
        Ok(())
    }

    /// The whole planned week, Monday first, meals in day order.
    pub fn get_week(conn: &Connection) -> Result<Vec<MenuEntry>> {
        let mut stmt = conn.prepare(
            "SELECT id, day, slot, dish FROM weekly_menu
             ORDER BY CASE day
               WHEN 'monday' THEN 1 WHEN 'tuesday' THEN 2 WHEN 'wednesday' THEN 3
               WHEN 'thursday' THEN 4 WHEN 'friday' THEN 5 WHEN 'saturday' THEN 6
               WHEN 'sunday' THEN 7 END,
             CASE slot
               WHEN 'breakfast' THEN 1 WHEN 'lunch' THEN 2 WHEN 'dinner' THEN 3 END",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
            ))
        })?;

        let mut result = Vec::new();
        for r in rows {
            let (id, day, slot, dish) = r?;
            result.push(MenuEntry {
                id: Some(id),
                day: MenuDay::from_str(&day)
                    .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
                slot: MealSlot::from_str(&slot)
                    .map_err(|e| rusqlite::Error::InvalidParameterName(e.to_string()))?,
                dish,
            });
        }
        Ok(result)
    }
}

// ─── Shopping repo ───────────────────────────────────────────────────────────

pub struct ShoppingRepo;

impl ShoppingRepo {
    pub fn add(conn: &Connection, name: &str, quantity: Option<&str>) -> Result<()> {
        conn.execute(
            "INSERT INTO shopping_items (name, quantity, done) VALUES (?1, ?2, 0)",
            params![name, quantity],
        )?;
        Ok(())
    }

    pub fn list(conn: &Connection, include_done: bool) -> Result<Vec<ShoppingItem>> {
        let sql = if include_done {
            "SELECT id, name, quantity, done FROM shopping_items ORDER BY done, id"
        } else {
            "SELECT id, name, quantity, done FROM shopping_items WHERE done = 0 ORDER BY id"
        };
        let mut stmt = conn.prepare(sql)?;

        let rows = stmt.query_map([], |row| {
            Ok(ShoppingItem {
                id: row.get::<_, i64>(0)?,
                name: row.get::<_, String>(1)?,
                quantity: row.get::<_, Option<String>>(2)?,
                done: row.get::<_, i32>(3)? != 0,
            })
        })?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(anyhow::Error::from)
    }

    /// Check off the first open item matching `name` (case-insensitive).
    pub fn mark_done(conn: &Connection, name: &str) -> Result<bool> {
        let id: Option<i64> = conn
            .query_row(
                "SELECT id FROM shopping_items
                 WHERE done = 0 AND lower(name) = lower(?1)
                 ORDER BY id LIMIT 1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        match id {
            None => Ok(false),
            Some(id) => {
                conn.execute(
                    "UPDATE shopping_items SET done = 1 WHERE id = ?1",
                    params![id],
                )?;
                Ok(true)
            }
        }
    }

    pub fn clear_done(conn: &Connection) -> Result<usize> {
        let removed = conn.execute("DELETE FROM shopping_items WHERE done = 1", [])?;
        Ok(removed)
    }

    pub fn count_pending(conn: &Connection) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM shopping_items WHERE done = 0",
            [],
            |row| row.get(0),
        )
        .map_err(anyhow::Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;

    fn conn() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        conn
    }

    #[test]
    fn test_entry_upsert_replaces_same_day() {
        let conn = conn();
        EntryRepo::upsert(&conn, Metric::Water, "2024-03-15", 500.0).unwrap();
        EntryRepo::upsert(&conn, Metric::Water, "2024-03-15", 1200.0).unwrap();

        let entries = EntryRepo::get_all(&conn, Metric::Water).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].value, 1200.0);
        assert_eq!(
            EntryRepo::get_for_date(&conn, Metric::Water, "2024-03-15").unwrap(),
            Some(1200.0)
        );
    }

    #[test]
    fn test_entries_separated_by_metric() {
        let conn = conn();
        EntryRepo::upsert(&conn, Metric::Water, "2024-03-15", 2000.0).unwrap();
        EntryRepo::upsert(&conn, Metric::Weight, "2024-03-15", 71.5).unwrap();

        assert_eq!(EntryRepo::get_all(&conn, Metric::Water).unwrap().len(), 1);
        assert_eq!(
            EntryRepo::get_all(&conn, Metric::Weight).unwrap()[0].value,
            71.5
        );
        assert!(EntryRepo::get_all(&conn, Metric::Meditation).unwrap().is_empty());
    }

    #[test]
    fn test_entry_range_is_ordered() {
        let conn = conn();
        EntryRepo::upsert(&conn, Metric::Meditation, "2024-03-14", 15.0).unwrap();
        EntryRepo::upsert(&conn, Metric::Meditation, "2024-03-10", 10.0).unwrap();
        EntryRepo::upsert(&conn, Metric::Meditation, "2024-03-12", 20.0).unwrap();

        let range =
            EntryRepo::get_range(&conn, Metric::Meditation, "2024-03-11", "2024-03-14").unwrap();
        let dates: Vec<&str> = range.iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-03-12", "2024-03-14"]);
    }

    #[test]
    fn test_menu_set_and_week_ordering() {
        let conn = conn();
        MenuRepo::set(&conn, MenuDay::Wednesday, MealSlot::Dinner, "Lentil soup").unwrap();
        MenuRepo::set(&conn, MenuDay::Monday, MealSlot::Lunch, "Quinoa bowl").unwrap();
        MenuRepo::set(&conn, MenuDay::Monday, MealSlot::Breakfast, "Oatmeal").unwrap();

        let week = MenuRepo::get_week(&conn).unwrap();
        let labels: Vec<String> = week
            .iter()
            .map(|m| format!("{} {}", m.day.as_str(), m.slot.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec!["monday breakfast", "monday lunch", "wednesday dinner"]
        );
    }

    #[test]
    fn test_menu_set_replaces_slot() {
        let conn = conn();
        MenuRepo::set(&conn, MenuDay::Friday, MealSlot::Dinner, "Pizza").unwrap();
        MenuRepo::set(&conn, MenuDay::Friday, MealSlot::Dinner, "Grilled salmon").unwrap();

        let week = MenuRepo::get_week(&conn).unwrap();
        assert_eq!(week.len(), 1);
        assert_eq!(week[0].dish, "Grilled salmon");
    }

    #[test]
    fn test_menu_unset() {
        let conn = conn();
        MenuRepo::set(&conn, MenuDay::Friday, MealSlot::Lunch, "Salad").unwrap();
        assert!(MenuRepo::unset(&conn, MenuDay::Friday, MealSlot::Lunch).unwrap());
        assert!(!MenuRepo::unset(&conn, MenuDay::Friday, MealSlot::Lunch).unwrap());
        assert!(MenuRepo::get_week(&conn).unwrap().is_empty());
    }

    #[test]
    fn test_shopping_flow() {
        let conn = conn();
        ShoppingRepo::add(&conn, "Spinach", Some("2 bags")).unwrap();
        ShoppingRepo::add(&conn, "Oats", None).unwrap();
        assert_eq!(ShoppingRepo::count_pending(&conn).unwrap(), 2);

        assert!(ShoppingRepo::mark_done(&conn, "spinach").unwrap());
        assert!(!ShoppingRepo::mark_done(&conn, "spinach").unwrap());
        assert_eq!(ShoppingRepo::count_pending(&conn).unwrap(), 1);

        let open = ShoppingRepo::list(&conn, false).unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].name, "Oats");

        let all = ShoppingRepo::list(&conn, true).unwrap();
        assert_eq!(all.len(), 2);

        assert_eq!(ShoppingRepo::clear_done(&conn).unwrap(), 1);
        assert_eq!(ShoppingRepo::list(&conn, true).unwrap().len(), 1);
    }
}
