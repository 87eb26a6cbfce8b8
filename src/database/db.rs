//! Database operations for the character practice app.
//!
//! The whole category store is persisted as one JSON document in a single
//! row of the `app_state` table, written back after every mutation and read
//! once at startup.

use crate::models::CategoryStore;
use rusqlite::{Connection, OptionalExtension, Result, params};

const STORE_KEY: &str = "categories";

/// Outcome of reading the persisted slot. Anything short of a clean decode
/// degrades to an empty store; `Corrupt` carries the decode error so the
/// caller can log it.
#[derive(Debug)]
pub enum StoreLoad {
    Loaded(CategoryStore),
    Empty,
    Corrupt(serde_json::Error),
}

impl StoreLoad {
    pub fn into_store(self) -> CategoryStore {
        match self {
            StoreLoad::Loaded(store) => store,
            StoreLoad::Empty | StoreLoad::Corrupt(_) => CategoryStore::new(),
        }
    }
}

/// Opens the database file and makes sure the schema exists.
pub fn init_database() -> Result<Connection> {
    let conn = Connection::open("hanzi.sqlite3")?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates the key/value state table.
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS app_state (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        (),
    )?;
    Ok(())
}

/// Reads the persisted category store. Called once at startup.
pub fn load_store(conn: &Connection) -> StoreLoad {
    let slot: Option<String> = match conn
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1",
            params![STORE_KEY],
            |row| row.get(0),
        )
        .optional()
    {
        Ok(slot) => slot,
        Err(e) => {
            eprintln!("Failed to read saved categories: {e}");
            return StoreLoad::Empty;
        }
    };

    match slot {
        None => StoreLoad::Empty,
        Some(json) => match serde_json::from_str(&json) {
            Ok(store) => StoreLoad::Loaded(store),
            Err(e) => StoreLoad::Corrupt(e),
        },
    }
}

/// Writes the whole store back to its slot, replacing the previous value.
pub fn save_store(store: &CategoryStore, conn: &Connection) -> Result<()> {
    let json = serde_json::to_string(store)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

    conn.execute(
        "INSERT OR REPLACE INTO app_state (key, value) VALUES (?1, ?2)",
        params![STORE_KEY, json],
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Flashcard;

    fn test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn
    }

    #[test]
    fn test_load_from_empty_database() {
        let conn = test_connection();

        assert!(matches!(load_store(&conn), StoreLoad::Empty));
        assert!(load_store(&conn).into_store().is_empty());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let conn = test_connection();

        let mut store = CategoryStore::new();
        store.create_category("Animals");
        store
            .add_card("Animals", Flashcard::new("dog", "gǒu", "狗"))
            .unwrap();
        store.create_category("Food");

        save_store(&store, &conn).unwrap();

        match load_store(&conn) {
            StoreLoad::Loaded(loaded) => assert_eq!(loaded, store),
            other => panic!("expected Loaded, got {other:?}"),
        }
    }

    #[test]
    fn test_save_overwrites_previous_slot() {
        let conn = test_connection();

        let mut store = CategoryStore::new();
        store.create_category("Animals");
        save_store(&store, &conn).unwrap();

        store
            .add_card("Animals", Flashcard::new("dog", "gǒu", "狗"))
            .unwrap();
        save_store(&store, &conn).unwrap();

        let loaded = load_store(&conn).into_store();
        assert_eq!(loaded.get_cards("Animals").len(), 1);
    }

    #[test]
    fn test_malformed_slot_reports_corrupt() {
        let conn = test_connection();
        conn.execute(
            "INSERT INTO app_state (key, value) VALUES ('categories', '{not json')",
            (),
        )
        .unwrap();

        let load = load_store(&conn);
        assert!(matches!(load, StoreLoad::Corrupt(_)));
        assert!(load.into_store().is_empty());
    }

    #[test]
    fn test_pre_pinyin_slot_still_loads() {
        let conn = test_connection();
        conn.execute(
            r#"INSERT INTO app_state (key, value)
               VALUES ('categories', '{"Animals":[{"english":"dog","chinese":"狗"}]}')"#,
            (),
        )
        .unwrap();

        let loaded = load_store(&conn).into_store();
        let cards = loaded.get_cards("Animals");
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].pinyin, "");
    }
}
