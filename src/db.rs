// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::Path;

use quizapp_core::error::ErrorReport;
use quizapp_core::error::Fallible;
use quizapp_core::store::KeyValueStore;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::params;

/// A SQLite-backed key-value store holding the saved session.
pub struct SqliteStore {
    conn: Connection,
}

fn sql_error(err: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!("SQLite error: {err}"))
}

impl SqliteStore {
    pub fn open(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(sql_error)?;
        Self::init(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(sql_error)?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Fallible<Self> {
        conn.execute_batch(
            "create table if not exists kv (
                key text primary key,
                value text not null
            );",
        )
        .map_err(sql_error)?;
        Ok(Self { conn })
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        self.conn
            .query_row("select value from kv where key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(sql_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        self.conn
            .execute(
                "insert into kv (key, value) values (?1, ?2)
                 on conflict(key) do update set value = excluded.value",
                params![key, value],
            )
            .map_err(sql_error)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        self.conn
            .execute("delete from kv where key = ?1", params![key])
            .map_err(sql_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use quizapp_core::store::PROGRESS_KEY;
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_get_set_remove() -> Fallible<()> {
        let mut store = SqliteStore::in_memory()?;
        assert_eq!(store.get(PROGRESS_KEY)?, None);
        store.set(PROGRESS_KEY, "{\"seed\":1}")?;
        store.set(PROGRESS_KEY, "{\"seed\":2}")?;
        assert_eq!(store.get(PROGRESS_KEY)?, Some("{\"seed\":2}".to_string()));
        store.remove(PROGRESS_KEY)?;
        assert_eq!(store.get(PROGRESS_KEY)?, None);
        Ok(())
    }

    #[test]
    fn test_survives_reopen() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("quizapp.db");
        {
            let mut store = SqliteStore::open(&path)?;
            store.set("k", "v")?;
        }
        let store = SqliteStore::open(&path)?;
        assert_eq!(store.get("k")?, Some("v".to_string()));
        Ok(())
    }
}
