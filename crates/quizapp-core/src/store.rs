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

//! The persistence seam: a string key-value store.

use std::collections::HashMap;

use crate::error::Fallible;

/// Key under which the in-progress session snapshot is stored.
pub const PROGRESS_KEY: &str = "quizapp_progress_v1";

/// Key reserved for the front-end's theme preference. The core never reads
/// or writes it, but must never collide with it.
pub const THEME_KEY: &str = "quizapp_theme_v1";

/// Durable storage for the session snapshot. Implemented by browser
/// localStorage, SQLite, and an in-memory map.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Fallible<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Fallible<()>;
    fn remove(&mut self, key: &str) -> Fallible<()>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Fallible<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Fallible<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Fallible<()> {
        self.entries.remove(key);
        Ok(())
    }
}
