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

use quizapp_core::error::Fallible;
use quizapp_core::store::KeyValueStore;
use quizapp_core::store::PROGRESS_KEY;

use crate::db::SqliteStore;

pub fn clear_progress(db: &str) -> Fallible<()> {
    let mut store = SqliteStore::open(Path::new(db))?;
    if store.get(PROGRESS_KEY)?.is_some() {
        store.remove(PROGRESS_KEY)?;
        println!("Saved progress deleted.");
    } else {
        println!("No saved progress.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_directory;

    #[test]
    fn test_clear_progress() -> Fallible<()> {
        let path = create_tmp_directory()?.join("quizapp.db");
        {
            let mut store = SqliteStore::open(&path)?;
            store.set(PROGRESS_KEY, "{\"seed\":1}")?;
        }
        clear_progress(&path.display().to_string())?;
        let store = SqliteStore::open(&path)?;
        assert_eq!(store.get(PROGRESS_KEY)?, None);
        // Clearing again is fine.
        clear_progress(&path.display().to_string())
    }
}
