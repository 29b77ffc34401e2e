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


use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use quizapp_core::session::QuizSession;

use crate::db::SqliteStore;

#[derive(Clone)]
pub struct ServerState {
    pub mutable: Arc<Mutex<MutableState>>,
}

pub struct MutableState {
    pub session: QuizSession<SqliteStore>,
    /// Shown once on the next page render, then cleared.
    pub notice: Option<String>,
}

impl ServerState {
    pub fn new(session: QuizSession<SqliteStore>) -> Self {
        Self {
            mutable: Arc::new(Mutex::new(MutableState {
                session,
                notice: None,
            })),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, MutableState> {
        self.mutable.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
