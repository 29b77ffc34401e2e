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

//! WASM bindings for quizapp - runs the quiz session in the browser.
//!
//! The page renders screens and owns the `setTimeout` countdown; every user
//! gesture is forwarded to a [`QuizApp`] method. Times are passed in as
//! `Date.now()` milliseconds.

use wasm_bindgen::prelude::*;
use web_sys::console;

use quizapp_core::bank::QuestionBank;
use quizapp_core::countdown::TimerToken;
use quizapp_core::export::Region;
use quizapp_core::session::Advance;
use quizapp_core::session::QuizSession;
use quizapp_core::store::KeyValueStore;
use quizapp_core::store::THEME_KEY;
use quizapp_core::types::seed::Seed;
use quizapp_core::types::timestamp::Timestamp;

mod export;
mod storage;

use storage::LocalStorage;

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console::log_1(&"quizapp WASM initialized".into());
}

fn to_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn timestamp(now_ms: f64) -> Result<Timestamp, JsValue> {
    Timestamp::from_millis(now_ms as i64)
        .ok_or_else(|| JsValue::from_str(&format!("Invalid time: {now_ms}")))
}

fn token_to_js(token: TimerToken) -> f64 {
    token.value() as f64
}

/// A random seed from the browser's crypto source, if available.
fn random_seed() -> Option<Seed> {
    let mut buf = [0u8; 4];
    getrandom::getrandom(&mut buf).ok()?;
    Some(Seed::new(u32::from_le_bytes(buf)))
}

/// The quiz session managed from JavaScript.
#[wasm_bindgen]
pub struct QuizApp {
    session: QuizSession<LocalStorage>,
}

#[wasm_bindgen]
impl QuizApp {
    /// Create an app over the built-in question bank, or over `bank_json`
    /// (a JSON array of questions) when given.
    #[wasm_bindgen(constructor)]
    pub fn new(
        bank_json: Option<String>,
        seconds_per_question: Option<u32>,
    ) -> Result<QuizApp, JsValue> {
        let bank = match bank_json {
            Some(json) => QuestionBank::from_json(&json),
            None => QuestionBank::builtin(),
        }
        .map_err(to_js)?;
        let mut session = QuizSession::new(bank, LocalStorage::new());
        if let Some(seconds) = seconds_per_question {
            session = session.with_seconds_per_question(seconds);
        }
        Ok(Self { session })
    }

    /// The lifecycle phase as JSON, e.g. `{"phase":"inProgress"}`.
    #[wasm_bindgen]
    pub fn phase(&self) -> String {
        serde_json::to_string(&self.session.phase()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Start a new attempt. Returns the countdown token.
    #[wasm_bindgen]
    pub fn start(&mut self, name: &str, email: &str, now_ms: f64) -> Result<f64, JsValue> {
        let now = timestamp(now_ms)?;
        let token = match random_seed() {
            Some(seed) => self.session.start_with_seed(name, email, seed, now),
            None => self.session.start(name, email, now),
        }
        .map_err(to_js)?;
        Ok(token_to_js(token))
    }

    #[wasm_bindgen]
    pub fn select(&mut self, index: usize) -> Result<(), JsValue> {
        self.session.select(index).map_err(to_js)
    }

    /// Submit the staged option. Returns the next countdown token, or
    /// `undefined` when the quiz is complete.
    #[wasm_bindgen]
    pub fn next(&mut self, now_ms: f64) -> Result<Option<f64>, JsValue> {
        let now = timestamp(now_ms)?;
        let staged = self.session.staged();
        let advance = self.session.submit_answer(staged, now).map_err(to_js)?;
        Ok(advance_to_js(advance))
    }

    /// Returns the new countdown token, or `undefined` on the first question.
    #[wasm_bindgen]
    pub fn previous(&mut self, now_ms: f64) -> Result<Option<f64>, JsValue> {
        let now = timestamp(now_ms)?;
        Ok(self.session.go_to_previous(now).map(token_to_js))
    }

    /// Called from the countdown's `setTimeout`. Returns `true` if the
    /// session advanced, `false` if the token was stale.
    #[wasm_bindgen]
    pub fn time_expired(&mut self, token: f64, now_ms: f64) -> Result<bool, JsValue> {
        let now = timestamp(now_ms)?;
        let advanced = self
            .session
            .time_expired(TimerToken::new(token as u64), now)
            .map_err(to_js)?;
        Ok(advanced.is_some())
    }

    /// Leave mid-quiz. Returns the `score/answered` text for the exit screen.
    #[wasm_bindgen]
    pub fn exit(&mut self) -> String {
        self.session.exit();
        self.session
            .exit_summary()
            .map(|s| s.to_string())
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn has_saved_progress(&self) -> bool {
        self.session.has_saved_progress()
    }

    /// Resume from localStorage. Returns the countdown token, or `undefined`
    /// if nothing was saved. A corrupt snapshot is discarded and reported as
    /// an error.
    #[wasm_bindgen]
    pub fn resume(&mut self, now_ms: f64) -> Result<Option<f64>, JsValue> {
        let now = timestamp(now_ms)?;
        let token = self.session.resume_saved(now).map_err(to_js)?;
        Ok(token.map(token_to_js))
    }

    #[wasm_bindgen]
    pub fn go_home(&mut self) {
        self.session.go_home();
    }

    #[wasm_bindgen]
    pub fn clear_progress(&mut self) {
        self.session.clear_progress();
    }

    #[wasm_bindgen]
    pub fn show_report(&mut self) -> Result<(), JsValue> {
        self.session.show_report().map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn close_report(&mut self, now_ms: f64) -> Result<Option<f64>, JsValue> {
        let now = timestamp(now_ms)?;
        Ok(self.session.close_report(now).map(token_to_js))
    }

    /// The full report as JSON.
    #[wasm_bindgen]
    pub fn report(&self) -> Result<Option<String>, JsValue> {
        self.session
            .report()
            .map(|r| serde_json::to_string(&r).map_err(to_js))
            .transpose()
    }

    /// The question on screen as JSON.
    #[wasm_bindgen]
    pub fn current_question(&self) -> Result<Option<String>, JsValue> {
        self.session
            .current_question()
            .map(|q| serde_json::to_string(q).map_err(to_js))
            .transpose()
    }

    #[wasm_bindgen]
    pub fn user(&self) -> Result<Option<String>, JsValue> {
        self.session
            .user()
            .map(|u| serde_json::to_string(u).map_err(to_js))
            .transpose()
    }

    #[wasm_bindgen]
    pub fn current_index(&self) -> usize {
        self.session.current_index()
    }

    #[wasm_bindgen]
    pub fn total_questions(&self) -> usize {
        self.session.total_questions()
    }

    #[wasm_bindgen]
    pub fn score(&self) -> usize {
        self.session.score()
    }

    #[wasm_bindgen]
    pub fn staged(&self) -> Option<usize> {
        self.session.staged()
    }

    #[wasm_bindgen]
    pub fn can_advance(&self) -> bool {
        self.session.can_advance()
    }

    #[wasm_bindgen]
    pub fn can_go_back(&self) -> bool {
        self.session.can_go_back()
    }

    #[wasm_bindgen]
    pub fn seconds_per_question(&self) -> u32 {
        self.session.seconds_per_question()
    }

    #[wasm_bindgen]
    pub fn remaining_seconds(&self, now_ms: f64) -> Result<u32, JsValue> {
        Ok(self.session.remaining_seconds(timestamp(now_ms)?))
    }

    /// Seconds spent on the current question so far.
    #[wasm_bindgen]
    pub fn elapsed_seconds(&self, now_ms: f64) -> Result<u32, JsValue> {
        Ok(self.session.elapsed_seconds(timestamp(now_ms)?))
    }

    #[wasm_bindgen]
    pub fn timer_token(&self) -> Option<f64> {
        self.session.timer_token().map(token_to_js)
    }
}

fn advance_to_js(advance: Advance) -> Option<f64> {
    match advance {
        Advance::Next(token) => Some(token_to_js(token)),
        Advance::Completed => None,
    }
}

/// The saved `"dark"`/`"light"` preference, if any.
#[wasm_bindgen]
pub fn load_theme() -> Option<String> {
    LocalStorage::new().get(THEME_KEY).unwrap_or_else(|e| {
        console::warn_1(&e.to_string().into());
        None
    })
}

#[wasm_bindgen]
pub fn save_theme(theme: &str) {
    if let Err(e) = LocalStorage::new().set(THEME_KEY, theme) {
        console::warn_1(&e.to_string().into());
    }
}

/// Capture the end-screen score card. With `share`, tries the share sheet
/// first. Resolves to the outcome as JSON (`{"outcome": ..., "notice": ...}`).
#[wasm_bindgen]
pub async fn export_result(share: bool) -> Result<String, JsValue> {
    let outcome = export::export(Region::FinalResult, share).await;
    serde_json::to_string(&outcome).map_err(to_js)
}

/// Capture the report screen as a download.
#[wasm_bindgen]
pub async fn export_report() -> Result<String, JsValue> {
    let outcome = export::export(Region::Report, false).await;
    serde_json::to_string(&outcome).map_err(to_js)
}
