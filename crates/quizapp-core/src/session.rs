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

//! The quiz session state machine.
//!
//! ```text
//! NotStarted --start--> InProgress --last answer--> Completed
//!                           |  ^
//!                      exit |  | resume (from the stored snapshot)
//!                           v  |
//!                       ExitedPartial
//! ```
//!
//! `Reporting` can be entered from `InProgress` or `Completed` and returns
//! to where it came from. `reset`/`go_home` go back to `NotStarted` from
//! anywhere.
//!
//! Every method takes the current time from the caller, so the machine is
//! fully deterministic under test.

use serde::Serialize;

use crate::bank::QuestionBank;
use crate::countdown::Countdown;
use crate::countdown::TimerToken;
use crate::error::Fallible;
use crate::error::QuizError;
use crate::prepare::prepare_questions;
use crate::report::ExitSummary;
use crate::report::Report;
use crate::report::passed;
use crate::snapshot::SessionSnapshot;
use crate::store::KeyValueStore;
use crate::store::PROGRESS_KEY;
use crate::types::answer::Answer;
use crate::types::answer::AnswerSheet;
use crate::types::question::ShuffledQuestion;
use crate::types::seed::Seed;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum Phase {
    NotStarted,
    InProgress,
    /// Viewing the report. `completed` records which phase to return to.
    Reporting { completed: bool },
    Completed,
    ExitedPartial,
}

/// What happened after an answer was submitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the next question; its countdown has started.
    Next(TimerToken),
    /// That was the last question.
    Completed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct User {
    pub name: String,
    pub email: String,
}

/// Everything belonging to one attempt. Survives completion so the report
/// can still be shown, and is dropped on reset.
#[derive(Clone, Debug)]
struct Progress {
    seed: Seed,
    user: User,
    questions: Vec<ShuffledQuestion>,
    current: usize,
    answers: AnswerSheet,
    per_question_times: Vec<u32>,
    total_time_seconds: u64,
    /// The option currently selected on screen, not yet submitted.
    staged: Option<usize>,
}

impl Progress {
    fn current_question(&self) -> Option<&ShuffledQuestion> {
        self.questions.get(self.current)
    }

    /// Pre-select whatever was answered earlier for the current question.
    fn restage(&mut self) {
        self.staged = self
            .current_question()
            .and_then(|q| self.answers.get(q.id))
            .and_then(|a| a.selected_answer);
    }
}

pub struct QuizSession<S: KeyValueStore> {
    bank: QuestionBank,
    store: S,
    countdown: Countdown,
    phase: Phase,
    progress: Option<Progress>,
}

impl<S: KeyValueStore> QuizSession<S> {
    pub fn new(bank: QuestionBank, store: S) -> Self {
        Self {
            bank,
            store,
            countdown: Countdown::default(),
            phase: Phase::NotStarted,
            progress: None,
        }
    }

    /// Override the per-question time limit.
    pub fn with_seconds_per_question(mut self, seconds: u32) -> Self {
        self.countdown = Countdown::new(seconds);
        self
    }

    // Projections for the presentation layer.

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn seconds_per_question(&self) -> u32 {
        self.countdown.seconds()
    }

    pub fn user(&self) -> Option<&User> {
        self.progress.as_ref().map(|p| &p.user)
    }

    pub fn seed(&self) -> Option<Seed> {
        self.progress.as_ref().map(|p| p.seed)
    }

    pub fn questions(&self) -> &[ShuffledQuestion] {
        match &self.progress {
            Some(p) => &p.questions,
            None => &[],
        }
    }

    pub fn total_questions(&self) -> usize {
        self.questions().len()
    }

    pub fn current_index(&self) -> usize {
        self.progress.as_ref().map(|p| p.current).unwrap_or(0)
    }

    /// The question on screen. `None` unless the quiz is in progress.
    pub fn current_question(&self) -> Option<&ShuffledQuestion> {
        match self.phase {
            Phase::InProgress => self.progress.as_ref()?.current_question(),
            _ => None,
        }
    }

    pub fn staged(&self) -> Option<usize> {
        self.progress.as_ref().and_then(|p| p.staged)
    }

    /// "Next" is only enabled once an option is selected.
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::InProgress && self.staged().is_some()
    }

    pub fn can_go_back(&self) -> bool {
        self.phase == Phase::InProgress && self.current_index() > 0
    }

    pub fn answers(&self) -> &[Answer] {
        match &self.progress {
            Some(p) => p.answers.as_slice(),
            None => &[],
        }
    }

    /// Always recomputed from the answers.
    pub fn score(&self) -> usize {
        self.progress.as_ref().map(|p| p.answers.score()).unwrap_or(0)
    }

    pub fn per_question_times(&self) -> &[u32] {
        match &self.progress {
            Some(p) => &p.per_question_times,
            None => &[],
        }
    }

    pub fn total_time_seconds(&self) -> u64 {
        self.progress
            .as_ref()
            .map(|p| p.total_time_seconds)
            .unwrap_or(0)
    }

    pub fn timer_token(&self) -> Option<TimerToken> {
        self.countdown.token()
    }

    pub fn remaining_seconds(&self, now: Timestamp) -> u32 {
        self.countdown.remaining_seconds(now)
    }

    pub fn elapsed_seconds(&self, now: Timestamp) -> u32 {
        self.countdown.elapsed_seconds(now)
    }

    pub fn passed(&self) -> Option<bool> {
        self.progress
            .as_ref()
            .map(|p| passed(p.answers.score(), p.questions.len()))
    }

    pub fn report(&self) -> Option<Report> {
        self.progress.as_ref().map(|p| {
            Report::build(
                &p.questions,
                &p.answers,
                &p.per_question_times,
                p.total_time_seconds,
            )
        })
    }

    pub fn exit_summary(&self) -> Option<ExitSummary> {
        self.progress.as_ref().map(|p| ExitSummary {
            score: p.answers.score(),
            answered: p.answers.len(),
        })
    }

    /// The snapshot that would be persisted right now.
    pub fn snapshot(&self, now: Timestamp) -> Option<SessionSnapshot> {
        self.progress.as_ref().map(|p| SessionSnapshot {
            seed: p.seed,
            current_question_index: p.current,
            score: p.answers.score(),
            answers: p.answers.as_slice().to_vec(),
            total_time_seconds: p.total_time_seconds,
            per_question_times: p.per_question_times.clone(),
            user_name: p.user.name.clone(),
            user_email: p.user.email.clone(),
            saved_at: Some(now),
        })
    }

    // Transitions.

    /// Start a new attempt with a time-based seed.
    pub fn start(
        &mut self,
        name: &str,
        email: &str,
        now: Timestamp,
    ) -> Result<TimerToken, QuizError> {
        self.start_with_seed(name, email, Seed::from_timestamp(now), now)
    }

    pub fn start_with_seed(
        &mut self,
        name: &str,
        email: &str,
        seed: Seed,
        now: Timestamp,
    ) -> Result<TimerToken, QuizError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return Err(QuizError::Validation(
                "Please enter both name and email.".to_string(),
            ));
        }
        let progress = Progress {
            seed,
            user: User {
                name: name.to_string(),
                email: email.to_string(),
            },
            questions: prepare_questions(&self.bank, seed),
            current: 0,
            answers: AnswerSheet::new(),
            per_question_times: Vec::new(),
            total_time_seconds: 0,
            staged: None,
        };
        log::debug!("Starting quiz with seed {}", seed.value());
        self.progress = Some(progress);
        self.phase = Phase::InProgress;
        let token = self.countdown.restart(now);
        self.persist(now);
        Ok(token)
    }

    /// Stage an option for the current question without submitting it.
    pub fn select(&mut self, index: usize) -> Result<(), QuizError> {
        let progress = self.in_progress_mut()?;
        let count = progress
            .current_question()
            .map(|q| q.option_count())
            .unwrap_or(0);
        if index >= count {
            return Err(QuizError::Validation(format!(
                "option {index} does not exist."
            )));
        }
        progress.staged = Some(index);
        Ok(())
    }

    /// Record the answer for the current question and move on.
    pub fn submit_answer(
        &mut self,
        selected: Option<usize>,
        now: Timestamp,
    ) -> Result<Advance, QuizError> {
        let elapsed = self.countdown.elapsed_seconds(now);
        let progress = self.in_progress_mut()?;
        let question = progress
            .current_question()
            .ok_or_else(|| QuizError::NotFound("no current question".to_string()))?;
        if let Some(index) = selected {
            if index >= question.option_count() {
                return Err(QuizError::Validation(format!(
                    "option {index} does not exist."
                )));
            }
        }
        let answer = Answer {
            question_id: question.id,
            selected_answer: selected,
            is_correct: question.is_correct(selected),
        };
        progress.answers.record(answer);
        progress.per_question_times.push(elapsed);
        progress.total_time_seconds += u64::from(elapsed);
        progress.current += 1;
        let completed = progress.current >= progress.questions.len();
        if completed {
            log::debug!(
                "Quiz completed with score {}/{}",
                progress.answers.score(),
                progress.questions.len()
            );
            progress.staged = None;
        } else {
            progress.restage();
        }

        self.countdown.stop();
        if completed {
            self.phase = Phase::Completed;
            self.forget();
            Ok(Advance::Completed)
        } else {
            let token = self.countdown.restart(now);
            self.persist(now);
            Ok(Advance::Next(token))
        }
    }

    /// Go back one question. Does nothing on the first question.
    pub fn go_to_previous(&mut self, now: Timestamp) -> Option<TimerToken> {
        if self.phase != Phase::InProgress {
            return None;
        }
        let progress = self.progress.as_mut()?;
        if progress.current == 0 {
            return None;
        }
        progress.current -= 1;
        progress.restage();
        let token = self.countdown.restart(now);
        self.persist(now);
        Some(token)
    }

    /// The countdown ran out. Submits whatever is staged, exactly like a
    /// manual "next". Returns `None` for a stale token.
    pub fn time_expired(
        &mut self,
        token: TimerToken,
        now: Timestamp,
    ) -> Result<Option<Advance>, QuizError> {
        self.time_expired_with(token, None, now)
    }

    /// Like [`QuizSession::time_expired`], but first stages `selection`, the
    /// option that was checked on the page when its countdown fired. A stale
    /// token leaves the session untouched, selection included.
    pub fn time_expired_with(
        &mut self,
        token: TimerToken,
        selection: Option<usize>,
        now: Timestamp,
    ) -> Result<Option<Advance>, QuizError> {
        if self.phase != Phase::InProgress || !self.countdown.is_current(token) {
            log::debug!("Ignoring stale timer {}", token.value());
            return Ok(None);
        }
        if let Some(index) = selection {
            self.select(index)?;
        }
        let staged = self.staged();
        self.submit_answer(staged, now).map(Some)
    }

    /// Leave mid-quiz. The stored snapshot is kept so the attempt can be
    /// resumed later.
    pub fn exit(&mut self) {
        if self.phase == Phase::InProgress {
            self.countdown.stop();
            self.phase = Phase::ExitedPartial;
        }
    }

    /// Rebuild a session from a snapshot. The stored seed is reused, so the
    /// question and option order match the original attempt.
    pub fn resume(
        &mut self,
        snapshot: SessionSnapshot,
        now: Timestamp,
    ) -> Result<TimerToken, QuizError> {
        let questions = prepare_questions(&self.bank, snapshot.seed);
        if snapshot.current_question_index >= questions.len() {
            return Err(QuizError::CorruptState(format!(
                "question index {} out of range",
                snapshot.current_question_index
            )));
        }
        let mut answers = AnswerSheet::new();
        for stored in snapshot.answers.iter() {
            let question = questions
                .iter()
                .find(|q| q.id == stored.question_id)
                .ok_or_else(|| {
                    QuizError::CorruptState(format!("unknown question id {}", stored.question_id))
                })?;
            if let Some(index) = stored.selected_answer {
                if index >= question.option_count() {
                    return Err(QuizError::CorruptState(format!(
                        "answer {index} out of range for question {}",
                        question.id
                    )));
                }
            }
            answers.record(Answer {
                question_id: stored.question_id,
                selected_answer: stored.selected_answer,
                is_correct: question.is_correct(stored.selected_answer),
            });
        }
        let mut progress = Progress {
            seed: snapshot.seed,
            user: User {
                name: snapshot.user_name,
                email: snapshot.user_email,
            },
            questions,
            current: snapshot.current_question_index,
            answers,
            per_question_times: snapshot.per_question_times,
            total_time_seconds: snapshot.total_time_seconds,
            staged: None,
        };
        progress.restage();
        log::debug!(
            "Resuming quiz with seed {} at question {}",
            progress.seed.value(),
            progress.current
        );
        self.progress = Some(progress);
        self.phase = Phase::InProgress;
        Ok(self.countdown.restart(now))
    }

    /// The stored snapshot, if there is one.
    pub fn saved_snapshot(&self) -> Result<Option<SessionSnapshot>, QuizError> {
        let raw = self.store.get(PROGRESS_KEY).unwrap_or_else(|e| {
            log::warn!("Failed to read saved progress: {e}");
            None
        });
        raw.map(|text| SessionSnapshot::parse(&text)).transpose()
    }

    pub fn has_saved_progress(&self) -> bool {
        matches!(self.store.get(PROGRESS_KEY), Ok(Some(_)))
    }

    /// Resume from the stored snapshot. A corrupt snapshot is discarded and
    /// the error returned, so the caller can fall back to a fresh start.
    pub fn resume_saved(&mut self, now: Timestamp) -> Result<Option<TimerToken>, QuizError> {
        let result = match self.saved_snapshot() {
            Ok(Some(snapshot)) => self.resume(snapshot, now).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            log::warn!("Discarding saved progress: {e}");
            self.forget();
        }
        result
    }

    pub fn show_report(&mut self) -> Result<(), QuizError> {
        let completed = match self.phase {
            Phase::InProgress => false,
            Phase::Completed => true,
            Phase::Reporting { .. } => return Ok(()),
            _ => {
                return Err(QuizError::Validation(
                    "there is no report to show.".to_string(),
                ));
            }
        };
        self.countdown.stop();
        self.phase = Phase::Reporting { completed };
        Ok(())
    }

    /// Leave the report. Returns a fresh countdown if the quiz is still going.
    pub fn close_report(&mut self, now: Timestamp) -> Option<TimerToken> {
        match self.phase {
            Phase::Reporting { completed: true } => {
                self.phase = Phase::Completed;
                None
            }
            Phase::Reporting { completed: false } => {
                self.phase = Phase::InProgress;
                Some(self.countdown.restart(now))
            }
            _ => None,
        }
    }

    /// Drop the session in memory and in storage.
    pub fn reset(&mut self) {
        self.countdown.stop();
        self.progress = None;
        self.phase = Phase::NotStarted;
        self.forget();
    }

    pub fn go_home(&mut self) {
        self.reset();
    }

    /// Forget the stored snapshot but keep the session in memory.
    pub fn clear_progress(&mut self) {
        self.forget();
    }

    // Helpers.

    fn in_progress_mut(&mut self) -> Result<&mut Progress, QuizError> {
        match (self.phase, self.progress.as_mut()) {
            (Phase::InProgress, Some(p)) => Ok(p),
            _ => Err(QuizError::Validation(
                "no question is in progress.".to_string(),
            )),
        }
    }

    fn persist(&mut self, now: Timestamp) {
        let Some(snapshot) = self.snapshot(now) else {
            return;
        };
        if let Err(e) = self.write_snapshot(&snapshot) {
            log::warn!("Failed to save progress: {e}");
        }
    }

    fn write_snapshot(&mut self, snapshot: &SessionSnapshot) -> Fallible<()> {
        let json = snapshot.to_json()?;
        self.store.set(PROGRESS_KEY, &json)
    }

    fn forget(&mut self) {
        if let Err(e) = self.store.remove(PROGRESS_KEY) {
            log::warn!("Failed to clear saved progress: {e}");
        }
    }
}
