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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

use crate::types::answer::AnswerSheet;
use crate::types::question::ShuffledQuestion;

/// Minimum score to pass: half the questions, rounded up.
pub fn pass_threshold(total: usize) -> usize {
    total.div_ceil(2)
}

pub fn passed(score: usize, total: usize) -> bool {
    score >= pass_threshold(total)
}

/// `"{m}m {s}s"` from one minute up, `"{s}s"` below.
pub fn format_time(seconds: u64) -> String {
    let minutes = seconds / 60;
    let rem = seconds % 60;
    if minutes > 0 {
        format!("{minutes}m {rem}s")
    } else {
        format!("{seconds}s")
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub score: usize,
    pub total: usize,
    pub passed: bool,
    pub percentage_correct: u32,
    pub average_time_seconds: u32,
    pub total_time_seconds: u64,
    pub reviews: Vec<QuestionReview>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionReview {
    /// 1-based position in the session.
    pub number: usize,
    pub question: String,
    pub answered: bool,
    pub is_correct: bool,
    pub options: Vec<OptionReview>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionReview {
    /// `A`, `B`, `C`, ...
    pub label: char,
    pub text: String,
    pub is_correct_answer: bool,
    /// The user picked this option and it was wrong.
    pub is_wrong_selection: bool,
}

impl Report {
    pub fn build(
        questions: &[ShuffledQuestion],
        answers: &AnswerSheet,
        per_question_times: &[u32],
        total_time_seconds: u64,
    ) -> Self {
        let score = answers.score();
        let total = questions.len();
        let percentage_correct = if total == 0 {
            0
        } else {
            (score as f64 / total as f64 * 100.0).round() as u32
        };
        let average_time_seconds = if per_question_times.is_empty() {
            0
        } else {
            (total_time_seconds as f64 / per_question_times.len() as f64).round() as u32
        };
        let reviews = questions
            .iter()
            .enumerate()
            .map(|(idx, q)| review(idx + 1, q, answers))
            .collect();
        Report {
            score,
            total,
            passed: passed(score, total),
            percentage_correct,
            average_time_seconds,
            total_time_seconds,
            reviews,
        }
    }

    pub fn score_text(&self) -> String {
        format!("{}/{}", self.score, self.total)
    }

    pub fn verdict(&self) -> &'static str {
        if self.passed {
            "Passed"
        } else {
            "Needs Improvement"
        }
    }
}

fn review(number: usize, q: &ShuffledQuestion, answers: &AnswerSheet) -> QuestionReview {
    let answer = answers.get(q.id);
    let selected = answer.and_then(|a| a.selected_answer);
    let is_correct = answer.map(|a| a.is_correct).unwrap_or(false);
    let options = q
        .options_shuffled
        .iter()
        .enumerate()
        .map(|(idx, text)| OptionReview {
            label: option_label(idx),
            text: text.clone(),
            is_correct_answer: q.correct_index_shuffled == Some(idx),
            is_wrong_selection: selected == Some(idx) && !is_correct,
        })
        .collect();
    QuestionReview {
        number,
        question: q.question.clone(),
        answered: selected.is_some(),
        is_correct,
        options,
    }
}

/// `A`, `B`, `C`...
pub fn option_label(idx: usize) -> char {
    u8::try_from(idx)
        .ok()
        .and_then(|i| b'A'.checked_add(i))
        .map(char::from)
        .unwrap_or('?')
}

/// Shown when the user leaves mid-quiz: score over questions answered so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ExitSummary {
    pub score: usize,
    pub answered: usize,
}

impl Display for ExitSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.score, self.answered)
    }
}
