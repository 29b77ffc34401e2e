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

//! The question bank: a validated, read-only list of questions.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::question::Question;
use crate::types::question::QuestionId;

const DEFAULT_BANK: &str = include_str!("default_bank.toml");

/// The on-disk TOML layout: a list of `[[questions]]` tables.
#[derive(Debug, Deserialize)]
struct BankFile {
    questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Validate and wrap a list of questions.
    pub fn new(questions: Vec<Question>) -> Fallible<Self> {
        if questions.is_empty() {
            return fail("question bank is empty.");
        }
        let mut seen: HashSet<QuestionId> = HashSet::new();
        for q in questions.iter() {
            if !seen.insert(q.id) {
                return fail(format!("duplicate question id: {}.", q.id));
            }
            if q.question.trim().is_empty() {
                return fail(format!("question {} has no text.", q.id));
            }
            if q.options.len() < 2 {
                return fail(format!("question {} needs at least two options.", q.id));
            }
            if q.correct_answer >= q.options.len() {
                return fail(format!(
                    "question {} has correct answer {} but only {} options.",
                    q.id,
                    q.correct_answer,
                    q.options.len()
                ));
            }
        }
        Ok(Self { questions })
    }

    /// The built-in bank of fifteen web-basics questions.
    pub fn builtin() -> Fallible<Self> {
        Self::from_toml(DEFAULT_BANK)
    }

    pub fn from_toml(text: &str) -> Fallible<Self> {
        let file: BankFile = toml::from_str(text)?;
        Self::new(file.questions)
    }

    /// Parse a JSON array of questions.
    pub fn from_json(text: &str) -> Fallible<Self> {
        let questions: Vec<Question> = serde_json::from_str(text)?;
        Self::new(questions)
    }

    /// Combine several banks into one. Ids must stay unique across all of them.
    pub fn merge(banks: impl IntoIterator<Item = QuestionBank>) -> Fallible<Self> {
        let questions: Vec<Question> = banks.into_iter().flat_map(|b| b.questions).collect();
        Self::new(questions)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
