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

use crate::bank::QuestionBank;
use crate::error::QuizError;
use crate::rng::shuffle;
use crate::types::question::Question;
use crate::types::question::ShuffledQuestion;
use crate::types::seed::Seed;

/// Derive the per-session view of the bank: question order from `seed`,
/// option order from `seed ^ question.id`.
///
/// This is a pure function of its inputs, which is what lets a resumed
/// session rebuild the exact same view from the stored seed.
pub fn prepare_questions(bank: &QuestionBank, seed: Seed) -> Vec<ShuffledQuestion> {
    shuffle(bank.questions(), seed.value())
        .into_iter()
        .map(|q| shuffle_options(q, seed))
        .collect()
}

fn shuffle_options(q: Question, seed: Seed) -> ShuffledQuestion {
    let options_shuffled = shuffle(&q.options, seed.for_question(q.id).value());
    let correct_index_shuffled = match locate_correct(&q, &options_shuffled) {
        Ok(index) => Some(index),
        Err(e) => {
            log::warn!("{e}");
            None
        }
    };
    ShuffledQuestion {
        id: q.id,
        question: q.question,
        options_shuffled,
        correct_index_shuffled,
    }
}

// By text, not by index: only positions move.
fn locate_correct(q: &Question, options_shuffled: &[String]) -> Result<usize, QuizError> {
    let correct = q.correct_text().ok_or_else(|| {
        QuizError::NotFound(format!("question {} has no correct option", q.id))
    })?;
    options_shuffled
        .iter()
        .position(|opt| opt == correct)
        .ok_or_else(|| {
            QuizError::NotFound(format!(
                "correct option of question {} missing after shuffle",
                q.id
            ))
        })
}
