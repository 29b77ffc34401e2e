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


use quizapp_core::bank::QuestionBank;
use quizapp_core::error::Fallible;
use quizapp_core::prepare::prepare_questions;
use quizapp_core::types::seed::Seed;

use crate::bank::load_bank;

pub fn check_bank(bank: Option<String>, seed: Option<u32>) -> Fallible<()> {
    let bank = load_bank(bank.as_deref())?;
    println!("{} questions OK.", bank.len());
    if let Some(seed) = seed {
        for line in question_order(&bank, Seed::new(seed)) {
            println!("{line}");
        }
    }
    Ok(())
}

/// One line per question, in the order the seed presents them.
fn question_order(bank: &QuestionBank, seed: Seed) -> Vec<String> {
    prepare_questions(bank, seed)
        .iter()
        .enumerate()
        .map(|(position, question)| {
            let correct = match question.correct_index_shuffled {
                Some(index) => index.to_string(),
                None => "missing".to_string(),
            };
            format!("{:>3}. question {} (correct option: {correct})", position + 1, question.id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_builtin() -> Fallible<()> {
        check_bank(None, Some(12345))
    }

    #[test]
    fn test_check_missing_bank() {
        assert!(check_bank(Some("./derpherp".to_string()), None).is_err());
    }

    #[test]
    fn test_question_order() -> Fallible<()> {
        let bank = QuestionBank::builtin()?;
        let lines = question_order(&bank, Seed::new(12345));
        assert_eq!(lines.len(), 15);
        assert_eq!(lines[0], "  1. question 9 (correct option: 1)");
        assert_eq!(lines[14], " 15. question 15 (correct option: 1)");
        Ok(())
    }
}
