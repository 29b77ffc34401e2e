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

use serde::Deserialize;
use serde::Serialize;

use crate::types::question::QuestionId;

/// The user's response to one question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_id: QuestionId,
    /// Index into the shuffled options. `None` means unanswered.
    #[serde(default)]
    pub selected_answer: Option<usize>,
    #[serde(default)]
    pub is_correct: bool,
}

/// Answers for a session, at most one per question.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AnswerSheet {
    answers: Vec<Answer>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any earlier entry for the same question.
    /// The entry keeps its original position.
    pub fn record(&mut self, answer: Answer) {
        match self
            .answers
            .iter_mut()
            .find(|a| a.question_id == answer.question_id)
        {
            Some(existing) => *existing = answer,
            None => self.answers.push(answer),
        }
    }

    pub fn get(&self, question_id: QuestionId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    /// The score is always derived from this, never tracked separately.
    pub fn score(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn as_slice(&self) -> &[Answer] {
        &self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    fn answer(question_id: QuestionId, selected: Option<usize>, is_correct: bool) -> Answer {
        Answer {
            question_id,
            selected_answer: selected,
            is_correct,
        }
    }

    #[test]
    fn test_record_overwrites_in_place() {
        let mut sheet = AnswerSheet::new();
        sheet.record(answer(4, Some(0), false));
        sheet.record(answer(9, Some(2), true));
        sheet.record(answer(4, Some(1), true));
        assert_eq!(sheet.len(), 2);
        assert_eq!(sheet.as_slice()[0], answer(4, Some(1), true));
        assert_eq!(sheet.score(), 2);
    }

    #[test]
    fn test_score_drops_when_answer_changes() {
        let mut sheet = AnswerSheet::new();
        sheet.record(answer(1, Some(0), true));
        assert_eq!(sheet.score(), 1);
        sheet.record(answer(1, Some(3), false));
        assert_eq!(sheet.score(), 0);
    }

    #[test]
    fn test_null_selection_deserializes_as_unanswered() -> Fallible<()> {
        let a: Answer =
            serde_json::from_str(r#"{"questionId": 5, "selectedAnswer": null, "isCorrect": false}"#)?;
        assert_eq!(a, answer(5, None, false));
        Ok(())
    }
}
