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

/// Stable question identifier. Survives shuffling and is what answers refer to.
pub type QuestionId = u32;

/// A multiple-choice question as authored in the bank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
}

impl Question {
    /// The text of the correct option, if `correct_answer` is in range.
    pub fn correct_text(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }
}

/// A question as presented in one session: options permuted, and the correct
/// answer re-located inside the permutation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShuffledQuestion {
    pub id: QuestionId,
    pub question: String,
    pub options_shuffled: Vec<String>,
    /// `None` only if the correct text could not be found after shuffling.
    pub correct_index_shuffled: Option<usize>,
}

impl ShuffledQuestion {
    pub fn is_correct(&self, selected: Option<usize>) -> bool {
        match (selected, self.correct_index_shuffled) {
            (Some(s), Some(c)) => s == c,
            _ => false,
        }
    }

    pub fn option_count(&self) -> usize {
        self.options_shuffled.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_deserialize_camel_case() -> Fallible<()> {
        let q: Question = serde_json::from_str(
            r#"{"id": 3, "question": "Q?", "options": ["a", "b"], "correctAnswer": 1}"#,
        )?;
        assert_eq!(q.id, 3);
        assert_eq!(q.correct_text(), Some("b"));
        Ok(())
    }

    #[test]
    fn test_is_correct() {
        let q = ShuffledQuestion {
            id: 1,
            question: "Q?".to_string(),
            options_shuffled: vec!["a".to_string(), "b".to_string()],
            correct_index_shuffled: Some(1),
        };
        assert!(q.is_correct(Some(1)));
        assert!(!q.is_correct(Some(0)));
        assert!(!q.is_correct(None));
    }

    #[test]
    fn test_missing_correct_index_is_never_correct() {
        let q = ShuffledQuestion {
            id: 1,
            question: "Q?".to_string(),
            options_shuffled: vec!["a".to_string(), "b".to_string()],
            correct_index_shuffled: None,
        };
        assert!(!q.is_correct(Some(0)));
        assert!(!q.is_correct(Some(1)));
    }
}
