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
use serde::Deserializer;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::QuizError;
use crate::types::answer::Answer;
use crate::types::seed::Seed;
use crate::types::timestamp::Timestamp;

/// The persisted form of an in-progress session.
///
/// The shuffled questions are not stored: they are rebuilt from `seed`.
/// `score` is written for readers of the raw JSON but ignored on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub seed: Seed,
    #[serde(default, deserialize_with = "null_as_default")]
    pub current_question_index: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub answers: Vec<Answer>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_time_seconds: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub per_question_times: Vec<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_email: String,
    #[serde(default)]
    pub saved_at: Option<Timestamp>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl SessionSnapshot {
    /// Parse a stored snapshot. Anything that isn't the expected shape is
    /// reported as corrupt state.
    pub fn parse(text: &str) -> Result<Self, QuizError> {
        serde_json::from_str(text).map_err(|e| QuizError::CorruptState(e.to_string()))
    }

    pub fn to_json(&self) -> Fallible<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_snapshot_defaults() -> Fallible<()> {
        let snap = SessionSnapshot::parse(r#"{"seed": 12345}"#)?;
        assert_eq!(snap.seed, Seed::new(12345));
        assert_eq!(snap.current_question_index, 0);
        assert_eq!(snap.score, 0);
        assert!(snap.answers.is_empty());
        assert_eq!(snap.total_time_seconds, 0);
        assert!(snap.per_question_times.is_empty());
        assert_eq!(snap.user_name, "");
        assert_eq!(snap.user_email, "");
        assert_eq!(snap.saved_at, None);
        Ok(())
    }

    #[test]
    fn test_nulls_take_defaults() -> Fallible<()> {
        let snap = SessionSnapshot::parse(
            r#"{"seed": 1, "userName": null, "answers": null, "perQuestionTimes": null}"#,
        )?;
        assert_eq!(snap.user_name, "");
        assert!(snap.answers.is_empty());
        Ok(())
    }

    #[test]
    fn test_missing_seed_is_corrupt() {
        let result = SessionSnapshot::parse(r#"{"currentQuestionIndex": 3}"#);
        assert!(matches!(result, Err(QuizError::CorruptState(_))));
    }

    #[test]
    fn test_out_of_range_seed_is_corrupt() {
        assert!(SessionSnapshot::parse(r#"{"seed": -1}"#).is_err());
        assert!(SessionSnapshot::parse(r#"{"seed": 4294967296}"#).is_err());
        assert!(SessionSnapshot::parse(r#"{"seed": "abc"}"#).is_err());
    }

    #[test]
    fn test_not_json_is_corrupt() {
        assert!(matches!(
            SessionSnapshot::parse("{not json"),
            Err(QuizError::CorruptState(_))
        ));
    }

    #[test]
    fn test_field_names() -> Fallible<()> {
        let snap = SessionSnapshot {
            seed: Seed::new(7),
            current_question_index: 2,
            score: 1,
            answers: vec![Answer {
                question_id: 4,
                selected_answer: None,
                is_correct: false,
            }],
            total_time_seconds: 12,
            per_question_times: vec![5, 7],
            user_name: "Ada".to_string(),
            user_email: "ada@example.com".to_string(),
            saved_at: None,
        };
        let json = snap.to_json()?;
        for key in [
            "\"seed\":7",
            "\"currentQuestionIndex\":2",
            "\"score\":1",
            "\"selectedAnswer\":null",
            "\"totalTimeSeconds\":12",
            "\"perQuestionTimes\":[5,7]",
            "\"userName\":\"Ada\"",
            "\"userEmail\":\"ada@example.com\"",
            "\"savedAt\":null",
        ] {
            assert!(json.contains(key), "{key} missing from {json}");
        }
        Ok(())
    }
}
