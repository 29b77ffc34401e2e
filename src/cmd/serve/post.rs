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


use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use quizapp_core::countdown::TimerToken;
use quizapp_core::error::QuizError;
use quizapp_core::session::QuizSession;
use quizapp_core::types::timestamp::Timestamp;
use serde::Deserialize;

use crate::cmd::serve::state::ServerState;
use crate::db::SqliteStore;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq)]
pub enum Action {
    Start,
    Next,
    Previous,
    Expire,
    Exit,
    Resume,
    Discard,
    Report,
    CloseReport,
    Home,
    Clear,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    answer: Option<usize>,
    token: Option<u64>,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    let now = Timestamp::now();
    let mut mutable = state.lock();
    if let Err(e) = action_handler(&mut mutable.session, &form, now) {
        log::debug!("{:?} rejected: {e}", form.action);
        mutable.notice = Some(e.message().to_string());
    }
    Redirect::to("/")
}

fn action_handler(
    session: &mut QuizSession<SqliteStore>,
    form: &FormData,
    now: Timestamp,
) -> Result<(), QuizError> {
    match form.action {
        Action::Start => {
            session.start(&form.name, &form.email, now)?;
        }
        Action::Next => {
            let Some(answer) = form.answer else {
                return Err(QuizError::Validation(
                    "Please select an answer.".to_string(),
                ));
            };
            session.submit_answer(Some(answer), now)?;
        }
        Action::Previous => {
            session.go_to_previous(now);
        }
        Action::Expire => {
            let Some(token) = form.token else {
                return Err(QuizError::Validation("missing timer token.".to_string()));
            };
            // The page posts whatever radio was checked when time ran out.
            session.time_expired_with(TimerToken::new(token), form.answer, now)?;
        }
        Action::Exit => {
            session.exit();
        }
        Action::Resume => match session.resume_saved(now) {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Err(QuizError::NotFound(
                    "There is no saved progress to resume.".to_string(),
                ));
            }
            Err(QuizError::CorruptState(_)) => {
                session.reset();
                return Err(QuizError::CorruptState(
                    "Saved progress could not be read and has been discarded.".to_string(),
                ));
            }
            Err(e) => return Err(e),
        },
        Action::Discard | Action::Clear => {
            session.clear_progress();
        }
        Action::Report => {
            session.show_report()?;
        }
        Action::CloseReport => {
            session.close_report(now);
        }
        Action::Home => {
            session.go_home();
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use quizapp_core::bank::QuestionBank;
    use quizapp_core::error::Fallible;
    use quizapp_core::session::Phase;
    use quizapp_core::store::KeyValueStore;
    use quizapp_core::store::PROGRESS_KEY;

    use super::*;

    fn at(seconds: i64) -> Timestamp {
        Timestamp::from_millis(1_700_000_000_000 + seconds * 1000).unwrap()
    }

    fn session() -> Fallible<QuizSession<SqliteStore>> {
        Ok(QuizSession::new(
            QuestionBank::builtin()?,
            SqliteStore::in_memory()?,
        ))
    }

    fn form(action: Action) -> FormData {
        FormData {
            action,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            answer: None,
            token: None,
        }
    }

    #[test]
    fn test_next_requires_answer() -> Fallible<()> {
        let mut s = session()?;
        action_handler(&mut s, &form(Action::Start), at(0))?;
        let err = action_handler(&mut s, &form(Action::Next), at(1)).err().unwrap();
        assert_eq!(err.message(), "Please select an answer.");
        assert_eq!(s.current_index(), 0);
        Ok(())
    }

    #[test]
    fn test_expire_with_checked_radio() -> Fallible<()> {
        let mut s = session()?;
        action_handler(&mut s, &form(Action::Start), at(0))?;
        let token = s.timer_token().map(|t| t.value());
        let expire = FormData {
            answer: Some(2),
            token,
            ..form(Action::Expire)
        };
        action_handler(&mut s, &expire, at(50))?;
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.answers()[0].selected_answer, Some(2));
        // Replaying the same expiry is ignored.
        action_handler(&mut s, &expire, at(51))?;
        assert_eq!(s.current_index(), 1);
        Ok(())
    }

    #[test]
    fn test_late_expire_leaves_next_question_unselected() -> Fallible<()> {
        let mut s = session()?;
        action_handler(&mut s, &form(Action::Start), at(0))?;
        let stale = s.timer_token().map(|t| t.value());
        let next = FormData {
            answer: Some(0),
            ..form(Action::Next)
        };
        action_handler(&mut s, &next, at(2))?;
        let expire = FormData {
            answer: Some(3),
            token: stale,
            ..form(Action::Expire)
        };
        action_handler(&mut s, &expire, at(50))?;
        assert_eq!(s.current_index(), 1);
        assert_eq!(s.staged(), None);
        assert!(!s.can_advance());
        Ok(())
    }

    #[test]
    fn test_resume_corrupt_snapshot() -> Fallible<()> {
        let mut store = SqliteStore::in_memory()?;
        store.set(PROGRESS_KEY, "not json")?;
        let mut s = QuizSession::new(QuestionBank::builtin()?, store);
        let err = action_handler(&mut s, &form(Action::Resume), at(0)).err().unwrap();
        assert!(matches!(err, QuizError::CorruptState(_)));
        assert!(!s.has_saved_progress());
        assert_eq!(s.phase(), Phase::NotStarted);
        Ok(())
    }

    #[test]
    fn test_exit_then_resume() -> Fallible<()> {
        let mut s = session()?;
        action_handler(&mut s, &form(Action::Start), at(0))?;
        let next = FormData {
            answer: Some(0),
            ..form(Action::Next)
        };
        action_handler(&mut s, &next, at(2))?;
        action_handler(&mut s, &form(Action::Exit), at(3))?;
        assert_eq!(s.phase(), Phase::ExitedPartial);
        action_handler(&mut s, &form(Action::Resume), at(4))?;
        assert_eq!(s.phase(), Phase::InProgress);
        assert_eq!(s.current_index(), 1);
        Ok(())
    }
}
