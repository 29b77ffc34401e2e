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

//! quizapp-core: Core library for the quizapp multiple-choice quiz.
//!
//! This library provides WASM-compatible types and algorithms for:
//! - Seeded, reproducible shuffling of questions and options
//! - The quiz session state machine (answers, navigation, timing)
//! - The persisted session snapshot and resume
//! - Score reports and result export

pub mod bank;
pub mod countdown;
pub mod error;
pub mod export;
pub mod prepare;
pub mod report;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod types;

// Re-exports for convenience
pub use bank::QuestionBank;
pub use countdown::TimerToken;
pub use error::{ErrorReport, Fallible, QuizError, fail};
pub use prepare::prepare_questions;
pub use report::Report;
pub use session::{Advance, Phase, QuizSession};
pub use snapshot::SessionSnapshot;
pub use store::{KeyValueStore, MemoryStore};
pub use types::question::{Question, ShuffledQuestion};
pub use types::seed::Seed;
pub use types::timestamp::Timestamp;
