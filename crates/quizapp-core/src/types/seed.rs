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
use crate::types::timestamp::Timestamp;

/// The 32-bit seed that fixes the question and option order of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(u32);

impl Seed {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// A time-based seed: the low 32 bits of the epoch milliseconds.
    pub fn from_timestamp(ts: Timestamp) -> Self {
        Self(ts.millis() as u32)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    /// The seed used to shuffle the options of one question. Depends only on
    /// the session seed and the question id, not on the question's position.
    pub fn for_question(self, id: QuestionId) -> Seed {
        Seed(self.0 ^ id)
    }
}
