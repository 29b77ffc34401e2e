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

//! The per-question countdown.
//!
//! The actual timer lives in the presentation layer (a `setTimeout`, a page
//! script). This module only tracks which countdown is current, so an expiry
//! that arrives after the user has already moved on is recognised as stale
//! and dropped.

use serde::Deserialize;
use serde::Serialize;

use crate::types::timestamp::Timestamp;

pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 50;

/// Identifies one started countdown. Handed to the presentation layer, and
/// handed back when that countdown fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerToken(u64);

impl TimerToken {
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Running {
    token: TimerToken,
    started_at: Timestamp,
}

#[derive(Clone, Debug)]
pub struct Countdown {
    seconds: u32,
    generation: u64,
    running: Option<Running>,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            seconds,
            generation: 0,
            running: None,
        }
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    /// Stop the current countdown (if any) and start a new one.
    pub fn restart(&mut self, now: Timestamp) -> TimerToken {
        self.stop();
        self.generation += 1;
        let token = TimerToken(self.generation);
        self.running = Some(Running {
            token,
            started_at: now,
        });
        token
    }

    pub fn stop(&mut self) {
        self.running = None;
    }

    pub fn token(&self) -> Option<TimerToken> {
        self.running.map(|r| r.token)
    }

    pub fn is_current(&self, token: TimerToken) -> bool {
        self.token() == Some(token)
    }

    /// Whole seconds since the countdown started, rounded to nearest.
    pub fn elapsed_seconds(&self, now: Timestamp) -> u32 {
        match self.running {
            Some(r) => round_millis_to_seconds(now.millis_since(r.started_at)),
            None => 0,
        }
    }

    pub fn remaining_seconds(&self, now: Timestamp) -> u32 {
        match self.running {
            Some(r) => {
                let elapsed = now.millis_since(r.started_at).max(0) / 1000;
                self.seconds.saturating_sub(elapsed.min(u32::MAX as i64) as u32)
            }
            None => 0,
        }
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::new(DEFAULT_SECONDS_PER_QUESTION)
    }
}

/// Round a millisecond duration to whole seconds (half up). Negative
/// durations (clock skew) count as zero.
pub fn round_millis_to_seconds(millis: i64) -> u32 {
    if millis <= 0 {
        return 0;
    }
    let seconds = (millis + 500) / 1000;
    seconds.min(u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(millis: i64) -> Timestamp {
        Timestamp::from_millis(1_700_000_000_000 + millis).unwrap()
    }

    #[test]
    fn test_restart_invalidates_previous_token() {
        let mut c = Countdown::default();
        let first = c.restart(at(0));
        let second = c.restart(at(10));
        assert_ne!(first, second);
        assert!(!c.is_current(first));
        assert!(c.is_current(second));
    }

    #[test]
    fn test_stop_invalidates_token() {
        let mut c = Countdown::default();
        let token = c.restart(at(0));
        c.stop();
        assert!(!c.is_current(token));
        assert_eq!(c.elapsed_seconds(at(5000)), 0);
    }

    #[test]
    fn test_elapsed_and_remaining() {
        let mut c = Countdown::new(50);
        c.restart(at(0));
        assert_eq!(c.elapsed_seconds(at(1499)), 1);
        assert_eq!(c.elapsed_seconds(at(1500)), 2);
        assert_eq!(c.remaining_seconds(at(0)), 50);
        assert_eq!(c.remaining_seconds(at(10_900)), 40);
        assert_eq!(c.remaining_seconds(at(90_000)), 0);
    }

    #[test]
    fn test_round_millis() {
        assert_eq!(round_millis_to_seconds(-20), 0);
        assert_eq!(round_millis_to_seconds(499), 0);
        assert_eq!(round_millis_to_seconds(500), 1);
        assert_eq!(round_millis_to_seconds(12_345), 12);
    }
}
