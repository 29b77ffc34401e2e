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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// Errors raised by the quiz session. None of them are fatal: the session is
/// left in a valid state and the caller decides how to surface the message.
#[derive(Debug, Clone, PartialEq)]
pub enum QuizError {
    /// User input was rejected (e.g. an empty name). Nothing changed.
    Validation(String),
    /// A persisted snapshot could not be used. Discard it and start fresh.
    CorruptState(String),
    /// A lookup that should always succeed did not.
    NotFound(String),
    /// Capturing or sharing an image failed.
    Export(String),
}

impl Display for QuizError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Validation(msg) => write!(f, "validation error: {msg}"),
            QuizError::CorruptState(msg) => write!(f, "corrupt saved progress: {msg}"),
            QuizError::NotFound(msg) => write!(f, "not found: {msg}"),
            QuizError::Export(msg) => write!(f, "export failed: {msg}"),
        }
    }
}

impl QuizError {
    /// The message without its category prefix, for showing to the user.
    pub fn message(&self) -> &str {
        match self {
            QuizError::Validation(msg)
            | QuizError::CorruptState(msg)
            | QuizError::NotFound(msg)
            | QuizError::Export(msg) => msg,
        }
    }
}

impl Error for QuizError {}

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value:#?}"),
        }
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport {
            message: format!("JSON error: {value:#?}"),
        }
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        ErrorReport {
            message: format!("TOML error: {value}"),
        }
    }
}

impl From<QuizError> for ErrorReport {
    fn from(value: QuizError) -> Self {
        ErrorReport {
            message: value.to_string(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {
    fn description(&self) -> &str {
        &self.message
    }
}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}
