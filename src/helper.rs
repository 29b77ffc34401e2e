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

use std::fs::write;
use std::path::PathBuf;

use quizapp_core::error::Fallible;
use tempfile::tempdir;

/// Create a temporary directory that outlives the test.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir = tempdir()?.keep();
    Ok(dir.canonicalize()?)
}

/// A temporary directory holding a two-question bank.
pub fn create_tmp_bank() -> Fallible<PathBuf> {
    let dir = create_tmp_directory()?;
    write(
        dir.join("bank.toml"),
        r#"
[[questions]]
id = 1
question = "What is **2 + 2**?"
options = ["3", "4"]
correctAnswer = 1

[[questions]]
id = 2
question = "Which is a colour?"
options = ["Red", "Dog", "Seven"]
correctAnswer = 0
"#,
    )?;
    Ok(dir)
}
