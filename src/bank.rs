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

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use quizapp_core::bank::QuestionBank;
use quizapp_core::error::ErrorReport;
use quizapp_core::error::Fallible;
use quizapp_core::error::fail;
use walkdir::WalkDir;

/// Load a question bank.
///
/// With no path, the built-in bank is used. A file path loads one `.toml` or
/// `.json` bank; a directory path loads every such file beneath it, in file
/// name order, and merges them.
pub fn load_bank(path: Option<&str>) -> Fallible<QuestionBank> {
    let Some(path) = path else {
        return QuestionBank::builtin();
    };
    let path = PathBuf::from(path);
    if !path.exists() {
        return fail("bank path does not exist.");
    }
    if path.is_dir() {
        load_directory(&path)
    } else {
        load_file(&path)
    }
}

fn load_directory(dir: &Path) -> Fallible<QuestionBank> {
    let mut banks = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|e| ErrorReport::new(format!("Failed to walk bank: {e}")))?;
        let path = entry.path();
        if path.is_file() && is_bank_file(path) {
            log::debug!("Loading questions from {}", path.display());
            banks.push(load_file(path)?);
        }
    }
    if banks.is_empty() {
        return fail(format!("no question files found in {}.", dir.display()));
    }
    QuestionBank::merge(banks)
}

fn is_bank_file(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("toml") | Some("json")
    )
}

fn load_file(path: &Path) -> Fallible<QuestionBank> {
    let text = read_to_string(path)?;
    let result = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => QuestionBank::from_toml(&text),
        Some("json") => QuestionBank::from_json(&text),
        _ => return fail(format!("unsupported bank file: {}.", path.display())),
    };
    result.map_err(|e| ErrorReport::new(format!("{}: {}", path.display(), e.message())))
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_directory;

    const ONE: &str = r#"
[[questions]]
id = 1
question = "2 + 2?"
options = ["3", "4"]
correctAnswer = 1
"#;

    const TWO: &str =
        r#"[{"id": 2, "question": "Capital of France?", "options": ["Paris", "Rome"], "correctAnswer": 0}]"#;

    #[test]
    fn test_builtin_when_no_path() -> Fallible<()> {
        assert_eq!(load_bank(None)?.len(), 15);
        Ok(())
    }

    #[test]
    fn test_missing_path() {
        let err = load_bank(Some("./derpherp")).err().unwrap();
        assert_eq!(err.to_string(), "error: bank path does not exist.");
    }

    #[test]
    fn test_single_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("one.toml");
        write(&path, ONE)?;
        let bank = load_bank(Some(&path.display().to_string()))?;
        assert_eq!(bank.len(), 1);
        Ok(())
    }

    #[test]
    fn test_directory_merges_and_skips_other_files() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        create_dir_all(dir.join("nested"))?;
        write(dir.join("one.toml"), ONE)?;
        write(dir.join("nested").join("two.json"), TWO)?;
        write(dir.join("README.md"), "# Questions")?;
        let bank = load_bank(Some(&dir.display().to_string()))?;
        assert_eq!(bank.len(), 2);
        assert!(bank.get(2).is_some());
        Ok(())
    }

    #[test]
    fn test_empty_directory() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        assert!(load_bank(Some(&dir.display().to_string())).is_err());
        Ok(())
    }

    #[test]
    fn test_error_names_the_file() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        let path = dir.join("bad.toml");
        write(&path, "[[questions]]\nid = 1\nquestion = \"q\"\noptions = [\"a\"]\ncorrectAnswer = 0\n")?;
        let err = load_bank(Some(&path.display().to_string())).err().unwrap();
        assert!(err.to_string().contains("bad.toml"));
        assert!(err.to_string().contains("at least two options"));
        Ok(())
    }
}
