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

use std::fs::copy;
use std::fs::create_dir_all;
use std::path::PathBuf;

use tempfile::TempDir;
use tempfile::tempdir;
use walkdir::WalkDir;

use crate::error::Fallible;

/// Copy the `test` collection into a fresh temporary directory, leaving out
/// any results file. The copy is deleted when the returned value is dropped.
pub fn create_tmp_copy_of_test_directory() -> Fallible<TempDir> {
    let source: PathBuf = PathBuf::from("./test").canonicalize()?;
    let target: TempDir = tempdir()?;
    for entry in WalkDir::new(&source) {
        let entry = entry?;
        let path = entry.path();
        let relative = match path.strip_prefix(&source) {
            Ok(relative) => relative,
            Err(_) => continue,
        };
        let target_path = target.path().join(relative);
        if entry.file_type().is_dir() {
            create_dir_all(&target_path)?;
        } else if entry.file_name() != "flashcard_results.json" {
            copy(path, &target_path)?;
        }
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tmp_copy_of_test_directory() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        assert!(dir.path().join("math").join("Addition_001.txt").exists());
        assert!(dir.path().join("empty").is_dir());
        Ok(())
    }
}
