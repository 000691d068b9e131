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

use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fs::read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::types::source_id::SourceId;

/// On-disk shape of the ledger.
#[derive(Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LedgerFile {
    flashcards: BTreeMap<SourceId, bool>,
}

/// The last recorded outcome for every card that has been marked, keyed by
/// card. Every mutation is written to disk before returning.
pub struct Ledger {
    path: PathBuf,
    entries: BTreeMap<SourceId, bool>,
    /// Whether the file exists on disk.
    exists: bool,
}

/// Correct and incorrect counts for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tally {
    pub correct: usize,
    pub incorrect: usize,
}

impl Ledger {
    /// Load the ledger at `path`. A missing file is an empty ledger.
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            log::debug!("No results file at {}.", path.display());
            return Ok(Self {
                path: path.to_path_buf(),
                entries: BTreeMap::new(),
                exists: false,
            });
        }
        let content = read(path)?;
        // Invalid UTF-8 is reported by serde_json like any other bad input.
        let file: LedgerFile = serde_json::from_slice(&content).map_err(|e| {
            ErrorReport::with_kind(
                ErrorKind::CorruptLedger,
                format!("results file {} is corrupt: {e}", path.display()),
            )
        })?;
        log::debug!(
            "Loaded {} results from {}.",
            file.flashcards.len(),
            path.display()
        );
        Ok(Self {
            path: path.to_path_buf(),
            entries: file.flashcards,
            exists: true,
        })
    }

    /// Replace whatever is at `path` with an empty ledger.
    pub fn reset(path: &Path) -> Fallible<Self> {
        log::warn!("Resetting results file {}.", path.display());
        let mut ledger = Self {
            path: path.to_path_buf(),
            entries: BTreeMap::new(),
            exists: false,
        };
        ledger.replace(BTreeMap::new())?;
        Ok(ledger)
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, source_id: &SourceId) -> Option<bool> {
        self.entries.get(source_id).copied()
    }

    /// Record the outcome for a card, replacing any earlier one.
    pub fn mark(&mut self, source_id: &SourceId, correct: bool) -> Fallible<()> {
        log::debug!(
            "{} {}",
            source_id,
            if correct { "right" } else { "wrong" }
        );
        let mut entries = self.entries.clone();
        entries.insert(source_id.clone(), correct);
        self.replace(entries)
    }

    /// Cards under the category whose last outcome was wrong.
    pub fn query_incorrect(&self, category: &str) -> BTreeSet<SourceId> {
        self.entries
            .iter()
            .filter(|(id, correct)| !**correct && id.is_under(category))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn tally(&self, category: &str) -> Tally {
        let mut tally = Tally::default();
        for (id, correct) in &self.entries {
            if id.is_under(category) {
                if *correct {
                    tally.correct += 1;
                } else {
                    tally.incorrect += 1;
                }
            }
        }
        tally
    }

    /// Forget every outcome under the category. Returns how many were removed.
    pub fn clear_category(&mut self, category: &str) -> Fallible<usize> {
        let mut entries = self.entries.clone();
        entries.retain(|id, _| !id.is_under(category));
        let removed = self.entries.len() - entries.len();
        if removed > 0 {
            self.replace(entries)?;
            log::debug!("Cleared {removed} results under {category}.");
        }
        Ok(removed)
    }

    /// Save `entries` and make them current. On failure memory keeps matching
    /// the file on disk.
    fn replace(&mut self, entries: BTreeMap<SourceId, bool>) -> Fallible<()> {
        self.save(&entries)?;
        self.entries = entries;
        self.exists = true;
        Ok(())
    }

    /// Write to a temporary file next to the ledger and rename it into place,
    /// so a crash leaves either the old file or the new one.
    fn save(&self, entries: &BTreeMap<SourceId, bool>) -> Fallible<()> {
        let dir = match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file = LedgerFile {
            flashcards: entries.clone(),
        };
        let json = serde_json::to_string_pretty(&file)?;
        let write = || -> std::io::Result<NamedTempFile> {
            let mut tmp = NamedTempFile::new_in(&dir)?;
            tmp.write_all(json.as_bytes())?;
            tmp.write_all(b"\n")?;
            tmp.as_file().sync_all()?;
            Ok(tmp)
        };
        let tmp = write().map_err(|e| {
            ErrorReport::with_kind(
                ErrorKind::Write,
                format!("failed to save results to {}: {e}", self.path.display()),
            )
        })?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}
