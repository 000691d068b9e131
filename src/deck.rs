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

use std::collections::BTreeSet;
use std::fs::read_dir;
use std::fs::read_to_string;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use walkdir::WalkDir;

use crate::config::Config;
use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::ledger::Ledger;
use crate::parser::parse_card;
use crate::types::card::Card;
use crate::types::policy::Filter;
use crate::types::source_id::SourceId;

/// The cards of one category, in drill order. Holds identifiers only; cards
/// are read from disk when they are shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    category: String,
    ids: Vec<SourceId>,
}

/// A card file that was left out of a deck, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejected {
    pub source_id: SourceId,
    pub reason: String,
}

/// The result of walking a category directory.
pub struct Scan {
    pub valid: Vec<SourceId>,
    pub rejected: Vec<Rejected>,
}

impl Deck {
    /// Every valid card in the category.
    pub fn from_category(root: &Path, category: &str, config: &Config) -> Fallible<Self> {
        let scan = scan_category(root, category, config)?;
        warn_rejected(&scan.rejected);
        if scan.valid.is_empty() {
            return Err(ErrorReport::with_kind(
                ErrorKind::EmptyDeck,
                format!("there are no cards in '{category}'."),
            ));
        }
        Ok(Self {
            category: category.to_string(),
            ids: scan.valid,
        })
    }

    /// The valid cards in the category whose last recorded answer was wrong.
    pub fn from_incorrect(
        ledger: &Ledger,
        root: &Path,
        category: &str,
        config: &Config,
    ) -> Fallible<Self> {
        if !ledger.exists() {
            return Err(ErrorReport::with_kind(
                ErrorKind::NoResults,
                "no results have been recorded yet.",
            ));
        }
        let incorrect: BTreeSet<SourceId> = ledger.query_incorrect(category);
        let scan = scan_category(root, category, config)?;
        warn_rejected(&scan.rejected);
        let ids: Vec<SourceId> = scan
            .valid
            .into_iter()
            .filter(|id| incorrect.contains(id))
            .collect();
        if ids.is_empty() {
            return Err(ErrorReport::with_kind(
                ErrorKind::EmptyDeck,
                format!("there are no incorrectly answered cards in '{category}'."),
            ));
        }
        Ok(Self {
            category: category.to_string(),
            ids,
        })
    }

    /// Build the deck a policy filter asks for.
    pub fn build(
        filter: Filter,
        ledger: &Ledger,
        root: &Path,
        category: &str,
        config: &Config,
    ) -> Fallible<Self> {
        match filter {
            Filter::All => Self::from_category(root, category, config),
            Filter::IncorrectOnly => Self::from_incorrect(ledger, root, category, config),
        }
    }

    #[cfg(test)]
    pub fn from_ids(category: &str, ids: Vec<SourceId>) -> Self {
        Self {
            category: category.to_string(),
            ids,
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn ids(&self) -> &[SourceId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

fn warn_rejected(rejected: &[Rejected]) {
    for r in rejected {
        log::warn!("Skipping {}: {}", r.source_id, r.reason);
    }
}

/// The directory of a category. Categories are relative paths without `..`.
pub fn category_dir(root: &Path, category: &str) -> Fallible<PathBuf> {
    let relative = Path::new(category);
    let plain = !category.is_empty()
        && relative
            .components()
            .all(|c| matches!(c, Component::Normal(_)));
    if !plain {
        return fail(format!("invalid category name: '{category}'."));
    }
    Ok(root.join(relative))
}

/// Walk a category and sort its card files into valid and rejected. Files
/// are visited in file name order.
pub fn scan_category(root: &Path, category: &str, config: &Config) -> Fallible<Scan> {
    let dir = category_dir(root, category)?;
    if !dir.is_dir() {
        return fail(format!("category '{category}' does not exist."));
    }
    log::debug!("Scanning {}...", dir.display());
    let start = Instant::now();
    let mut valid = Vec::new();
    let mut rejected = Vec::new();
    for entry in WalkDir::new(&dir).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let is_card = entry
            .file_name()
            .to_str()
            .is_some_and(|name| config.is_card_file(name));
        if !is_card {
            continue;
        }
        let source_id = SourceId::from_path(root, entry.path())?;
        match load_card(root, &source_id) {
            Ok(card) => {
                if card.is_complete() {
                    valid.push(source_id);
                } else {
                    rejected.push(Rejected {
                        source_id,
                        reason: "question or answer is empty".to_string(),
                    });
                }
            }
            Err(e) => rejected.push(Rejected {
                source_id,
                reason: e.message().to_string(),
            }),
        }
    }
    let duration = start.elapsed().as_millis();
    log::debug!(
        "Scanned {} cards ({} rejected) in {duration}ms.",
        valid.len(),
        rejected.len()
    );
    Ok(Scan { valid, rejected })
}

/// Read and parse one card.
pub fn load_card(root: &Path, source_id: &SourceId) -> Fallible<Card> {
    let path = source_id.to_path(root);
    let content = read_to_string(&path)
        .map_err(|e| ErrorReport::new(format!("failed to read {}: {e}", path.display())))?;
    let card = parse_card(source_id.clone(), &content)?;
    Ok(card)
}

/// The first-level subdirectories of the collection root, sorted. Hidden
/// directories are skipped.
pub fn list_categories(root: &Path) -> Fallible<Vec<String>> {
    if !root.is_dir() {
        return fail("directory does not exist.");
    }
    let mut categories = Vec::new();
    for entry in read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with('.') {
                categories.push(name.to_string());
            }
        }
    }
    categories.sort();
    Ok(categories)
}

/// How many drillable cards a category has.
pub fn card_count(root: &Path, category: &str, config: &Config) -> Fallible<usize> {
    Ok(scan_category(root, category, config)?.valid.len())
}

#[cfg(test)]
mod tests {
    use std::fs::create_dir_all;
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;
    use crate::parser::format_card;

    fn add_card(root: &Path, rel: &str, topic: &str, question: &str, answer: &str) -> Fallible<()> {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            create_dir_all(parent)?;
        }
        write(path, format_card(topic, question, answer))?;
        Ok(())
    }

    fn ids(deck: &Deck) -> Vec<&str> {
        deck.ids().iter().map(|id| id.as_str()).collect()
    }

    #[test]
    fn test_from_category() -> Fallible<()> {
        let dir = tempdir()?;
        let root = dir.path();
        add_card(root, "math/b.txt", "Math", "2+2?", "4")?;
        add_card(root, "math/a.txt", "Math", "3+3?", "6")?;
        add_card(root, "math/sub/c.txt", "Math", "1+1?", "2")?;
        add_card(root, "science/a.txt", "Science", "H2O?", "Water")?;
        write(root.join("math/notes.md"), "not a card")?;
        let deck = Deck::from_category(root, "math", &Config::default())?;
        assert_eq!(deck.category(), "math");
        assert_eq!(ids(&deck), vec!["math/a.txt", "math/b.txt", "math/sub/c.txt"]);
        Ok(())
    }

    #[test]
    fn test_bad_files_are_skipped() -> Fallible<()> {
        let dir = tempdir()?;
        let root = dir.path();
        add_card(root, "math/a.txt", "Math", "2+2?", "4")?;
        write(root.join("math/b.txt"), "Question:\nlegacy\nAnswer:\nfile\n")?;
        add_card(root, "math/c.txt", "Math", "empty answer", "")?;
        let deck = Deck::from_category(root, "math", &Config::default())?;
        assert_eq!(ids(&deck), vec!["math/a.txt"]);

        let scan = scan_category(root, "math", &Config::default())?;
        assert_eq!(scan.rejected.len(), 2);
        assert_eq!(scan.rejected[0].source_id.as_str(), "math/b.txt");
        assert_eq!(scan.rejected[0].reason, "missing 'Topic:' section");
        Ok(())
    }

    #[test]
    fn test_all_bad_is_empty_deck() -> Fallible<()> {
        let dir = tempdir()?;
        let root = dir.path();
        create_dir_all(root.join("math"))?;
        write(root.join("math/b.txt"), "garbage")?;
        let err = Deck::from_category(root, "math", &Config::default()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EmptyDeck);
        assert!(err.is_empty_selection());
        Ok(())
    }

    #[test]
    fn test_missing_category() -> Fallible<()> {
        let dir = tempdir()?;
        let err = Deck::from_category(dir.path(), "nope", &Config::default()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Other);
        assert!(Deck::from_category(dir.path(), "../x", &Config::default()).is_err());
        assert!(Deck::from_category(dir.path(), "", &Config::default()).is_err());
        Ok(())
    }

    #[test]
    fn test_from_incorrect() -> Fallible<()> {
        let dir = tempdir()?;
        let root = dir.path();
        add_card(root, "math/a.txt", "Math", "2+2?", "4")?;
        add_card(root, "math/b.txt", "Math", "3+3?", "6")?;
        add_card(root, "math/c.txt", "Math", "4+4?", "8")?;
        let mut ledger = Ledger::load(&root.join("results.json"))?;
        ledger.mark(&SourceId::new("math/c.txt"), false)?;
        ledger.mark(&SourceId::new("math/a.txt"), false)?;
        ledger.mark(&SourceId::new("math/b.txt"), true)?;
        // Deleted since it was marked.
        ledger.mark(&SourceId::new("math/gone.txt"), false)?;
        let deck = Deck::from_incorrect(&ledger, root, "math", &Config::default())?;
        assert_eq!(ids(&deck), vec!["math/a.txt", "math/c.txt"]);
        Ok(())
    }

    #[test]
    fn test_from_incorrect_without_ledger() -> Fallible<()> {
        let dir = tempdir()?;
        let root = dir.path();
        add_card(root, "math/a.txt", "Math", "2+2?", "4")?;
        let ledger = Ledger::load(&root.join("results.json"))?;
        let err = Deck::from_incorrect(&ledger, root, "math", &Config::default()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::NoResults);
        Ok(())
    }

    #[test]
    fn test_from_incorrect_nothing_for_category() -> Fallible<()> {
        let dir = tempdir()?;
        let root = dir.path();
        add_card(root, "math/a.txt", "Math", "2+2?", "4")?;
        add_card(root, "science/a.txt", "Science", "H2O?", "Water")?;
        let mut ledger = Ledger::load(&root.join("results.json"))?;
        ledger.mark(&SourceId::new("science/a.txt"), false)?;
        ledger.mark(&SourceId::new("math/a.txt"), true)?;
        let err = Deck::from_incorrect(&ledger, root, "math", &Config::default()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::EmptyDeck);
        assert_eq!(
            err.to_string(),
            "error: there are no incorrectly answered cards in 'math'."
        );
        Ok(())
    }

    #[test]
    fn test_list_categories() -> Fallible<()> {
        let dir = tempdir()?;
        let root = dir.path();
        create_dir_all(root.join("science"))?;
        create_dir_all(root.join("math"))?;
        create_dir_all(root.join(".git"))?;
        write(root.join("flashcard_results.json"), "{}")?;
        assert_eq!(list_categories(root)?, vec!["math", "science"]);
        Ok(())
    }

    #[test]
    fn test_card_count() -> Fallible<()> {
        let dir = tempdir()?;
        let root = dir.path();
        add_card(root, "math/a.txt", "Math", "2+2?", "4")?;
        add_card(root, "math/b.txt", "Math", "3+3?", "6")?;
        create_dir_all(root.join("empty"))?;
        assert_eq!(card_count(root, "math", &Config::default())?, 2);
        assert_eq!(card_count(root, "empty", &Config::default())?, 0);
        Ok(())
    }

    #[test]
    fn test_custom_extension() -> Fallible<()> {
        let dir = tempdir()?;
        let root = dir.path();
        add_card(root, "math/a.card", "Math", "2+2?", "4")?;
        add_card(root, "math/b.txt", "Math", "3+3?", "6")?;
        let config = Config {
            extension: ".card".to_string(),
            ..Config::default()
        };
        let deck = Deck::from_category(root, "math", &config)?;
        assert_eq!(ids(&deck), vec!["math/a.card"]);
        Ok(())
    }
}
