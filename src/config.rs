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

use serde::Deserialize;

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;

pub const CONFIG_FILE: &str = "topicards.toml";

/// Per-collection settings, read from `topicards.toml` in the collection
/// root. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Typing animation speed in characters per second. Zero disables the
    /// animation.
    pub typing_speed: u32,
    /// Whether the renderer should play sound cues.
    pub sound: bool,
    /// Extension of card files, including the dot.
    pub extension: String,
    /// Name of the results ledger file in the collection root.
    pub ledger_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            typing_speed: 40,
            sound: true,
            extension: ".txt".to_string(),
            ledger_file: "flashcard_results.json".to_string(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Fallible<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No {CONFIG_FILE}, using defaults.");
            return Ok(Self::default());
        }
        let content = read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Fallible<()> {
        if self.extension.is_empty() {
            return Err(ErrorReport::with_kind(
                ErrorKind::Config,
                "invalid configuration: extension must not be empty",
            ));
        }
        if self.ledger_file.is_empty() || self.ledger_file.contains(['/', '\\']) {
            return Err(ErrorReport::with_kind(
                ErrorKind::Config,
                "invalid configuration: ledger_file must be a plain file name",
            ));
        }
        Ok(())
    }

    pub fn ledger_path(&self, root: &Path) -> PathBuf {
        root.join(&self.ledger_file)
    }

    /// Whether a file name matches the card extension.
    pub fn is_card_file(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.extension) && file_name.len() > self.extension.len()
    }
}
