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

use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Identifies a card file: its path relative to the collection root, with
/// `/` as the separator regardless of platform.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourceId(String);

impl SourceId {
    #[cfg(test)]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Build the identifier for a file inside `root`.
    pub fn from_path(root: &Path, path: &Path) -> Fallible<Self> {
        let relative = path.strip_prefix(root).map_err(|_| {
            ErrorReport::new(format!(
                "{} is not inside {}",
                path.display(),
                root.display()
            ))
        })?;
        let mut parts: Vec<&str> = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => {
                    let part = part
                        .to_str()
                        .ok_or_else(|| ErrorReport::new("invalid path"))?;
                    parts.push(part);
                }
                _ => {
                    return Err(ErrorReport::new(format!(
                        "unexpected path component in {}",
                        relative.display()
                    )));
                }
            }
        }
        Ok(Self(parts.join("/")))
    }

    #[cfg(test)]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The file this identifier points to under `root`.
    pub fn to_path(&self, root: &Path) -> PathBuf {
        let mut path = root.to_path_buf();
        for part in self.0.split('/') {
            path.push(part);
        }
        path
    }

    /// Whether this card lives under the given category. Matching is on whole
    /// path components: `math` does not contain `mathematics/x.txt`.
    pub fn is_under(&self, category: &str) -> bool {
        let category = category.trim_end_matches('/');
        match self.0.strip_prefix(category) {
            Some(rest) => rest.starts_with('/'),
            None => false,
        }
    }

    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl Display for SourceId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
