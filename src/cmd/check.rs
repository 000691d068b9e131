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

use std::path::Path;

use crate::config::Config;
use crate::deck::Rejected;
use crate::deck::list_categories;
use crate::deck::scan_category;
use crate::error::Fallible;
use crate::error::fail;

/// Parse every card in the collection and report the ones that would be left
/// out of a deck.
pub fn check_collection(directory: &Path) -> Fallible<()> {
    let rejected = find_rejected(directory)?;
    if rejected.is_empty() {
        println!("ok");
        return Ok(());
    }
    for r in &rejected {
        println!("{}: {}", r.source_id, r.reason);
    }
    fail(format!("{} invalid card files.", rejected.len()))
}

fn find_rejected(directory: &Path) -> Fallible<Vec<Rejected>> {
    if !directory.is_dir() {
        return fail("directory does not exist.");
    }
    let config = Config::load(directory)?;
    let mut rejected = Vec::new();
    for category in list_categories(directory)? {
        let scan = scan_category(directory, &category, &config)?;
        rejected.extend(scan.rejected);
    }
    Ok(rejected)
}
