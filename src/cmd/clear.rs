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

use std::io::BufRead;
use std::io::Write;

use crate::cmd::prompt::Prompter;
use crate::engine::Engine;
use crate::error::Fallible;

/// Forget the recorded results for a category, after asking unless `yes`.
pub fn clear_results<R: BufRead, W: Write>(
    engine: &mut Engine,
    category: &str,
    yes: bool,
    prompter: &mut Prompter<R, W>,
) -> Fallible<usize> {
    let tally = engine.results(category);
    let total = tally.correct + tally.incorrect;
    if total == 0 {
        prompter.say(&format!("No results recorded for '{category}'."))?;
        return Ok(0);
    }
    let question = format!("Forget {total} recorded results for '{category}'?");
    if !yes && !prompter.confirm(&question)? {
        prompter.say("Nothing was cleared.")?;
        return Ok(0);
    }
    let removed = engine.clear_results(category)?;
    prompter.say(&format!("Cleared {removed} results."))?;
    Ok(removed)
}
