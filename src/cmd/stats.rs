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

use serde::Serialize;

use crate::engine::Engine;
use crate::error::Fallible;

pub fn print_stats(engine: &Engine) -> Fallible<()> {
    let stats = get_stats(engine)?;
    let stats_json = serde_json::to_string_pretty(&stats)?;
    println!("{stats_json}");
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    categories: Vec<CategoryStats>,
    result_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CategoryStats {
    name: String,
    card_count: usize,
    correct_count: usize,
    incorrect_count: usize,
}

fn get_stats(engine: &Engine) -> Fallible<Stats> {
    let mut categories = Vec::new();
    for name in engine.categories()? {
        let tally = engine.results(&name);
        categories.push(CategoryStats {
            card_count: engine.card_count(&name)?,
            correct_count: tally.correct,
            incorrect_count: tally.incorrect,
            name,
        });
    }
    Ok(Stats {
        categories,
        result_count: engine.ledger().len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::types::policy::Policy;

    #[test]
    fn test_stats_json() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let mut engine = Engine::open(dir.path())?;
        engine.start_session("science", Policy::random())?;
        engine.mark(false)?;
        let stats = get_stats(&engine)?;
        let json: serde_json::Value = serde_json::to_value(&stats)?;
        assert_eq!(json["resultCount"], 1);
        assert_eq!(json["categories"][1]["name"], "math");
        assert_eq!(json["categories"][1]["cardCount"], 2);
        assert_eq!(json["categories"][2]["name"], "science");
        assert_eq!(json["categories"][2]["incorrectCount"], 1);
        assert_eq!(json["categories"][2]["correctCount"], 0);
        Ok(())
    }
}
