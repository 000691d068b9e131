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

use crate::engine::Engine;
use crate::error::Fallible;

pub fn list_categories(engine: &Engine) -> Fallible<()> {
    for line in category_lines(engine)? {
        println!("{line}");
    }
    Ok(())
}

fn category_lines(engine: &Engine) -> Fallible<Vec<String>> {
    let mut lines = Vec::new();
    for name in engine.categories()? {
        let count = engine.card_count(&name)?;
        let noun = if count == 1 { "card" } else { "cards" };
        lines.push(format!("{name} ({count} {noun})"));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;

    #[test]
    fn test_category_lines() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let engine = Engine::open(dir.path())?;
        assert_eq!(
            category_lines(&engine)?,
            vec!["empty (0 cards)", "math (2 cards)", "science (1 card)"]
        );
        Ok(())
    }
}
