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

use crate::types::source_id::SourceId;

/// A parsed flashcard. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    /// The file the card was parsed from.
    source_id: SourceId,
    /// The topic line, trimmed.
    topic: String,
    /// The question body, trimmed.
    question: String,
    /// The answer body, trimmed.
    answer: String,
}

impl Card {
    pub fn new(
        source_id: SourceId,
        topic: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            source_id,
            topic: topic.into().trim().to_string(),
            question: question.into().trim().to_string(),
            answer: answer.into().trim().to_string(),
        }
    }

    pub fn source_id(&self) -> &SourceId {
        &self.source_id
    }

    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Whether the card can be drilled. Cards with an empty side are kept out
    /// of decks.
    pub fn is_complete(&self) -> bool {
        !self.question.is_empty() && !self.answer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims() {
        let card = Card::new(SourceId::new("a/b.txt"), " T ", "\n Q \n", " A\n\n");
        assert_eq!(card.topic(), "T");
        assert_eq!(card.question(), "Q");
        assert_eq!(card.answer(), "A");
        assert!(card.is_complete());
    }

    #[test]
    fn test_incomplete() {
        let card = Card::new(SourceId::new("a/b.txt"), "T", "Q", "   ");
        assert!(!card.is_complete());
    }
}
