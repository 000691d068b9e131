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

use crate::types::card::Card;
use crate::types::source_id::SourceId;

/// One of the three labelled sections of a card file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Topic,
    Question,
    Answer,
}

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Topic => "Topic",
            Section::Question => "Question",
            Section::Answer => "Answer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::Topic => "Topic:",
            Section::Question => "Question:",
            Section::Answer => "Answer:",
        }
    }

    /// If `line` is this section's header, return the text after the label.
    pub fn match_header(self, line: &str) -> Option<&str> {
        line.trim_start().strip_prefix(self.label())
    }
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MissingSection(Section),
    MalformedTopic,
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MissingSection(section) => {
                write!(f, "missing '{}' section", section.label())
            }
            ParseError::MalformedTopic => write!(f, "the 'Topic:' line has no value"),
        }
    }
}

enum State {
    /// Before the question header. Only the topic is read here.
    Preamble,
    Question,
    Answer,
}

/// Parse the text of a card file.
///
/// Headers are recognized at the start of a line and only in order: the
/// topic anywhere before the question, then the answer. Everything after the
/// answer header is the answer, whatever it looks like.
pub fn parse_card(source_id: SourceId, text: &str) -> Result<Card, ParseError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut topic: Option<&str> = None;
    let mut question: Option<Vec<&str>> = None;
    let mut answer: Option<Vec<&str>> = None;
    let mut state = State::Preamble;

    for line in text.lines() {
        match state {
            State::Preamble => {
                if let Some(rest) = Section::Topic.match_header(line) {
                    if topic.is_none() {
                        topic = Some(rest.trim());
                    }
                } else if let Some(rest) = Section::Question.match_header(line) {
                    question = Some(start_body(rest));
                    state = State::Question;
                }
            }
            State::Question => {
                if let Some(rest) = Section::Answer.match_header(line) {
                    answer = Some(start_body(rest));
                    state = State::Answer;
                } else if let Some(body) = question.as_mut() {
                    body.push(line);
                }
            }
            State::Answer => {
                if let Some(body) = answer.as_mut() {
                    body.push(line);
                }
            }
        }
    }

    let Some(topic) = topic else {
        return Err(ParseError::MissingSection(Section::Topic));
    };
    let Some(question) = question else {
        return Err(ParseError::MissingSection(Section::Question));
    };
    let Some(answer) = answer else {
        return Err(ParseError::MissingSection(Section::Answer));
    };
    if topic.is_empty() {
        return Err(ParseError::MalformedTopic);
    }

    Ok(Card::new(
        source_id,
        topic,
        question.join("\n"),
        answer.join("\n"),
    ))
}

fn start_body(rest: &str) -> Vec<&str> {
    let rest = rest.trim();
    if rest.is_empty() { Vec::new() } else { vec![rest] }
}

/// Render a card in the canonical file format. `parse_card` reads this back
/// to the same fields, provided the question has no line starting with
/// `Answer:`.
pub fn format_card(topic: &str, question: &str, answer: &str) -> String {
    format!("Topic: {topic}\n\nQuestion:\n{question}\n\nAnswer:\n{answer}\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<Card, ParseError> {
        parse_card(SourceId::new("math/test.txt"), text)
    }

    #[test]
    fn test_parse_basic() -> Result<(), ParseError> {
        let content = "Topic: Geography\n\nQuestion:\nWhat is the capital of France?\n\nAnswer:\nParis\n";
        let card = parse(content)?;
        assert_eq!(card.topic(), "Geography");
        assert_eq!(card.question(), "What is the capital of France?");
        assert_eq!(card.answer(), "Paris");
        assert_eq!(card.source_id().as_str(), "math/test.txt");
        Ok(())
    }

    #[test]
    fn test_multiline_sections() -> Result<(), ParseError> {
        let content = "Topic: Algebra\nQuestion:\n  Solve for x:\n\n  2x = 4\n\nAnswer:\nx = 2\n\nbecause 4 / 2 = 2\n\n\n";
        let card = parse(content)?;
        assert_eq!(card.question(), "Solve for x:\n\n  2x = 4");
        assert_eq!(card.answer(), "x = 2\n\nbecause 4 / 2 = 2");
        Ok(())
    }

    #[test]
    fn test_label_shares_line() -> Result<(), ParseError> {
        let content = "Topic:Rivers\nQuestion: Longest river?\nAnswer: The Nile";
        let card = parse(content)?;
        assert_eq!(card.topic(), "Rivers");
        assert_eq!(card.question(), "Longest river?");
        assert_eq!(card.answer(), "The Nile");
        Ok(())
    }

    #[test]
    fn test_missing_topic() {
        let content = "Question:\nQ\nAnswer:\nA\n";
        assert_eq!(
            parse(content),
            Err(ParseError::MissingSection(Section::Topic))
        );
    }

    #[test]
    fn test_missing_question() {
        let content = "Topic: T\nAnswer:\nA\n";
        assert_eq!(
            parse(content),
            Err(ParseError::MissingSection(Section::Question))
        );
    }

    #[test]
    fn test_missing_answer() {
        let content = "Topic: T\nQuestion:\nQ\n";
        assert_eq!(
            parse(content),
            Err(ParseError::MissingSection(Section::Answer))
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(parse(""), Err(ParseError::MissingSection(Section::Topic)));
    }

    #[test]
    fn test_malformed_topic() {
        let content = "Topic:   \nQuestion:\nQ\nAnswer:\nA\n";
        assert_eq!(parse(content), Err(ParseError::MalformedTopic));
    }

    #[test]
    fn test_legacy_two_header_format() {
        let content = "Question:\nWhat is 2+2?\n\nAnswer:\n4\n";
        assert_eq!(
            parse(content),
            Err(ParseError::MissingSection(Section::Topic))
        );
    }

    #[test]
    fn test_topic_after_question_is_body() {
        let content = "Question:\nQ\nTopic: T\nAnswer:\nA\n";
        assert_eq!(
            parse(content),
            Err(ParseError::MissingSection(Section::Topic))
        );
    }

    #[test]
    fn test_header_tokens_inside_body() -> Result<(), ParseError> {
        let content = "Topic: Grammar\nQuestion:\nWhat follows the word Answer: in a form?\nAnswer:\nA colon; see Question: above.\nAnswer: still the answer\n";
        let card = parse(content)?;
        assert_eq!(card.question(), "What follows the word Answer: in a form?");
        assert_eq!(
            card.answer(),
            "A colon; see Question: above.\nAnswer: still the answer"
        );
        Ok(())
    }

    #[test]
    fn test_first_topic_wins() -> Result<(), ParseError> {
        let content = "Topic: First\nTopic: Second\nQuestion:\nQ\nAnswer:\nA\n";
        let card = parse(content)?;
        assert_eq!(card.topic(), "First");
        Ok(())
    }

    #[test]
    fn test_empty_sections_parse() -> Result<(), ParseError> {
        let content = "Topic: T\nQuestion:\n\nAnswer:\n";
        let card = parse(content)?;
        assert_eq!(card.question(), "");
        assert_eq!(card.answer(), "");
        assert!(!card.is_complete());
        Ok(())
    }

    #[test]
    fn test_crlf_and_bom() -> Result<(), ParseError> {
        let content = "\u{feff}Topic: T\r\n\r\nQuestion:\r\nQ\r\n\r\nAnswer:\r\nA\r\n";
        let card = parse(content)?;
        assert_eq!(card.topic(), "T");
        assert_eq!(card.question(), "Q");
        assert_eq!(card.answer(), "A");
        Ok(())
    }

    #[test]
    fn test_format_card_reads_back() -> Result<(), ParseError> {
        let text = format_card("Cell Biology", "What is the\npowerhouse of the cell?", "Mitochondria");
        let card = parse(&text)?;
        assert_eq!(card.topic(), "Cell Biology");
        assert_eq!(card.question(), "What is the\npowerhouse of the cell?");
        assert_eq!(card.answer(), "Mitochondria");
        Ok(())
    }
}
