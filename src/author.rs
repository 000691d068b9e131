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
use std::fs::OpenOptions;
use std::fs::create_dir_all;
use std::fs::read_dir;
use std::fs::remove_file;
use std::io::ErrorKind as IoErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use crate::config::Config;
use crate::deck::category_dir;
use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::parser::Section;
use crate::parser::format_card;

/// A field of the card being written.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Field {
    Topic,
    Question,
    Answer,
}

/// Where the workflow is.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    Topic,
    Question,
    Answer,
    /// All fields are in; the user can commit, redo a field, or abandon.
    Review,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Topic => write!(f, "topic"),
            Step::Question => write!(f, "question"),
            Step::Answer => write!(f, "answer"),
            Step::Review => write!(f, "review"),
        }
    }
}

impl From<Field> for Step {
    fn from(field: Field) -> Self {
        match field {
            Field::Topic => Step::Topic,
            Field::Question => Step::Question,
            Field::Answer => Step::Answer,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Warning {
    EmptyQuestion,
    EmptyAnswer,
}

impl Display for Warning {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Warning::EmptyQuestion => write!(f, "the question is empty."),
            Warning::EmptyAnswer => write!(f, "the answer is empty."),
        }
    }
}

/// The fields entered so far.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Draft {
    pub topic: String,
    pub question: String,
    pub answer: String,
}

/// Builds cards one at a time and writes them into a category.
pub struct Author {
    category: String,
    dir: PathBuf,
    config: Config,
    step: Step,
    draft: Draft,
    /// Set while a single field is being redone from the review step.
    redoing: bool,
    committed: Vec<PathBuf>,
}

impl Author {
    /// Start writing cards into `category`, creating its directory if needed.
    pub fn new(root: &Path, category: &str, config: &Config) -> Fallible<Self> {
        let dir = category_dir(root, category)?;
        create_dir_all(&dir).map_err(|e| {
            ErrorReport::with_kind(
                ErrorKind::Write,
                format!("failed to create {}: {e}", dir.display()),
            )
        })?;
        Ok(Self {
            category: category.to_string(),
            dir,
            config: config.clone(),
            step: Step::Topic,
            draft: Draft::default(),
            redoing: false,
            committed: Vec::new(),
        })
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Files written by this workflow so far.
    pub fn committed(&self) -> &[PathBuf] {
        &self.committed
    }

    pub fn submit_topic(&mut self, text: &str) -> Fallible<()> {
        self.expect(Step::Topic)?;
        let topic = text.trim();
        if topic.is_empty() {
            return fail("the topic must not be empty.");
        }
        if topic.contains('\n') {
            return fail("the topic must be a single line.");
        }
        self.draft.topic = topic.to_string();
        self.next(Step::Question);
        Ok(())
    }

    /// An empty question is accepted with a warning.
    pub fn submit_question(&mut self, text: &str) -> Fallible<Option<Warning>> {
        self.expect(Step::Question)?;
        let question = text.trim();
        // A line like this would end the question when the file is read back.
        if question
            .lines()
            .any(|line| Section::Answer.match_header(line).is_some())
        {
            return fail("no line of the question may start with 'Answer:'.");
        }
        self.draft.question = question.to_string();
        self.next(Step::Answer);
        Ok(question.is_empty().then_some(Warning::EmptyQuestion))
    }

    /// An empty answer is accepted with a warning.
    pub fn submit_answer(&mut self, text: &str) -> Fallible<Option<Warning>> {
        self.expect(Step::Answer)?;
        let answer = text.trim();
        self.draft.answer = answer.to_string();
        self.next(Step::Review);
        Ok(answer.is_empty().then_some(Warning::EmptyAnswer))
    }

    /// From the review step, go back and enter one field again.
    pub fn redo(&mut self, field: Field) -> Fallible<()> {
        self.expect(Step::Review)?;
        self.step = field.into();
        self.redoing = true;
        Ok(())
    }

    /// Write the reviewed card. On failure the draft is kept, and the workflow
    /// stays at review so the commit can be retried or the draft abandoned.
    pub fn commit(&mut self) -> Fallible<PathBuf> {
        self.expect(Step::Review)?;
        let path = self.write().map_err(|e| {
            ErrorReport::with_kind(
                ErrorKind::Write,
                format!("failed to save the card in '{}': {e}", self.category),
            )
        })?;
        log::debug!("Wrote {}.", path.display());
        self.committed.push(path.clone());
        self.reset();
        Ok(path)
    }

    /// Throw the draft away and start over.
    pub fn abandon(&mut self) {
        self.reset();
    }

    fn reset(&mut self) {
        self.draft = Draft::default();
        self.step = Step::Topic;
        self.redoing = false;
    }

    fn expect(&self, step: Step) -> Fallible<()> {
        if self.step != step {
            return fail(format!(
                "expected the {step} step, but the workflow is at the {} step.",
                self.step
            ));
        }
        Ok(())
    }

    fn next(&mut self, step: Step) {
        if self.redoing {
            self.step = Step::Review;
            self.redoing = false;
        } else {
            self.step = step;
        }
    }

    /// Pick the file name with a sequence number after the existing cards,
    /// counted now rather than remembered, and create it without replacing
    /// anything.
    fn write(&self) -> std::io::Result<PathBuf> {
        let stem = sanitize(&self.draft.topic);
        let text = format_card(&self.draft.topic, &self.draft.question, &self.draft.answer);
        let mut seq = self.count_existing()? + 1;
        loop {
            let path = self.dir.join(format!("{stem}_{seq:03}{}", self.config.extension));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    let result = file
                        .write_all(text.as_bytes())
                        .and_then(|_| file.sync_all());
                    if let Err(e) = result {
                        let _ = remove_file(&path);
                        return Err(e);
                    }
                    return Ok(path);
                }
                Err(e) if e.kind() == IoErrorKind::AlreadyExists => seq += 1,
                Err(e) => return Err(e),
            }
        }
    }

    fn count_existing(&self) -> std::io::Result<usize> {
        let mut count = 0;
        for entry in read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let is_card = name
                .to_str()
                .is_some_and(|name| self.config.is_card_file(name));
            if is_card && entry.file_type()?.is_file() {
                count += 1;
            }
        }
        Ok(count)
    }
}

/// Turn a topic into a file name stem.
fn sanitize(topic: &str) -> String {
    let stem: String = topic
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.chars().all(|c| c == '_') {
        "card".to_string()
    } else {
        stem
    }
}
