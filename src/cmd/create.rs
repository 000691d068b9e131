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

use crate::author::Author;
use crate::author::Field;
use crate::author::Step;
use crate::cmd::prompt::Prompter;
use crate::engine::Engine;
use crate::error::Fallible;

/// Write cards into a category interactively until the user stops or the
/// input ends. Returns how many cards were saved.
pub fn create_cards<R: BufRead, W: Write>(
    engine: &Engine,
    category: &str,
    prompter: &mut Prompter<R, W>,
) -> Fallible<usize> {
    let mut author: Author = engine.author_new_card(category)?;
    prompter.say(&format!("Writing cards into '{}'.", author.category()))?;
    // Cards saved into categories left behind.
    let mut saved = 0;
    loop {
        match author.step() {
            Step::Topic => {
                let Some(topic) = prompter.line("Topic: ")? else {
                    break;
                };
                if let Err(e) = author.submit_topic(&topic) {
                    prompter.say(&e.to_string())?;
                }
            }
            Step::Question => {
                let Some(question) = prompter.multiline("Question:")? else {
                    break;
                };
                match author.submit_question(&question) {
                    Ok(Some(warning)) => prompter.say(&format!("warning: {warning}"))?,
                    Ok(None) => {}
                    Err(e) => prompter.say(&e.to_string())?,
                }
            }
            Step::Answer => {
                let Some(answer) = prompter.multiline("Answer:")? else {
                    break;
                };
                if let Some(warning) = author.submit_answer(&answer)? {
                    prompter.say(&format!("warning: {warning}"))?;
                }
            }
            Step::Review => {
                let draft = author.draft();
                prompter.say(&format!(
                    "\nTopic: {}\n\nQuestion:\n{}\n\nAnswer:\n{}\n",
                    draft.topic, draft.question, draft.answer
                ))?;
                let Some(choice) =
                    prompter.line("[s]ave, redo [t]opic/[q]uestion/[a]nswer, or [d]iscard? ")?
                else {
                    break;
                };
                match choice.trim().to_lowercase().as_str() {
                    "s" | "save" => match author.commit() {
                        Ok(path) => {
                            prompter.say(&format!("Saved {}.", path.display()))?;
                            if !another(engine, &mut author, &mut saved, prompter)? {
                                break;
                            }
                        }
                        Err(e) => {
                            // The draft is still there; the next round asks again.
                            prompter.say(&e.to_string())?;
                        }
                    },
                    "t" | "topic" => author.redo(Field::Topic)?,
                    "q" | "question" => author.redo(Field::Question)?,
                    "a" | "answer" => author.redo(Field::Answer)?,
                    "d" | "discard" => {
                        author.abandon();
                        if !another(engine, &mut author, &mut saved, prompter)? {
                            break;
                        }
                    }
                    _ => prompter.say("Please answer s, t, q, a or d.")?,
                }
            }
        }
    }
    Ok(saved + author.committed().len())
}

/// Ask whether to keep going, and where. An unusable category name leaves the
/// current one in place.
fn another<R: BufRead, W: Write>(
    engine: &Engine,
    author: &mut Author,
    saved: &mut usize,
    prompter: &mut Prompter<R, W>,
) -> Fallible<bool> {
    if !prompter.confirm("Write another card?")? {
        return Ok(false);
    }
    if prompter.confirm("Switch to another category?")? {
        let Some(category) = prompter.line("Category: ")? else {
            return Ok(false);
        };
        match engine.author_new_card(category.trim()) {
            Ok(next) => {
                *saved += author.committed().len();
                *author = next;
                prompter.say(&format!("Writing cards into '{}'.", author.category()))?;
            }
            Err(e) => {
                prompter.say(&e.to_string())?;
                prompter.say(&format!("Still writing into '{}'.", author.category()))?;
            }
        }
    }
    Ok(true)
}
