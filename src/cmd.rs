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

pub mod categories;
pub mod check;
pub mod clear;
pub mod create;
pub mod drill;
pub mod prompt;
pub mod stats;

use std::env::current_dir;
use std::io::BufRead;
use std::io::Write;
use std::path::PathBuf;

use crate::cmd::prompt::Prompter;
use crate::engine::Engine;
use crate::error::ErrorKind;
use crate::error::Fallible;

pub fn resolve_directory(directory: Option<String>) -> Fallible<PathBuf> {
    match directory {
        Some(dir) => Ok(PathBuf::from(dir)),
        None => Ok(current_dir()?),
    }
}

/// Open the collection, offering to reset the results file if it is corrupt.
pub fn open_engine<R: BufRead, W: Write>(
    directory: Option<String>,
    prompter: &mut Prompter<R, W>,
) -> Fallible<Engine> {
    let directory = resolve_directory(directory)?;
    match Engine::open(&directory) {
        Ok(engine) => Ok(engine),
        Err(e) if e.kind() == &ErrorKind::CorruptLedger => {
            prompter.say(&e.to_string())?;
            if prompter.confirm("Reset the results file? All recorded results will be lost.")? {
                Engine::reset_ledger(&directory)?;
                Engine::open(&directory)
            } else {
                Err(e)
            }
        }
        Err(e) => Err(e),
    }
}
