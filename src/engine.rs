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
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::author::Author;
use crate::config::Config;
use crate::deck::Deck;
use crate::deck::card_count;
use crate::deck::category_dir;
use crate::deck::list_categories;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::ledger::Ledger;
use crate::ledger::Tally;
use crate::session::Frame;
use crate::session::Session;
use crate::types::policy::Policy;

/// The operations a front end drives: pick a category, study it, write new
/// cards, forget results. Owns the collection's configuration, its results
/// ledger and the session in progress, if any.
pub struct Engine {
    root: PathBuf,
    config: Config,
    ledger: Ledger,
    selected: Option<String>,
    session: Option<Session>,
}

impl Engine {
    /// Open the collection at `root`. Fails with a corrupt-ledger error if the
    /// results file cannot be read; see [`Engine::reset_ledger`].
    pub fn open(root: &Path) -> Fallible<Self> {
        if !root.is_dir() {
            return fail("directory does not exist.");
        }
        let root = root.canonicalize()?;
        let config = Config::load(&root)?;
        let ledger = Ledger::load(&config.ledger_path(&root))?;
        Ok(Self {
            root,
            config,
            ledger,
            selected: None,
            session: None,
        })
    }

    /// Replace the collection's results file with an empty one.
    pub fn reset_ledger(root: &Path) -> Fallible<()> {
        let config = Config::load(root)?;
        Ledger::reset(&config.ledger_path(root))?;
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn typing_speed(&self) -> u32 {
        self.config.typing_speed
    }

    pub fn sound(&self) -> bool {
        self.config.sound
    }

    pub fn categories(&self) -> Fallible<Vec<String>> {
        list_categories(&self.root)
    }

    /// Make `name` the current category. Returns its card count.
    pub fn select_category(&mut self, name: &str) -> Fallible<usize> {
        if !category_dir(&self.root, name)?.is_dir() {
            return fail(format!("category '{name}' does not exist."));
        }
        let count = self.card_count(name)?;
        self.selected = Some(name.to_string());
        Ok(count)
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn card_count(&self, category: &str) -> Fallible<usize> {
        card_count(&self.root, category, &self.config)
    }

    /// Start a new session, replacing any in progress. Returns the first
    /// frame; the renderer should animate it.
    pub fn start_session(&mut self, category: &str, policy: Policy) -> Fallible<Frame> {
        let deck = Deck::build(policy.filter, &self.ledger, &self.root, category, &self.config)?;
        let session = Session::start(&self.root, deck, policy, StdRng::from_entropy())?;
        let frame = session.frame();
        self.selected = Some(category.to_string());
        self.session = Some(session);
        Ok(frame)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn frame(&self) -> Option<Frame> {
        self.session.as_ref().map(|s| s.frame())
    }

    pub fn reveal_toggle(&mut self) -> Fallible<Frame> {
        self.session_mut()?.reveal_toggle()
    }

    pub fn mark(&mut self, correct: bool) -> Fallible<()> {
        let Some(session) = &self.session else {
            return Err(no_session());
        };
        session.mark(&mut self.ledger, correct)
    }

    pub fn advance(&mut self) -> Fallible<Frame> {
        self.session_mut()?.advance()
    }

    pub fn animation_complete(&mut self) -> Fallible<()> {
        let session = self.session_mut()?;
        if !session.is_animating() {
            log::debug!("Animation already complete for {}.", session.current_id());
        }
        session.animation_complete();
        Ok(())
    }

    pub fn end_session(&mut self) {
        self.session = None;
    }

    pub fn author_new_card(&self, category: &str) -> Fallible<Author> {
        Author::new(&self.root, category, &self.config)
    }

    /// Forget every recorded result under the category. The caller is
    /// responsible for asking first.
    pub fn clear_results(&mut self, category: &str) -> Fallible<usize> {
        self.ledger.clear_category(category)
    }

    pub fn results(&self, category: &str) -> Tally {
        self.ledger.tally(category)
    }

    fn session_mut(&mut self) -> Fallible<&mut Session> {
        self.session.as_mut().ok_or_else(no_session)
    }
}

fn no_session() -> ErrorReport {
    ErrorReport::new("no session in progress.")
}
