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

use rand::Rng;
use rand::rngs::StdRng;

use crate::deck::Deck;
use crate::deck::load_card;
use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::ledger::Ledger;
use crate::types::card::Card;
use crate::types::policy::Order;
use crate::types::policy::Policy;
use crate::types::source_id::SourceId;

/// Which side of the card is up.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Side {
    Question,
    Answer,
}

impl Side {
    fn flip(self) -> Self {
        match self {
            Side::Question => Side::Answer,
            Side::Answer => Side::Question,
        }
    }
}

/// Everything the renderer needs to draw the current state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub source_id: SourceId,
    /// The card's file name, for use as a title.
    pub title: String,
    pub topic: String,
    pub side: Side,
    /// The text of the side that is up.
    pub text: String,
    /// Whether the renderer is expected to animate `text` and then call
    /// `animation_complete`.
    pub animating: bool,
}

/// A study session over one deck.
///
/// The session is always showing one side of one card, and is either
/// animating (the renderer is still typing the text out) or idle. Moving on
/// or flipping is refused while animating; marking is not.
pub struct Session {
    root: PathBuf,
    deck: Deck,
    policy: Policy,
    /// Index of the last card drawn. Sequential order steps from here.
    position: usize,
    /// Index of the card on screen. Lags `position` when a drawn card fails
    /// to load.
    shown: usize,
    card: Card,
    side: Side,
    animating: bool,
    rng: StdRng,
}

impl Session {
    /// Start a session on the first card the policy draws. The question is
    /// up and the animation is in progress.
    pub fn start(root: &Path, deck: Deck, policy: Policy, mut rng: StdRng) -> Fallible<Self> {
        if deck.is_empty() {
            return Err(ErrorReport::with_kind(
                ErrorKind::EmptyDeck,
                format!("there are no cards in '{}'.", deck.category()),
            ));
        }
        let position = match policy.order {
            Order::Random => rng.gen_range(0..deck.len()),
            Order::Sequential => 0,
        };
        let card = load_card(root, &deck.ids()[position])?;
        log::debug!(
            "Starting session on '{}' ({policy}) with {} cards.",
            deck.category(),
            deck.len()
        );
        Ok(Self {
            root: root.to_path_buf(),
            deck,
            policy,
            position,
            shown: position,
            card,
            side: Side::Question,
            animating: true,
            rng,
        })
    }

    pub fn frame(&self) -> Frame {
        let text = match self.side {
            Side::Question => self.card.question(),
            Side::Answer => self.card.answer(),
        };
        Frame {
            source_id: self.card.source_id().clone(),
            title: self.card.source_id().file_name().to_string(),
            topic: self.card.topic().to_string(),
            side: self.side,
            text: text.to_string(),
            animating: self.animating,
        }
    }

    /// Show the other side of the card.
    pub fn reveal_toggle(&mut self) -> Fallible<Frame> {
        self.ensure_idle()?;
        self.side = self.side.flip();
        self.animating = true;
        Ok(self.frame())
    }

    /// Record whether the current card was answered correctly. Replaces any
    /// earlier outcome for the card.
    pub fn mark(&self, ledger: &mut Ledger, correct: bool) -> Fallible<()> {
        ledger.mark(self.card.source_id(), correct)
    }

    /// Move to the next card, question side up.
    ///
    /// If the next card can no longer be read, the position still moves past
    /// it so the following call tries the one after, and the current card
    /// stays on screen.
    pub fn advance(&mut self) -> Fallible<Frame> {
        self.ensure_idle()?;
        let next = self.next_position();
        self.position = next;
        let card = load_card(&self.root, &self.deck.ids()[next])?;
        self.card = card;
        self.shown = next;
        self.side = Side::Question;
        self.animating = true;
        Ok(self.frame())
    }

    /// Called by the renderer when it has finished drawing the text.
    pub fn animation_complete(&mut self) {
        self.animating = false;
    }

    pub fn current_id(&self) -> &SourceId {
        self.card.source_id()
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Index in the deck of the card on screen.
    pub fn position(&self) -> usize {
        self.shown
    }

    fn next_position(&mut self) -> usize {
        match self.policy.order {
            Order::Random => self.rng.gen_range(0..self.deck.len()),
            Order::Sequential => (self.position + 1) % self.deck.len(),
        }
    }

    fn ensure_idle(&self) -> Fallible<()> {
        if self.animating {
            return Err(ErrorReport::with_kind(
                ErrorKind::EngineBusy,
                "the card is still being shown.",
            ));
        }
        Ok(())
    }
}
