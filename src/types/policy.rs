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

use clap::ValueEnum;

/// The order in which cards are drawn from a deck.
#[derive(ValueEnum, Clone, Copy, PartialEq, Eq, Debug)]
pub enum Order {
    /// Uniformly at random, with replacement.
    Random,
    /// In deck order, wrapping around at the end.
    Sequential,
}

/// Which cards of a category make up the deck.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Filter {
    /// Every card in the category.
    All,
    /// Only cards whose last recorded answer was wrong.
    IncorrectOnly,
}

/// A card selection policy: a filter and an order, chosen independently.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Policy {
    pub order: Order,
    pub filter: Filter,
}

impl Policy {
    pub fn new(order: Order, filter: Filter) -> Self {
        Self { order, filter }
    }

    #[cfg(test)]
    pub fn random() -> Self {
        Self::new(Order::Random, Filter::All)
    }

    #[cfg(test)]
    pub fn sequential() -> Self {
        Self::new(Order::Sequential, Filter::All)
    }

    pub fn incorrect_only(order: Order) -> Self {
        Self::new(order, Filter::IncorrectOnly)
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Order::Random => write!(f, "random"),
            Order::Sequential => write!(f, "sequential"),
        }
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.filter {
            Filter::All => write!(f, "{}", self.order),
            Filter::IncorrectOnly => write!(f, "{}, incorrect only", self.order),
        }
    }
}
