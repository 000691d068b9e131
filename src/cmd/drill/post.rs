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

use axum::Form;
use axum::extract::State;
use axum::response::Redirect;
use serde::Deserialize;

use crate::cmd::drill::state::ServerState;
use crate::engine::Engine;
use crate::error::ErrorKind;
use crate::error::Fallible;

#[derive(Debug, Deserialize, PartialEq, Eq)]
enum Action {
    Reveal,
    Right,
    Wrong,
    Next,
    /// Sent by the page when it has finished typing the text out.
    Typed,
    End,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Redirect {
    if form.action == Action::End {
        state.acquire().engine.end_session();
        state.shutdown();
        return Redirect::to("/");
    }
    let mut mutable = state.acquire();
    match action_handler(&mut mutable.engine, form.action) {
        Ok(_) => {}
        Err(e) if e.kind() == &ErrorKind::EngineBusy => {
            // A click that arrived before the typing finished.
            log::debug!("ignored: {e}");
        }
        Err(e) => {
            log::error!("{e}");
            mutable.error = Some(e.to_string());
        }
    }
    Redirect::to("/")
}

fn action_handler(engine: &mut Engine, action: Action) -> Fallible<()> {
    match action {
        Action::Reveal => {
            engine.reveal_toggle()?;
        }
        Action::Right => engine.mark(true)?,
        Action::Wrong => engine.mark(false)?,
        Action::Next => {
            engine.advance()?;
        }
        Action::Typed => engine.animation_complete()?,
        Action::End => engine.end_session(),
    }
    Ok(())
}
