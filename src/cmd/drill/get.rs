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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;

use crate::cmd::drill::state::ServerState;
use crate::cmd::drill::template::page_template;
use crate::session::Side;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.acquire();
    let error = mutable.error.take();
    let engine = &mutable.engine;
    let Some(frame) = engine.frame() else {
        let body = html! {
            div.finished {
                h1 { "Session Ended" }
                p { "You can close this tab." }
            }
        };
        return (StatusCode::OK, Html(page_template("drill", body).into_string()));
    };
    let category = engine.selected_category().unwrap_or_default().to_string();
    let last_result = match engine.ledger().get(&frame.source_id) {
        Some(true) => "last answered right",
        Some(false) => "last answered wrong",
        None => "not answered yet",
    };
    let progress = match engine.session() {
        Some(session) => format!(
            "card {} of {}, {}",
            session.position() + 1,
            session.deck().len(),
            session.policy()
        ),
        None => String::new(),
    };
    let side = match frame.side {
        Side::Question => "Question",
        Side::Answer => "Answer",
    };
    let text: Markup = if frame.animating {
        html! {
            div id="text" class="text" data-animating="true" data-text=(frame.text) {}
        }
    } else {
        html! {
            div id="text" class="text" data-animating="false" { (frame.text) }
        }
    };
    let body = html! {
        div.root {
            div.card {
                div.header {
                    h1 { (frame.topic) }
                    div.file { (category) " / " (frame.title) }
                }
                @if let Some(error) = error {
                    div.error { (error) }
                }
                div.content {
                    div.side { (side) }
                    (text)
                }
                div.controls {
                    form action="/" method="post" {
                        input id="reveal" type="submit" name="action" value="Reveal" disabled[frame.animating];
                        div.spacer {}
                        input id="right" type="submit" name="action" value="Right";
                        input id="wrong" type="submit" name="action" value="Wrong";
                        div.spacer {}
                        input id="next" type="submit" name="action" value="Next" disabled[frame.animating];
                        div.spacer {}
                        input id="end" type="submit" name="action" value="End";
                    }
                }
                div.footer {
                    (progress) ", " (last_result)
                }
            }
        }
    };
    let html = page_template(&frame.title, body);
    (StatusCode::OK, Html(html.into_string()))
}
