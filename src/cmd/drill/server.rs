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

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::net::TcpStream;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::time::sleep;

use crate::cmd::drill::get::get_handler;
use crate::cmd::drill::post::post_handler;
use crate::cmd::drill::state::MutableState;
use crate::cmd::drill::state::ServerState;
use crate::engine::Engine;
use crate::error::Fallible;
use crate::types::policy::Policy;

pub struct ServerConfig {
    pub category: String,
    pub policy: Policy,
    pub port: u16,
    pub open_browser: bool,
}

pub async fn start_server(mut engine: Engine, config: ServerConfig) -> Fallible<()> {
    let ServerConfig {
        category,
        policy,
        port,
        open_browser,
    } = config;

    let count = engine.select_category(&category)?;
    log::debug!("{count} cards in {category} under {}.", engine.root().display());

    // Fails on an empty selection before anything is bound.
    let frame = engine.start_session(&category, policy)?;
    log::debug!(
        "Drilling {} cards from {category} ({policy}), first is {}.",
        engine.session().map(|s| s.deck().len()).unwrap_or(0),
        frame.source_id
    );

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let state = ServerState {
        typing_speed: engine.typing_speed(),
        sound: engine.sound(),
        mutable: Arc::new(Mutex::new(MutableState {
            engine,
            error: None,
        })),
        shutdown_tx: Arc::new(Mutex::new(Some(shutdown_tx))),
    };
    let app = Router::new();
    let app = app.route("/", get(get_handler).post(post_handler));
    let app = app.route("/script.js", get(script_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind: SocketAddr = SocketAddr::from(([127, 0, 0, 1], port));

    if open_browser {
        let url = format!("http://{bind}/");
        tokio::spawn(async move {
            loop {
                if let Ok(stream) = TcpStream::connect(bind).await {
                    drop(stream);
                    break;
                }
                sleep(Duration::from_millis(1)).await;
            }
            if let Err(e) = open::that(&url) {
                log::warn!("Failed to open {url}: {e}");
            }
        });
    }

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    println!("Drill running at http://{bind}/");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            tokio::select! {
                _ = signal::ctrl_c() => {
                    log::debug!("Interrupted.");
                }
                _ = shutdown_rx => {
                    log::debug!("Session ended.");
                }
            }
        })
        .await?;
    Ok(())
}

async fn script_handler(
    State(state): State<ServerState>,
) -> (StatusCode, [(HeaderName, &'static str); 1], String) {
    let mut content = String::new();
    content.push_str(&format!("const TYPING_SPEED = {};\n", state.typing_speed));
    content.push_str(&format!("const SOUND = {};\n", state.sound));
    content.push('\n');
    content.push_str(include_str!("script.js"));
    (StatusCode::OK, [(CONTENT_TYPE, "text/javascript")], content)
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, "public, max-age=604800, immutable"),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}
