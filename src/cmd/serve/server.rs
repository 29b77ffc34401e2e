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


use std::future::pending;
use std::path::Path;

use axum::Router;
use axum::http::HeaderName;
use axum::http::StatusCode;
use axum::http::header::CACHE_CONTROL;
use axum::http::header::CONTENT_TYPE;
use axum::response::Html;
use axum::routing::get;
use axum::routing::post;
use quizapp_core::error::Fallible;
use quizapp_core::session::QuizSession;
use tokio::net::TcpListener;
use tokio::signal;

use crate::bank::load_bank;
use crate::cmd::serve::get::get_handler;
use crate::cmd::serve::post::post_handler;
use crate::cmd::serve::state::ServerState;
use crate::db::SqliteStore;
use crate::utils::CACHE_CONTROL_IMMUTABLE;

pub struct ServerConfig {
    pub bank: Option<String>,
    pub host: String,
    pub port: u16,
    pub db: String,
    pub seconds_per_question: u32,
}

pub async fn start_server(config: ServerConfig) -> Fallible<()> {
    let bank = load_bank(config.bank.as_deref())?;
    log::debug!("Loaded {} questions", bank.len());
    let store = SqliteStore::open(Path::new(&config.db))?;
    let session =
        QuizSession::new(bank, store).with_seconds_per_question(config.seconds_per_question);
    if session.has_saved_progress() {
        log::info!("Found saved progress in {}", config.db);
    }

    let state = ServerState::new(session);
    let app = Router::new();
    let app = app.route("/", get(get_handler));
    let app = app.route("/", post(post_handler));
    let app = app.route("/script.js", get(script_handler));
    let app = app.route("/style.css", get(style_handler));
    let app = app.fallback(not_found_handler);
    let app = app.with_state(state);
    let bind = format!("{}:{}", config.host, config.port);

    log::debug!("Starting server on {bind}");
    let listener = TcpListener::bind(bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn script_handler() -> (StatusCode, [(HeaderName, &'static str); 1], &'static str) {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/javascript")],
        include_str!("script.js"),
    )
}

async fn style_handler() -> (StatusCode, [(HeaderName, &'static str); 2], &'static [u8]) {
    let bytes = include_bytes!("style.css");
    (
        StatusCode::OK,
        [
            (CONTENT_TYPE, "text/css"),
            (CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE),
        ],
        bytes,
    )
}

async fn not_found_handler() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html("Not Found".to_string()))
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => log::debug!("Received Ctrl+C, shutting down gracefully"),
        Err(e) => {
            log::error!("Failed to install Ctrl+C handler: {e}");
            pending::<()>().await
        }
    }
}
