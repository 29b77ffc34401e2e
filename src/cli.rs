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


use std::process::exit;

use clap::Parser;
use quizapp_core::countdown::DEFAULT_SECONDS_PER_QUESTION;
use quizapp_core::error::Fallible;
use tokio::spawn;

use crate::cmd::check::check_bank;
use crate::cmd::clear::clear_progress;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::utils::wait_for_server;

pub const DEFAULT_DB_PATH: &str = "quizapp.db";

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Take the quiz through a web interface.
    Serve {
        /// Path to a question bank file or directory. By default, the built-in bank is used.
        bank: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Where saved progress is kept.
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: String,
        /// Time limit for each question.
        #[arg(long, default_value_t = DEFAULT_SECONDS_PER_QUESTION)]
        seconds_per_question: u32,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Check that a question bank is valid.
    Check {
        /// Path to a question bank file or directory. By default, the built-in bank is used.
        bank: Option<String>,
        /// Also print the question order this seed produces.
        #[arg(long)]
        seed: Option<u32>,
    },
    /// Delete saved progress.
    Clear {
        #[arg(long, default_value = DEFAULT_DB_PATH)]
        db: String,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Serve {
            bank,
            host,
            port,
            db,
            seconds_per_question,
            open_browser,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                bank,
                host,
                port,
                db,
                seconds_per_question,
            };
            start_server(config).await
        }
        Command::Check { bank, seed } => check_bank(bank, seed),
        Command::Clear { db } => clear_progress(&db),
    }
}
