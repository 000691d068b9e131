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

use std::io::stdin;
use std::io::stdout;

use clap::Parser;

use crate::cmd::categories::list_categories;
use crate::cmd::check::check_collection;
use crate::cmd::clear::clear_results;
use crate::cmd::create::create_cards;
use crate::cmd::drill::server::ServerConfig;
use crate::cmd::drill::server::start_server;
use crate::cmd::open_engine;
use crate::cmd::prompt::Prompter;
use crate::cmd::resolve_directory;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;
use crate::types::policy::Filter;
use crate::types::policy::Order;
use crate::types::policy::Policy;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Drill the cards in a category.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The category to drill.
        #[arg(long)]
        category: String,
        /// The order in which cards are shown.
        #[arg(long, value_enum, default_value_t = Order::Random)]
        order: Order,
        /// Only drill cards whose last recorded result was wrong.
        #[arg(long)]
        incorrect: bool,
        /// The port to use for the web server.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Don't open the browser automatically.
        #[arg(long)]
        no_open: bool,
    },
    /// Write new cards into a category.
    Create {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The category to write into. Created if it does not exist.
        #[arg(long)]
        category: String,
    },
    /// Check the integrity of the collection.
    Check {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Print collection statistics as JSON.
    Stats {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Forget the recorded results for a category.
    Clear {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// The category whose results are cleared.
        #[arg(long)]
        category: String,
        /// Don't ask for confirmation.
        #[arg(long)]
        yes: bool,
    },
    /// List the categories in the collection.
    Categories {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    let stdin = stdin();
    let mut prompter = Prompter::new(stdin.lock(), stdout());
    match cli {
        Command::Drill {
            directory,
            category,
            order,
            incorrect,
            port,
            no_open,
        } => {
            let engine = open_engine(directory, &mut prompter)?;
            let policy = if incorrect {
                Policy::incorrect_only(order)
            } else {
                Policy::new(order, Filter::All)
            };
            let config = ServerConfig {
                category,
                policy,
                port,
                open_browser: !no_open,
            };
            match start_server(engine, config).await {
                Err(e) if e.is_empty_selection() => {
                    println!("{}", e.message());
                    Ok(())
                }
                result => result,
            }
        }
        Command::Create {
            directory,
            category,
        } => {
            let engine = open_engine(directory, &mut prompter)?;
            let count = create_cards(&engine, &category, &mut prompter)?;
            log::debug!("Wrote {count} cards.");
            Ok(())
        }
        Command::Check { directory } => {
            let directory = resolve_directory(directory)?;
            check_collection(&directory)
        }
        Command::Stats { directory } => {
            let engine = open_engine(directory, &mut prompter)?;
            print_stats(&engine)
        }
        Command::Clear {
            directory,
            category,
            yes,
        } => {
            let mut engine = open_engine(directory, &mut prompter)?;
            clear_results(&mut engine, &category, yes, &mut prompter)?;
            Ok(())
        }
        Command::Categories { directory } => {
            let engine = open_engine(directory, &mut prompter)?;
            list_categories(&engine)
        }
    }
}
