//! Live player dashboard client.
//!
//! Connects to the dashboard gateway of a guild and prints the current track,
//! playback position and queue whenever the server pushes a change.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin dashsync -- watch --page-url https://host/dashboard/12345 --cookie 'identifier=abc'
//! printf 'Asia/Tokyo\nEurope/London\n' | cargo run --bin dashsync -- timezones tokyo
//! ```

use std::io::{self, BufRead};

use clap::{Parser, Subcommand};

use dashsync_client::{ClientConfig, run_client, time::TimeFormat, timezone::visible_timezones};
use dashsync_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "dashsync")]
#[command(about = "Live player dashboard client over WebSocket", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Connect to a guild dashboard and mirror its player state
    Watch {
        /// Dashboard page URL; the gateway lives on the same host
        #[arg(short = 'u', long, env = "DASHSYNC_PAGE_URL")]
        page_url: String,

        /// Cookie string (`name=value; ...`); the `identifier` cookie identifies the session
        #[arg(short = 'c', long, env = "DASHSYNC_COOKIE", default_value = "")]
        cookie: String,

        /// Duration label format
        #[arg(short = 't', long, env = "DASHSYNC_TIME_FORMAT", value_enum, default_value_t = TimeFormat::Compact)]
        time_format: TimeFormat,
    },
    /// Filter timezone names read from stdin, one per line
    Timezones {
        /// Case-insensitive search text
        #[arg(default_value = "")]
        query: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(&["dashsync_client", env!("CARGO_BIN_NAME")], "info");

    let args = Args::parse();

    match args.command {
        Command::Watch {
            page_url,
            cookie,
            time_format,
        } => {
            let config = match ClientConfig::from_page(&page_url, &cookie, time_format) {
                Ok(config) => config,
                Err(e) => {
                    tracing::error!("Invalid configuration: {}", e);
                    std::process::exit(2);
                }
            };

            if let Err(e) = run_client(config).await {
                tracing::error!("Client error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Timezones { query } => {
            let items = match io::stdin().lock().lines().collect::<Result<Vec<_>, _>>() {
                Ok(items) => items,
                Err(e) => {
                    tracing::error!("Failed to read timezones from stdin: {}", e);
                    std::process::exit(1);
                }
            };
            for item in visible_timezones(&query, &items) {
                println!("{}", item);
            }
        }
    }
}
