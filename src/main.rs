//! Binary entrypoint that launches the portfolio chat server.

use std::process::ExitCode;

use portfolio_chat::start_chat_server;

/// Start the chat server with the built-in catalog and default config.
fn main() -> ExitCode {
    start_chat_server::run()
}
