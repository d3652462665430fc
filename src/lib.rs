//! Conversational response engine for a personal portfolio site.
//!
//! The engine selects, personalizes, and sequences canned natural-language
//! replies for free-text visitor messages, with a one-slot conversational
//! context per session to resolve bare affirmations ("sí", "dale").

// Strict practices: no unsafe, everything public is documented.
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(non_upper_case_globals)]
#![deny(nonstandard_style)]
#![deny(unused_must_use)]
#![forbid(unsafe_op_in_unsafe_fn)]
// Clippy discipline
#![deny(clippy::all)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// Tests are allowed to panic on broken invariants.
#![cfg_attr(
    test,
    allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)
)]

/// Core response engine: normalization, moderation, matching, composition,
/// context memory, and personalization.
pub mod engine;
/// HTTP server and API routes.
pub mod server;
/// Entry helpers to start the chat server.
pub mod start_chat_server;
