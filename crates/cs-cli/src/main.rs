//! comment-section - an in-memory comment thread
//!
//! A line-oriented front end over `cs-core`: add comments, reply to them,
//! delete them and sort by recency.
//!
//! ## Quick Start
//!
//! ```bash
//! # Interactive session
//! comment-section run
//!
//! # Replay a script and print the result as JSON
//! comment-section run --script actions.txt --json
//!
//! # Write a default config file
//! comment-section config init
//! ```

mod action;
mod commands;
mod render;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
