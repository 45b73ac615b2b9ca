//! Line-oriented action language
//!
//! Each input line is one action. Positions are 1-based, as shown in the
//! rendered list, and are converted to 0-based store indices here.

use anyhow::{bail, Context, Result};

/// A single user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Set the new-comment draft and submit it
    Add(String),
    /// Set the reply draft of a comment
    Draft { index: usize, text: String },
    /// Submit a reply, optionally replacing the draft first
    Reply { index: usize, text: Option<String> },
    /// Delete a comment
    Delete(usize),
    /// Sort comments and replies newest first
    Sort,
    /// Render the current snapshot
    List,
    /// Print the current snapshot as JSON
    Json,
    /// Show available actions
    Help,
    /// Stop reading input
    Quit,
}

impl Action {
    /// Whether the action changes the store or drafts
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Action::Add(_)
                | Action::Draft { .. }
                | Action::Reply { .. }
                | Action::Delete(_)
                | Action::Sort
        )
    }

    /// Parse one line; blank lines and `#` comments yield `None`
    pub fn parse(line: &str) -> Result<Option<Action>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let action = match verb.to_ascii_lowercase().as_str() {
            "add" => Action::Add(rest.to_string()),
            "draft" => {
                let (index, text) = split_position(rest)?;
                Action::Draft {
                    index,
                    text: text.to_string(),
                }
            }
            "reply" => {
                let (index, text) = split_position(rest)?;
                Action::Reply {
                    index,
                    text: (!text.is_empty()).then(|| text.to_string()),
                }
            }
            "delete" | "del" | "rm" => {
                let (index, extra) = split_position(rest)?;
                if !extra.is_empty() {
                    bail!("Unexpected text after position: '{}'", extra);
                }
                Action::Delete(index)
            }
            "sort" => no_args(Action::Sort, rest)?,
            "list" | "ls" => no_args(Action::List, rest)?,
            "json" => no_args(Action::Json, rest)?,
            "help" | "?" => Action::Help,
            "quit" | "exit" => Action::Quit,
            other => bail!("Unknown action '{}' (try 'help')", other),
        };

        Ok(Some(action))
    }
}

/// Usage text for the `help` action
pub const HELP: &str = "\
Actions:
  add <text>          add a comment
  draft <n> <text>    set the reply draft of comment n
  reply <n> [text]    reply to comment n (uses the draft if no text given)
  delete <n>          delete comment n and its replies
  sort                sort comments and replies newest first
  list                show all comments
  json                print comments as JSON
  help                show this help
  quit                exit";

fn split_position(rest: &str) -> Result<(usize, &str)> {
    let (position, text) = match rest.split_once(char::is_whitespace) {
        Some((position, text)) => (position, text.trim()),
        None => (rest, ""),
    };
    if position.is_empty() {
        bail!("Missing comment position");
    }
    let position: usize = position
        .parse()
        .with_context(|| format!("Invalid comment position '{}'", position))?;
    if position == 0 {
        bail!("Comment positions start at 1");
    }
    Ok((position - 1, text))
}

fn no_args(action: Action, rest: &str) -> Result<Action> {
    if !rest.is_empty() {
        bail!("Unexpected arguments: '{}'", rest);
    }
    Ok(action)
}
