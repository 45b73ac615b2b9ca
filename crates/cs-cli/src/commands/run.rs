//! Run command
//!
//! Drive a comment section from stdin or a script file.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use cs_core::config::DisplayConfig;
use cs_core::{CommentSection, CommentSectionError, Config, SystemClock};
use std::fs;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::action::{Action, HELP};
use crate::render::render_section;

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Read actions from a file instead of stdin
    #[arg(long, short)]
    pub script: Option<PathBuf>,

    /// Print only the final snapshot, as JSON
    #[arg(long)]
    pub json: bool,

    /// Start with an empty section instead of the seed comment
    #[arg(long)]
    pub no_seed: bool,

    /// Stop at the first action that fails
    #[arg(long)]
    pub strict: bool,
}

/// Whether to keep reading input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Applies actions to a section and writes output
pub struct Runner<W: Write> {
    section: CommentSection,
    display: DisplayConfig,
    render_each: bool,
    out: W,
}

impl<W: Write> Runner<W> {
    /// Create a runner over a section
    pub fn new(section: CommentSection, display: DisplayConfig, out: W) -> Self {
        Self {
            section,
            display,
            render_each: true,
            out,
        }
    }

    /// Render after every mutating action
    pub fn render_each(mut self, render_each: bool) -> Self {
        self.render_each = render_each;
        self
    }

    /// The section being driven
    pub fn section(&self) -> &CommentSection {
        &self.section
    }

    /// Apply one action
    pub fn apply(&mut self, action: Action) -> Result<Flow> {
        tracing::debug!("Applying {:?}", action);
        let mutation = action.is_mutation();

        match action {
            Action::Add(text) => {
                self.section.set_new_comment_draft(text);
                self.section
                    .submit_comment()
                    .context("Comment not added")?;
            }
            Action::Draft { index, text } => {
                self.section
                    .set_reply_draft(index, text)
                    .map_err(|e| position_error(e, index))?;
            }
            Action::Reply { index, text } => {
                let submitted = match text {
                    Some(text) => self.section.submit_reply_with(index, text),
                    None => self.section.submit_reply(index),
                };
                submitted
                    .map_err(|e| position_error(e, index))
                    .context("Reply not added")?;
            }
            Action::Delete(index) => {
                self.section
                    .delete_comment(index)
                    .map_err(|e| position_error(e, index))?;
            }
            Action::Sort => self.section.sort_by_recency(),
            Action::List => self.render()?,
            Action::Json => self.write_json()?,
            Action::Help => writeln!(self.out, "{}", HELP)?,
            Action::Quit => return Ok(Flow::Quit),
        }

        if mutation && self.render_each {
            self.render()?;
        }
        Ok(Flow::Continue)
    }

    /// Read and apply actions until input ends or a quit action
    ///
    /// Returns the number of failed actions. In strict mode the first
    /// failure is returned as an error instead.
    pub fn run_lines(&mut self, input: impl BufRead, strict: bool) -> Result<usize> {
        let mut failures = 0;

        for (number, line) in input.lines().enumerate() {
            let result = match line {
                Ok(line) => Action::parse(&line).and_then(|action| match action {
                    Some(action) => self.apply(action),
                    None => Ok(Flow::Continue),
                }),
                // The bad line is already consumed, so reading can go on
                Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                    Err(anyhow::Error::new(err).context("Input line is not valid UTF-8"))
                }
                Err(err) => return Err(err).context("Failed to read input"),
            };

            match result {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(err) if strict => {
                    return Err(err.context(format!("Line {}", number + 1)));
                }
                Err(err) => {
                    failures += 1;
                    tracing::warn!("Line {} failed: {:#}", number + 1, err);
                    eprintln!("{} {:#}", "✗".red(), err);
                }
            }
        }

        Ok(failures)
    }

    /// Render the current snapshot
    pub fn render(&mut self) -> Result<()> {
        render_section(&mut self.out, &self.section, &self.display)?;
        Ok(())
    }

    /// Write the current snapshot as JSON
    pub fn write_json(&mut self) -> Result<()> {
        let json = self.section.snapshot().to_json_pretty()?;
        writeln!(self.out, "{}", json)?;
        Ok(())
    }

    /// Give back the output writer
    pub fn into_output(self) -> W {
        self.out
    }
}

/// Rewrite index errors in the 1-based terms the user typed
fn position_error(err: CommentSectionError, index: usize) -> anyhow::Error {
    match err {
        CommentSectionError::OutOfRange { len, .. } => anyhow::anyhow!(
            "No comment at position {} (there are {})",
            index + 1,
            len
        ),
        other => other.into(),
    }
}

/// Execute the run command
pub fn execute(args: RunArgs, mut config: Config) -> Result<()> {
    if args.no_seed {
        config.store.seed = false;
    }

    let section = CommentSection::from_config(&config, Arc::new(SystemClock));
    let stdout = io::stdout();
    let mut runner = Runner::new(section, config.display.clone(), stdout.lock())
        .render_each(!args.json);

    if !args.json {
        runner.render()?;
    }

    let failures = match &args.script {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            runner.run_lines(BufReader::new(file), args.strict)?
        }
        None => runner.run_lines(io::stdin().lock(), args.strict)?,
    };

    if args.json {
        runner.write_json()?;
    }

    tracing::info!(
        "Finished with {} comments, {} failed actions",
        runner.section().store().len(),
        failures
    );
    runner.into_output().flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_core::{CommentStore, ManualClock};

    fn runner() -> (Runner<Vec<u8>>, Arc<ManualClock>) {
        colored::control::set_override(false);
        let clock = Arc::new(ManualClock::at_millis(1_000));
        let section = CommentSection::from_config(&Config::default(), clock.clone());
        let runner = Runner::new(section, DisplayConfig::default(), Vec::new());
        (runner, clock)
    }

    fn texts(runner: &Runner<Vec<u8>>) -> Vec<String> {
        runner
            .section()
            .snapshot()
            .iter()
            .map(|c| c.text.clone())
            .collect()
    }

    #[test]
    fn test_apply_add_and_reply() {
        let (mut runner, clock) = runner();
        clock.advance(1);
        runner.apply(Action::Add("Hello".to_string())).unwrap();
        runner
            .apply(Action::Reply {
                index: 0,
                text: Some("Hi".to_string()),
            })
            .unwrap();

        assert_eq!(texts(&runner), vec!["This is the first comment.", "Hello"]);
        let snapshot = runner.section().snapshot();
        assert_eq!(snapshot.get(0).unwrap().replies()[0].text, "Hi");
    }

    #[test]
    fn test_reply_uses_pending_draft() {
        let (mut runner, _) = runner();
        runner
            .apply(Action::Draft {
                index: 0,
                text: "drafted".to_string(),
            })
            .unwrap();
        runner.apply(Action::Reply { index: 0, text: None }).unwrap();

        let snapshot = runner.section().snapshot();
        assert_eq!(snapshot.get(0).unwrap().replies()[0].text, "drafted");
    }

    #[test]
    fn test_bad_position_reports_one_based() {
        let (mut runner, _) = runner();
        let err = runner.apply(Action::Delete(4)).unwrap_err();
        assert_eq!(err.to_string(), "No comment at position 5 (there are 1)");
        assert_eq!(runner.section().store().len(), 1);
    }

    #[test]
    fn test_empty_comment_rejected() {
        let (mut runner, _) = runner();
        assert!(runner.apply(Action::Add("  ".to_string())).is_err());
        assert_eq!(runner.section().store().len(), 1);
    }

    #[test]
    fn test_run_lines_scenario() {
        let (runner, clock) = runner();
        let mut runner = runner.render_each(false);
        clock.advance(1_000);

        let script = "# scenario\nadd Hello\nreply 1 Hi\nsort\ndelete 1\n";
        let failures = runner.run_lines(script.as_bytes(), true).unwrap();

        assert_eq!(failures, 0);
        assert_eq!(texts(&runner), vec!["This is the first comment."]);
        let snapshot = runner.section().snapshot();
        assert_eq!(snapshot.get(0).unwrap().replies()[0].text, "Hi");
    }

    #[test]
    fn test_run_lines_counts_failures_and_stops_on_quit() {
        let (runner, _) = runner();
        let mut runner = runner.render_each(false);

        let script = "delete 9\nbogus\nadd kept\nquit\nadd ignored\n";
        let failures = runner.run_lines(script.as_bytes(), false).unwrap();

        assert_eq!(failures, 2);
        assert_eq!(texts(&runner), vec!["This is the first comment.", "kept"]);
    }

    #[test]
    fn test_rejected_reply_text_keeps_earlier_draft() {
        let mut config = Config::default();
        config.input.max_length = 5;
        let section = CommentSection::from_config(&config, Arc::new(ManualClock::default()));
        let mut runner = Runner::new(section, DisplayConfig::default(), Vec::new());

        runner.apply(Action::parse("draft 1 keep").unwrap().unwrap()).unwrap();
        let err = runner
            .apply(Action::parse("reply 1 way too long").unwrap().unwrap())
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Reply not added"));
        assert_eq!(runner.section().reply_draft(0), Some("keep"));
        assert_eq!(runner.section().store().reply_count(), 0);
    }

    #[test]
    fn test_invalid_utf8_line_counts_as_failure() {
        let (runner, _) = runner();
        let mut runner = runner.render_each(false);

        let input: &[u8] = b"add one\n\xff\xfe\nadd two\n";
        let failures = runner.run_lines(input, false).unwrap();

        assert_eq!(failures, 1);
        assert_eq!(
            texts(&runner),
            vec!["This is the first comment.", "one", "two"]
        );
    }

    #[test]
    fn test_invalid_utf8_line_fails_in_strict_mode() {
        let (runner, _) = runner();
        let mut runner = runner.render_each(false);

        let input: &[u8] = b"add one\n\xff\nadd two\n";
        let err = runner.run_lines(input, true).unwrap_err();

        assert!(format!("{:#}", err).contains("Line 2"));
        assert_eq!(runner.section().store().len(), 2);
    }

    #[test]
    fn test_run_lines_strict_stops_at_first_failure() {
        let (runner, _) = runner();
        let mut runner = runner.render_each(false);

        let err = runner
            .run_lines("add one\ndelete 7\nadd two\n".as_bytes(), true)
            .unwrap_err();

        assert!(format!("{:#}", err).contains("Line 2"));
        assert_eq!(runner.section().store().len(), 2);
    }

    #[test]
    fn test_json_output() {
        let store = CommentStore::new(Arc::new(ManualClock::default()));
        let mut runner = Runner::new(
            CommentSection::new(store),
            DisplayConfig::default(),
            Vec::new(),
        );
        runner.apply(Action::Add("exported".to_string())).unwrap();
        runner.apply(Action::Json).unwrap();

        let out = String::from_utf8(runner.into_output()).unwrap();
        assert!(out.contains("\"text\": \"exported\""));
    }

    #[test]
    fn test_render_after_mutation() {
        let (mut runner, _) = runner();
        runner.apply(Action::Sort).unwrap();
        let out = String::from_utf8(runner.into_output()).unwrap();
        assert!(out.contains("Comments (1)"));
    }
}
