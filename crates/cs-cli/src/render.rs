//! Terminal rendering of snapshots

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use cs_core::config::DisplayConfig;
use cs_core::{CommentSection, Snapshot};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Format a timestamp in local time
///
/// Falls back to RFC 3339 when the pattern has an unknown specifier.
pub fn format_timestamp(ts: &DateTime<Utc>, format: &str) -> String {
    let local = ts.with_timezone(&Local);
    let mut out = String::new();
    match write!(out, "{}", local.format(format)) {
        Ok(()) => out,
        Err(_) => local.to_rfc3339(),
    }
}

/// Write the comment list, including pending reply drafts
pub fn render_section(
    out: &mut impl Write,
    section: &CommentSection,
    display: &DisplayConfig,
) -> io::Result<()> {
    let snapshot = section.snapshot();
    render_header(out, &snapshot)?;

    for (index, comment) in snapshot.iter().enumerate() {
        let mut info = format_timestamp(&comment.created_at, &display.timestamp_format);
        if display.show_reply_count && comment.reply_count() > 0 {
            let noun = if comment.reply_count() == 1 { "reply" } else { "replies" };
            info.push_str(&format!(" · {} {}", comment.reply_count(), noun));
        }
        if display.show_ids {
            info.push_str(&format!(" [{}]", comment.id.short()));
        }

        writeln!(out, "{:>3}. {}", index + 1, comment.text)?;
        writeln!(out, "     {}", info.dimmed())?;

        for reply in comment.replies() {
            let mut reply_info = format_timestamp(&reply.created_at, &display.timestamp_format);
            if display.show_ids {
                reply_info.push_str(&format!(" [{}]", reply.id.short()));
            }
            writeln!(out, "     ↳ {}", reply.text)?;
            writeln!(out, "       {}", reply_info.dimmed())?;
        }

        if let Some(draft) = section.reply_draft_by_id(&comment.id) {
            writeln!(out, "     {} {}", "draft:".yellow(), draft)?;
        }
    }

    Ok(())
}

fn render_header(out: &mut impl Write, snapshot: &Snapshot) -> io::Result<()> {
    let title = format!("Comments ({})", snapshot.len());
    writeln!(out, "{}", title.bold())?;
    if snapshot.is_empty() {
        writeln!(out, "  {}", "No comments yet.".dimmed())?;
    }
    Ok(())
}
