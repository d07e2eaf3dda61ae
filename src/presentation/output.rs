//! Output Rendering
//!
//! Human-readable run summary and the process exit status.

use std::io::{self, Write};

use crate::domain::value_objects::{ChangeSet, Tally};

/// Exit status when the catalogs were already in sync
pub const EXIT_IN_SYNC: i32 = 0;
/// Exit status when changes were applied
pub const EXIT_CHANGED: i32 = 1;
/// Exit status for usage, configuration and sync errors
pub const EXIT_FAILURE: i32 = 2;

/// Exit status for a completed run
pub fn exit_code(changes: &ChangeSet) -> i32 {
    if changes.is_empty() {
        EXIT_IN_SYNC
    } else {
        EXIT_CHANGED
    }
}

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// NDJSON event stream for scripting
    Json,
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    write: &'static str,
    arrow: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            write: "●",
            arrow: "→",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            write: "[*]",
            arrow: "->",
        }
    }
}

/// Text renderer for mirror summaries
pub struct TextRenderer {
    /// Whether to use unicode
    pub unicode: bool,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self { unicode: true }
    }
}

impl TextRenderer {
    /// Print the summary to stdout
    pub fn render(&self, changes: &ChangeSet, source: &str, destination: &str) -> io::Result<()> {
        let stdout = io::stdout();
        self.render_to(&mut stdout.lock(), changes, source, destination)
    }

    pub fn render_to<W: Write>(
        &self,
        out: &mut W,
        changes: &ChangeSet,
        source: &str,
        destination: &str,
    ) -> io::Result<()> {
        let icons = if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        };

        if changes.is_empty() {
            writeln!(out, "{} Already in sync", icons.check)?;
            writeln!(out)?;
            writeln!(out, "  {} {} {}", source, icons.arrow, destination)?;
            return Ok(());
        }

        let noun = if changes.total() == 1 { "change" } else { "changes" };
        writeln!(
            out,
            "{} Mirror complete: {} {}",
            icons.write,
            changes.total(),
            noun
        )?;
        writeln!(out)?;
        writeln!(out, "  {} {} {}", source, icons.arrow, destination)?;
        writeln!(out)?;
        write_tally(out, "organizations", &changes.organizations)?;
        write_tally(out, "packages", &changes.packages)?;
        write_tally(out, "resources", &changes.resources)?;
        Ok(())
    }
}

fn write_tally<W: Write>(out: &mut W, label: &str, tally: &Tally) -> io::Result<()> {
    writeln!(
        out,
        "  {:<14} {} created, {} updated, {} deleted",
        label, tally.created, tally.updated, tally.deleted
    )
}
