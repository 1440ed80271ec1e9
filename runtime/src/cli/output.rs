//! CLI output: result lines on stdout, status decoration on stderr.

use crate::extraction::title::ScrapeResult;
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // Respect NO_COLOR env (https://no-color.org/)
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    // Status lines go to stderr, so that is the stream to check.
    std::io::stderr().is_terminal()
}

const GREEN: &str = "\x1b[32m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    pub fn plain() -> Self {
        Self { use_color: false }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(GREEN, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

/// Banner printed before the result lines.
pub const BANNER: &str = "With tasks:";

/// Result line for stdout: the bare title, empty on failure.
pub fn result_line(result: &ScrapeResult) -> String {
    result.to_string()
}

/// Trailing elapsed-time line.
pub fn elapsed_line(elapsed: Duration) -> String {
    format!("(Took {} secs)", elapsed.as_secs_f64())
}

/// One stderr line per failed identifier, then a found/failed count.
pub fn print_summary(s: &Styled, results: &[ScrapeResult]) {
    let found = results.iter().filter(|r| r.is_found()).count();
    let failed = results.len() - found;

    eprintln!();
    for r in results.iter().filter(|r| !r.is_found()) {
        eprintln!("  {} {:<13} {}", s.fail_sym(), r.outcome.kind(), s.dim(&r.url));
    }
    eprintln!(
        "  {} {} found, {failed} without title",
        s.ok_sym(),
        s.green(&found.to_string())
    );
}

/// JSON document for `--json`.
pub fn results_json(results: &[ScrapeResult], elapsed: Duration) -> serde_json::Value {
    let items: Vec<serde_json::Value> = results
        .iter()
        .map(|r| {
            serde_json::json!({
                "url": r.url,
                "title": r.title(),
                "outcome": r.outcome,
            })
        })
        .collect();

    serde_json::json!({
        "results": items,
        "elapsed_secs": elapsed.as_secs_f64(),
    })
}

/// Write pretty-printed JSON followed by a newline.
pub fn write_json(out: &mut dyn Write, value: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
