//! Stderr reporting for the txmap binary.

use std::path::Path;
use std::time::{Duration, Instant};

use colored::Colorize;

const KEY_WIDTH: usize = 14;

/// Counts collected over one translation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub alignments: usize,
    pub queries: usize,
    pub results: usize,
}

pub fn banner(subtitle: &str) {
    eprintln!();
    eprintln!("{} {}", "txmap".bold().cyan(), subtitle.dimmed());
    eprintln!("{}", "transcript positions → contig coordinates".dimmed());
    eprintln!();
}

pub fn section(title: &str) {
    eprintln!("{} {}", "▸".blue(), title.bold().blue());
}

pub fn kv(key: &str, value: &str) {
    eprintln!("  {:<KEY_WIDTH$} {}", key.dimmed(), value);
}

/// Reports a path under `key`, flagging whether it currently exists.
pub fn path_kv(key: &str, path: &Path) {
    let marker = if path.exists() {
        "".normal()
    } else {
        " (new)".dimmed()
    };
    eprintln!("  {:<KEY_WIDTH$} {}{}", key.dimmed(), path.display(), marker);
}

pub fn success(msg: &str) {
    eprintln!("  {} {}", "ok".green().bold(), msg);
}

pub fn warning(msg: &str) {
    eprintln!("  {} {}", "warn".yellow().bold(), msg.yellow());
}

pub fn print_summary(start: Instant, summary: &RunSummary) {
    eprintln!();
    eprintln!("{}", summary_line(summary, start.elapsed()).bold());
    eprintln!();
}

/// One-line run summary: counts followed by elapsed wall time.
#[must_use]
pub fn summary_line(summary: &RunSummary, elapsed: Duration) -> String {
    format!(
        "{} alignments, {}/{} queries translated in {}",
        summary.alignments,
        summary.results,
        summary.queries,
        format_elapsed(elapsed)
    )
}

/// Elapsed time as `M:SS.mmm`, with hours prepended once a run exceeds an hour.
#[must_use]
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let millis = elapsed.subsec_millis();
    match secs / 3600 {
        0 => format!("{}:{:02}.{millis:03}", secs / 60, secs % 60),
        hours => format!("{hours}:{:02}:{:02}.{millis:03}", (secs / 60) % 60, secs % 60),
    }
}
