// SPDX-FileCopyrightText: 2026 Voipdesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Terminal output: plain-text tables, coloured badges, JSON mode.

use std::io::IsTerminal;

use colored::Colorize;
use serde::Serialize;

#[derive(Debug, Clone, Copy)]
pub struct Output {
    color: bool,
    pub json: bool,
}

impl Output {
    /// Colours are used only on a terminal and never with `--plain`.
    pub fn detect(plain: bool, json: bool) -> Self {
        Self {
            color: !plain && !json && std::io::stdout().is_terminal(),
            json,
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self {
            color: false,
            json: false,
        }
    }

    pub fn ok(&self, text: &str) -> String {
        if self.color {
            format!("{} {}", "✓".green(), text)
        } else {
            format!("[OK] {text}")
        }
    }

    pub fn fail(&self, text: &str) -> String {
        if self.color {
            format!("{} {}", "✗".red(), text.red())
        } else {
            format!("[FAIL] {text}")
        }
    }

    pub fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    /// Presence badge: green when reachable, red when busy, yellow when away.
    pub fn status_badge(&self, status: &str) -> String {
        if !self.color {
            return status.to_string();
        }
        match status.to_ascii_lowercase().as_str() {
            "online" | "available" | "idle" => status.green().to_string(),
            "busy" | "dnd" | "on-call" | "in-call" | "offline" => status.red().to_string(),
            "away" | "break" | "ringing" => status.yellow().to_string(),
            _ => status.dimmed().to_string(),
        }
    }

    pub fn yes_no(&self, value: bool) -> String {
        match (value, self.color) {
            (true, true) => "yes".green().to_string(),
            (false, true) => "no".dimmed().to_string(),
            (true, false) => "yes".to_string(),
            (false, false) => "no".to_string(),
        }
    }

    pub fn error(&self, message: &str) -> String {
        if self.color {
            format!("{}: {message}", "error".red())
        } else {
            format!("error: {message}")
        }
    }
}

/// Prints `value` as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
    );
}

/// Left-aligned columns sized to the widest plain cell. The last column is
/// not padded, so it may carry colour codes.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let last = headers.len().saturating_sub(1);
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(last) {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .enumerate()
            .map(|(i, c)| {
                if i == last {
                    c.to_string()
                } else {
                    format!("{c:<width$}", width = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = vec![line(headers.to_vec())];
    out.extend(rows.iter().map(|r| line(r.iter().map(String::as_str).collect())));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_pads_all_but_last_column() {
        let rendered = table(
            &["EXT", "NAME", "STATUS"],
            &[
                vec!["101".into(), "Ana".into(), "online".into()],
                vec!["1002".into(), "Benjamin".into(), "dnd".into()],
            ],
        );
        assert_eq!(
            rendered,
            "EXT   NAME      STATUS\n101   Ana       online\n1002  Benjamin  dnd"
        );
    }

    #[test]
    fn plain_output_has_no_escape_codes() {
        let out = Output::plain();
        assert_eq!(out.status_badge("online"), "online");
        assert_eq!(out.ok("saved"), "[OK] saved");
        assert_eq!(out.fail("broken.wav: Upload failed"), "[FAIL] broken.wav: Upload failed");
        assert_eq!(out.error("boom"), "error: boom");
        assert_eq!(out.yes_no(true), "yes");
    }

    #[test]
    fn empty_table_is_just_headers() {
        assert_eq!(table(&["A", "B"], &[]), "A  B");
    }
}
