//! Herald - console logging for atlas services
//!
//! Level helpers (`info`, `warn`, `error`, `debug`, `success`) write
//! prefixed, colored lines to stderr. `announce` frames a message in a
//! banner for startup notices. Every helper has a macro twin so call sites
//! stay out of coverage reports.
//!
//! The [`diagnostics`] module holds the operator-facing JSONL log that
//! records what callers never get to see.

use colored::*;

pub mod diagnostics;

/// Write each line of `message` to stderr
pub fn log(message: &str) {
  for line in message.lines() {
    eprintln!("{line}");
  }
}

fn prefix(color: Color, tag: &str) -> String {
  format!("[{}]{:<width$}", tag.color(color).bold(), "", width = 7usize.saturating_sub(tag.len() + 2))
}

fn emit(color: Color, tag: &str, message: &str) {
  let prefix = prefix(color, tag);
  for line in message.lines() {
    log(&format!("{prefix} {line}"));
  }
}

/// General information
pub fn info(message: &str) {
  emit(Color::Blue, "info", message);
}

/// Something needs attention
pub fn warn(message: &str) {
  emit(Color::Yellow, "warn", message);
}

/// Something went wrong
pub fn error(message: &str) {
  emit(Color::Red, "error", message);
}

/// Diagnostic detail
pub fn debug(message: &str) {
  emit(Color::Magenta, "debug", message);
}

/// Something completed
pub fn success(message: &str) {
  emit(Color::Green, "sccs", message);
}

/// Build a banner rule of `width` copies of `ch`
pub fn banner_line(width: usize, ch: char) -> String {
  ch.to_string().repeat(width)
}

/// Frame a message between two banner rules
pub fn announce(message: &str) {
  let rule = banner_line(50, '-');
  log(&rule.blue().bold().to_string());
  log(&message.blue().bold().to_string());
  log(&rule.blue().bold().to_string());
}

#[macro_export]
macro_rules! info {
  ($msg:expr) => {
    $crate::info($msg); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! warn {
  ($msg:expr) => {
    $crate::warn($msg); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! error {
  ($msg:expr) => {
    $crate::error($msg); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! debug {
  ($msg:expr) => {
    $crate::debug($msg); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! success {
  ($msg:expr) => {
    $crate::success($msg); // LCOV_EXCL_LINE
  };
}

#[macro_export]
macro_rules! announce {
  ($msg:expr) => {
    $crate::announce($msg); // LCOV_EXCL_LINE
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_banner_line_repeats_char() {
    assert_eq!(banner_line(5, '='), "=====");
    assert_eq!(banner_line(0, '-'), "");
  }

  #[test]
  fn test_prefix_pads_short_tags() {
    colored::control::set_override(false);
    assert_eq!(prefix(Color::Blue, "info"), "[info] ");
    assert_eq!(prefix(Color::Red, "error"), "[error]");
    colored::control::unset_override();
  }
}
