//! ## Features
//!
//! - Standard logging levels (info, warn, error, debug, success)
//! - Multi-line message support, one event per line
//! - Banner announcements for startup and shutdown
//!
//! Every message is emitted as a `tracing` event under the `bentley` target,
//! so whichever subscriber the binary installs decides formatting and filtering.
//!
//! ## Usage
//!
//! Standard logging functions: `info()`, `warn()`, `error()`, `debug()`, `success()`
//!
//! Each has a matching macro (`bentley::info!` and friends).

use colored::*;

/// Level a bentley message is emitted at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
  Debug,
  Info,
  Success,
  Warn,
  Error,
}

impl Level {
  /// Short label carried on every event as the `kind` field
  pub fn label(self) -> &'static str {
    match self {
      Level::Debug => "debug",
      Level::Info => "info",
      Level::Success => "sccs",
      Level::Warn => "warn",
      Level::Error => "error",
    }
  }
}

/// Core logging function that handles the actual output
pub fn log(level: Level, message: &str) {
  for line in message.lines() {
    match level {
      Level::Debug => tracing::debug!(target: "bentley", kind = level.label(), "{line}"),
      Level::Info | Level::Success => {
        tracing::info!(target: "bentley", kind = level.label(), "{line}")
      }
      Level::Warn => tracing::warn!(target: "bentley", kind = level.label(), "{line}"),
      Level::Error => tracing::error!(target: "bentley", kind = level.label(), "{line}"),
    }
  }
}

/// Create a banner line of the specified length and character
pub fn banner_line(length: usize, char: char) -> String {
  char.to_string().repeat(length)
}

/// Info level logging - general information
pub fn info(message: &str) {
  log(Level::Info, message);
}

/// Warning level logging - something needs attention
pub fn warn(message: &str) {
  log(Level::Warn, message);
}

/// Error level logging - something went wrong
pub fn error(message: &str) {
  log(Level::Error, message);
}

/// Debug level logging - detailed diagnostic information
pub fn debug(message: &str) {
  log(Level::Debug, message);
}

/// Success level logging - something completed successfully
pub fn success(message: &str) {
  log(Level::Success, message);
}

/// Announcement framed by banner lines, logged at info
pub fn announce(message: &str) {
  let banner = banner_line(50, '-');
  info(&banner);
  info(&message.blue().bold().to_string());
  info(&banner);
}

/// Macros for coverage-excluded logging - these expand with LCOV_EXCL_LINE at call sites
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
