//! Shared append-only diagnostic log
//!
//! A [`FilteredLog`] is created by the caller of a resolution and borrowed by
//! every factory and blamer it reaches. Appending goes through a shared
//! reference so collaborators can report without mutating the build context.

use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Default number of error lines kept before further errors are only counted
pub const DEFAULT_MAX_ERRORS: usize = 20;

#[derive(Debug, Default)]
struct LogLines {
    info: Vec<String>,
    errors: Vec<String>,
    /// Total error lines reported, including dropped ones
    error_count: usize,
}

/// Append-only log of info and error lines with a cap on stored errors
#[derive(Debug)]
pub struct FilteredLog {
    title: String,
    max_errors: usize,
    lines: Mutex<LogLines>,
}

impl FilteredLog {
    /// Create a log with the default error cap
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_max_errors(title, DEFAULT_MAX_ERRORS)
    }

    /// Create a log that stores at most `max_errors` error lines
    pub fn with_max_errors(title: impl Into<String>, max_errors: usize) -> Self {
        Self {
            title: title.into(),
            max_errors,
            lines: Mutex::new(LogLines::default()),
        }
    }

    /// Heading printed above the error lines
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn log_info(&self, message: impl Into<String>) {
        let message = message.into();
        info!("{message}");
        self.lock().info.push(message);
    }

    /// Append an error line. Lines beyond the cap are counted but not stored.
    pub fn log_error(&self, message: impl Into<String>) {
        let message = message.into();
        warn!("{message}");
        let mut lines = self.lock();
        lines.error_count += 1;
        if lines.errors.len() < self.max_errors {
            lines.errors.push(message);
        }
    }

    /// Append `message` followed by the error and each cause in its source chain
    pub fn log_exception(&self, error: &(dyn std::error::Error + 'static), message: impl Into<String>) {
        self.log_error(format!("{}: {error}", message.into()));
        let mut cause = error.source();
        while let Some(inner) = cause {
            self.log_error(format!("  caused by: {inner}"));
            cause = inner.source();
        }
    }

    pub fn info_messages(&self) -> Vec<String> {
        self.lock().info.clone()
    }

    /// Error lines prefixed by the title, with a trailer when errors were dropped.
    ///
    /// Returns an empty list if no error has been logged.
    pub fn error_messages(&self) -> Vec<String> {
        let lines = self.lock();
        if lines.error_count == 0 {
            return Vec::new();
        }

        let mut messages = Vec::with_capacity(lines.errors.len() + 2);
        messages.push(self.title.clone());
        messages.extend(lines.errors.iter().cloned());
        let skipped = lines.error_count - lines.errors.len();
        if skipped > 0 {
            messages.push(format!(
                "  ... skipped logging of {skipped} additional errors ..."
            ));
        }
        messages
    }

    pub fn has_errors(&self) -> bool {
        self.lock().error_count > 0
    }

    /// Number of error lines reported, including those past the cap
    pub fn error_count(&self) -> usize {
        self.lock().error_count
    }

    /// Append the entries of another log. Its errors count against this log's cap.
    pub fn merge(&self, other: &FilteredLog) {
        let (info, errors, dropped) = {
            let theirs = other.lock();
            (
                theirs.info.clone(),
                theirs.errors.clone(),
                theirs.error_count - theirs.errors.len(),
            )
        };

        let mut lines = self.lock();
        lines.info.extend(info);
        for error in errors {
            lines.error_count += 1;
            if lines.errors.len() < self.max_errors {
                lines.errors.push(error);
            }
        }
        lines.error_count += dropped;
    }

    fn lock(&self) -> MutexGuard<'_, LogLines> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
