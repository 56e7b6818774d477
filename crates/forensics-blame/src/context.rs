//! Build handle, listener and the per-directory context handed to factories

use crate::log::FilteredLog;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Identity of the build whose sources are being blamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// Job (project) name
    pub job: String,
    /// Build number within the job
    pub number: u64,
    /// Optional human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Build {
    pub fn new(job: impl Into<String>, number: u64) -> Self {
        Self {
            job: job.into(),
            number,
            display_name: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

impl fmt::Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.job, self.number)
    }
}

/// Progress sink of the running build
pub trait TaskListener {
    fn log(&self, message: &str);
}

/// Listener that forwards messages to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingListener;

impl TaskListener for TracingListener {
    fn log(&self, message: &str) {
        info!(target: "forensics_blame::listener", "{message}");
    }
}

/// Everything a factory may inspect for one candidate directory.
///
/// All fields are borrowed from the caller of the resolution and only live
/// for the duration of that call.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    pub build: &'a Build,
    /// Candidate workspace directory being probed
    pub workspace: &'a Path,
    pub listener: &'a dyn TaskListener,
    pub log: &'a FilteredLog,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        build: &'a Build,
        workspace: &'a Path,
        listener: &'a dyn TaskListener,
        log: &'a FilteredLog,
    ) -> Self {
        Self {
            build,
            workspace,
            listener,
            log,
        }
    }
}

impl fmt::Debug for BuildContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BuildContext")
            .field("build", &self.build)
            .field("workspace", &self.workspace)
            .field("listener", &"<listener>")
            .field("log", &self.log.title())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_display() {
        let build = Build::new("backend", 42);
        assert_eq!(build.to_string(), "backend #42");
        assert!(build.display_name.is_none());

        let named = build.with_display_name("release candidate");
        assert_eq!(named.display_name.as_deref(), Some("release candidate"));
        assert_eq!(named.to_string(), "backend #42");
    }

    #[test]
    fn test_build_context_debug_hides_listener() {
        let build = Build::new("backend", 1);
        let log = FilteredLog::new("Blame errors");
        let ctx = BuildContext::new(&build, Path::new("/ws"), &TracingListener, &log);

        let debug = format!("{ctx:?}");
        assert!(debug.contains("<listener>"));
        assert!(debug.contains("Blame errors"));
        assert_eq!(ctx.workspace, Path::new("/ws"));
    }
}
