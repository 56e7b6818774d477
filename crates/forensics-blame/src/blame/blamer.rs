//! Blamer trait and the no-op fallback

use super::types::{Blames, FileLocations};
use crate::log::FilteredLog;

/// Maps requested source lines to the commits that last touched them.
///
/// Each source control backend provides its own implementation, created by a
/// [`BlamerFactory`](crate::BlamerFactory). Failures while blaming are
/// reported to `log`; the returned [`Blames`] holds whatever could be resolved.
pub trait Blamer: Send + Sync + std::fmt::Debug {
    /// Blamer name for logging/display
    fn name(&self) -> &str;

    /// Blame the requested lines
    fn blame(&self, locations: &FileLocations, log: &FilteredLog) -> Blames;
}

/// Blamer used when no factory supports the build's source control.
///
/// Always returns an empty result and never writes to the log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullBlamer;

impl NullBlamer {
    pub const NAME: &'static str = "null";
}

impl Blamer for NullBlamer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn blame(&self, _locations: &FileLocations, _log: &FilteredLog) -> Blames {
        Blames::new()
    }
}
