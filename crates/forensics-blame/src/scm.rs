//! Source control descriptors and the detector seam

use crate::context::Build;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Kind of version control system used by a build
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScmKind {
    Git,
    Subversion,
    Mercurial,
    /// No recognized source control
    None,
    /// Any other system, by name
    Other(String),
}

impl fmt::Display for ScmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScmKind::Git => f.write_str("git"),
            ScmKind::Subversion => f.write_str("subversion"),
            ScmKind::Mercurial => f.write_str("mercurial"),
            ScmKind::None => f.write_str("none"),
            ScmKind::Other(name) => f.write_str(name),
        }
    }
}

/// Source control system and configuration of a build, as reported by a detector.
///
/// The resolver only passes this through to factories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScmDescriptor {
    pub kind: ScmKind,
    /// Repository URL, if the detector knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository_url: Option<String>,
}

impl ScmDescriptor {
    pub fn new(kind: ScmKind) -> Self {
        Self {
            kind,
            repository_url: None,
        }
    }

    pub fn with_repository_url(mut self, url: impl Into<String>) -> Self {
        self.repository_url = Some(url.into());
        self
    }

    /// Descriptor for a build without recognized source control
    pub fn none() -> Self {
        Self::new(ScmKind::None)
    }

    pub fn is_none(&self) -> bool {
        self.kind == ScmKind::None
    }
}

impl Default for ScmDescriptor {
    fn default() -> Self {
        Self::none()
    }
}

/// Determines the source control of a build in a given directory.
///
/// Detection never fails: an undetectable system is [`ScmDescriptor::none`].
pub trait ScmDetector: Send + Sync {
    fn detect(&self, build: &Build, directory: &Path) -> ScmDescriptor;
}

/// Detector that reports the same descriptor for every build and directory
#[derive(Debug, Clone, Default)]
pub struct StaticScmDetector {
    descriptor: ScmDescriptor,
}

impl StaticScmDetector {
    pub fn new(descriptor: ScmDescriptor) -> Self {
        Self { descriptor }
    }
}

impl ScmDetector for StaticScmDetector {
    fn detect(&self, _build: &Build, _directory: &Path) -> ScmDescriptor {
        self.descriptor.clone()
    }
}

/// Detector backed by a closure
pub struct FnScmDetector<F>(pub F);

impl<F> ScmDetector for FnScmDetector<F>
where
    F: Fn(&Build, &Path) -> ScmDescriptor + Send + Sync,
{
    fn detect(&self, build: &Build, directory: &Path) -> ScmDescriptor {
        (self.0)(build, directory)
    }
}

impl<F> fmt::Debug for FnScmDetector<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FnScmDetector").field(&"<detect_fn>").finish()
    }
}
