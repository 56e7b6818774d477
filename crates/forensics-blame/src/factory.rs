//! Blamer factory contract

use crate::blame::Blamer;
use crate::context::BuildContext;
use crate::error::BlameError;
use crate::scm::ScmDescriptor;
use std::sync::Arc;

/// Creates a [`Blamer`] for the source control systems it supports.
///
/// Implementations are registered once per process and probed in
/// registration order for every candidate directory.
pub trait BlamerFactory: Send + Sync + std::fmt::Debug {
    /// Factory name (e.g., "git", "subversion")
    fn name(&self) -> &str;

    /// Create a blamer for `scm` in `ctx.workspace`.
    ///
    /// `Ok(None)` means the source control system is not supported by this
    /// factory. Diagnostics belong in `ctx.log`. An `Err` is recorded by the
    /// resolver and handled by its [`FactoryErrorPolicy`](crate::FactoryErrorPolicy).
    fn create_blamer(
        &self,
        scm: &ScmDescriptor,
        ctx: &BuildContext<'_>,
    ) -> Result<Option<Box<dyn Blamer>>, BlameError>;
}

/// A factory function that may create a blamer
pub type CreateBlamerFn = Arc<
    dyn Fn(&ScmDescriptor, &BuildContext<'_>) -> Result<Option<Box<dyn Blamer>>, BlameError>
        + Send
        + Sync,
>;

/// A closure-backed blamer factory
#[derive(Clone)]
pub struct FnBlamerFactory {
    /// Factory name (e.g., "git")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Factory function: takes the detected SCM and build context
    pub create: CreateBlamerFn,
}

impl FnBlamerFactory {
    pub fn new<F>(name: impl Into<String>, description: impl Into<String>, create: F) -> Self
    where
        F: Fn(&ScmDescriptor, &BuildContext<'_>) -> Result<Option<Box<dyn Blamer>>, BlameError>
            + Send
            + Sync
            + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            create: Arc::new(create),
        }
    }
}

impl std::fmt::Debug for FnBlamerFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnBlamerFactory")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("create", &"<factory_fn>")
            .finish()
    }
}

impl BlamerFactory for FnBlamerFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn create_blamer(
        &self,
        scm: &ScmDescriptor,
        ctx: &BuildContext<'_>,
    ) -> Result<Option<Box<dyn Blamer>>, BlameError> {
        (self.create)(scm, ctx)
    }
}
