//! Blamer selection for builds
//!
//! Given the source control system a build used, this crate picks the
//! registered [`Blamer`] that can attribute source lines to commits:
//!
//! - [`BlamerFactory`] implementations are registered in a [`BlamerRegistry`]
//!   (or any other [`FactorySource`]) in priority order.
//! - An [`ScmDetector`] reports the [`ScmDescriptor`] of each candidate directory.
//! - [`BlamerResolver`] probes factories per directory and returns the first
//!   blamer produced, or the [`NullBlamer`] if none is.
//!
//! Diagnostics from every participant go to a shared [`FilteredLog`].

pub mod blame;
pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod log;
pub mod logging;
pub mod registry;
pub mod resolver;
pub mod scm;

#[cfg(any(test, feature = "test-support"))]
pub mod mock;

pub use blame::{Blamer, Blames, FileBlame, FileLocations, LineBlame, NullBlamer};
pub use config::{ConfigError, FactoryErrorPolicy, ResolverConfig, load_config_file, resolve_config};
pub use context::{Build, BuildContext, TaskListener, TracingListener};
pub use error::BlameError;
pub use factory::{BlamerFactory, CreateBlamerFn, FnBlamerFactory};
pub use log::FilteredLog;
pub use registry::{BlamerRegistry, FactorySource, FnFactorySource};
pub use resolver::BlamerResolver;
pub use scm::{FnScmDetector, ScmDescriptor, ScmDetector, ScmKind, StaticScmDetector};
