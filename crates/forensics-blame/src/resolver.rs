//! Blamer resolution
//!
//! Picks the blamer for a build by probing every registered factory against
//! the source control detected in each candidate directory. The first factory
//! that produces a blamer wins; directories are exhausted in caller order and,
//! within a directory, factories in registration order. If nothing matches the
//! [`NullBlamer`] is returned, so callers always get a usable blamer.

use crate::blame::{Blamer, NullBlamer};
use crate::config::{FactoryErrorPolicy, ResolverConfig};
use crate::context::{Build, BuildContext, TaskListener};
use crate::factory::BlamerFactory;
use crate::log::FilteredLog;
use crate::registry::FactorySource;
use crate::scm::ScmDetector;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Selects a [`Blamer`] for a build
pub struct BlamerResolver {
    source: Arc<dyn FactorySource>,
    detector: Arc<dyn ScmDetector>,
    config: ResolverConfig,
}

impl BlamerResolver {
    pub fn new(source: Arc<dyn FactorySource>, detector: Arc<dyn ScmDetector>) -> Self {
        Self {
            source,
            detector,
            config: ResolverConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Replace the factory source consulted by later resolutions.
    ///
    /// Must not be called while a resolution is in progress.
    pub fn set_factory_source(&mut self, source: Arc<dyn FactorySource>) {
        self.source = source;
    }

    /// Blamer for the source control of `build` in a single workspace
    pub fn resolve_single(
        &self,
        build: &Build,
        workspace: &Path,
        listener: &dyn TaskListener,
        log: &FilteredLog,
    ) -> Box<dyn Blamer> {
        self.resolve_multi(build, [workspace], listener, log)
    }

    /// Blamer for the first of `directories` that any factory supports.
    ///
    /// Returns the [`NullBlamer`] if no factory supports any directory,
    /// including when `directories` is empty.
    pub fn resolve_multi<I>(
        &self,
        build: &Build,
        directories: I,
        listener: &dyn TaskListener,
        log: &FilteredLog,
    ) -> Box<dyn Blamer>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        match self.find_blamer(build, directories, listener, log) {
            Some(blamer) => {
                log.log_info(format!("Using blamer '{}' for {build}", blamer.name()));
                blamer
            }
            None => {
                log.log_info(format!(
                    "No blamer supports the source control of {build}, skipping blame"
                ));
                Box::new(NullBlamer)
            }
        }
    }

    /// Search for a blamer without falling back.
    ///
    /// Stops at the first factory that produces a blamer; later factories and
    /// directories are never probed.
    pub fn find_blamer<I>(
        &self,
        build: &Build,
        directories: I,
        listener: &dyn TaskListener,
        log: &FilteredLog,
    ) -> Option<Box<dyn Blamer>>
    where
        I: IntoIterator,
        I::Item: AsRef<Path>,
    {
        let factories = self.active_factories();
        if factories.is_empty() {
            debug!(%build, "no blamer factories registered");
            return None;
        }

        for (dir_index, directory) in directories.into_iter().enumerate() {
            let directory = directory.as_ref();
            let scm = self.detector.detect(build, directory);
            let ctx = BuildContext::new(build, directory, listener, log);
            debug!(
                %build,
                directory = %directory.display(),
                scm = %scm.kind,
                "probing blamer factories"
            );

            for (factory_index, factory) in factories.iter().enumerate() {
                match factory.create_blamer(&scm, &ctx) {
                    Ok(Some(blamer)) => {
                        debug!(
                            factory = factory.name(),
                            dir_index,
                            factory_index,
                            directory = %directory.display(),
                            "selected blamer"
                        );
                        return Some(blamer);
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(
                            factory = factory.name(),
                            directory = %directory.display(),
                            "blamer factory failed: {e}"
                        );
                        log.log_exception(
                            &e,
                            format!(
                                "Blamer factory '{}' failed for {}",
                                factory.name(),
                                directory.display()
                            ),
                        );
                        if self.config.factory_error_policy == FactoryErrorPolicy::Abort {
                            return None;
                        }
                    }
                }
            }
        }

        None
    }

    /// Registered factories minus the disabled ones, in registry order
    fn active_factories(&self) -> Vec<Arc<dyn BlamerFactory>> {
        self.source
            .list_factories()
            .into_iter()
            .filter(|factory| {
                let disabled = self.config.is_disabled(factory.name());
                if disabled {
                    debug!(factory = factory.name(), "blamer factory disabled by config");
                }
                !disabled
            })
            .collect()
    }
}

impl std::fmt::Debug for BlamerResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlamerResolver")
            .field("source", &"<factory_source>")
            .field("detector", &"<scm_detector>")
            .field("config", &self.config)
            .finish()
    }
}
