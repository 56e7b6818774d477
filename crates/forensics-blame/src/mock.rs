//! Mock factory and blamer for testing

use crate::blame::{Blamer, Blames, FileBlame, FileLocations};
use crate::context::BuildContext;
use crate::error::BlameError;
use crate::factory::BlamerFactory;
use crate::log::FilteredLog;
use crate::scm::{ScmDescriptor, ScmKind};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Record of a factory probe for test assertions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProbe {
    pub factory: String,
    pub directory: PathBuf,
    pub scm: ScmKind,
}

/// Shared, ordered log of probes across several mock factories
pub type ProbeLog = Arc<Mutex<Vec<MockProbe>>>;

/// Mock blamer factory. Produces a [`MockBlamer`] for configured directories.
#[derive(Debug, Clone)]
pub struct MockBlamerFactory {
    name: String,
    /// Directories this factory supports
    pub matches: Vec<PathBuf>,
    /// Directories where this factory returns an error
    pub failures: Vec<PathBuf>,
    /// If set, only this source control kind is supported
    pub supported_scm: Option<ScmKind>,
    /// Track probes for verification
    pub probes: ProbeLog,
}

impl MockBlamerFactory {
    /// Create a factory that declines every directory
    pub fn new(name: impl Into<String>, probes: ProbeLog) -> Self {
        Self {
            name: name.into(),
            matches: Vec::new(),
            failures: Vec::new(),
            supported_scm: None,
            probes,
        }
    }

    /// Support `directory`
    pub fn matching(mut self, directory: impl Into<PathBuf>) -> Self {
        self.matches.push(directory.into());
        self
    }

    /// Fail with a provider error at `directory`
    pub fn failing_at(mut self, directory: impl Into<PathBuf>) -> Self {
        self.failures.push(directory.into());
        self
    }

    /// Only support builds using `kind`
    pub fn supporting(mut self, kind: ScmKind) -> Self {
        self.supported_scm = Some(kind);
        self
    }

    /// Get a copy of the probe log
    pub fn get_probes(&self) -> Vec<MockProbe> {
        self.probes.lock().unwrap().clone()
    }

    fn log_probe(&self, probe: MockProbe) {
        self.probes.lock().unwrap().push(probe);
    }
}

impl BlamerFactory for MockBlamerFactory {
    fn name(&self) -> &str {
        &self.name
    }

    fn create_blamer(
        &self,
        scm: &ScmDescriptor,
        ctx: &BuildContext<'_>,
    ) -> Result<Option<Box<dyn Blamer>>, BlameError> {
        self.log_probe(MockProbe {
            factory: self.name.clone(),
            directory: ctx.workspace.to_path_buf(),
            scm: scm.kind.clone(),
        });

        if self.failures.iter().any(|d| d == ctx.workspace) {
            return Err(BlameError::provider(format!(
                "{} cannot read {}",
                self.name,
                ctx.workspace.display()
            )));
        }

        if let Some(kind) = &self.supported_scm {
            if *kind != scm.kind {
                ctx.log
                    .log_info(format!("{}: unsupported source control {}", self.name, scm.kind));
                return Ok(None);
            }
        }

        if self.matches.iter().any(|d| d == ctx.workspace) {
            return Ok(Some(Box::new(MockBlamer::new(format!(
                "{}@{}",
                self.name,
                ctx.workspace.display()
            )))));
        }

        Ok(None)
    }
}

/// Mock blamer. Attributes every requested line to a fixed commit.
#[derive(Debug, Clone)]
pub struct MockBlamer {
    name: String,
    pub commit: String,
    pub author: String,
}

impl MockBlamer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit: "0000000".to_string(),
            author: "mock".to_string(),
        }
    }
}

impl Blamer for MockBlamer {
    fn name(&self) -> &str {
        &self.name
    }

    fn blame(&self, locations: &FileLocations, _log: &FilteredLog) -> Blames {
        let mut blames = Blames::new();
        for file in locations.files() {
            let mut blame = FileBlame::new(file);
            for line in locations.lines(file) {
                blame.set_commit(line, self.commit.clone());
                blame.set_name(line, self.author.clone());
            }
            blames.add(blame);
        }
        blames
    }
}
