//! Attribution requests and results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Files and line numbers to blame, relative to a workspace root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileLocations {
    workspace: PathBuf,
    lines: BTreeMap<String, BTreeSet<usize>>,
}

impl FileLocations {
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            workspace: workspace.into(),
            lines: BTreeMap::new(),
        }
    }

    /// Workspace root the file names are relative to
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Request blame for `line` of `file`
    pub fn add_line(&mut self, file: impl Into<String>, line: usize) {
        self.lines.entry(file.into()).or_default().insert(line);
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.lines.keys().map(String::as_str)
    }

    /// Requested lines of `file` in ascending order (empty if the file is unknown)
    pub fn lines(&self, file: &str) -> Vec<usize> {
        self.lines
            .get(file)
            .map(|lines| lines.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Attribution of a single line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineBlame {
    pub commit: String,
    pub name: String,
    pub email: String,
    /// Commit time in seconds since the Unix epoch
    pub time: i64,
}

/// Attribution of the requested lines of one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileBlame {
    file: String,
    lines: BTreeMap<usize, LineBlame>,
}

impl FileBlame {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            lines: BTreeMap::new(),
        }
    }

    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn set_commit(&mut self, line: usize, commit: impl Into<String>) {
        self.lines.entry(line).or_default().commit = commit.into();
    }

    pub fn set_name(&mut self, line: usize, name: impl Into<String>) {
        self.lines.entry(line).or_default().name = name.into();
    }

    pub fn set_email(&mut self, line: usize, email: impl Into<String>) {
        self.lines.entry(line).or_default().email = email.into();
    }

    pub fn set_time(&mut self, line: usize, time: i64) {
        self.lines.entry(line).or_default().time = time;
    }

    /// Commit id of `line`, or an empty string if the line was not blamed
    pub fn commit(&self, line: usize) -> &str {
        self.lines.get(&line).map_or("", |l| l.commit.as_str())
    }

    pub fn name(&self, line: usize) -> &str {
        self.lines.get(&line).map_or("", |l| l.name.as_str())
    }

    pub fn email(&self, line: usize) -> &str {
        self.lines.get(&line).map_or("", |l| l.email.as_str())
    }

    /// Commit time of `line` in epoch seconds, 0 if unknown
    pub fn time(&self, line: usize) -> i64 {
        self.lines.get(&line).map_or(0, |l| l.time)
    }

    /// Commit time of `line` as a timestamp, if known and representable
    pub fn commit_time(&self, line: usize) -> Option<DateTime<Utc>> {
        match self.time(line) {
            0 => None,
            secs => DateTime::<Utc>::from_timestamp(secs, 0),
        }
    }

    pub fn line(&self, line: usize) -> Option<&LineBlame> {
        self.lines.get(&line)
    }

    /// Blamed line numbers in ascending order
    pub fn lines(&self) -> impl Iterator<Item = usize> + '_ {
        self.lines.keys().copied()
    }

    /// Fill in lines from `other` that this blame does not have yet.
    ///
    /// Lines already present are kept as they are.
    pub fn merge(&mut self, other: FileBlame) {
        for (line, blame) in other.lines {
            self.lines.entry(line).or_insert(blame);
        }
    }
}

/// Blame results keyed by file name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blames {
    files: BTreeMap<String, FileBlame>,
}

impl Blames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file blame, merging with an existing entry for the same file
    pub fn add(&mut self, blame: FileBlame) {
        match self.files.get_mut(blame.file()) {
            Some(existing) => existing.merge(blame),
            None => {
                self.files.insert(blame.file.clone(), blame);
            }
        }
    }

    pub fn get(&self, file: &str) -> Option<&FileBlame> {
        self.files.get(file)
    }

    pub fn contains(&self, file: &str) -> bool {
        self.files.contains_key(file)
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}
