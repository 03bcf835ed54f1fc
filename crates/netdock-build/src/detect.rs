//! App layout detection.
//!
//! Layouts are tried in priority order, each short-circuiting on a unique
//! match:
//!
//! ```text
//! 1. *.deps.json          → Published
//! 2. *.sln                → Solution   (SDK check, startup project from app.yaml)
//! 3. *.csproj | *.fsproj  → SingleProject (SDK check; both kinds present is fatal)
//! ```
//!
//! Zero or several matches at one tier fall through to the next tier.

use netdock_core::validate_sdks;
use std::path::{Path, PathBuf};

use crate::app::{AppVariant, DEPS_EXTENSION, ProjectApp, PublishedApp, SolutionApp};
use crate::{Error, Result};

const SOLUTION_EXTENSION: &str = ".sln";
const CSPROJ_EXTENSION: &str = ".csproj";
const FSPROJ_EXTENSION: &str = ".fsproj";

/// Classifies the app found in a root directory.
pub struct AppDetector<'a> {
    root: &'a Path,
    startup_project: Option<&'a str>,
    supported_sdks: &'a [String],
}

impl<'a> AppDetector<'a> {
    pub fn new(root: &'a Path) -> Self {
        Self {
            root,
            startup_project: None,
            supported_sdks: &[],
        }
    }

    /// Startup project for solution layouts, already normalized to `/`.
    pub fn with_startup_project(mut self, startup_project: Option<&'a str>) -> Self {
        self.startup_project = startup_project;
        self
    }

    /// SDK versions an app may pin; empty skips the check.
    pub fn with_supported_sdks(mut self, supported_sdks: &'a [String]) -> Self {
        self.supported_sdks = supported_sdks;
        self
    }

    /// Decide which [`AppVariant`] describes the root.
    ///
    /// # Errors
    ///
    /// - [`Error::AmbiguousProject`] if both `.csproj` and `.fsproj` files are present
    /// - [`Error::MissingStartupProject`] if a solution is found without a startup project
    /// - [`Error::NoAppDetected`] if no tier has a unique match
    /// - SDK validation errors from [`netdock_core::validate_sdks`]
    pub fn classify(&self) -> Result<AppVariant> {
        let root = self.root.to_path_buf();

        if let Some(deps_path) = find_unique(self.root, DEPS_EXTENSION)? {
            tracing::debug!(path = %deps_path.display(), "dependency manifest found");
            return Ok(AppVariant::Published(PublishedApp { root, deps_path }));
        }

        if let Some(solution_path) = find_unique(self.root, SOLUTION_EXTENSION)? {
            tracing::debug!(path = %solution_path.display(), "solution found");
            validate_sdks(self.root, self.supported_sdks)?;
            let startup_project = self
                .startup_project
                .ok_or_else(|| Error::MissingStartupProject {
                    solution: solution_path.clone(),
                })?
                .to_owned();
            return Ok(AppVariant::Solution(SolutionApp {
                root,
                solution_path,
                startup_project,
            }));
        }

        if let Some(project_path) = self.find_project()? {
            tracing::debug!(path = %project_path.display(), "project found");
            validate_sdks(self.root, self.supported_sdks)?;
            return Ok(AppVariant::SingleProject(ProjectApp { root, project_path }));
        }

        Err(Error::NoAppDetected { root })
    }

    fn find_project(&self) -> Result<Option<PathBuf>> {
        let csproj = find_matches(self.root, CSPROJ_EXTENSION)?;
        let fsproj = find_matches(self.root, FSPROJ_EXTENSION)?;

        if !csproj.is_empty() && !fsproj.is_empty() {
            return Err(Error::AmbiguousProject {
                root: self.root.to_path_buf(),
                csproj,
                fsproj,
            });
        }

        Ok(single(csproj).or_else(|| single(fsproj)))
    }
}

/// Files directly under `root` whose name ends with `suffix`, sorted.
///
/// Dotfiles are skipped, matching shell glob behaviour.
fn find_matches(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(root).map_err(|e| Error::ReadDir {
        path: root.to_path_buf(),
        source: e,
    })?;

    let mut matches = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| Error::ReadDir {
            path: root.to_path_buf(),
            source: e,
        })?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        let path = entry.path();
        if !name.starts_with('.') && name.ends_with(suffix) && path.is_file() {
            matches.push(path);
        }
    }
    matches.sort();
    Ok(matches)
}

/// The single file matching `suffix`, or `None` for zero or several.
fn find_unique(root: &Path, suffix: &str) -> Result<Option<PathBuf>> {
    let matches = find_matches(root, suffix)?;
    if matches.len() > 1 {
        tracing::debug!(suffix, count = matches.len(), "several matches; ignoring tier");
    }
    Ok(single(matches))
}

fn single(mut paths: Vec<PathBuf>) -> Option<PathBuf> {
    if paths.len() == 1 { paths.pop() } else { None }
}
