//! App detection and Dockerfile generation for netdock.
//!
//! # Generate pipeline
//!
//! ```text
//! netdock generate
//!   1. Conflict guard ── refuse if a Dockerfile already exists
//!   2. Detect         ── AppDetector::classify() → AppVariant
//!   3. Version table  ── VersionTable::parse(version_map)
//!   4. Resolve        ── requested runtime version → BaseImage
//!   5. Render + write ── DockerfileGenerator::render() → output
//! ```
//!
//! Every step either succeeds or returns an [`Error`]; nothing is written
//! unless all earlier steps succeeded.

pub mod app;
pub mod detect;
pub mod dockerfile;
pub mod error;
pub mod output;

pub use app::{AppVariant, RenderedDockerfile};
pub use detect::AppDetector;
pub use dockerfile::{DockerfileGenerator, Template};
pub use error::{Error, Result};

use netdock_core::VersionTable;
use std::path::Path;

/// Inputs to [`generate`].
#[derive(Debug, Clone, Copy)]
pub struct GenerateRequest<'a> {
    pub root: &'a Path,
    pub output: &'a Path,
    pub version_map: &'a [String],
    pub supported_sdks: &'a [String],
    pub startup_project: Option<&'a str>,
    pub builder_image: &'a str,
}

/// Result of a successful [`generate`] run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub variant: AppVariant,
    pub dockerfile: RenderedDockerfile,
}

/// Run the full pipeline and write the Dockerfile to `request.output`.
pub fn generate(request: &GenerateRequest<'_>) -> Result<Generated> {
    output::ensure_no_dockerfile(request.root, request.output)?;

    let variant = AppDetector::new(request.root)
        .with_startup_project(request.startup_project)
        .with_supported_sdks(request.supported_sdks)
        .classify()?;
    tracing::info!(variant = %variant, "app detected");

    let table = VersionTable::parse(request.version_map)?;
    let dockerfile = variant.generate_dockerfile(&table, request.builder_image, request.output)?;

    Ok(Generated {
        variant,
        dockerfile,
    })
}
