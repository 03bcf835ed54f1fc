use std::path::PathBuf;

use crate::output::OutputError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] netdock_core::Error),

    #[error(transparent)]
    Output(#[from] OutputError),

    // ── Detection ──
    #[error("failed to list directory {path}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(
        "ambiguous project: {} and {} both found in {root}; only one of .csproj or .fsproj is supported",
        format_paths(csproj),
        format_paths(fsproj)
    )]
    AmbiguousProject {
        root: PathBuf,
        csproj: Vec<PathBuf>,
        fsproj: Vec<PathBuf>,
    },

    #[error(
        "no single .deps.json, .sln, .csproj or .fsproj found in {root}; the app is not supported for deployment"
    )]
    NoAppDetected { root: PathBuf },

    #[error("solution {solution} found but app.yaml does not set runtime_config.startup_project")]
    MissingStartupProject { solution: PathBuf },

    // ── Runtime version extraction ──
    #[error("failed to read {path}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse dependency manifest {path}")]
    ManifestParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to parse project file {path}")]
    ProjectParse {
        path: PathBuf,
        source: roxmltree::Error,
    },

    #[error("no valid .NET Core runtime version found in {path}: {reason}")]
    UnresolvableRuntimeVersion { path: PathBuf, reason: &'static str },

    #[error(
        "target framework {framework:?} in {path} is not supported; the app must be a netcoreapp executable"
    )]
    UnsupportedTargetFramework { path: PathBuf, framework: String },

    // ── Resolution ──
    #[error(
        "the app requires .NET Core runtime version {requested} which is not supported; available: {}",
        available.join(", ")
    )]
    UnsupportedRuntime {
        requested: String,
        available: Vec<String>,
    },

    #[error("cannot find entry point assembly {path} for the published app")]
    MissingEntryAssembly { path: PathBuf },
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
