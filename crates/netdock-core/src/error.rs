use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── netdock.toml ──
    #[error("failed to load config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    // ── app.yaml ──
    #[error("failed to read app config {path}")]
    AppYamlRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse app config {path}")]
    AppYamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    // ── Version map ──
    #[error("invalid version map entry {entry:?}: expected VERSION=IMAGE")]
    InvalidVersionMapEntry { entry: String },

    #[error("invalid version {version:?}: {reason}")]
    InvalidVersion {
        version: String,
        reason: &'static str,
    },

    #[error("no runtime version map configured; pass --version-map or set [runtime].version_map")]
    EmptyVersionMap,

    // ── SDK manifest ──
    #[error("failed to read SDK manifest {path}")]
    SdkManifestRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("the file {path} is not a valid global.json file")]
    SdkManifestInvalid { path: PathBuf },

    #[error(
        "the requested version of the .NET Core SDK ({requested}) is not supported; supported: {}",
        supported.join(", ")
    )]
    UnsupportedSdk {
        requested: String,
        supported: Vec<String>,
    },
}
