//! .NET Core SDK pinning via `global.json`.
//!
//! Unlike runtime images, SDK versions are matched verbatim against the
//! supported list: an app pinning `2.1.500` is only accepted when exactly
//! `2.1.500` is supported.

use serde::Deserialize;
use std::path::Path;

/// File name of the SDK manifest in the app root.
pub const GLOBAL_JSON_NAME: &str = "global.json";

/// Outcome of a successful SDK check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SdkCheck {
    /// No `global.json`; the installed SDK will be used.
    NoManifest,
    /// No supported list was given, so the pinned SDK was not checked.
    Skipped,
    /// The pinned SDK version is in the supported list.
    Supported(String),
}

#[derive(Deserialize)]
struct GlobalJson {
    sdk: Option<SdkSection>,
}

#[derive(Deserialize)]
struct SdkSection {
    version: Option<String>,
}

/// Validate the SDK pinned by `root/global.json` against `supported`.
///
/// # Errors
///
/// - [`Error::SdkManifestRead`](crate::Error::SdkManifestRead) if the manifest cannot be read
/// - [`Error::SdkManifestInvalid`](crate::Error::SdkManifestInvalid) if it is not JSON or
///   lacks `sdk.version`
/// - [`Error::UnsupportedSdk`](crate::Error::UnsupportedSdk) if the pinned version is not listed
pub fn validate_sdks(root: &Path, supported: &[String]) -> crate::Result<SdkCheck> {
    let path = root.join(GLOBAL_JSON_NAME);
    if !path.is_file() {
        tracing::warn!(
            "no global.json found; the latest installed .NET Core SDK will be used"
        );
        return Ok(SdkCheck::NoManifest);
    }

    if supported.is_empty() {
        tracing::debug!(path = %path.display(), "no supported SDK list; skipping SDK check");
        return Ok(SdkCheck::Skipped);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| crate::Error::SdkManifestRead {
        path: path.clone(),
        source: e,
    })?;

    let parsed: GlobalJson = serde_json::from_str(&content).map_err(|e| {
        tracing::debug!(path = %path.display(), error = %e, "global.json is not valid JSON");
        crate::Error::SdkManifestInvalid { path: path.clone() }
    })?;
    let requested = parsed
        .sdk
        .and_then(|sdk| sdk.version)
        .ok_or_else(|| crate::Error::SdkManifestInvalid { path: path.clone() })?;

    if !supported.iter().any(|s| *s == requested) {
        return Err(crate::Error::UnsupportedSdk {
            requested,
            supported: supported.to_vec(),
        });
    }

    tracing::debug!(sdk = %requested, "requested SDK is supported");
    Ok(SdkCheck::Supported(requested))
}
