//! Core types and configuration for netdock.
//!
//! This crate defines the `netdock.toml` schema ([`NetdockConfig`]), the
//! parts of `app.yaml` netdock reads ([`AppYaml`]), runtime version
//! resolution ([`VersionTable`]), SDK pinning checks, and shared error types.

pub mod config;
pub mod error;
pub mod sdk;
pub mod version;

pub use config::{AppYaml, BuildConfig, NetdockConfig, RuntimeConfig, SdkConfig};
pub use error::{Error, Result};
pub use sdk::{SdkCheck, validate_sdks};
pub use version::{BaseImage, RuntimeVersion, VersionTable};
