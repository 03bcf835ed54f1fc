use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the tool configuration in the app root.
pub const CONFIG_FILE_NAME: &str = "netdock.toml";

/// File name of the app's own deployment configuration.
pub const APP_YAML_NAME: &str = "app.yaml";

/// netdock.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetdockConfig {
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub sdk: SdkConfig,
    #[serde(default)]
    pub build: BuildConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Supported runtime versions as `VERSION=IMAGE` entries
    #[serde(default)]
    pub version_map: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SdkConfig {
    /// SDK versions an app may pin in global.json. Empty disables the check.
    #[serde(default)]
    pub supported: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Image used by the builder stage of source (project/solution) builds
    #[serde(default = "default_builder_image")]
    pub builder_image: String,
    /// Where the generated Dockerfile is written, relative to the working directory
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            builder_image: default_builder_image(),
            output: default_output(),
        }
    }
}

impl NetdockConfig {
    /// Load from netdock.toml in the given directory, or return defaults if not found.
    pub fn load(root: &Path) -> crate::Result<Self> {
        let config_path = root.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path,
                source: e,
            })
        } else {
            Ok(Self::default())
        }
    }
}

/// The parts of app.yaml netdock reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppYaml {
    #[serde(default)]
    pub runtime_config: Option<AppRuntimeConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppRuntimeConfig {
    /// Startup project of a multi-project solution, relative to the app root
    #[serde(default)]
    pub startup_project: Option<String>,
}

impl AppYaml {
    /// Load app.yaml from the given directory, or return an empty config if not found.
    pub fn load(root: &Path) -> crate::Result<Self> {
        let path = root.join(APP_YAML_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| crate::Error::AppYamlRead {
            path: path.clone(),
            source: e,
        })?;
        // An empty document deserializes to unit, not to a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| crate::Error::AppYamlParse { path, source: e })
    }

    /// `runtime_config.startup_project` with Windows separators turned into `/`.
    pub fn startup_project(&self) -> Option<String> {
        self.runtime_config
            .as_ref()
            .and_then(|rc| rc.startup_project.as_deref())
            .map(|p| p.replace('\\', "/"))
    }
}

/// Look up a dotted key path (`a.b.c`) in a YAML document.
///
/// Returns `None` when any segment is missing or a non-mapping value is
/// traversed.
pub fn yaml_lookup<'a>(doc: &'a serde_yaml::Value, path: &str) -> Option<&'a serde_yaml::Value> {
    path.split('.').try_fold(doc, |current, key| current.get(key))
}

/// Load a YAML file as an untyped document.
pub fn load_yaml(path: &Path) -> crate::Result<serde_yaml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::Error::AppYamlRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_yaml::from_str(&content).map_err(|e| crate::Error::AppYamlParse {
        path: path.to_path_buf(),
        source: e,
    })
}

fn default_builder_image() -> String {
    "gcr.io/cloud-builders/csharp/dotnet".to_owned()
}

fn default_output() -> String {
    "Dockerfile".to_owned()
}
