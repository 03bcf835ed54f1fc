//! The three app layouts netdock knows how to package.
//!
//! Every variant answers the same questions: which runtime version does
//! the app request, what is its entry assembly, and which [`Template`]
//! packages it.

use netdock_core::{BaseImage, RuntimeVersion, VersionTable};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::dockerfile::{DockerfileGenerator, Template};
use crate::{Error, Result};

/// Suffix of dependency manifests produced by `dotnet publish`.
pub const DEPS_EXTENSION: &str = ".deps.json";

const NETCORE_APP_PREFIX: &str = "microsoft.netcore.app/";
const NETCOREAPP_MONIKER_PREFIX: &str = "netcoreapp";

/// Already-published binaries anchored to their `*.deps.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedApp {
    pub root: PathBuf,
    pub deps_path: PathBuf,
}

/// A single `.csproj` or `.fsproj` at the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectApp {
    pub root: PathBuf,
    pub project_path: PathBuf,
}

/// A `.sln` with a startup project named in app.yaml.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionApp {
    pub root: PathBuf,
    pub solution_path: PathBuf,
    /// Startup project relative to `root`, with `/` separators
    pub startup_project: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppVariant {
    Published(PublishedApp),
    SingleProject(ProjectApp),
    Solution(SolutionApp),
}

/// A Dockerfile rendered for a variant, before or after it is written.
#[derive(Debug, Clone)]
pub struct RenderedDockerfile {
    pub base_image: BaseImage,
    pub assembly_name: String,
    pub content: String,
}

impl AppVariant {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Published(_) => "published",
            Self::SingleProject(_) => "project",
            Self::Solution(_) => "solution",
        }
    }

    /// The file that identified this layout.
    pub fn anchor(&self) -> &Path {
        match self {
            Self::Published(app) => &app.deps_path,
            Self::SingleProject(app) => &app.project_path,
            Self::Solution(app) => &app.solution_path,
        }
    }

    /// Runtime version the app was built against.
    pub fn requested_version(&self) -> Result<RuntimeVersion> {
        match self {
            Self::Published(app) => deps_runtime_version(&app.deps_path),
            Self::SingleProject(app) => project_runtime_version(&app.project_path),
            Self::Solution(app) => project_runtime_version(&app.startup_project_path()),
        }
    }

    /// Entry assembly name, without `.dll`.
    ///
    /// For published apps the assembly must exist next to the manifest.
    pub fn assembly_name(&self) -> Result<String> {
        match self {
            Self::Published(app) => {
                let name = deps_assembly_name(&app.deps_path);
                let dll = app.root.join(format!("{name}.dll"));
                if !dll.is_file() {
                    return Err(Error::MissingEntryAssembly { path: dll });
                }
                Ok(name)
            }
            Self::SingleProject(app) => Ok(file_stem(&app.project_path)),
            Self::Solution(app) => Ok(file_stem(Path::new(&app.startup_project))),
        }
    }

    pub fn template(&self) -> Template<'_> {
        match self {
            Self::Published(_) => Template::Published,
            Self::SingleProject(_) => Template::SingleProject,
            Self::Solution(app) => Template::Solution {
                main_project: &app.startup_project,
            },
        }
    }

    /// Resolve the base image and render this variant's Dockerfile.
    pub fn render_dockerfile(
        &self,
        table: &VersionTable,
        builder_image: &str,
    ) -> Result<RenderedDockerfile> {
        let requested = self.requested_version()?;
        let base_image = table
            .get_base_image(&requested)
            .cloned()
            .ok_or_else(|| Error::UnsupportedRuntime {
                requested: requested.to_string(),
                available: table
                    .entries()
                    .iter()
                    .map(|e| e.version().to_string())
                    .collect(),
            })?;
        let assembly_name = self.assembly_name()?;

        tracing::info!(
            kind = self.kind(),
            requested = %requested,
            image = base_image.image(),
            assembly = %assembly_name,
            "rendering Dockerfile"
        );

        let content = DockerfileGenerator::new(
            self.template(),
            base_image.image(),
            &assembly_name,
            builder_image,
        )
        .render();

        Ok(RenderedDockerfile {
            base_image,
            assembly_name,
            content,
        })
    }

    /// Render this variant's Dockerfile and write it to `output`.
    pub fn generate_dockerfile(
        &self,
        table: &VersionTable,
        builder_image: &str,
        output: &Path,
    ) -> Result<RenderedDockerfile> {
        let rendered = self.render_dockerfile(table, builder_image)?;
        crate::output::write_dockerfile(output, &rendered.content)?;
        Ok(rendered)
    }
}

impl SolutionApp {
    pub fn startup_project_path(&self) -> PathBuf {
        self.root.join(&self.startup_project)
    }
}

impl fmt::Display for AppVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind(), self.anchor().display())
    }
}

#[derive(Deserialize)]
struct DepsJson {
    libraries: Option<serde_json::Map<String, serde_json::Value>>,
}

fn deps_assembly_name(deps_path: &Path) -> String {
    let file_name = deps_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    file_name
        .strip_suffix(DEPS_EXTENSION)
        .unwrap_or(&file_name)
        .to_owned()
}

/// Reads the shared runtime version from the `libraries` section of a
/// dependency manifest, dropping any pre-release suffix.
fn deps_runtime_version(deps_path: &Path) -> Result<RuntimeVersion> {
    let content = std::fs::read_to_string(deps_path).map_err(|e| Error::Read {
        path: deps_path.to_path_buf(),
        source: e,
    })?;
    let deps: DepsJson = serde_json::from_str(&content).map_err(|e| Error::ManifestParse {
        path: deps_path.to_path_buf(),
        source: e,
    })?;

    let libraries = deps.libraries.ok_or_else(|| Error::UnresolvableRuntimeVersion {
        path: deps_path.to_path_buf(),
        reason: "no libraries section",
    })?;

    let version = libraries
        .keys()
        .find_map(|key| {
            key.to_lowercase()
                .strip_prefix(NETCORE_APP_PREFIX)
                .map(|rest| rest.split('-').next().unwrap_or_default().to_owned())
        })
        .ok_or_else(|| Error::UnresolvableRuntimeVersion {
            path: deps_path.to_path_buf(),
            reason: "no Microsoft.NETCore.App dependency",
        })?;

    tracing::debug!(path = %deps_path.display(), version = %version, "runtime version from manifest");
    Ok(version.parse()?)
}

/// Reads `Project/PropertyGroup/TargetFramework` and strips the
/// `netcoreapp` prefix.
fn project_runtime_version(project_path: &Path) -> Result<RuntimeVersion> {
    let content = std::fs::read_to_string(project_path).map_err(|e| Error::Read {
        path: project_path.to_path_buf(),
        source: e,
    })?;
    let doc = roxmltree::Document::parse(&content).map_err(|e| Error::ProjectParse {
        path: project_path.to_path_buf(),
        source: e,
    })?;

    let framework = doc
        .root_element()
        .children()
        .filter(|n| n.has_tag_name("PropertyGroup"))
        .flat_map(|group| group.children())
        .find(|n| n.has_tag_name("TargetFramework"))
        .and_then(|n| n.text())
        .map(str::trim)
        .ok_or_else(|| Error::UnresolvableRuntimeVersion {
            path: project_path.to_path_buf(),
            reason: "no TargetFramework property",
        })?;

    let version = framework
        .strip_prefix(NETCOREAPP_MONIKER_PREFIX)
        .ok_or_else(|| Error::UnsupportedTargetFramework {
            path: project_path.to_path_buf(),
            framework: framework.to_owned(),
        })?;

    tracing::debug!(path = %project_path.display(), framework, "target framework found");
    Ok(version.parse()?)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn manifest_version_drops_prerelease_suffix() {
        let tmp = TempDir::new().unwrap();
        let deps = write(
            tmp.path(),
            "app.deps.json",
            r#"{"libraries": {"Microsoft.NETCore.App/2.1.0-preview2-26406-04": {"type": "package"}}}"#,
        );

        let version = deps_runtime_version(&deps).unwrap();
        assert_eq!(version.as_str(), "2.1.0");
    }

    #[test]
    fn manifest_runtime_key_is_taken_in_file_order() {
        let tmp = TempDir::new().unwrap();
        let deps = write(
            tmp.path(),
            "app.deps.json",
            r#"{"libraries": {
                "microsoft.netcore.app/2.1.5": {"type": "package"},
                "Microsoft.NETCore.App/2.0.9": {"type": "package"}
            }}"#,
        );

        assert_eq!(deps_runtime_version(&deps).unwrap().as_str(), "2.1.5");
    }

    #[test]
    fn manifest_without_runtime_dependency_is_unresolvable() {
        let tmp = TempDir::new().unwrap();
        let deps = write(
            tmp.path(),
            "app.deps.json",
            r#"{"libraries": {"Newtonsoft.Json/11.0.2": {"type": "package"}}}"#,
        );

        let err = deps_runtime_version(&deps).unwrap_err();
        assert!(matches!(err, Error::UnresolvableRuntimeVersion { .. }));
    }

    #[test]
    fn manifest_without_libraries_is_unresolvable() {
        let tmp = TempDir::new().unwrap();
        let deps = write(tmp.path(), "app.deps.json", r#"{"targets": {}}"#);

        assert!(matches!(
            deps_runtime_version(&deps).unwrap_err(),
            Error::UnresolvableRuntimeVersion { .. }
        ));
    }

    #[test]
    fn assembly_name_strips_deps_extension() {
        assert_eq!(deps_assembly_name(Path::new("/x/My.App.deps.json")), "My.App");
    }

    #[test]
    fn project_version_from_target_framework() {
        let tmp = TempDir::new().unwrap();
        let project = write(
            tmp.path(),
            "web.csproj",
            r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup>
    <TargetFramework>netcoreapp2.1</TargetFramework>
  </PropertyGroup>
</Project>"#,
        );

        assert_eq!(project_runtime_version(&project).unwrap().as_str(), "2.1");
    }

    #[test]
    fn target_framework_in_later_property_group_is_found() {
        let tmp = TempDir::new().unwrap();
        let project = write(
            tmp.path(),
            "web.fsproj",
            r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup><OutputType>Exe</OutputType></PropertyGroup>
  <PropertyGroup><TargetFramework>netcoreapp2.2</TargetFramework></PropertyGroup>
</Project>"#,
        );

        assert_eq!(project_runtime_version(&project).unwrap().as_str(), "2.2");
    }

    #[test]
    fn library_target_framework_is_rejected() {
        let tmp = TempDir::new().unwrap();
        let project = write(
            tmp.path(),
            "lib.csproj",
            "<Project><PropertyGroup><TargetFramework>netstandard2.0</TargetFramework></PropertyGroup></Project>",
        );

        let err = project_runtime_version(&project).unwrap_err();
        assert!(matches!(err, Error::UnsupportedTargetFramework { .. }));
        assert!(err.to_string().contains("netstandard2.0"));
    }

    #[test]
    fn missing_target_framework_is_unresolvable() {
        let tmp = TempDir::new().unwrap();
        let project = write(tmp.path(), "web.csproj", "<Project><PropertyGroup/></Project>");

        assert!(matches!(
            project_runtime_version(&project).unwrap_err(),
            Error::UnresolvableRuntimeVersion { .. }
        ));
    }

    #[test]
    fn malformed_project_is_a_parse_error() {
        let tmp = TempDir::new().unwrap();
        let project = write(tmp.path(), "web.csproj", "<Project><PropertyGroup>");

        assert!(matches!(
            project_runtime_version(&project).unwrap_err(),
            Error::ProjectParse { .. }
        ));
    }
}
