use netdock_build::GenerateRequest;
use netdock_core::{AppYaml, NetdockConfig};
use std::path::PathBuf;

pub struct GenerateArgs {
    pub root: PathBuf,
    pub output: Option<PathBuf>,
    pub version_map: Vec<String>,
    pub supported_sdks: Vec<String>,
    pub builder_image: Option<String>,
}

/// Detect the app under `root` and write its Dockerfile.
pub fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let config = NetdockConfig::load(&args.root)?;
    let app_yaml = AppYaml::load(&args.root)?;
    let startup_project = app_yaml.startup_project();

    let version_map = super::prefer_cli(
        "runtime.version_map",
        args.version_map,
        &config.runtime.version_map,
    );
    let supported_sdks =
        super::prefer_cli("sdk.supported", args.supported_sdks, &config.sdk.supported);
    let builder_image = args.builder_image.unwrap_or(config.build.builder_image);
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.build.output));

    let generated = netdock_build::generate(&GenerateRequest {
        root: &args.root,
        output: &output,
        version_map: &version_map,
        supported_sdks: &supported_sdks,
        startup_project: startup_project.as_deref(),
        builder_image: &builder_image,
    })?;

    println!(
        "Generated {} for {} app using {}",
        output.display(),
        generated.variant.kind(),
        generated.dockerfile.base_image.image()
    );
    Ok(())
}
