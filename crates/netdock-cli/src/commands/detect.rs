use netdock_build::AppDetector;
use netdock_core::{AppYaml, NetdockConfig};
use std::path::Path;

pub fn detect(root: &Path) -> anyhow::Result<()> {
    let config = NetdockConfig::load(root)?;
    let app_yaml = AppYaml::load(root)?;
    let startup_project = app_yaml.startup_project();

    let variant = AppDetector::new(root)
        .with_startup_project(startup_project.as_deref())
        .with_supported_sdks(&config.sdk.supported)
        .classify()?;

    println!("Layout:   {}", variant.kind());
    println!("Anchor:   {}", variant.anchor().display());
    println!("Runtime:  {}", variant.requested_version()?);
    println!("Assembly: {}.dll", variant.assembly_name()?);
    Ok(())
}
