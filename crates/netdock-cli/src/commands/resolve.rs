use netdock_core::{NetdockConfig, RuntimeVersion, VersionTable};
use std::path::Path;

pub fn resolve(root: &Path, version: &str, version_map: Vec<String>) -> anyhow::Result<()> {
    let config = NetdockConfig::load(root)?;
    let version_map =
        super::prefer_cli("runtime.version_map", version_map, &config.runtime.version_map);

    let requested: RuntimeVersion = version.parse()?;
    let table = VersionTable::parse(&version_map)?;

    let Some(image) = table.get_base_image(&requested) else {
        anyhow::bail!(
            "unsupported runtime version {requested}: no {} image at or above it in the version map",
            requested.major_version()
        );
    };

    println!("{}", image.image());
    Ok(())
}
