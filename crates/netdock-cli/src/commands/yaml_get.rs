use netdock_core::config::{load_yaml, yaml_lookup};
use serde_yaml::Value;
use std::path::Path;

/// Prints the value at `path`, or an empty line if any key is missing.
pub fn yaml_get(file: &Path, path: &str) -> anyhow::Result<()> {
    let doc = load_yaml(file)?;

    let rendered = match yaml_lookup(&doc, path) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => serde_yaml::to_string(other)?.trim_end().to_owned(),
    };

    println!("{rendered}");
    Ok(())
}
