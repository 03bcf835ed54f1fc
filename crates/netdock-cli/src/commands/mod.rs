mod detect;
mod generate;
mod resolve;
mod yaml_get;

pub use detect::detect;
pub use generate::{GenerateArgs, generate};
pub use resolve::resolve;
pub use yaml_get::yaml_get;

/// Command-line values win over netdock.toml when given.
fn prefer_cli(setting: &str, cli: Vec<String>, config: &[String]) -> Vec<String> {
    if cli.is_empty() {
        config.to_vec()
    } else {
        if !config.is_empty() {
            tracing::info!(setting, "command-line value overrides netdock.toml");
        }
        cli
    }
}
