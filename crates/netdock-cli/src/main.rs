mod commands;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "netdock", about = "Generate Dockerfiles for .NET Core apps")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the app layout and write a Dockerfile for it
    Generate {
        #[command(flatten)]
        app: AppArgs,
        #[command(flatten)]
        runtime: RuntimeArgs,
        /// Path of the generated Dockerfile (default: Dockerfile)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
        /// SDK versions an app may pin in global.json
        #[arg(long = "supported-sdks", short = 's', num_args = 1..)]
        supported_sdks: Vec<String>,
        /// Image for the builder stage of project and solution builds
        #[arg(long)]
        builder_image: Option<String>,
    },
    /// Show which app layout was detected
    Detect {
        #[command(flatten)]
        app: AppArgs,
    },
    /// Show the base image selected for a runtime version
    Resolve {
        /// Requested .NET Core runtime version, e.g. 2.1.4
        version: String,
        #[command(flatten)]
        app: AppArgs,
        #[command(flatten)]
        runtime: RuntimeArgs,
    },
    /// Print the value at a dotted key path in a YAML file
    YamlGet {
        /// YAML file to read
        #[arg(long, short = 'f')]
        file: PathBuf,
        /// Dotted key path, e.g. runtime_config.startup_project
        #[arg(long, short = 'p')]
        path: String,
    },
}

#[derive(Args)]
struct AppArgs {
    /// Root directory of the app
    #[arg(long, short = 'r', default_value = ".")]
    root: PathBuf,
}

#[derive(Args)]
struct RuntimeArgs {
    /// Supported runtime versions as VERSION=IMAGE (overrides netdock.toml)
    #[arg(long = "version-map", short = 'm', num_args = 1..)]
    version_map: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            app,
            runtime,
            output,
            supported_sdks,
            builder_image,
        } => commands::generate(commands::GenerateArgs {
            root: app.root,
            output,
            version_map: runtime.version_map,
            supported_sdks,
            builder_image,
        })?,
        Commands::Detect { app } => commands::detect(&app.root)?,
        Commands::Resolve {
            version,
            app,
            runtime,
        } => commands::resolve(&app.root, &version, runtime.version_map)?,
        Commands::YamlGet { file, path } => commands::yaml_get(&file, &path)?,
    }

    Ok(())
}
