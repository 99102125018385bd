use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "vsync",
    about = "Release version synchronizer - propagate one version to VERSION, manifests, build scripts and docs",
    version
)]
pub struct Cli {
    /// New release version in MAJOR.MINOR.PATCH form (e.g. 1.1.0)
    #[arg(value_name = "VERSION")]
    pub new_version: String,

    /// Path to the project directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub path: String,

    /// Artifact configuration file (defaults to <path>/vsync.toml, then the built-in set)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Show per-rule details for every artifact
    #[arg(short, long)]
    pub verbose: bool,
}
