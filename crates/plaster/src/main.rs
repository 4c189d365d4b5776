//! Plaster CLI - asset builder for static sites.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use plaster_build::OutputStyle;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;
mod manifest;

#[derive(Parser)]
#[command(name = "plaster")]
#[command(about = "Render templates, bundle, minify and copy static site assets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to plaster.toml manifest
    #[arg(short, long, default_value = "plaster.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter manifest and source tree
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Run every step listed in the manifest
    Build,

    /// Render a single template
    Render {
        /// Template, relative to the source root
        source: PathBuf,

        /// Output, relative to the dist root
        target: PathBuf,

        /// Data file (.json, .yaml, .yml or .toml)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },

    /// Concatenate files (use `bootstrap3` for the Bootstrap bundle)
    Concat {
        #[arg(required = true)]
        files: Vec<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Minify JavaScript
    MinifyJs {
        /// Source file (defaults to stdin)
        src: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Minify CSS
    MinifyCss {
        /// Source file (defaults to stdin)
        src: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Compile an SCSS file
    Scss {
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// compressed or expanded
        #[arg(long, default_value = "compressed")]
        style: OutputStyle,
    },

    /// Copy files and directories into a destination
    Copy {
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Destination directory
        #[arg(short, long)]
        dist: PathBuf,
    },

    /// Build the Bootstrap 3 bundle
    Bootstrap {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes).await?;
        }
        Commands::Build => {
            commands::build::run(&cli.config).await?;
        }
        Commands::Render {
            source,
            target,
            data,
        } => {
            commands::render::run(&cli.config, source, target, data).await?;
        }
        Commands::Concat { files, out } => {
            commands::concat::run(&cli.config, files, out).await?;
        }
        Commands::MinifyJs { src, out } => {
            commands::minify::run(&cli.config, commands::minify::Kind::Js, src, out)?;
        }
        Commands::MinifyCss { src, out } => {
            commands::minify::run(&cli.config, commands::minify::Kind::Css, src, out)?;
        }
        Commands::Scss { file, out, style } => {
            commands::scss::run(&cli.config, file, out, style).await?;
        }
        Commands::Copy { sources, dist } => {
            commands::copy::run(&cli.config, sources, dist)?;
        }
        Commands::Bootstrap { out } => {
            commands::concat::run_bootstrap(&cli.config, out).await?;
        }
    }

    Ok(())
}
