use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mdsite::Config;

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Build a static HTML site from a directory of Markdown files")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Config file (defaults are used if it does not exist)
    #[arg(short, long, default_value = "mdsite.toml")]
    config: PathBuf,

    /// URL prefix the site is served under, e.g. "/my-repo/"
    #[arg(long)]
    base_path: Option<String>,

    /// Output directory (overrides the config file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// More log output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Command {
    /// Build the whole site (the default)
    Build,
    /// Print the HTML for a single Markdown file
    Render {
        /// Input Markdown file
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Command::Build) {
        Command::Render { input } => {
            let markdown = fs::read_to_string(&input)
                .with_context(|| format!("Error reading {}", input.display()))?;
            let html = mdsite::markdown_to_html(&markdown)
                .with_context(|| format!("Error converting {}", input.display()))?;
            println!("{html}");
        }
        Command::Build => {
            let mut config = Config::load(&cli.config)?;
            if let Some(base_path) = cli.base_path {
                config.site.base_path = base_path;
            }
            if let Some(output) = cli.output {
                config.paths.output = output;
            }

            let report = mdsite::site::build(&config)?;
            println!(
                "Built {} page(s) and copied {} asset(s) into {}",
                report.pages_generated,
                report.assets_copied,
                config.paths.output.display()
            );
        }
    }
    Ok(())
}
