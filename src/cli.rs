//! Command-line interface for the harvester.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::builder::build_act;
use crate::config::validate_act_ref;
use crate::error::{HarvestError, Result};
use crate::harvester::download_act;
use crate::http::PortalClient;
use crate::sources::SourceRegistry;
use crate::yaml::save_yaml;

/// rada-harvester - Download Ukrainian legislation from zakon.rada.gov.ua.
#[derive(Parser)]
#[command(name = "rada-harvester")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download an act by portal reference and convert to YAML.
    Harvest {
        /// Portal reference (e.g., 254к/96-вр or 2341-14)
        act_ref: String,

        /// Output directory (default: acts/)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Parse a local HTML file instead of fetching from the portal
        #[arg(long)]
        from_file: Option<PathBuf>,
    },

    /// List the curated source registry.
    List,
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Harvest {
            act_ref,
            output,
            from_file,
        } => harvest_command(&act_ref, output.as_deref(), from_file.as_deref()),
        Commands::List => list_command(),
    }
}

/// Execute the harvest command.
fn harvest_command(
    act_ref: &str,
    output: Option<&std::path::Path>,
    from_file: Option<&std::path::Path>,
) -> Result<()> {
    validate_act_ref(act_ref)?;

    let registry = SourceRegistry::builtin();
    let config = registry
        .get(act_ref)
        .ok_or_else(|| HarvestError::UnknownSource(act_ref.to_string()))?;

    println!(
        "{} {} ({})",
        style("Harvesting").bold(),
        style(&config.short_name).cyan(),
        style(act_ref).green()
    );
    println!();

    let pb = ProgressBar::new_spinner();
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("valid template"),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));

    let act = match from_file {
        Some(path) => {
            pb.set_message(format!("Parsing {}...", path.display()));
            let html = std::fs::read_to_string(path)?;
            build_act(&html, config)
        }
        None => {
            pb.set_message("Downloading act page...");
            let client = PortalClient::new()?;
            download_act(&client, config)
        }
    };

    let act = match act {
        Ok(act) => act,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };

    pb.set_message("Saving YAML...");
    let output_path = match save_yaml(&act, output) {
        Ok(path) => path,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e);
        }
    };
    pb.finish_and_clear();

    println!("  Title: {}", style(&act.title).green());
    println!("  Status: {}", act.status.as_str());
    println!("  Provisions: {}", act.provisions.len());
    println!("  Definitions: {}", act.definitions.len());
    println!();
    println!(
        "{} {}",
        style("Saved to:").green().bold(),
        output_path.display()
    );

    Ok(())
}

/// Execute the list command.
fn list_command() -> Result<()> {
    let registry = SourceRegistry::builtin();

    println!("{}", style("Curated sources:").bold());
    for config in registry.iter() {
        println!(
            "  {}  {}  {}",
            style(&config.id).cyan(),
            style(&config.act_ref).green(),
            config.title
        );
    }
    println!();
    println!("{} sources", registry.len());

    Ok(())
}
