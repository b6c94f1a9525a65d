mod config;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;

use foreman_core::binding::ResourceBinding;
use foreman_core::docs::render_markdown;
use foreman_core::resource::ResourceData;
use foreman_core::schema::ResourceSchema;
use foreman_provider::schemas::all_schemas;
use foreman_provider::{Hostgroup, HostgroupBinding, get_resource_type};

#[derive(Parser)]
#[command(name = "foreman")]
#[command(about = "Foreman resource provider tools", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the reference documentation of resource types
    Docs {
        /// Resource type (e.g. foreman_hostgroup); all types when omitted
        resource: Option<String>,
    },
    /// Validate an attribute file against the hostgroup schema
    Validate {
        /// Path to JSON attribute file
        file: PathBuf,
    },
    /// Show the request body a hostgroup attribute file decodes to
    Decode {
        /// Path to JSON attribute file
        file: PathBuf,

        /// Foreman id of an existing hostgroup
        #[arg(long)]
        id: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    let result = match cli.command {
        Commands::Docs { resource } => run_docs(resource.as_deref()),
        Commands::Validate { file } => run_validate(&file),
        Commands::Decode { file, id } => run_decode(&file, id.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn run_docs(resource: Option<&str>) -> Result<()> {
    let schemas: Vec<ResourceSchema> = match resource {
        Some(name) => {
            let resource_type = get_resource_type(name)
                .with_context(|| format!("Unknown resource type: {}", name))?;
            vec![resource_type.schema()]
        }
        None => all_schemas(),
    };

    let pages: Vec<String> = schemas.iter().map(render_markdown).collect();
    print!("{}", pages.join("\n"));
    Ok(())
}

fn load_hostgroup_data(file: &Path) -> Result<ResourceData> {
    let attributes = config::load_attributes(file)?;
    log::debug!("Loaded {} attributes from {}", attributes.len(), file.display());
    Ok(ResourceData::from_attributes(
        HostgroupBinding.schema(),
        attributes,
    ))
}

/// Schema errors of an attribute file, one line each
fn validation_errors(data: &ResourceData) -> Vec<String> {
    match data.validate() {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .iter()
            .map(|e| format!("{}: {}", HostgroupBinding.resource_type(), e))
            .collect(),
    }
}

fn run_validate(file: &Path) -> Result<()> {
    let data = load_hostgroup_data(file)?;
    let errors = validation_errors(&data);
    if !errors.is_empty() {
        for error in &errors {
            eprintln!("  {} {}", "✗".red(), error);
        }
        bail!("{} validation error(s) in {}", errors.len(), file.display());
    }

    println!(
        "{}",
        format!("✓ {} is valid.", file.display()).green().bold()
    );
    Ok(())
}

fn decode_file(file: &Path, id: Option<&str>) -> Result<Hostgroup> {
    let mut data = load_hostgroup_data(file)?;
    if let Some(id) = id {
        data = data.with_identifier(id);
    }

    let errors = validation_errors(&data);
    if !errors.is_empty() {
        bail!("Invalid attributes:\n  {}", errors.join("\n  "));
    }

    Ok(HostgroupBinding.decode(&data)?)
}

fn run_decode(file: &Path, id: Option<&str>) -> Result<()> {
    let hostgroup = decode_file(file, id)?;
    let body = serde_json::to_string_pretty(&hostgroup)?;
    println!("{}", body);
    Ok(())
}
