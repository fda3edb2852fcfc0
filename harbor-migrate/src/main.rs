//! Harbor Migration CLI Tool
//!
//! Generates CREATE TABLE scripts from a schema file and plans migrations
//! against a snapshot of a live schema.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use harbor::config::DdlConfig;
use harbor::ddl::{self, DialectDdl};
use harbor::dialect::Dialect;
use harbor::migration::{self, SchemaExtractor, SnapshotExtractor};
use harbor::SchemaRegistry;
use harbor_migrate::dependency_ordering;
use harbor_migrate::schema_file;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "harbor-migrate")]
#[command(about = "DDL generation and migration planning for Harbor schemas")]
#[command(version = "0.1.0")]
struct Cli {
    /// Schema file (TOML, or JSON with a .json extension)
    #[arg(long, default_value = "schema.toml")]
    schema: PathBuf,

    /// Configuration file holding the [ddl] section
    #[arg(long, default_value = "config/harbor.toml")]
    config: String,

    /// Target dialect, overriding the configuration
    #[arg(long)]
    dialect: Option<Dialect>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print CREATE TABLE statements for every table, parents first
    Create {
        /// Write the script to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Compare the schema with a live-schema snapshot and print the migration DDL
    Diff {
        /// JSON snapshot of the live schema
        #[arg(long)]
        snapshot: PathBuf,
    },

    /// Validate the schema and render it for every dialect
    Check,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    if cli.quiet {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();
    } else if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    match run(&cli) {
        Ok(()) => {
            if !cli.quiet {
                eprintln!("{}", "✅ Success".green());
            }
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{} {:#}", "❌ Error:".red(), e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = DdlConfig::load_from(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config))?;
    if let Some(dialect) = cli.dialect {
        config.dialect = dialect;
    }
    let registry = schema_file::load_registry(&cli.schema)?;
    log::info!(
        "Loaded {} tables from {} for {}",
        registry.len(),
        cli.schema.display(),
        config.dialect
    );

    match &cli.command {
        Commands::Create { output } => handle_create(&registry, &config, output.as_deref()),
        Commands::Diff { snapshot } => handle_diff(&registry, &config, snapshot),
        Commands::Check => handle_check(&registry),
    }
}

fn creation_order(registry: &SchemaRegistry) -> Result<Vec<String>> {
    let nodes = dependency_ordering::nodes_from_registry(registry);
    dependency_ordering::validate_references(&nodes).map_err(anyhow::Error::msg)?;
    dependency_ordering::topological_sort(&nodes).map_err(anyhow::Error::msg)
}

fn create_script(registry: &SchemaRegistry, builder: &dyn DialectDdl) -> Result<Vec<String>> {
    let mut statements = Vec::new();
    for name in creation_order(registry)? {
        let table = registry
            .table_by_name(&name)
            .with_context(|| format!("table {name} vanished from the registry"))?;
        statements.extend(
            ddl::create_table(builder, table)
                .with_context(|| format!("generating DDL for table {name}"))?,
        );
    }
    Ok(statements)
}

fn to_script(statements: &[String]) -> String {
    statements
        .iter()
        .map(|s| format!("{s};\n"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn handle_create(registry: &SchemaRegistry, config: &DdlConfig, output: Option<&Path>) -> Result<()> {
    let builder = ddl::for_config(config);
    let script = to_script(&create_script(registry, builder.as_ref())?);
    match output {
        Some(path) => {
            std::fs::write(path, &script)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("Wrote {} tables to {}", registry.len(), path.display());
        }
        None => print!("{script}"),
    }
    Ok(())
}

fn handle_diff(registry: &SchemaRegistry, config: &DdlConfig, snapshot: &Path) -> Result<()> {
    let schema = SnapshotExtractor::new(snapshot).extract()?;
    let plan = migration::compare(registry, &schema, config.dialect)?;

    println!("\n{} {}\n", "📊 Migration plan:".bold(), plan);
    if plan.is_empty() {
        println!("Schema is up to date");
        return Ok(());
    }
    for alter in plan.altered_columns() {
        let reasons: Vec<String> = alter.reasons.iter().map(|r| r.to_string()).collect();
        println!(
            "  {} {}.{} ({})",
            "~".yellow(),
            alter.field.table_name(),
            alter.field.column(),
            reasons.join(", ")
        );
    }
    let statements = plan.to_ddl(ddl::for_config(config).as_ref())?;
    println!("\n{}", to_script(&statements));
    Ok(())
}

fn handle_check(registry: &SchemaRegistry) -> Result<()> {
    let mut failures = 0;
    for dialect in Dialect::ALL {
        let builder = ddl::for_dialect(dialect);
        match create_script(registry, builder.as_ref()) {
            Ok(statements) => println!(
                "  {} {:<10} {} statements",
                "✓".green(),
                dialect.to_string(),
                statements.len()
            ),
            Err(e) => {
                failures += 1;
                println!("  {} {:<10} {:#}", "✗".red(), dialect.to_string(), e);
            }
        }
    }
    if failures == Dialect::ALL.len() {
        anyhow::bail!("schema renders on no dialect");
    }
    Ok(())
}
