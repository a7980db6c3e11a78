//! Command definitions and execution

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use mbuilder_codegen::{Generator, Migration, StubMigrationCreator};
use mbuilder_schema::load_table;
use mbuilder_schema::prelude::*;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::BuilderConfig;

// ============================================================================
// Command line
// ============================================================================

/// Build schema migrations from validated table definitions
#[derive(Debug, Parser)]
#[command(name = "migration-builder", version, about)]
pub struct Cli {
    /// Configuration file (defaults to ./migration-builder.toml when present)
    #[arg(short, long, global = true, env = "MIGRATION_BUILDER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Statement indentation, overriding the configuration file
    #[arg(long, global = true)]
    pub indent: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an example migration for an `Account` table
    Example {
        /// The location where the migration file should be created
        #[arg(long)]
        path: Option<PathBuf>,
    },

    /// Write a migration from a JSON table definition
    Generate {
        /// Table definition file
        definition: PathBuf,

        /// Migration name (defaults to create_<table>_table)
        #[arg(long)]
        name: Option<String>,

        /// The location where the migration file should be created
        #[arg(long)]
        path: Option<PathBuf>,

        /// Alter an existing table instead of creating it
        #[arg(long)]
        update: bool,
    },

    /// Print the rendered statements of a table definition
    Render {
        /// Table definition file
        definition: PathBuf,
    },

    /// Check a table definition without writing anything
    Validate {
        /// Table definition file
        definition: PathBuf,
    },
}

// ============================================================================
// Execution
// ============================================================================

/// Run a parsed command line, resolving the configuration from `cwd`
pub fn run(cli: Cli, cwd: &Path, out: &mut dyn Write) -> Result<()> {
    let mut config =
        BuilderConfig::load(cli.config.as_deref(), cwd).context("Loading configuration")?;
    if let Some(indent) = cli.indent {
        config.indent = indent;
    }

    match cli.command {
        Command::Example { path } => {
            let table = example_table()?;
            let path = resolve(cwd, path.as_deref().unwrap_or(&config.migrations_path));
            let file = write(&config, cwd, &table, "create_account_table", &path, true)?;
            writeln!(out, "{} {}", "Created Migration:".green(), file.display())?;
        }
        Command::Generate {
            definition,
            name,
            path,
            update,
        } => {
            let table = load(cwd, &definition)?;
            let name = name.unwrap_or_else(|| Migration::default_name(&table));
            let path = resolve(cwd, path.as_deref().unwrap_or(&config.migrations_path));
            let file = write(&config, cwd, &table, &name, &path, !update)?;
            writeln!(out, "{} {}", "Created Migration:".green(), file.display())?;
        }
        Command::Render { definition } => {
            let table = load(cwd, &definition)?;
            let rendered = Generator::new(config.generator_config())
                .render(&table)
                .with_context(|| format!("Rendering table '{}'", table.name()))?;
            if !rendered.is_empty() {
                writeln!(out, "{}", rendered)?;
            }
        }
        Command::Validate { definition } => {
            let table = load(cwd, &definition)?;
            writeln!(
                out,
                "{} table '{}' is valid ({} columns, {} foreign keys)",
                "✓".green(),
                table.name(),
                table.columns().len(),
                table.foreign_keys().len(),
            )?;
        }
    }

    Ok(())
}

/// The `Account` demonstration table: no timestamps, an auto-increment
/// `id`, and a 255-character `name`
pub fn example_table() -> BuilderResult<Table> {
    Table::new("Account", TableOptions::new().without_timestamps())?
        .with_column(Column::new(
            "id",
            ColumnType::Integer,
            ColumnOptions::new().auto_increment(),
        )?)?
        .with_column(Column::new(
            "name",
            ColumnType::String,
            ColumnOptions::new().length(255),
        )?)
}

fn resolve(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

fn load(cwd: &Path, definition: &Path) -> Result<Table> {
    let path = resolve(cwd, definition);
    load_table(&path).with_context(|| format!("Loading table definition {}", path.display()))
}

fn write(
    config: &BuilderConfig,
    cwd: &Path,
    table: &Table,
    name: &str,
    path: &Path,
    create: bool,
) -> Result<PathBuf> {
    let mut creator = StubMigrationCreator::new();
    if let Some(stubs) = &config.stubs_path {
        creator = creator.with_stubs_dir(resolve(cwd, stubs));
    }

    let migration = Migration::new(name, path, table)?
        .with_generator(Generator::new(config.generator_config()));

    migration
        .write_migration(create, &creator)
        .with_context(|| format!("Writing migration '{}'", migration.name()))
}

// ============================================================================
// Tests
// ============================================================================
