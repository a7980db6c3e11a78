//! # Migration Writer
//!
//! The boundary between the generator and whatever persists its output.
//! [`MigrationCreator`] receives the three rendered blocks and returns the
//! path of the produced file.
//!
//! [`StubMigrationCreator`] is the filesystem implementation: it fills a
//! migration stub and writes `<path>/<YYYY_MM_DD_HHMMSS>_<name>.php`.

use chrono::{Local, NaiveDateTime};
use heck::ToPascalCase;
use mbuilder_core::{BuilderError, BuilderResult};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::migrations::escape;

// ============================================================================
// MigrationCreator
// ============================================================================

/// Everything a writer needs to produce one migration file
#[derive(Debug, Clone, Copy)]
pub struct MigrationRequest<'a> {
    /// Migration name (snake_case)
    pub name: &'a str,

    /// Target directory
    pub path: &'a Path,

    /// Table the migration creates or alters
    pub table: &'a str,

    /// Indented column statements
    pub columns: &'a str,

    /// Indented special column statements
    pub special_columns: &'a str,

    /// Indented foreign key statements
    pub foreign_keys: &'a str,

    /// Create the table (`true`) or alter an existing one (`false`)
    pub create: bool,
}

/// Persists rendered migrations
pub trait MigrationCreator {
    /// Write one migration and return the produced file path
    fn create(&self, request: &MigrationRequest<'_>) -> BuilderResult<PathBuf>;
}

// ============================================================================
// Stubs
// ============================================================================

/// Stub file name used for create migrations
pub const CREATE_STUB: &str = "migration.create.stub";

/// Stub file name used for update migrations
pub const UPDATE_STUB: &str = "migration.update.stub";

const BUILTIN_CREATE_STUB: &str = r#"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\Schema;

class {{ class }} extends Migration
{
    /**
     * Run the migrations.
     *
     * @return void
     */
    public function up()
    {
        Schema::create('{{ table }}', function (Blueprint $table) {
{{ columns }}
{{ specialColumns }}
{{ foreignKeys }}
        });
    }

    /**
     * Reverse the migrations.
     *
     * @return void
     */
    public function down()
    {
        Schema::dropIfExists('{{ table }}');
    }
}
"#;

const BUILTIN_UPDATE_STUB: &str = r#"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\Schema;

class {{ class }} extends Migration
{
    /**
     * Run the migrations.
     *
     * @return void
     */
    public function up()
    {
        Schema::table('{{ table }}', function (Blueprint $table) {
{{ columns }}
{{ specialColumns }}
{{ foreignKeys }}
        });
    }

    /**
     * Reverse the migrations.
     *
     * @return void
     */
    public function down()
    {
        Schema::table('{{ table }}', function (Blueprint $table) {
            //
        });
    }
}
"#;

/// Fill a stub's placeholders.
///
/// A line holding only a block placeholder is dropped when that block is
/// empty, so missing groups leave no blank lines behind. Placeholders
/// elsewhere on a line are replaced in place. The table name is escaped for
/// the single-quoted literals it appears in.
pub fn populate_stub(stub: &str, class: &str, request: &MigrationRequest<'_>) -> String {
    let blocks = [
        ("{{ columns }}", request.columns),
        ("{{ specialColumns }}", request.special_columns),
        ("{{ foreignKeys }}", request.foreign_keys),
    ];
    let table = escape(request.table);

    let mut out = String::with_capacity(stub.len() + 256);
    for line in stub.lines() {
        let trimmed = line.trim();
        if let Some((_, block)) = blocks.iter().find(|(placeholder, _)| *placeholder == trimmed) {
            if !block.is_empty() {
                out.push_str(block);
                out.push('\n');
            }
            continue;
        }

        let mut filled = line
            .replace("{{ class }}", class)
            .replace("{{ table }}", &table);
        for (placeholder, block) in blocks {
            filled = filled.replace(placeholder, block);
        }
        out.push_str(&filled);
        out.push('\n');
    }

    out
}

// ============================================================================
// StubMigrationCreator
// ============================================================================

/// Writes migrations from stub templates
#[derive(Debug, Clone, Default)]
pub struct StubMigrationCreator {
    /// Directory searched for custom stubs before the built-in ones
    stubs_dir: Option<PathBuf>,

    /// Fixed timestamp for file names (current local time when unset)
    timestamp: Option<NaiveDateTime>,
}

impl StubMigrationCreator {
    /// Create a writer using the built-in stubs
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for custom stubs in `dir` first
    pub fn with_stubs_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.stubs_dir = Some(dir.into());
        self
    }

    /// Use a fixed timestamp for generated file names
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// File name prefix, e.g. `2024_01_31_235959`
    fn date_prefix(&self) -> String {
        self.timestamp
            .unwrap_or_else(|| Local::now().naive_local())
            .format("%Y_%m_%d_%H%M%S")
            .to_string()
    }

    /// Load the create or update stub, preferring the custom stubs directory
    pub fn stub(&self, create: bool) -> BuilderResult<String> {
        let (file, builtin) = if create {
            (CREATE_STUB, BUILTIN_CREATE_STUB)
        } else {
            (UPDATE_STUB, BUILTIN_UPDATE_STUB)
        };

        if let Some(dir) = &self.stubs_dir {
            let custom = dir.join(file);
            if custom.is_file() {
                return std::fs::read_to_string(&custom).map_err(|e| BuilderError::FileRead {
                    path: custom,
                    message: e.to_string(),
                });
            }
        }

        Ok(builtin.to_string())
    }
}

impl MigrationCreator for StubMigrationCreator {
    fn create(&self, request: &MigrationRequest<'_>) -> BuilderResult<PathBuf> {
        let stub = self.stub(request.create)?;

        if !request.path.exists() {
            std::fs::create_dir_all(request.path).map_err(|e| BuilderError::DirectoryCreate {
                path: request.path.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        let file = request
            .path
            .join(format!("{}_{}.php", self.date_prefix(), request.name));

        let class = request.name.to_pascal_case();
        let content = populate_stub(&stub, &class, request);

        let write_error = |e: std::io::Error| BuilderError::FileWrite {
            path: file.clone(),
            message: e.to_string(),
        };
        let mut handle = match std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&file)
        {
            Ok(handle) => handle,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(BuilderError::OutputExists(file.clone()));
            }
            Err(e) => return Err(write_error(e)),
        };
        handle.write_all(content.as_bytes()).map_err(write_error)?;

        tracing::info!(
            path = %file.display(),
            table = request.table,
            create = request.create,
            "migration written",
        );

        Ok(file)
    }
}

// ============================================================================
// Tests
// ============================================================================
