//! mysql-schema — run single schema changes from the shell.
//!
//! # Usage
//!
//! ```bash
//! # Show the SQL without touching the database
//! mysql-schema --dry-run create users --timestamps
//!
//! # Run it
//! mysql-schema --database-url mysql://root@localhost/app add-unique users email
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use mysql_schema::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mysql-schema")]
#[command(version)]
#[command(about = "Compose and run MySQL schema changes", long_about = None)]
#[command(after_help = "EXAMPLES:
    mysql-schema --dry-run create users --timestamps
    mysql-schema exists users --format json
    mysql-schema primary-key memberships user_id group_id")]
struct Cli {
    /// Database connection URL
    #[arg(long, env = "MYSQL_SCHEMA_DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Config file (default: <config dir>/mysql-schema/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Storage engine for created tables
    #[arg(short, long, global = true)]
    engine: Option<StorageEngine>,

    /// Don't execute, just show the generated SQL
    #[arg(short, long, global = true)]
    dry_run: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a table with an auto-increment `id` primary key
    Create {
        table: String,
        /// Add `created_at` and `updated_at` columns
        #[arg(long)]
        timestamps: bool,
        /// Do nothing when the table is already present
        #[arg(long)]
        if_not_exists: bool,
    },
    /// Check whether a table exists
    Exists { table: String },
    /// Drop a table
    Drop {
        table: String,
        #[arg(long)]
        if_exists: bool,
    },
    /// Rename a table
    Rename { from: String, to: String },
    /// Drop a column
    DropColumn { table: String, column: String },
    /// Rename a column; the full column type must be repeated
    RenameColumn {
        table: String,
        from: String,
        to: String,
        column_type: String,
    },
    /// Drop the primary key index of a table
    DropPrimaryKey { table: String },
    /// Set the primary key of a table
    PrimaryKey {
        table: String,
        #[arg(required = true)]
        columns: Vec<String>,
    },
    /// Add a unique index on a column
    AddUnique { table: String, column: String },
    /// Drop a unique index
    DropUnique { table: String, index: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "mysql_schema=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli)?;
    let columns = match &cli.command {
        Commands::Create { timestamps, .. } => standard_columns(*timestamps),
        _ => Vec::new(),
    };
    let columns: Vec<&dyn Column> = columns.iter().map(|c| &**c).collect();

    let statement = plan(&cli.command, &columns, &config.engine);

    if cli.dry_run {
        if let Commands::Create {
            table,
            if_not_exists: true,
            ..
        } = &cli.command
        {
            print_sql(&Statement::table_exists(table), cli.format);
        }
        print_sql(&statement, cli.format);
        return Ok(());
    }

    let conn = Connection::from_config(&config)
        .await
        .context("cannot connect; use --database-url or set MYSQL_SCHEMA_DATABASE_URL")?;

    match &cli.command {
        Commands::Create {
            table,
            if_not_exists,
            ..
        } => {
            if *if_not_exists {
                let created = conn.create_table_if_not_exists(table, &columns).await?;
                if !created {
                    report_exists(table, true, cli.format);
                    return Ok(());
                }
            } else {
                conn.create_table(table, &columns).await?;
            }
        }
        Commands::Exists { table } => {
            let exists = conn.table_exists(table).await?;
            report_exists(table, exists, cli.format);
            return Ok(());
        }
        Commands::Drop { table, if_exists } => {
            if *if_exists {
                conn.drop_table_if_exists(table).await?;
            } else {
                conn.drop_table(table).await?;
            }
        }
        Commands::Rename { from, to } => conn.rename_table(from, to).await?,
        Commands::DropColumn { table, column } => conn.drop_column(table, column).await?,
        Commands::RenameColumn {
            table,
            from,
            to,
            column_type,
        } => conn.rename_column(table, from, to, column_type).await?,
        Commands::DropPrimaryKey { table } => conn.drop_primary_key(table).await?,
        Commands::PrimaryKey { table, columns } => {
            let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
            conn.assign_primary_key(table, &columns).await?;
        }
        Commands::AddUnique { table, column } => conn.add_unique(table, column).await?,
        Commands::DropUnique { table, index } => conn.drop_unique(table, index).await?,
    }

    report_done(&statement, cli.format);
    Ok(())
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_path(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::load().context("failed to load default config")?,
    };

    if let Some(url) = &cli.database_url {
        config.database_url = Some(url.clone());
    }
    if let Some(engine) = &cli.engine {
        config.engine = engine.clone();
    }
    Ok(config)
}

fn standard_columns(timestamps: bool) -> Vec<Box<dyn Column>> {
    let mut columns: Vec<Box<dyn Column>> = vec![Box::new(column::auto_increment())];
    if timestamps {
        columns.push(Box::new(column::created_timestamp()));
        columns.push(Box::new(column::updated_timestamp()));
    }
    columns
}

/// The statement a command runs, used for dry runs and reporting.
fn plan(command: &Commands, columns: &[&dyn Column], engine: &StorageEngine) -> Statement {
    match command {
        Commands::Create { table, .. } => Statement::create_table(table, columns, engine),
        Commands::Exists { table } => Statement::table_exists(table),
        Commands::Drop { table, if_exists } => {
            if *if_exists {
                Statement::drop_table_if_exists(table)
            } else {
                Statement::drop_table(table)
            }
        }
        Commands::Rename { from, to } => Statement::rename_table(from, to),
        Commands::DropColumn { table, column } => Statement::drop_column(table, column),
        Commands::RenameColumn {
            table,
            from,
            to,
            column_type,
        } => Statement::rename_column(table, from, to, column_type),
        Commands::DropPrimaryKey { table } => Statement::drop_primary_key(table),
        Commands::PrimaryKey { table, columns } => {
            let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
            Statement::assign_primary_key(table, &columns)
        }
        Commands::AddUnique { table, column } => Statement::add_unique(table, column),
        Commands::DropUnique { table, index } => Statement::drop_unique(table, index),
    }
}

fn print_sql(statement: &Statement, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "operation": statement.operation(),
                "table": statement.table(),
                "sql": statement.to_sql(),
            });
            println!("{}", value);
        }
        OutputFormat::Text => {
            println!("{}", statement.to_sql().white());
        }
    }
}

fn report_done(statement: &Statement, format: OutputFormat) {
    match format {
        OutputFormat::Json => print_sql(statement, format),
        OutputFormat::Text => {
            println!(
                "{} {} {}",
                "✓".green(),
                statement.operation().cyan(),
                statement.table().white().bold()
            );
        }
    }
}

fn report_exists(table: &str, exists: bool, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "table": table, "exists": exists }));
        }
        OutputFormat::Text => {
            if exists {
                println!("{} table {} exists", "✓".green(), table.white().bold());
            } else {
                println!("{} table {} does not exist", "✗".yellow(), table.white().bold());
            }
        }
    }
}
