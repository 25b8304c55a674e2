//! SQLite Explorer CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sqlite_explorer::{export, CellValue, Database, RowSet};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sqlite-explorer")]
#[command(author, version, about = "Cross-platform read-only SQLite database viewer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show database file information
    Info {
        /// Path to database file
        db: PathBuf,
    },

    /// List all user tables
    Tables {
        /// Path to database file
        db: PathBuf,
        /// Show row counts per table
        #[arg(short, long)]
        counts: bool,
    },

    /// View a table's rows
    Rows {
        /// Path to database file
        db: PathBuf,
        /// Table name
        table: String,
        /// Maximum rows to load
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output format (text, json, csv)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// View rows matching an exact column value
    Filter {
        /// Path to database file
        db: PathBuf,
        /// Table name
        table: String,
        /// Value to match
        value: String,
        /// Column to filter on (defaults to the table's primary key)
        #[arg(short, long)]
        column: Option<String>,
        /// Output format (text, json, csv)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Search a table for a substring in any column
    Search {
        /// Path to database file
        db: PathBuf,
        /// Table name
        table: String,
        /// Text to look for (ASCII case-insensitive)
        query: String,
        /// Maximum rows to return
        #[arg(short, long)]
        limit: Option<usize>,
        /// Output format (text, json, csv)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Export a table
    Export {
        /// Path to database file
        db: PathBuf,
        /// Table name
        table: String,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format (csv, json)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Info { db } => cmd_info(&db),
        Commands::Tables { db, counts } => cmd_tables(&db, counts),
        Commands::Rows { db, table, limit, format } => cmd_rows(&db, &table, limit, &format),
        Commands::Filter { db, table, value, column, format } => {
            cmd_filter(&db, &table, &value, column.as_deref(), &format)
        }
        Commands::Search { db, table, query, limit, format } => {
            cmd_search(&db, &table, &query, limit, &format)
        }
        Commands::Export { db, table, output, format } => {
            cmd_export(&db, &table, output, &format)
        }
    }
}

fn cmd_info(path: &PathBuf) -> Result<()> {
    let db = Database::open(path).context("Failed to open database")?;
    let stats = db.stats()?;

    println!("Database: {}", path.display());
    println!();
    println!("  File Size:   {} bytes", stats.file_size);
    println!("  Tables:      {}", stats.table_count);
    println!("  Total Rows:  {}", stats.total_rows);
    if !stats.largest_table.is_empty() {
        println!(
            "  Largest:     {} ({} rows)",
            stats.largest_table, stats.largest_table_rows
        );
    }
    Ok(())
}

fn cmd_tables(path: &PathBuf, counts: bool) -> Result<()> {
    let db = Database::open(path).context("Failed to open database")?;

    for name in db.table_names()? {
        if counts {
            let rs = db.load_rows(&name, None)?;
            println!("{} ({} rows, {} columns)", name, rs.row_count(), rs.column_count());
        } else {
            println!("{name}");
        }
    }
    Ok(())
}

fn cmd_rows(path: &PathBuf, table: &str, limit: Option<usize>, format: &str) -> Result<()> {
    let db = Database::open(path).context("Failed to open database")?;
    let rs = db.load_rows(table, limit)?;
    print_row_set(&rs, format)
}

fn cmd_filter(
    path: &PathBuf,
    table: &str,
    value: &str,
    column: Option<&str>,
    format: &str,
) -> Result<()> {
    let db = Database::open(path).context("Failed to open database")?;
    let value = CellValue::from_literal(value);
    let rs = db.load_rows_filtered(table, &value, column)?;
    print_row_set(&rs, format)
}

fn cmd_search(
    path: &PathBuf,
    table: &str,
    query: &str,
    limit: Option<usize>,
    format: &str,
) -> Result<()> {
    let db = Database::open(path).context("Failed to open database")?;
    let rs = db.search_rows(table, query, limit)?;
    print_row_set(&rs, format)
}

fn cmd_export(path: &PathBuf, table: &str, output: Option<PathBuf>, format: &str) -> Result<()> {
    let db = Database::open(path).context("Failed to open database")?;
    let rs = db.load_rows(table, None)?;

    let mut sink: Box<dyn Write> = match &output {
        Some(file) => Box::new(std::fs::File::create(file).context("Failed to create output file")?),
        None => Box::new(io::stdout()),
    };

    match format {
        "json" => {
            let json = export::row_set_to_json(&rs);
            writeln!(sink, "{}", serde_json::to_string_pretty(&json)?)?;
        }
        _ => export::row_set_to_csv(&rs, &mut sink)?,
    }

    if let Some(file) = output {
        eprintln!("Exported {} rows to {}", rs.row_count(), file.display());
    }
    Ok(())
}

fn print_row_set(rs: &RowSet, format: &str) -> Result<()> {
    match format {
        "json" => {
            let json = export::row_set_to_json(rs);
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        "csv" => {
            let mut stdout = io::stdout();
            export::row_set_to_csv(rs, &mut stdout)?;
        }
        _ => {
            println!("{}", rs.columns.join("\t"));
            println!("{}", "-".repeat(rs.columns.len() * 15));

            for row in &rs.rows {
                let values: Vec<String> = row
                    .values
                    .iter()
                    .map(|v| {
                        let s = v.display();
                        if s.chars().count() > 40 {
                            let cut: String = s.chars().take(37).collect();
                            format!("{cut}...")
                        } else {
                            s
                        }
                    })
                    .collect();
                println!("{}", values.join("\t"));
            }

            eprintln!("({} rows)", rs.row_count());
        }
    }
    Ok(())
}
