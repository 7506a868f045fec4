//! Modeldoc CLI - Document tabular analytical models
//!
//! Usage:
//!   modeldoc document <model.bim> <DaxVpaView.json> [--output <format>]
//!   modeldoc summary <model.bim>
//!   modeldoc graph <DaxVpaView.json>
//!
//! Examples:
//!   modeldoc document model.bim DaxVpaView.json
//!   modeldoc document model.bim DaxVpaView.json --output text
//!   modeldoc summary model.bim

use clap::{Parser, Subcommand, ValueEnum};
use modeldoc::definition::parse_definition;
use modeldoc::document::document_model;
use modeldoc::graph::build_relationship_graph;
use modeldoc::statistics::parse_statistics;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "modeldoc")]
#[command(about = "Modeldoc - Documentation engine for tabular analytical models")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the full documentation bundle from both documents
    Document {
        /// Path to the structural definition document (model.bim)
        definition: PathBuf,

        /// Path to the statistics document (DaxVpaView.json)
        statistics: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "json")]
        output: OutputFormat,
    },

    /// Print the model summary from a definition document
    Summary {
        /// Path to the structural definition document (model.bim)
        definition: PathBuf,
    },

    /// Print the relationship graph elements from a statistics document
    Graph {
        /// Path to the statistics document (DaxVpaView.json)
        statistics: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Pretty-printed JSON bundle
    Json,
    /// Summary and table records as aligned text
    Text,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Document {
            definition,
            statistics,
            output,
        } => cmd_document(definition, statistics, output),
        Commands::Summary { definition } => cmd_summary(definition),
        Commands::Graph { statistics } => cmd_graph(statistics),
    }
}

fn read_document(path: &Path) -> Result<Vec<u8>, ExitCode> {
    fs::read(path).map_err(|e| {
        eprintln!("Error reading file '{}': {}", path.display(), e);
        ExitCode::FAILURE
    })
}

fn cmd_document(definition: PathBuf, statistics: PathBuf, output: OutputFormat) -> ExitCode {
    let definition_bytes = match read_document(&definition) {
        Ok(bytes) => bytes,
        Err(code) => return code,
    };
    let statistics_bytes = match read_document(&statistics) {
        Ok(bytes) => bytes,
        Err(code) => return code,
    };

    let bundle = match document_model(&definition_bytes, &statistics_bytes) {
        Ok(bundle) => bundle,
        Err(e) => {
            eprintln!("Documentation error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match output {
        OutputFormat::Json => match serde_json::to_string_pretty(&bundle) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Serialization error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        OutputFormat::Text => {
            println!("Model Metadata");
            for row in bundle.summary.attribute_rows() {
                println!("  {:<32} {}", row.attribute, row.value);
            }
            println!();
            println!("Tables ({})", bundle.tables.len());
            for record in &bundle.tables {
                let columns_size = record
                    .columns_size
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                let table_size = record
                    .dax_table_size
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "N/A".to_string());
                println!(
                    "  {:<32} mode={} partitions={} rows={} size={} ({:.2}%) columns_size={} dax_size={}",
                    record.table.table_name,
                    record.table.mode,
                    record.table.partition_count,
                    record.table.row_count,
                    record.table.table_size,
                    record.table.size_percent,
                    columns_size,
                    table_size,
                );
            }
            println!();
            println!(
                "Columns: {}  Measures: {}  Relationships: {}",
                bundle.columns.len(),
                bundle.measures.len(),
                bundle.relationships.len()
            );
        }
    }

    ExitCode::SUCCESS
}

fn cmd_summary(definition: PathBuf) -> ExitCode {
    let bytes = match read_document(&definition) {
        Ok(bytes) => bytes,
        Err(code) => return code,
    };

    match parse_definition(&bytes) {
        Ok(parsed) => {
            for row in parsed.summary.attribute_rows() {
                println!("{:<32} {}", row.attribute, row.value);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Parse error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_graph(statistics: PathBuf) -> ExitCode {
    let bytes = match read_document(&statistics) {
        Ok(bytes) => bytes,
        Err(code) => return code,
    };

    let parsed = match parse_statistics(&bytes) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let elements = build_relationship_graph(&parsed.relationships);
    match serde_json::to_string_pretty(&elements) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Serialization error: {}", e);
            ExitCode::FAILURE
        }
    }
}
