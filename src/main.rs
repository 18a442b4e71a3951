//! Loftyload CLI - Convert Real Intent CSV exports to Lofty import format
//!
//! # Main Commands
//!
//! ```bash
//! loftyload convert leads.csv -o converted_file.csv
//! loftyload serve                   # Start HTTP server (port 3000)
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! loftyload check leads.csv        # Column-presence check only
//! loftyload parse leads.csv        # Just parse CSV to JSON
//! loftyload mapping                # Show the column mapping
//! ```

use clap::{Parser, Subcommand};
use loftyload::{
    convert_parsed, parse_file, parse_file_auto, ConvertError, ParsedCsv, REAL_INTENT_MAPPING,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "loftyload")]
#[command(about = "Convert Real Intent CSV exports into Lofty import format", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full conversion: Real Intent CSV → Lofty CSV
    Convert {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check that the required Real Intent columns are present
    Check {
        /// Input CSV file
        input: PathBuf,
    },

    /// Parse a CSV file and output JSON records
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// CSV delimiter (auto-detect if not specified)
        #[arg(short, long)]
        delimiter: Option<char>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the Real Intent → Lofty column mapping
    Mapping,

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Convert {
            input,
            delimiter,
            output,
        } => cmd_convert(&input, delimiter, output.as_deref()),
        Commands::Check { input } => cmd_check(&input),
        Commands::Parse {
            input,
            delimiter,
            output,
        } => cmd_parse(&input, delimiter, output.as_deref()),
        Commands::Mapping => cmd_mapping(),
        Commands::Serve { port } => cmd_serve(port).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Converting: {}", input.display());

    let parsed = read_input(input, delimiter)?;
    let result = convert_parsed(parsed, &REAL_INTENT_MAPPING)?;

    eprintln!("   Encoding:  {}", result.csv_info.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(result.csv_info.delimiter));
    eprintln!("   Rows:      {}", result.csv_info.row_count);

    match output {
        Some(p) => {
            fs::write(p, &result.csv)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            print!("{}", String::from_utf8_lossy(&result.csv));
        }
    }

    Ok(())
}

fn cmd_check(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Checking: {}", input.display());

    let parsed = parse_file_auto(input)?;
    eprintln!("   Columns: {}", parsed.headers.join(", "));

    match loftyload::check_columns(&parsed.headers, &REAL_INTENT_MAPPING) {
        Ok(()) => {
            eprintln!("All {} required columns present", REAL_INTENT_MAPPING.len());
            Ok(())
        }
        Err(missing) => Err(Box::new(ConvertError::MissingColumns(missing))),
    }
}

fn cmd_parse(
    input: &Path,
    delimiter: Option<char>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Parsing CSV: {}", input.display());

    let parsed = read_input(input, delimiter)?;

    eprintln!("   Encoding: {}", parsed.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(parsed.delimiter));
    eprintln!("   Columns: {}", parsed.headers.join(", "));
    eprintln!("Parsed {} records", parsed.records.len());

    let json = serde_json::to_string_pretty(&parsed.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_mapping() -> Result<(), Box<dyn std::error::Error>> {
    println!("Real Intent → Lofty column mapping:\n");
    for (src, dst) in REAL_INTENT_MAPPING.pairs() {
        println!("  {:12} → {}", src, dst);
    }
    println!("  {:12} → {} (constant \"{}\")", "(added)", loftyload::SOURCE_COLUMN, loftyload::SOURCE_LABEL);
    Ok(())
}

async fn cmd_serve(port: u16) -> Result<(), Box<dyn std::error::Error>> {
    loftyload::server::start_server(port).await
}

fn read_input(
    input: &Path,
    delimiter: Option<char>,
) -> Result<ParsedCsv, loftyload::CsvError> {
    match delimiter {
        Some(d) => parse_file(input, d),
        None => parse_file_auto(input),
    }
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
