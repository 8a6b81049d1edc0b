//! chestgen CLI - Generate treasure chest JSON from the game data export
//!
//! # Main Commands
//!
//! ```bash
//! chestgen generate treasure_chests.csv --arenas arenas.json --texts texts.csv -o treasure_chests.json
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! chestgen parse treasure_chests.csv      # Raw rows as JSON
//! chestgen validate treasure_chests.json  # Check an output document
//! chestgen fields                         # Show the column table
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use chestgen::transform::fields_description;
use chestgen::{generate, parse_csv_file_auto, validate_document, GeneratorConfig, ValidationError};
use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "chestgen")]
#[command(about = "Generate treasure chest JSON from game data CSV", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Full pipeline: chest CSV + arenas + texts → chest JSON
    Generate {
        /// Chest export CSV (default: $CHESTGEN_CSV)
        input: Option<PathBuf>,

        /// Arena JSON (default: $CHESTGEN_ARENAS)
        #[arg(short, long)]
        arenas: Option<PathBuf>,

        /// Localization CSV (default: $CHESTGEN_TEXTS)
        #[arg(short, long)]
        texts: Option<PathBuf>,

        /// Output file (default: $CHESTGEN_OUTPUT, else stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Locale for descriptions (default: $CHESTGEN_LOCALE or EN)
        #[arg(short, long)]
        locale: Option<String>,

        /// Skip schema validation
        #[arg(long)]
        no_validate: bool,
    },

    /// Parse a CSV file and output its rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a generated chest document
    Validate {
        /// Input JSON file (array of chests)
        input: PathBuf,
    },

    /// Show the column to key mapping
    Fields,
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input,
            arenas,
            texts,
            output,
            locale,
            no_validate,
        } => cmd_generate(input, arenas, texts, output, locale, no_validate),

        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Fields => {
            println!("{}", fields_description());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_generate(
    input: Option<PathBuf>,
    arenas: Option<PathBuf>,
    texts: Option<PathBuf>,
    output: Option<PathBuf>,
    locale: Option<String>,
    no_validate: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = GeneratorConfig::from_env();
    if let Some(path) = input {
        config = config.with_csv(path);
    }
    if let Some(path) = arenas {
        config = config.with_arenas(path);
    }
    if let Some(path) = texts {
        config = config.with_texts(path);
    }
    if let Some(path) = output {
        config = config.with_output(path);
    }
    if let Some(ref locale) = locale {
        config = config.with_locale(locale);
    }
    config.validate = !no_validate;

    let result = generate(&config)?;

    if config.output_path.is_none() {
        println!("{}", serde_json::to_string_pretty(&result.records)?);
    }

    eprintln!("\n✨ Done!");
    Ok(())
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let result = parse_csv_file_auto(input)?;
    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} rows", result.rows.len());

    let rows: Vec<Value> = result.rows.iter().map(|r| r.to_json()).collect();
    let json = serde_json::to_string_pretty(&rows)?;
    write_output(&json, output)
}

fn cmd_validate(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("✔️  Validating: {}", input.display());

    let content = fs::read_to_string(input)?;
    let document: Value = serde_json::from_str(&content)?;
    let total = document.as_array().map(Vec::len).unwrap_or(0);

    match validate_document(&document) {
        Ok(()) => {
            eprintln!("✅ All {} chests valid", total);
            Ok(())
        }
        Err(ValidationError::Invalid { count, errors }) => {
            for (i, errs) in errors.iter().take(5) {
                eprintln!("\n❌ Chest {} invalid:", i);
                for err in errs.iter().take(3) {
                    eprintln!("   - {}", err);
                }
            }
            eprintln!("\n📊 Results: {} valid, {} invalid", total.saturating_sub(count), count);
            Err(ValidationError::Invalid { count, errors }.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
