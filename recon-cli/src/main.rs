use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use recon_core::{Normalizer, RawValue};
use recon_ingest::{SourceKind, read_csv_table};
use recon_ledger::{CleanTable, LedgerEntry, clean_table};
use std::path::{Path, PathBuf};

mod config;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "recon", version, about = "Normalize cashbook and bank statements for reconciliation")]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Config file (defaults to ~/.recon/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Clean a statement and print column reports plus a preview of entries
    Clean {
        /// Path to the statement CSV
        #[arg(long)]
        csv: PathBuf,

        /// Which side the file is: cashbook or bank
        #[arg(long, default_value = "cashbook")]
        source: SourceKind,

        /// Entries to print (default: 10)
        #[arg(long, default_value_t = 10)]
        limit: usize,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Validate a security identifier column in strict mode
    CheckIds {
        #[arg(long)]
        csv: PathBuf,

        /// Column holding the identifiers
        #[arg(long)]
        column: String,

        #[arg(long, default_value = "cashbook")]
        source: SourceKind,
    },

    /// Manage ~/.recon/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Table,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose)?;

    match cli.command {
        Command::Clean {
            csv,
            source,
            limit,
            format,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            run_clean(&cfg, &csv, source, limit, format)?;
        }

        Command::CheckIds {
            csv,
            column,
            source,
        } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            run_check_ids(&cfg, &csv, &column, source)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => match config::init_config(cli.config.as_deref())? {
                (path, true) => println!("Wrote {}", path.display()),
                (path, false) => println!("Config already exists: {}", path.display()),
            },
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", config::render_config(&cfg)?);
            }
        },
    }

    Ok(())
}

fn run_clean(
    cfg: &config::Config,
    csv: &Path,
    source: SourceKind,
    limit: usize,
    format: OutputFormat,
) -> Result<()> {
    if !csv.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv.display());
    }
    let section = cfg.section(source);
    let raw = read_csv_table(csv, source, &section.csv_options()?)?;

    let normalizer = Normalizer::new(cfg.normalizer);
    let clean = clean_table(&normalizer, &raw, &section.schema)
        .with_context(|| format!("cleaning {}", csv.display()))?;
    let entries = clean.entries(&section.entry_columns())?;

    match format {
        OutputFormat::Table => print_table(&clean, &entries, csv, limit),
        OutputFormat::Json => {
            for entry in entries.iter().take(limit) {
                println!("{}", serde_json::to_string(entry)?);
            }
        }
    }
    Ok(())
}

fn print_table(clean: &CleanTable, entries: &[LedgerEntry], csv: &Path, limit: usize) {
    println!("Cleaned {} {} rows from {}\n", clean.rows, clean.source, csv.display());

    for field in &clean.fields {
        let r = &field.report;
        println!(
            "[{}] {} | present={} absent={} malformed={} | coverage={:.1}%",
            field.kind.label(),
            field.column,
            r.present,
            r.absent,
            r.malformed,
            r.coverage() * 100.0
        );
        if !r.malformed_rows.is_empty() {
            let rows: Vec<String> = r.malformed_rows.iter().map(|i| i.to_string()).collect();
            println!("    malformed rows: {}", rows.join(", "));
        }
    }

    let matchable = entries.iter().filter(|e| e.is_matchable()).count();
    println!("\nEntries: {} (matchable: {})\n", entries.len(), matchable);

    for e in entries.iter().take(limit) {
        println!(
            "{:>5} | {} | {:>12} | {:>8} | {}",
            e.row,
            e.date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".to_string()),
            e.amount
                .map(|a| format!("{a:.2}"))
                .unwrap_or_else(|| "-".to_string()),
            e.trans_num
                .map(|n| n.to_string())
                .unwrap_or_else(|| "-".to_string()),
            e.description.as_deref().unwrap_or("-")
        );
    }
}

fn run_check_ids(cfg: &config::Config, csv: &Path, column: &str, source: SourceKind) -> Result<()> {
    if !csv.exists() {
        bail!("CSV not found: {} (pass --csv <path>)", csv.display());
    }
    let section = cfg.section(source);
    let raw = read_csv_table(csv, source, &section.csv_options()?)?;
    let Some(values) = raw.column(column) else {
        bail!(
            "column '{}' not found in {} (columns: {})",
            column,
            csv.display(),
            raw.headers.join(", ")
        );
    };

    let normalizer = Normalizer::new(cfg.normalizer);
    match normalizer.clean_identifier_column_strict(values) {
        Ok(ids) => {
            let present = ids.iter().filter(|id| id.is_some()).count();
            println!(
                "{}: {} identifiers valid ({} rows, {} blank)",
                column,
                present,
                ids.len(),
                ids.len() - present
            );
            Ok(())
        }
        Err(err) => {
            for failure in &err.failures {
                let recon_core::NormalizeError::InvalidIdentifier { raw } = &failure.error;
                println!("row {}: invalid identifier {}", failure.row, quoted(raw));
            }
            bail!("{column}: {err}");
        }
    }
}

fn quoted(raw: &RawValue) -> String {
    format!("{:?}", raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clean_args() {
        let cli = Cli::parse_from([
            "recon", "-vv", "clean", "--csv", "bank.csv", "--source", "bank", "--format", "json",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Clean {
                source, format, limit, ..
            } => {
                assert_eq!(source, SourceKind::Bank);
                assert_eq!(format, OutputFormat::Json);
                assert_eq!(limit, 10);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_config_reaches_init() {
        let cli = Cli::parse_from(["recon", "config", "init", "--config", "alt.toml"]);
        assert_eq!(cli.config.as_deref(), Some(Path::new("alt.toml")));
        assert!(matches!(
            cli.command,
            Command::Config {
                command: ConfigCommand::Init
            }
        ));
    }

    #[test]
    fn test_quoted_raw() {
        assert_eq!(quoted(&RawValue::from("bad-code")), "\"bad-code\"");
    }
}
