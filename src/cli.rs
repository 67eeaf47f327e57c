use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colscope::config::{self, Settings};
use colscope::explorer::Session;
use colscope::explorer::logic::{
    ColumnKind, ColumnReport, DatasetOverview, FrequencyTable, HistogramBins, SummaryRow,
};
use colscope::utils::fmt_percentage;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "colscope", version, about = "Explore the columns of a CSV file")]
pub struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the shape, column kinds and first rows of a file
    Overview {
        /// CSV file to load
        file: PathBuf,

        /// Number of rows to show. Defaults to the configured `head_rows`.
        #[arg(short, long)]
        rows: Option<usize>,
    },
    /// List the columns of a file, optionally only those of one kind
    Columns {
        /// CSV file to load
        file: PathBuf,

        /// Only list columns offered for this kind of exploration
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,
    },
    /// Explore a numeric column
    Numeric {
        /// CSV file to load
        file: PathBuf,

        /// Column to explore
        column: String,

        /// Rows in the most-frequent-values table
        #[arg(long, env = "COLSCOPE_TOP_N")]
        top: Option<usize>,

        /// Maximum number of histogram bins
        #[arg(long)]
        bins: Option<usize>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Explore a date column
    Date {
        /// CSV file to load
        file: PathBuf,

        /// Column to explore
        column: String,

        /// Rows in the most-frequent-values table
        #[arg(long, env = "COLSCOPE_TOP_N")]
        top: Option<usize>,

        /// Read ambiguous dates such as 01/02/2023 month first
        #[arg(long)]
        month_first: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Inspect or reset the stored settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective settings and where they are stored
    Show,
    /// Overwrite the stored settings with the defaults
    Reset,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum KindArg {
    Numeric,
    Datetime,
    Text,
}

pub fn run_command(command: Commands) -> Result<()> {
    let settings = config::load_settings();
    match command {
        Commands::Overview { file, rows } => handle_overview(settings, &file, rows),
        Commands::Columns { file, kind } => handle_columns(settings, &file, kind),
        Commands::Numeric {
            file,
            column,
            top,
            bins,
            json,
        } => {
            let settings = Settings {
                top_n: top.unwrap_or(settings.top_n),
                max_bins: bins.unwrap_or(settings.max_bins),
                ..settings
            };
            let session = open(settings, &file)?;
            let report = session.explore_numeric(&column)?;
            print_report(&report, json)
        }
        Commands::Date {
            file,
            column,
            top,
            month_first,
            json,
        } => {
            let settings = Settings {
                top_n: top.unwrap_or(settings.top_n),
                day_first: settings.day_first && !month_first,
                ..settings
            };
            let session = open(settings, &file)?;
            let report = session.explore_date(&column)?;
            print_report(&report, json)
        }
        Commands::Config { action } => handle_config(&action, &settings),
    }
}

fn open(settings: Settings, file: &Path) -> Result<Session> {
    settings.validate()?;
    let mut session = Session::new(settings);
    session
        .upload_path(file)
        .with_context(|| format!("Failed to load {}", file.display()))?;
    Ok(session)
}

fn handle_overview(settings: Settings, file: &Path, rows: Option<usize>) -> Result<()> {
    let settings = Settings {
        head_rows: rows.unwrap_or(settings.head_rows),
        ..settings
    };
    let session = open(settings, file)?;
    print_overview(&session.overview()?);
    Ok(())
}

fn handle_columns(settings: Settings, file: &Path, kind: Option<KindArg>) -> Result<()> {
    let session = open(settings, file)?;
    let names = match kind {
        None => session
            .table()?
            .schema()
            .into_iter()
            .map(|(name, kind)| format!("{name}\t{kind}"))
            .collect(),
        Some(KindArg::Numeric) => session.numeric_columns()?,
        Some(KindArg::Datetime) => session.date_columns()?,
        Some(KindArg::Text) => {
            colscope::explorer::logic::column_names(session.table()?, ColumnKind::Text)
        }
    };
    for name in names {
        println!("{name}");
    }
    Ok(())
}

fn handle_config(action: &ConfigAction, settings: &Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("# {}", config::get_config_path().display());
            println!("{}", serde_json::to_string_pretty(settings)?);
        }
        ConfigAction::Reset => {
            let path = config::save_settings(&Settings::default())?;
            println!("Settings reset: {}", path.display());
        }
    }
    Ok(())
}

fn print_overview(overview: &DatasetOverview) {
    println!(
        "{} rows x {} columns",
        overview.row_count, overview.column_count
    );
    println!();
    for (name, kind) in &overview.columns {
        println!("  {name:<24} {kind}");
    }
    if overview.head.is_empty() {
        return;
    }
    println!();
    let header: Vec<&str> = overview.columns.iter().map(|(n, _)| n.as_str()).collect();
    println!("{}", header.join("\t"));
    for row in &overview.head {
        println!("{}", row.join("\t"));
    }
}

fn print_report(report: &ColumnReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }
    println!("{} ({})", report.column, report.kind);
    println!();
    print_summary(&report.summary_rows());
    println!();
    print_frequency(&report.frequency);
    println!();
    print_histogram(&report.histogram);
    Ok(())
}

fn print_summary(rows: &[SummaryRow]) {
    let width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for row in rows {
        println!("  {:<width$}  {}", row.label, row.value);
    }
}

fn print_frequency(table: &FrequencyTable) {
    println!("Most frequent values");
    if table.is_empty() {
        println!("  (no values)");
        return;
    }
    let width = table.iter().map(|r| r.value.len()).max().unwrap_or(0).max(5);
    println!("  {:<width$}  {:>10}  {:>8}", "value", "occurrence", "share");
    for row in table {
        println!(
            "  {:<width$}  {:>10}  {:>8}",
            row.value,
            row.occurrence,
            fmt_percentage(row.percentage)
        );
    }
}

const BAR_WIDTH: usize = 40;

fn print_histogram(bins: &HistogramBins) {
    println!("Distribution");
    let Some(peak) = bins.iter().map(|b| b.count).max().filter(|&m| m > 0) else {
        println!("  (no values)");
        return;
    };
    let width = bins.iter().map(|b| b.label.len()).max().unwrap_or(0);
    for bin in bins {
        let bar = "#".repeat(bin.count * BAR_WIDTH / peak);
        println!("  {:<width$}  {:>6}  {bar}", bin.label, bin.count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory as _;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_numeric_args() {
        let cli = Cli::try_parse_from([
            "colscope", "numeric", "data.csv", "price", "--top", "5", "--json",
        ])
        .unwrap_or_else(|e| panic!("{e}"));
        match cli.command {
            Commands::Numeric {
                column, top, json, ..
            } => {
                assert_eq!(column, "price");
                assert_eq!(top, Some(5));
                assert!(json);
            }
            _ => panic!("Expected the numeric subcommand"),
        }
    }

    #[test]
    fn test_kind_filter_values() {
        assert!(Cli::try_parse_from(["colscope", "columns", "a.csv", "--kind", "datetime"]).is_ok());
        assert!(Cli::try_parse_from(["colscope", "columns", "a.csv", "--kind", "blob"]).is_err());
    }
}
