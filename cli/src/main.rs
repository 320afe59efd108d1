mod summary;
mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use bikeshare_core::{parse_date, Config, CsvUsageRepository, DashboardUseCase, DateRange, UsageRepository};

#[derive(Parser)]
#[command(name = "bikeshare")]
#[command(about = "Bike sharing usage by hour and day type", long_about = None)]
struct Cli {
    /// Dataset CSV (overrides BIKESHARE_DATA and ~/.bikeshare/config.toml)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Open the interactive dashboard
    Tui {
        /// Initial first day (YYYY-MM-DD), pulled inside the dataset's span
        #[arg(long)]
        start: Option<String>,
        /// Initial last day (YYYY-MM-DD), pulled inside the dataset's span
        #[arg(long)]
        end: Option<String>,
    },
    /// Print metrics and both summaries for a date range
    Summary {
        /// First day to include (YYYY-MM-DD), defaults to the earliest date in the dataset
        #[arg(long)]
        start: Option<String>,
        /// Last day to include (YYYY-MM-DD), defaults to the latest date in the dataset
        #[arg(long)]
        end: Option<String>,
        /// Emit JSON instead of tables
        #[arg(long)]
        json: bool,
    },
    /// Show the date span covered by the dataset
    Range,
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let config = Config::load(cli.data)?;
    let repo = CsvUsageRepository::new(&config.data_path);
    let table = repo.load()?;
    let usecase = DashboardUseCase::new(&table);

    match cli.command {
        Some(Commands::Summary { start, end, json }) => {
            let range = select_range(&usecase, start.as_deref(), end.as_deref())?;
            log::debug!("Summary range {:?}", range);
            let view = usecase.compute(range);
            if json {
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                summary::show_summary(&view);
            }
        },
        Some(Commands::Range) => {
            match usecase.bounds() {
                Some(bounds) => println!("{} ({} days)", bounds, bounds.days()),
                None => println!("No dates found in {}.", repo.path().display()),
            }
        },
        Some(Commands::Tui { start, end }) => {
            let range = select_range(&usecase, start.as_deref(), end.as_deref())?;
            tui::run(&usecase, range)?;
        },
        None => {
            tui::run(&usecase, None)?;
        }
    }
    Ok(())
}

/// Fills omitted ends from the observed bounds. Explicit dates are used as given.
fn select_range(usecase: &DashboardUseCase, start: Option<&str>, end: Option<&str>) -> Result<Option<DateRange>> {
    let parse = |s: &str| parse_date(s).with_context(|| format!("Invalid date '{}'", s));
    let start = start.map(parse).transpose()?;
    let end = end.map(parse).transpose()?;

    let bounds = usecase.bounds();
    let range = match (start, end, bounds) {
        (Some(s), Some(e), _) => Some(DateRange::new(s, e)),
        (Some(s), None, Some(b)) => Some(DateRange::new(s, b.end)),
        (None, Some(e), Some(b)) => Some(DateRange::new(b.start, e)),
        (Some(s), None, None) => Some(DateRange::new(s, s)),
        (None, Some(e), None) => Some(DateRange::new(e, e)),
        (None, None, b) => b,
    };
    Ok(range)
}
