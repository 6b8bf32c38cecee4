use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Instant;

use watchlist::config::{self, Config};
use watchlist::entity::Collection;
use watchlist::query::{
    query, sectors, QueryParams, QuerySession, SectorFilter, SortDirection, SortField,
};
use watchlist::scoring::score_card;
use watchlist::signals::{attributions_for, SyntheticSignals};
use watchlist::{export, fetch, logging, output, source, tui};

const EXIT_SUCCESS: i32 = 0;
const EXIT_DATA: i32 = 2;
const EXIT_CONFIG: i32 = 4;
const EXIT_LOOKUP: i32 = 5;

/// Filter and sort options shared by `list` and `export`.
/// Unset options fall back to the `view` section of the config.
#[derive(Args, Debug)]
struct ViewArgs {
    /// Case-insensitive substring of company name or ticker
    #[arg(long)]
    search: Option<String>,

    /// Exact sector name, or "All"
    #[arg(long)]
    sector: Option<String>,

    /// composite, baseline, gbm, logistic or change
    #[arg(long)]
    sort: Option<SortField>,

    /// asc or desc
    #[arg(long)]
    direction: Option<SortDirection>,
}

impl ViewArgs {
    fn params(&self, config: &Config) -> QueryParams {
        let mut sort = config.view.sort_spec();
        if let Some(field) = self.sort {
            sort.field = field;
        }
        if let Some(direction) = self.direction {
            sort.direction = direction;
        }
        QueryParams {
            search: self.search.clone().unwrap_or_default(),
            sector: self
                .sector
                .as_deref()
                .map(SectorFilter::parse)
                .unwrap_or_else(|| config.view.sector_filter()),
            sort,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Browse the ranking interactively (default if no subcommand)
    Tui,
    /// Print the ranked view
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// Tab-separated output without headers or colors
        #[arg(long)]
        tsv: bool,
    },
    /// Show scores, recommendation and top signals for one company
    Show {
        /// Ticker symbol (case-insensitive)
        ticker: String,
    },
    /// List the sector universe
    Sectors,
    /// Write the ranked view as a JSON snapshot
    Export {
        /// Output file
        #[arg(long)]
        out: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },
}

#[derive(Parser, Debug)]
#[command(name = "watchlist")]
#[command(about = "Rank companies by a composite of three model scores", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/watchlist/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Read companies from a JSON or CSV file instead of the configured source
    #[arg(long, global = true)]
    source: Option<PathBuf>,

    /// Seed for synthetic data and signals
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Tui);
    let start_time = Instant::now();

    let config = match config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    // One seed drives both the synthetic companies and their signals
    let seed = cli
        .seed
        .or(config.source.seed)
        .unwrap_or_else(rand::random::<u64>);
    let signals = SyntheticSignals::new(seed);

    let data_source = match source::from_config(&config.source, cli.source, Some(seed)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };
    tracing::debug!(source = %data_source.describe(), seed, "selected data source");

    let collection = match fetch::fetch_collection(data_source.as_ref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load companies: {:#}", e);
            std::process::exit(EXIT_DATA);
        }
    };

    let use_colors = output::should_use_colors();

    match command {
        Commands::Tui => {
            let colors = tui::ThemeColors::for_theme(tui::resolve_theme(config.theme));
            let session = QuerySession::new(config.view.sort_spec(), config.view.sector_filter());
            let app = tui::App::new(
                collection,
                session,
                data_source,
                Box::new(signals),
                colors,
            );
            if let Err(e) = tui::run_tui(app, config.auto_refresh_interval()).await {
                eprintln!("TUI error: {:#}", e);
                std::process::exit(EXIT_DATA);
            }
        }
        Commands::List { view, tsv } => {
            let params = view.params(&config);
            let rows = query(collection.companies(), &params);
            if tsv {
                if !rows.is_empty() {
                    println!("{}", output::format_tsv(&rows));
                }
            } else {
                println!("{}", output::format_view_table(&rows, &params.sort, use_colors));
                println!();
                println!("{}", output::format_summary(rows.len(), collection.len()));
                println!("{}", output::format_legend(use_colors));
            }
        }
        Commands::Show { ticker } => {
            let Some(company) = collection.find_ticker(&ticker) else {
                eprintln!("No company with ticker '{}'", ticker);
                std::process::exit(EXIT_LOOKUP);
            };
            let attributions = match attributions_for(&signals, company) {
                Ok(a) => a,
                Err(e) => {
                    eprintln!("Signal error: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };
            let card = score_card(company);
            println!(
                "{}",
                output::format_detail(company, &card, &attributions, use_colors)
            );
        }
        Commands::Sectors => {
            for sector in sectors(collection.companies()) {
                println!("{}", sector);
            }
        }
        Commands::Export { out, view } => {
            let params = view.params(&config);
            export_view(&collection, &params, &out);
        }
    }

    tracing::debug!(elapsed = ?start_time.elapsed(), "done");
    std::process::exit(EXIT_SUCCESS);
}

fn export_view(collection: &Collection, params: &QueryParams, out: &Path) {
    let rows = query(collection.companies(), params);
    let snapshot = export::snapshot(&rows, params, collection.len());
    if let Err(e) = export::write_snapshot(out, &snapshot) {
        eprintln!("Export failed: {:#}", e);
        std::process::exit(EXIT_DATA);
    }
    println!(
        "Wrote {} of {} companies to {}",
        rows.len(),
        collection.len(),
        out.display()
    );
}
