use std::{fs, fs::OpenOptions, path::PathBuf, process::ExitCode, sync::Arc};

use clap::Parser;
use tracing_subscriber::{EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use spending_charts::{
    ChartConfig, ChartKind, CurrencyFormat, Error, HexColor, Palette, SpendingSummary,
    config::{DEFAULT_CURRENCY_SYMBOL, DEFAULT_PALETTE, DEFAULT_PRIMARY_COLOR},
    render_dashboard,
};

/// Renders a spending summary as an HTML dashboard of charts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the spending summary JSON.
    #[arg(long, short)]
    input: PathBuf,

    /// File path to write the HTML dashboard to.
    #[arg(long, short, default_value = "dashboard.html")]
    output: PathBuf,

    /// The symbol shown before amounts, e.g. "$" or "₹".
    #[arg(long, default_value = DEFAULT_CURRENCY_SYMBOL)]
    currency_symbol: String,

    /// Comma separated series colours, assigned in order and reused cyclically.
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_PALETTE.map(String::from))]
    palette: Vec<String>,

    /// The colour for the trend line and calendar heatmap, as #RRGGBB.
    #[arg(long, default_value = DEFAULT_PRIMARY_COLOR)]
    primary_color: String,

    /// Animate charts when they are first drawn.
    #[arg(long)]
    animate: bool,

    /// The chart to show first: pie, line, stacked-line or calendar.
    #[arg(long)]
    initial_chart: Option<ChartKind>,

    /// Also append debug logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(args.log_file.as_ref());

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let config = ChartConfig {
        palette: Palette::new(args.palette.clone())?,
        primary_color: HexColor::parse(&args.primary_color)?,
        currency: CurrencyFormat::new(&args.currency_symbol)?,
        animate: args.animate,
    };

    let summary = SpendingSummary::from_file(&args.input)?;
    let page = render_dashboard(&summary, &config, args.initial_chart);

    fs::write(&args.output, page.into_string())
        .map_err(|error| Error::WriteOutput(format!("{}: {error}", args.output.display())))?;

    tracing::info!("Wrote dashboard to {}", args.output.display());

    Ok(())
}

fn setup_logging(log_file: Option<&PathBuf>) {
    let stdout_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter::LevelFilter::INFO.to_string()));
    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(stdout_filter);

    let debug_log = log_file.and_then(|path| {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => Some(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_writer(Arc::new(file))
                    .with_filter(filter::LevelFilter::DEBUG),
            ),
            Err(error) => {
                eprintln!("Could not open log file {}: {error}", path.display());
                None
            }
        }
    });

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}
