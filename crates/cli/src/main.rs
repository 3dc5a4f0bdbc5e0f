//! # demand-cli
//!
//! Command-line interface for preparing sales-order data and fitting
//! demand models.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use model_facade::{
    chronological_features, evaluate_regressor, future_periods, resample, Aggregation, Arima,
    Forecaster, Frequency, LinearRegression, Regressor,
};
use prep_facade::{
    ChinaHolidayCalendar, DataCleaner, FixedHolidayCalendar, HolidayCalendar, PrepConfig,
    PrepPipeline,
};
use serde::Serialize;
use table_facade::{
    columns, CsvTableSink, CsvTableSource, Schema, Table, TableError, TableSink, TableSource,
};

#[derive(Parser)]
#[command(name = "demand")]
#[command(about = "Sales-order demand forecasting toolkit", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean, derive features and encode a raw order file
    Prepare {
        /// Raw order CSV
        #[arg(short, long, env = "DEMAND_INPUT")]
        input: PathBuf,

        /// Where to write the encoded feature table (CSV)
        #[arg(short, long)]
        output: PathBuf,

        /// Fitted encoder state (JSON)
        #[arg(long)]
        encoder_output: Option<PathBuf>,

        #[command(flatten)]
        prep: PrepArgs,
    },

    /// Print summary statistics of the numeric columns
    Describe {
        /// Order CSV
        #[arg(short, long, env = "DEMAND_INPUT")]
        input: PathBuf,

        /// Clean the table before describing it
        #[arg(long)]
        clean: bool,

        /// Preparation config (JSON)
        #[arg(short, long, env = "DEMAND_CONFIG")]
        config: Option<PathBuf>,
    },

    /// Fit a linear regression on prepared features and score it on a hold-out
    Train {
        /// Raw order CSV
        #[arg(short, long, env = "DEMAND_INPUT")]
        input: PathBuf,

        /// Column to predict
        #[arg(short, long, default_value = columns::ORD_QTY)]
        target: String,

        /// Share of the most recent rows held out for scoring
        #[arg(long, default_value = "0.2")]
        test_ratio: f64,

        /// Ridge penalty
        #[arg(long, default_value = "1e-6")]
        alpha: f64,

        /// Fitted model and encoder (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        prep: PrepArgs,
    },

    /// Forecast aggregated demand with ARIMA
    Forecast {
        /// Raw order CSV
        #[arg(short, long, env = "DEMAND_INPUT")]
        input: PathBuf,

        /// Number of periods to forecast
        #[arg(short, long, default_value = "90", env = "DEMAND_FORECAST_STEPS")]
        steps: usize,

        /// ARIMA order as p,d,q
        #[arg(long, default_value = "5,1,0", value_parser = parse_order)]
        order: (usize, usize, usize),

        /// Aggregation period
        #[arg(short, long, value_enum, default_value_t = FrequencyArg::Monthly)]
        frequency: FrequencyArg,

        /// Column to aggregate
        #[arg(long, default_value = columns::ORD_QTY)]
        value: String,

        /// Forecast output (JSON, default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Preparation config (JSON)
        #[arg(short, long, env = "DEMAND_CONFIG")]
        config: Option<PathBuf>,
    },
}

/// Options shared by commands that run the preparation pipeline.
#[derive(clap::Args)]
struct PrepArgs {
    /// Preparation config (JSON)
    #[arg(short, long, env = "DEMAND_CONFIG")]
    config: Option<PathBuf>,

    /// Holiday dates, one per line (default: built-in China calendar)
    #[arg(long, env = "DEMAND_HOLIDAYS")]
    holidays: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum FrequencyArg {
    Daily,
    Monthly,
}

impl From<FrequencyArg> for Frequency {
    fn from(arg: FrequencyArg) -> Self {
        match arg {
            FrequencyArg::Daily => Frequency::Daily,
            FrequencyArg::Monthly => Frequency::Monthly,
        }
    }
}

fn parse_order(value: &str) -> std::result::Result<(usize, usize, usize), String> {
    let parts: Vec<usize> = value
        .split(',')
        .map(|p| p.trim().parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|e| format!("invalid order '{}': {}", value, e))?;
    match parts.as_slice() {
        [p, d, q] => Ok((*p, *d, *q)),
        _ => Err(format!("expected p,d,q, got '{}'", value)),
    }
}

fn load_orders(path: &Path) -> Result<Table> {
    let table = CsvTableSource::new(path)
        .with_schema(Schema::orders())
        .load()?;
    tracing::info!(
        path = %path.display(),
        rows = table.height(),
        columns = table.width(),
        "loaded orders"
    );
    Ok(table)
}

fn load_config(path: Option<&Path>) -> Result<PrepConfig> {
    match path {
        Some(path) => Ok(PrepConfig::from_json_file(path)?),
        None => Ok(PrepConfig::default()),
    }
}

fn holiday_calendar(args: &PrepArgs, region: &str) -> Result<Box<dyn HolidayCalendar>> {
    match &args.holidays {
        Some(path) => Ok(Box::new(FixedHolidayCalendar::from_file(region, path)?)),
        None if region == "CN" => Ok(Box::new(ChinaHolidayCalendar::new())),
        None => bail!(
            "no built-in holiday calendar for region '{}', pass --holidays",
            region
        ),
    }
}

fn pipeline(args: &PrepArgs) -> Result<PrepPipeline> {
    let config = load_config(args.config.as_deref())?;
    let calendar = holiday_calendar(args, &config.features.holiday_region)?;
    Ok(PrepPipeline::new(config, calendar)?)
}

/// Write JSON to a file, or pretty-print it to stdout
fn write_json<T: Serialize>(value: &T, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            serde_json::to_writer_pretty(file, value)?;
            tracing::info!(path = %path.display(), "wrote JSON output");
        }
        None => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}

/// Run prepare command
fn run_prepare(
    input: &Path,
    output: &Path,
    encoder_output: Option<&Path>,
    prep: &PrepArgs,
) -> Result<()> {
    let raw = load_orders(input)?;
    let prepared = pipeline(prep)?.run(&raw)?;

    CsvTableSink::new(output).write(&prepared.encoded)?;
    if let Some(path) = encoder_output {
        write_json(&prepared.encoder, Some(path))?;
    }

    write_json(
        &serde_json::json!({
            "rows_in": raw.height(),
            "rows_cleaned": prepared.cleaned.height(),
            "columns": prepared.encoded.column_names(),
            "encoded_features": prepared.encoder.feature_names(),
            "output": output.display().to_string(),
        }),
        None,
    )
}

/// Run describe command
fn run_describe(input: &Path, clean: bool, config: Option<&Path>) -> Result<()> {
    let mut table = load_orders(input)?;
    if clean {
        let config = load_config(config)?;
        table = DataCleaner::new(config.clean)?.clean(&table)?;
    }
    write_json(&table.describe(), None)
}

/// Run train command
fn run_train(
    input: &Path,
    target: &str,
    test_ratio: f64,
    alpha: f64,
    output: Option<&Path>,
    prep: &PrepArgs,
) -> Result<()> {
    let raw = load_orders(input)?;
    let steps = pipeline(prep)?;
    let prepared = steps.run(&raw)?;
    let (x, y) = chronological_features(&prepared.encoded, steps.date_column(), target, &[])?;

    let mut model = LinearRegression::new(alpha)?;
    let evaluation = evaluate_regressor(&mut model, &x, &y, test_ratio)?;
    if !model.is_fitted() {
        bail!("model was not fitted");
    }

    let coefficients: serde_json::Map<String, serde_json::Value> = model
        .named_coefficients()
        .map(|(name, value)| (name.to_string(), value.into()))
        .collect();

    if let Some(path) = output {
        write_json(
            &serde_json::json!({
                "target": target,
                "model": &model,
                "encoder": &prepared.encoder,
            }),
            Some(path),
        )?;
    }

    write_json(
        &serde_json::json!({
            "target": target,
            "rows": x.n_rows(),
            "features": x.n_features(),
            "evaluation": evaluation,
            "intercept": model.intercept(),
            "coefficients": coefficients,
        }),
        None,
    )
}

/// Run forecast command
fn run_forecast(
    input: &Path,
    steps: usize,
    order: (usize, usize, usize),
    frequency: Frequency,
    value: &str,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<()> {
    let config = load_config(config)?;
    let raw = load_orders(input)?;
    let cleaned = DataCleaner::new(config.clean.clone())?.clean(&raw)?;

    let series = resample(
        &cleaned,
        &config.clean.date_column,
        value,
        frequency,
        Aggregation::Sum,
    )?;
    let Some(&(last_period, _)) = series.last() else {
        bail!("no dated rows left to forecast from");
    };
    let values: Vec<f64> = series.iter().map(|(_, v)| *v).collect();

    let (p, d, q) = order;
    let mut model = Arima::new(p, d, q)?;
    model.fit(&values)?;
    let forecast = model.forecast(steps)?;

    let periods = future_periods(last_period, frequency, steps);
    let points: Vec<serde_json::Value> = periods
        .iter()
        .zip(&forecast)
        .map(|(period, value)| serde_json::json!({ "period": period.to_string(), "value": value }))
        .collect();

    write_json(
        &serde_json::json!({
            "model": format!("ARIMA({},{},{})", p, d, q),
            "frequency": frequency,
            "history": values.len(),
            "steps": forecast.len(),
            "forecast": points,
        }),
        output,
    )
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Prepare {
            input,
            output,
            encoder_output,
            prep,
        } => run_prepare(&input, &output, encoder_output.as_deref(), &prep),

        Commands::Describe {
            input,
            clean,
            config,
        } => run_describe(&input, clean, config.as_deref()),

        Commands::Train {
            input,
            target,
            test_ratio,
            alpha,
            output,
            prep,
        } => run_train(&input, &target, test_ratio, alpha, output.as_deref(), &prep),

        Commands::Forecast {
            input,
            steps,
            order,
            frequency,
            value,
            output,
            config,
        } => run_forecast(
            &input,
            steps,
            order,
            frequency.into(),
            &value,
            output.as_deref(),
            config.as_deref(),
        ),
    }
}

fn is_source_unavailable(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<TableError>()
        .is_some_and(TableError::is_source_unavailable)
}

fn main() -> Result<()> {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "demand=info,table_core=info,prep_core=info,model_core=info".into()
            }),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Err(e) if is_source_unavailable(&e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        result => result,
    }
}
