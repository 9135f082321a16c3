//! CLI tool for querying daily city temperature readings.

mod error;
mod output;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use log::debug;
use serde_json::json;
use snafu::{OptionExt, ResultExt};
use weather_readings_core::{WeatherQueryEngine, regression};

use crate::{
    error::{
        CityNotFoundSnafu, CliResult, LoadReadingsSnafu, MissingDataPathSnafu, QuerySnafu,
        TrendSnafu,
    },
    output::{OutputFormat, write_fields, write_readings},
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormatArg {
    Table,
    Csv,
    Jsonl,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(v: OutputFormatArg) -> Self {
        match v {
            OutputFormatArg::Table => OutputFormat::Table,
            OutputFormatArg::Csv => OutputFormat::Csv,
            OutputFormatArg::Jsonl => OutputFormat::Jsonl,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the number of readings in the dataset
    Count,

    /// Print the reading at an index
    Reading {
        #[arg(long, allow_negative_numbers = true)]
        index: i64,
    },

    /// Print a window of readings, optionally only those on one month/day
    Readings {
        #[arg(long, allow_negative_numbers = true)]
        index: i64,

        #[arg(long, allow_negative_numbers = true)]
        count: i64,

        /// Month to keep (1-12); requires --day
        #[arg(long, requires = "day")]
        month: Option<u32>,

        /// Day of month to keep (1-31); requires --month
        #[arg(long, requires = "month")]
        day: Option<u32>,
    },

    /// Locate a city's run of readings and summarize it
    CityStats {
        #[arg(long)]
        country: String,

        /// Leave empty for countries without states
        #[arg(long, default_value = "")]
        state: String,

        #[arg(long)]
        city: String,

        /// Also print every year in the run
        #[arg(long, default_value_t = false)]
        years: bool,
    },

    /// Temperature trend (degrees per year) for a city on one calendar day
    Trend {
        #[arg(long)]
        country: String,

        #[arg(long, default_value = "")]
        state: String,

        #[arg(long)]
        city: String,

        #[arg(long)]
        month: u32,

        #[arg(long)]
        day: u32,
    },

    /// Least-squares slope over explicit samples, e.g. --x 2000,2001 --y 60,62
    Fit {
        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        x: Vec<i32>,

        #[arg(long, value_delimiter = ',', required = true, allow_negative_numbers = true)]
        y: Vec<f64>,
    },
}

#[derive(Debug, Parser)]
#[command(name = "weather", version, about)]
struct Cli {
    /// Readings CSV (Region,Country,State,City,Month,Day,Year,AvgTemperature)
    #[arg(long, env = "WEATHER_DATA")]
    data: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormatArg::Table)]
    format: OutputFormatArg,

    #[command(subcommand)]
    cmd: Command,
}

fn open_engine(data: Option<&Path>) -> CliResult<WeatherQueryEngine> {
    let path = data.context(MissingDataPathSnafu)?;
    WeatherQueryEngine::open(path).context(LoadReadingsSnafu {
        path: path.display().to_string(),
    })
}

fn cmd_city_stats<W: Write>(
    engine: &WeatherQueryEngine,
    out: &mut W,
    format: OutputFormat,
    (country, state, city): (&str, &str, &str),
    show_years: bool,
) -> CliResult<()> {
    let stats = engine
        .city_stats(country, state, city)
        .context(QuerySnafu)?
        .context(CityNotFoundSnafu {
            country,
            state,
            city,
        })?;

    let (first, last) = stats.year_span().unwrap_or_default();
    let mut fields = vec![
        ("country", json!(country)),
        ("state", json!(state)),
        ("city", json!(city)),
        ("starting_index", json!(stats.starting_index)),
        ("count", json!(stats.count)),
        ("first_year", json!(first)),
        ("last_year", json!(last)),
    ];
    if show_years {
        fields.push(("years", json!(stats.years)));
    }
    write_fields(out, &fields, format)
}

fn cmd_trend<W: Write>(
    engine: &WeatherQueryEngine,
    out: &mut W,
    format: OutputFormat,
    (country, state, city): (&str, &str, &str),
    month: u32,
    day: u32,
) -> CliResult<()> {
    let stats = engine
        .city_stats(country, state, city)
        .context(QuerySnafu)?
        .context(CityNotFoundSnafu {
            country,
            state,
            city,
        })?;

    let on_day = engine
        .readings_on_day(
            stats.starting_index as i64,
            stats.count as i64,
            month,
            day,
        )
        .context(QuerySnafu)?;
    debug!("{} readings for {city} on {month}/{day}", on_day.len());

    let slope = engine
        .regression_slope(&on_day)
        .context(TrendSnafu { city, month, day })?;
    let used = on_day.iter().filter(|r| r.has_temperature()).count();

    write_fields(
        out,
        &[
            ("city", json!(city)),
            ("month", json!(month)),
            ("day", json!(day)),
            ("readings", json!(used)),
            ("slope", json!(slope)),
        ],
        format,
    )
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let format = OutputFormat::from(cli.format);
    let data = cli.data.as_deref();
    let mut stdout = std::io::stdout().lock();

    match cli.cmd {
        Command::Count => {
            let engine = open_engine(data)?;
            write_fields(&mut stdout, &[("count", json!(engine.count()))], format)
        }

        Command::Reading { index } => {
            let engine = open_engine(data)?;
            let reading = engine.reading(index).context(QuerySnafu)?;
            write_readings(&mut stdout, &[reading], format)
        }

        Command::Readings {
            index,
            count,
            month,
            day,
        } => {
            let engine = open_engine(data)?;
            let readings = match (month, day) {
                (Some(month), Some(day)) => engine.readings_on_day(index, count, month, day),
                _ => engine.readings(index, count),
            }
            .context(QuerySnafu)?;
            write_readings(&mut stdout, &readings, format)
        }

        Command::CityStats {
            country,
            state,
            city,
            years,
        } => {
            let engine = open_engine(data)?;
            cmd_city_stats(
                &engine,
                &mut stdout,
                format,
                (&country, &state, &city),
                years,
            )
        }

        Command::Trend {
            country,
            state,
            city,
            month,
            day,
        } => {
            let engine = open_engine(data)?;
            cmd_trend(
                &engine,
                &mut stdout,
                format,
                (&country, &state, &city),
                month,
                day,
            )
        }

        Command::Fit { x, y } => {
            let slope = regression::slope(&x, &y).context(QuerySnafu)?;
            write_fields(
                &mut stdout,
                &[("points", json!(x.len())), ("slope", json!(slope))],
                format,
            )
        }
    }
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
