use arrow::error::ArrowError;
use snafu::Snafu;
use weather_readings_core::{IngestError, QueryError};

pub type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum CliError {
    #[snafu(display(
        "Failed to load readings from {path}: {source}. \
         Expected a CSV with header Region,Country,State,City,Month,Day,Year,AvgTemperature."
    ))]
    LoadReadings {
        path: String,
        #[snafu(source(from(IngestError, Box::new)))]
        source: Box<IngestError>,
    },

    #[snafu(display("{source}"))]
    Query { source: QueryError },

    #[snafu(display("No readings for country={country:?} state={state:?} city={city:?}"))]
    CityNotFound {
        country: String,
        state: String,
        city: String,
    },

    #[snafu(display("No readings file given. Pass --data <CSV> or set WEATHER_DATA."))]
    MissingDataPath,

    #[snafu(display(
        "Not enough readings with a temperature for {city} on {month}/{day}: {source}"
    ))]
    Trend {
        city: String,
        month: u32,
        day: u32,
        source: QueryError,
    },

    #[snafu(display("Arrow error: {source}"))]
    Arrow { source: ArrowError },

    #[snafu(display("Failed to encode output as JSON: {source}"))]
    Json { source: serde_json::Error },

    #[snafu(display("Failed to write output: {source}"))]
    WriteOutput { source: std::io::Error },
}
