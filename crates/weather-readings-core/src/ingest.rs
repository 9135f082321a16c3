//! Load readings from the city temperature CSV.
//!
//! The source has a header row followed by rows of exactly eight fields:
//! `Region,Country,State,City,Month,Day,Year,AvgTemperature`. Rows are
//! decoded into Arrow batches against a fixed schema, then converted into
//! [`Reading`]s in source order. Empty text fields become empty strings
//! (countries without states leave `State` blank); an empty numeric field is
//! an error.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, AsArray, RecordBatch};
use arrow::datatypes::{
    ArrowPrimitiveType, DataType, Field, Float64Type, Int32Type, Schema, UInt32Type,
};
use arrow_csv::ReaderBuilder;
use arrow_csv::reader::Format;
use log::debug;
use snafu::prelude::*;

use crate::error::{
    CsvSnafu, IngestResult, MissingValueSnafu, OpenSnafu, UnexpectedColumnTypeSnafu,
};
use crate::reading::Reading;

const REGION: &str = "Region";
const COUNTRY: &str = "Country";
const STATE: &str = "State";
const CITY: &str = "City";
const MONTH: &str = "Month";
const DAY: &str = "Day";
const YEAR: &str = "Year";
const AVG_TEMPERATURE: &str = "AvgTemperature";

const BATCH_SIZE: usize = 64 * 1024;

/// Arrow schema of the readings CSV, in column order.
pub fn readings_schema() -> Schema {
    Schema::new(vec![
        Field::new(REGION, DataType::Utf8, true),
        Field::new(COUNTRY, DataType::Utf8, true),
        Field::new(STATE, DataType::Utf8, true),
        Field::new(CITY, DataType::Utf8, true),
        Field::new(MONTH, DataType::UInt32, true),
        Field::new(DAY, DataType::UInt32, true),
        Field::new(YEAR, DataType::Int32, true),
        Field::new(AVG_TEMPERATURE, DataType::Float64, true),
    ])
}

/// Read every reading from the CSV file at `path`.
pub fn read_csv_path(path: &Path) -> IngestResult<Vec<Reading>> {
    let file = File::open(path).context(OpenSnafu {
        path: path.display().to_string(),
    })?;
    read_csv(file)
}

/// Read every reading from CSV text with a header row.
pub fn read_csv<R: Read>(input: R) -> IngestResult<Vec<Reading>> {
    let format = Format::default().with_header(true);
    let reader = ReaderBuilder::new(Arc::new(readings_schema()))
        .with_format(format)
        .with_batch_size(BATCH_SIZE)
        .build(input)
        .context(CsvSnafu)?;

    let mut readings = Vec::new();
    for batch in reader {
        let batch = batch.context(CsvSnafu)?;
        append_batch(&batch, &mut readings)?;
        debug!("decoded {} readings so far", readings.len());
    }
    Ok(readings)
}

fn append_batch(batch: &RecordBatch, out: &mut Vec<Reading>) -> IngestResult<()> {
    let region = string_column(batch, 0, REGION)?;
    let country = string_column(batch, 1, COUNTRY)?;
    let state = string_column(batch, 2, STATE)?;
    let city = string_column(batch, 3, CITY)?;
    let month = primitive_column::<UInt32Type>(batch, 4, MONTH)?;
    let day = primitive_column::<UInt32Type>(batch, 5, DAY)?;
    let year = primitive_column::<Int32Type>(batch, 6, YEAR)?;
    let avg_temp = primitive_column::<Float64Type>(batch, 7, AVG_TEMPERATURE)?;

    let first_row = out.len();
    out.reserve(batch.num_rows());
    for i in 0..batch.num_rows() {
        let row = first_row + i;
        out.push(Reading {
            region: text(region, i),
            country: text(country, i),
            state: text(state, i),
            city: text(city, i),
            month: number(month, i, row, MONTH)?,
            day: number(day, i, row, DAY)?,
            year: number(year, i, row, YEAR)?,
            avg_temp: number(avg_temp, i, row, AVG_TEMPERATURE)?,
        });
    }
    Ok(())
}

fn string_column<'a>(
    batch: &'a RecordBatch,
    index: usize,
    column: &'static str,
) -> IngestResult<&'a arrow::array::StringArray> {
    batch
        .column(index)
        .as_string_opt::<i32>()
        .context(UnexpectedColumnTypeSnafu { column })
}

fn primitive_column<'a, T: ArrowPrimitiveType>(
    batch: &'a RecordBatch,
    index: usize,
    column: &'static str,
) -> IngestResult<&'a arrow::array::PrimitiveArray<T>> {
    batch
        .column(index)
        .as_primitive_opt::<T>()
        .context(UnexpectedColumnTypeSnafu { column })
}

fn text(array: &arrow::array::StringArray, i: usize) -> String {
    if array.is_null(i) {
        String::new()
    } else {
        array.value(i).to_string()
    }
}

fn number<T: ArrowPrimitiveType>(
    array: &arrow::array::PrimitiveArray<T>,
    i: usize,
    row: usize,
    column: &'static str,
) -> IngestResult<T::Native> {
    ensure!(!array.is_null(i), MissingValueSnafu { row, column });
    Ok(array.value(i))
}
