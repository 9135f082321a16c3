use std::io::Write;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float64Array, Int32Array, RecordBatch, StringArray, UInt32Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow_csv::WriterBuilder;
use serde::Serialize;
use serde_json::{Map, Value};
use snafu::ResultExt;
use tabled::{builder::Builder, settings::Style};
use weather_readings_core::Reading;
use weather_readings_core::ingest::readings_schema;

use crate::error::{ArrowSnafu, CliResult, JsonSnafu, WriteOutputSnafu};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Jsonl,
}

const READING_COLUMNS: [&str; 8] = [
    "region", "country", "state", "city", "month", "day", "year", "avg_temp",
];

fn reading_row(r: &Reading) -> [String; 8] {
    [
        r.region.clone(),
        r.country.clone(),
        r.state.clone(),
        r.city.clone(),
        r.month.to_string(),
        r.day.to_string(),
        r.year.to_string(),
        r.avg_temp.to_string(),
    ]
}

/// Columnar copy of `readings` under the ingest schema, so CSV output reads
/// back in with the same header.
fn readings_batch(readings: &[Reading]) -> CliResult<RecordBatch> {
    let columns: Vec<ArrayRef> = vec![
        text_column(readings, |r| r.region.as_str()),
        text_column(readings, |r| r.country.as_str()),
        text_column(readings, |r| r.state.as_str()),
        text_column(readings, |r| r.city.as_str()),
        Arc::new(UInt32Array::from_iter_values(readings.iter().map(|r| r.month))),
        Arc::new(UInt32Array::from_iter_values(readings.iter().map(|r| r.day))),
        Arc::new(Int32Array::from_iter_values(readings.iter().map(|r| r.year))),
        Arc::new(Float64Array::from_iter_values(
            readings.iter().map(|r| r.avg_temp),
        )),
    ];
    RecordBatch::try_new(Arc::new(readings_schema()), columns).context(ArrowSnafu)
}

fn text_column(readings: &[Reading], field: impl Fn(&Reading) -> &str) -> ArrayRef {
    Arc::new(StringArray::from_iter_values(readings.iter().map(field)))
}

/// Single-row batch with one text column per named value.
fn fields_batch(fields: &[(&str, Value)]) -> CliResult<RecordBatch> {
    let schema = Schema::new(
        fields
            .iter()
            .map(|(name, _)| Field::new(*name, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    );
    let columns: Vec<ArrayRef> = fields
        .iter()
        .map(|(_, value)| Arc::new(StringArray::from(vec![plain(value)])) as ArrayRef)
        .collect();
    RecordBatch::try_new(Arc::new(schema), columns).context(ArrowSnafu)
}

fn write_csv<W: Write>(out: &mut W, batch: &RecordBatch) -> CliResult<()> {
    let mut writer = WriterBuilder::new().with_header(true).build(out);
    writer.write(batch).context(ArrowSnafu)
}

fn plain(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn write_json_line<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> CliResult<()> {
    let line = serde_json::to_string(value).context(JsonSnafu)?;
    writeln!(out, "{line}").context(WriteOutputSnafu)
}

fn write_table<W: Write>(out: &mut W, builder: Builder) -> CliResult<()> {
    let mut table = builder.build();
    table.with(Style::rounded());
    writeln!(out, "{table}").context(WriteOutputSnafu)
}

pub fn write_readings<W: Write>(
    out: &mut W,
    readings: &[Reading],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            builder.push_record(READING_COLUMNS);
            for r in readings {
                builder.push_record(reading_row(r));
            }
            write_table(out, builder)
        }
        OutputFormat::Csv => write_csv(out, &readings_batch(readings)?),
        OutputFormat::Jsonl => {
            for r in readings {
                write_json_line(out, r)?;
            }
            Ok(())
        }
    }
}

/// Render a flat record of named values (counts, stats, slopes).
pub fn write_fields<W: Write>(
    out: &mut W,
    fields: &[(&str, Value)],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            let mut builder = Builder::default();
            for (name, value) in fields {
                builder.push_record([name.to_string(), plain(value)]);
            }
            write_table(out, builder)
        }
        OutputFormat::Csv => write_csv(out, &fields_batch(fields)?),
        OutputFormat::Jsonl => {
            let object: Map<String, Value> = fields
                .iter()
                .map(|(name, value)| (name.to_string(), value.clone()))
                .collect();
            write_json_line(out, &object)
        }
    }
}
