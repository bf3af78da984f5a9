use std::time::Duration;

use anyhow::Result;
use tabled::{Table, Tabled, settings::Style};

/// Rows that can be printed both as a table and as CSV.
pub trait Formattable: Tabled {
    fn to_csv_row(&self) -> Vec<String>;

    fn csv_headers() -> Vec<&'static str>;
}

/// Pretty table formatter using the tabled library
pub struct PrettyFormatter;

impl PrettyFormatter {
    pub fn format<T: Formattable>(items: &[T]) -> String {
        if items.is_empty() {
            return String::new();
        }

        let mut table = Table::new(items);
        table.with(Style::rounded());

        table.to_string()
    }
}

pub struct CsvFormatter;

impl CsvFormatter {
    pub fn format<T: Formattable>(items: &[T]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        writer.write_record(T::csv_headers())?;
        for item in items {
            writer.write_record(item.to_csv_row())?;
        }

        let bytes = writer.into_inner().map_err(|error| error.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }
}

pub(crate) fn format_duration(duration: &Duration) -> String {
    format!("{:?}", duration)
}

/// Nanoseconds, for CSV
pub(crate) fn format_duration_csv(duration: &Duration) -> String {
    duration.as_nanos().to_string()
}

pub(crate) fn format_ratio(value: &f64) -> String {
    format!("{value:.2}")
}
