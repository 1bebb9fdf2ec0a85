//! Rendering of record lists as a table, JSON, or CSV.

use crate::error::CliError;
use clap::ValueEnum;
use maitre::operations::TableUtilization;
use maitre::{Reservation, Table, TableCategory, WaitlistEntry};
use serde::Serialize;
use std::io::Write;

/// Output format for list commands.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Tab-separated table format (human-readable)
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// A record that can be printed as one row.
pub trait Row: Serialize {
    /// Column names, lowercase.
    const HEADERS: &'static [&'static str];

    /// Field values in `HEADERS` order. Missing values are empty strings.
    fn fields(&self) -> Vec<String>;
}

/// Write `rows` to stdout in `format`.
pub fn print_rows<T: Row>(rows: &[T], format: OutputFormat) -> Result<(), CliError> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    write_rows(&mut handle, rows, format)
}

fn write_rows<T: Row, W: Write>(
    out: &mut W,
    rows: &[T],
    format: OutputFormat,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Table => {
            let header = T::HEADERS
                .iter()
                .map(|h| h.to_uppercase())
                .collect::<Vec<_>>()
                .join("\t");
            writeln!(out, "{header}")?;
            for row in rows {
                let line = row
                    .fields()
                    .into_iter()
                    .map(|f| if f.is_empty() { "-".to_string() } else { f })
                    .collect::<Vec<_>>()
                    .join("\t");
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, rows)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(out);
            writer.write_record(T::HEADERS)?;
            for row in rows {
                writer.write_record(row.fields())?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn hhmm(time: chrono::NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

impl Row for Reservation {
    const HEADERS: &'static [&'static str] = &[
        "id", "customer", "table", "date", "time", "party", "duration", "status", "notes",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_id.to_string(),
            self.table_id.to_string(),
            self.date.to_string(),
            hhmm(self.time),
            self.party_size.to_string(),
            self.duration_minutes.to_string(),
            self.status.to_string(),
            self.notes.clone().unwrap_or_default(),
        ]
    }
}

impl Row for Table {
    const HEADERS: &'static [&'static str] = &[
        "id", "number", "capacity", "status", "category", "location", "window", "private",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.number.clone(),
            self.capacity.to_string(),
            self.status.to_string(),
            self.category_id.to_string(),
            self.location.clone().unwrap_or_default(),
            self.has_window.to_string(),
            self.is_private.to_string(),
        ]
    }
}

impl Row for TableCategory {
    const HEADERS: &'static [&'static str] = &["id", "name", "min", "max", "description"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.name.clone(),
            self.min_capacity.to_string(),
            self.max_capacity.to_string(),
            self.description.clone().unwrap_or_default(),
        ]
    }
}

impl Row for WaitlistEntry {
    const HEADERS: &'static [&'static str] = &[
        "id", "customer", "date", "time", "party", "position", "wait", "status",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.customer_id.to_string(),
            self.date.to_string(),
            hhmm(self.time),
            self.party_size.to_string(),
            self.position.to_string(),
            self.wait_minutes.to_string(),
            self.status.to_string(),
        ]
    }
}

impl Row for TableUtilization {
    const HEADERS: &'static [&'static str] = &["table", "number", "capacity", "reservations"];

    fn fields(&self) -> Vec<String> {
        vec![
            self.table_id.to_string(),
            self.table_number.clone(),
            self.capacity.to_string(),
            self.reservations.to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maitre::{Capacity, TableId};

    fn usage() -> Vec<TableUtilization> {
        vec![TableUtilization {
            table_id: TableId::new(3),
            table_number: "T3".into(),
            capacity: Capacity::try_from(4).unwrap(),
            reservations: 2,
        }]
    }

    fn render(format: OutputFormat) -> String {
        let mut buf = Vec::new();
        write_rows(&mut buf, &usage(), format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_format() {
        assert_eq!(
            render(OutputFormat::Table),
            "TABLE\tNUMBER\tCAPACITY\tRESERVATIONS\n3\tT3\t4\t2\n"
        );
    }

    #[test]
    fn test_csv_format() {
        assert_eq!(
            render(OutputFormat::Csv),
            "table,number,capacity,reservations\n3,T3,4,2\n"
        );
    }

    #[test]
    fn test_json_format() {
        let value: serde_json::Value = serde_json::from_str(&render(OutputFormat::Json)).unwrap();
        assert_eq!(value[0]["table_number"], "T3");
        assert_eq!(value[0]["reservations"], 2);
    }

    #[test]
    fn test_empty_list_prints_header_only() {
        let mut buf = Vec::new();
        write_rows::<TableUtilization, _>(&mut buf, &[], OutputFormat::Table).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap().lines().count(), 1);
    }
}
