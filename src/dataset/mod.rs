pub mod csv;
pub mod generate;

pub use csv::{CSV_HEADER, CsvDataset, MAX_RECORDS, parse_line, sanitize, write_csv};
pub use generate::generate_records;
