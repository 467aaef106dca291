use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::DatasetError;
use crate::record::Record;
use crate::RecordSource;

/// Loading stops after this many valid rows.
pub const MAX_RECORDS: usize = 100_000;

pub const CSV_HEADER: &str = "ID,FirstName,LastName";

/// Keeps printable ASCII, turns tab/newline/carriage return into spaces,
/// drops everything else, then trims surrounding spaces and tabs.
pub fn sanitize(field: &str) -> String {
    let cleaned: String = field
        .chars()
        .filter_map(|c| match c {
            ' '..='~' => Some(c),
            '\t' | '\n' | '\r' => Some(' '),
            _ => None,
        })
        .collect();
    cleaned.trim_matches([' ', '\t']).to_string()
}

/// Parses one data row `id,first[,last]`.
pub fn parse_line(line: &str, line_no: usize) -> Result<Record, DatasetError> {
    let malformed = |reason: String| DatasetError::Malformed {
        line: line_no,
        reason,
    };

    // Columns past the third are ignored.
    let mut fields = line.split(',');
    let id_field = fields.next().unwrap_or("");
    let first_field = fields
        .next()
        .ok_or_else(|| malformed("missing first name column".to_string()))?;
    let last_field = fields.next().unwrap_or("");

    let id: i64 = id_field
        .trim()
        .parse()
        .map_err(|_| malformed(format!("invalid id '{}'", id_field.trim())))?;
    if id <= 0 {
        return Err(malformed(format!("id must be positive, got {}", id)));
    }

    let first_name = sanitize(first_field);
    if first_name.is_empty() {
        return Err(malformed("empty first name".to_string()));
    }

    Ok(Record {
        id,
        first_name,
        last_name: sanitize(last_field),
    })
}

/// Dataset read from a `ID,FirstName,LastName` CSV file.
///
/// The whole file is validated up front; `load` then hands out copies of the
/// leading rows.
pub struct CsvDataset {
    path: PathBuf,
    records: Vec<Record>,
    skipped: usize,
}

impl CsvDataset {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Self::open_with_limit(path, MAX_RECORDS)
    }

    pub fn open_with_limit(path: impl AsRef<Path>, limit: usize) -> Result<Self, DatasetError> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(DatasetError::NotFound(path));
        }

        let file = File::open(&path).map_err(|source| DatasetError::Io {
            path: path.clone(),
            source,
        })?;
        let reader = BufReader::new(file);

        let mut records = Vec::with_capacity(limit.min(MAX_RECORDS));
        let mut skipped = 0;

        for (idx, line) in reader.split(b'\n').enumerate() {
            let line_no = idx + 1;
            let bytes = line.map_err(|source| DatasetError::Io {
                path: path.clone(),
                source,
            })?;
            if line_no == 1 {
                continue; // header
            }
            if records.len() >= limit {
                break;
            }

            let line = String::from_utf8_lossy(&bytes);
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().is_empty() {
                continue;
            }

            match parse_line(line, line_no) {
                Ok(record) => records.push(record),
                Err(e) => {
                    log::debug!("Skipping row: {}", e);
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            log::warn!("Skipped {} invalid records in {:?}", skipped, path);
        }
        if records.is_empty() {
            return Err(DatasetError::NoValidRecords(path));
        }
        log::info!("Loaded {} valid records from {:?}", records.len(), path);

        Ok(Self {
            path,
            records,
            skipped,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows rejected during validation.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

impl RecordSource for CsvDataset {
    fn size(&self) -> usize {
        self.records.len()
    }

    fn load(&self, count: usize) -> Vec<Record> {
        self.records[..count.min(self.records.len())].to_vec()
    }

    fn description(&self) -> String {
        format!("CSV file: {:?} ({} records)", self.path, self.records.len())
    }
}

/// Writes records in the format `CsvDataset` reads, header included.
pub fn write_csv(path: impl AsRef<Path>, records: &[Record]) -> Result<(), DatasetError> {
    let path = path.as_ref();
    let write_err = |source| DatasetError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut writer = BufWriter::new(File::create(path).map_err(write_err)?);
    writeln!(writer, "{}", CSV_HEADER).map_err(write_err)?;
    for record in records {
        writeln!(
            writer,
            "{},{},{}",
            record.id, record.first_name, record.last_name
        )
        .map_err(write_err)?;
    }
    writer.flush().map_err(write_err)?;
    Ok(())
}
