use std::fs::File;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{debug, trace};
use thiserror::Error;

use crate::input::{CsvSettings, EndBeforeStart, TimeEntry};
use crate::time::{self, InvalidDate, InvalidTime};

#[derive(Debug, Error)]
pub enum InvalidField {
    #[error(transparent)]
    Date(#[from] InvalidDate),
    #[error(transparent)]
    Time(#[from] InvalidTime),
    #[error(transparent)]
    EndBeforeStart(#[from] EndBeforeStart),
}

#[derive(Debug, Error)]
pub enum ParseRecordError {
    #[error("malformed row on line {line}: {reason}")]
    MalformedRow { line: u64, reason: InvalidField },
    #[error("the column \"{name}\" is missing in the header")]
    MissingColumn { name: String },
    #[error("the delimiter '{0}' is not a single byte ascii character")]
    InvalidDelimiter(char),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Positions of the relevant columns in a record.
#[derive(Debug, Clone, Copy)]
struct Columns {
    start_date: usize,
    start_time: usize,
    end_date: usize,
    end_time: usize,
}

impl Columns {
    fn locate(headers: &StringRecord, settings: &CsvSettings) -> Result<Self, ParseRecordError> {
        let position = |name: &str| {
            headers
                .iter()
                // exports sometimes start with a byte order mark
                .position(|header| header.trim_start_matches('\u{feff}').trim() == name)
                .ok_or_else(|| ParseRecordError::MissingColumn {
                    name: name.to_string(),
                })
        };

        Ok(Self {
            start_date: position(settings.start_date_column())?,
            start_time: position(settings.start_time_column())?,
            end_date: position(settings.end_date_column())?,
            end_time: position(settings.end_time_column())?,
        })
    }

    fn time_entry(
        &self,
        record: &StringRecord,
        settings: &CsvSettings,
    ) -> Result<TimeEntry, InvalidField> {
        let field = |index: usize| record.get(index).unwrap_or_default();

        let start_date = time::parse_date(field(self.start_date), settings.date_format())?;
        let start_time = time::parse_time(field(self.start_time), settings.time_format())?;
        let end_date = time::parse_date(field(self.end_date), settings.date_format())?;
        let end_time = time::parse_time(field(self.end_time), settings.time_format())?;

        Ok(TimeEntry::new(
            start_date.and_time(start_time),
            end_date.and_time(end_time),
        )?)
    }
}

/// Reads time entries from a CSV export.
///
/// The first row must be a header, the columns are located by their name.
/// All columns that do not hold a start or end date/time are ignored.
pub struct RecordParser<'a> {
    settings: &'a CsvSettings,
}

impl<'a> RecordParser<'a> {
    pub fn new(settings: &'a CsvSettings) -> Self {
        Self { settings }
    }

    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<Vec<TimeEntry>, ParseRecordError> {
        trace!("reading from: {}", path.as_ref().display());
        self.parse(File::open(path)?)
    }

    /// Fails on the first row that can not be parsed.
    pub fn parse<R: io::Read>(&self, reader: R) -> Result<Vec<TimeEntry>, ParseRecordError> {
        let delimiter = self.settings.delimiter();
        if !delimiter.is_ascii() {
            return Err(ParseRecordError::InvalidDelimiter(delimiter));
        }

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter as u8)
            .from_reader(reader);

        let columns = Columns::locate(reader.headers()?, self.settings)?;
        debug!("located columns: {:?}", columns);

        let mut entries = Vec::new();
        let mut record = StringRecord::new();
        while reader.read_record(&mut record)? {
            let line = record.position().map_or(0, |position| position.line());

            let entry = columns
                .time_entry(&record, self.settings)
                .map_err(|reason| ParseRecordError::MalformedRow { line, reason })?;

            entries.push(entry);
        }

        Ok(entries)
    }
}
