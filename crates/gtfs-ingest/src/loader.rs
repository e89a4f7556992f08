//! Schema-driven loading of a single GTFS table.

use std::io::Read;
use std::time::Instant;

use csv::StringRecord;
use gtfs_model::{LoaderOptions, Notice, NoticeContainer};

use crate::container::TableContainer;
use crate::csv::{ColumnIndex, csv_reader, is_blank, read_all, strip_bom, validate_header};
use crate::row::RowParser;
use crate::tables::FromRow;

/// Turns raw CSV content into a [`TableContainer`].
///
/// Loading never fails: every problem becomes a notice, and the returned
/// container's status tells whether rows were processed at all.
#[derive(Debug, Clone, Default)]
pub struct TableLoader {
    options: LoaderOptions,
}

impl TableLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load a table; `None` means the file is not part of the feed.
    pub fn load<T: FromRow>(
        &self,
        source: Option<impl Read>,
        notices: &NoticeContainer,
    ) -> TableContainer<T> {
        let filename = T::SCHEMA.filename;
        let Some(source) = source else {
            tracing::debug!(filename, "File is missing");
            return TableContainer::for_missing_file();
        };
        let bytes = match read_all(source) {
            Ok(bytes) => bytes,
            Err(err) => {
                notices.add(Notice::InvalidHeaders {
                    filename: filename.to_string(),
                    message: err.to_string(),
                });
                return TableContainer::for_invalid_headers();
            }
        };
        self.load_bytes(&bytes, notices)
    }

    /// Load a table from in-memory content.
    pub fn load_bytes<T: FromRow>(&self, bytes: &[u8], notices: &NoticeContainer) -> TableContainer<T> {
        let filename = T::SCHEMA.filename;
        let _span = tracing::info_span!("load_table", filename).entered();
        let start = Instant::now();

        let content = strip_bom(bytes);
        if is_blank(content) {
            notices.add(Notice::EmptyFile {
                filename: filename.to_string(),
            });
            return TableContainer::for_empty_file();
        }

        let mut reader = csv_reader(content, self.options.trim_fields);
        let mut record = StringRecord::new();
        let columns = match reader.read_record(&mut record) {
            Ok(true) => {
                match validate_header(&T::SCHEMA, record.iter(), notices) {
                    Some(columns) => columns,
                    None => return TableContainer::for_invalid_headers(),
                }
            }
            Ok(false) => {
                notices.add(Notice::EmptyFile {
                    filename: filename.to_string(),
                });
                return TableContainer::for_empty_file();
            }
            Err(err) => {
                notices.add(Notice::InvalidHeaders {
                    filename: filename.to_string(),
                    message: err.to_string(),
                });
                return TableContainer::for_invalid_headers();
            }
        };

        let entities = self.read_rows::<T>(&mut reader, &columns, notices);
        let container = TableContainer::for_entities(entities, notices);
        tracing::info!(
            filename,
            entities = container.entity_count(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Loaded table"
        );
        container
    }

    fn read_rows<T: FromRow>(
        &self,
        reader: &mut csv::Reader<&[u8]>,
        columns: &ColumnIndex,
        notices: &NoticeContainer,
    ) -> Vec<T> {
        let filename = T::SCHEMA.filename;
        let mut entities = Vec::new();
        let mut record = StringRecord::new();
        // Physical line numbers: the csv crate skips blank lines and quoted
        // fields may span several lines.
        let mut next_row_number: u64 = 2;
        loop {
            let read = reader.read_record(&mut record);
            let position = match &read {
                Ok(_) => record.position(),
                Err(err) => err.position(),
            };
            let csv_row_number = position.map_or(next_row_number, csv::Position::line);
            next_row_number = csv_row_number + 1;
            match read {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    notices.add(Notice::CsvParsingFailed {
                        filename: filename.to_string(),
                        csv_row_number,
                        message: err.to_string(),
                    });
                    if err.is_io_error() {
                        break;
                    }
                    continue;
                }
            }
            if is_blank_record(&record) {
                continue;
            }
            if record.len() != columns.header_count() {
                notices.add(Notice::InvalidRowLength {
                    filename: filename.to_string(),
                    csv_row_number,
                    row_length: record.len(),
                    header_count: columns.header_count(),
                });
                continue;
            }
            let row = RowParser::new(filename, &record, columns, csv_row_number, notices);
            match T::from_row(&row) {
                Some(entity) => entities.push(entity),
                None => tracing::debug!(filename, csv_row_number, "Row discarded"),
            }
        }
        entities
    }
}

/// A line holding nothing but whitespace, read as a single empty field.
fn is_blank_record(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtfs_model::Agency;

    #[test]
    fn test_bom_is_stripped() {
        let notices = NoticeContainer::new();
        let content = "\u{feff}agency_name,agency_url,agency_timezone\nMTA,http://mta.info,America/New_York\n";
        let agency: TableContainer<Agency> =
            TableLoader::default().load(Some(content.as_bytes()), &notices);
        assert!(notices.is_empty(), "{:?}", notices.notices());
        assert_eq!(agency.entity_count(), 1);
        assert_eq!(agency.entities()[0].agency_id, None);
    }

    #[test]
    fn test_whitespace_only_file_is_empty() {
        let notices = NoticeContainer::new();
        let agency: TableContainer<Agency> =
            TableLoader::default().load(Some("\u{feff}\n  \n".as_bytes()), &notices);
        assert!(agency.is_empty_file());
        assert_eq!(notices.codes(), ["empty_file"]);
    }

    #[test]
    fn test_untrimmed_fields_keep_whitespace() {
        let notices = NoticeContainer::new();
        let loader = TableLoader::new(LoaderOptions::default().with_trim_fields(false));
        let content = "agency_name,agency_url,agency_timezone\n MTA ,http://mta.info,UTC\n";
        let agency: TableContainer<Agency> = loader.load(Some(content.as_bytes()), &notices);
        assert_eq!(agency.entities()[0].agency_name, " MTA ");
    }

    #[test]
    fn test_invalid_utf8_header() {
        let notices = NoticeContainer::new();
        let agency: TableContainer<Agency> =
            TableLoader::default().load(Some(&b"agency_\xFFname\n"[..]), &notices);
        assert!(agency.has_invalid_headers());
        assert_eq!(notices.codes(), ["invalid_headers"]);
    }
}
