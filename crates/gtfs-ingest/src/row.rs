//! Typed field extraction from a single CSV row.

use csv::StringRecord;
use gtfs_model::{FieldSchema, FieldValue, Notice, NoticeContainer, ParseError};

use crate::csv::ColumnIndex;

/// Parser for the fields of one data row.
///
/// Every failure is reported to the notice container. Extraction methods
/// return `None` when the value is unusable, so an entity constructor can
/// use `?` on required fields after all fields have been read.
pub struct RowParser<'a> {
    filename: &'static str,
    record: &'a StringRecord,
    columns: &'a ColumnIndex,
    csv_row_number: u64,
    notices: &'a NoticeContainer,
}

impl<'a> RowParser<'a> {
    pub fn new(
        filename: &'static str,
        record: &'a StringRecord,
        columns: &'a ColumnIndex,
        csv_row_number: u64,
        notices: &'a NoticeContainer,
    ) -> Self {
        Self {
            filename,
            record,
            columns,
            csv_row_number,
            notices,
        }
    }

    pub fn csv_row_number(&self) -> u64 {
        self.csv_row_number
    }

    /// Raw cell content, `None` if the column is absent or the cell is empty.
    pub fn raw(&self, field: &FieldSchema) -> Option<&'a str> {
        let position = self.columns.position(field.name)?;
        self.record.get(position).filter(|value| !value.is_empty())
    }

    /// A value that must be present and valid.
    ///
    /// Emits `missing_required_field` for an empty cell, or the notice of
    /// the parse failure.
    pub fn required<T: FieldValue>(&self, field: &FieldSchema) -> Option<T> {
        match self.raw(field) {
            Some(raw) => self.parse(field, raw),
            None => {
                self.notices.add(Notice::MissingRequiredField {
                    filename: self.filename.to_string(),
                    csv_row_number: self.csv_row_number,
                    field_name: field.name.to_string(),
                });
                None
            }
        }
    }

    /// A value that may be absent.
    ///
    /// Empty or invalid cells fall back to the schema default if the field
    /// has one. Only invalid cells emit a notice.
    pub fn optional<T: FieldValue>(&self, field: &FieldSchema) -> Option<T> {
        self.raw(field)
            .and_then(|raw| self.parse(field, raw))
            .or_else(|| field.default_value.and_then(|raw| T::parse_field(raw).ok()))
    }

    fn parse<T: FieldValue>(&self, field: &FieldSchema, raw: &str) -> Option<T> {
        let value = match T::parse_field(raw) {
            Ok(value) => value,
            Err(err) => {
                self.notices.add(self.parse_notice(field, &err));
                return None;
            }
        };
        if let Some(number) = value.numeric_value()
            && !field.field_type.accepts(number)
        {
            self.notices.add(Notice::NumberOutOfRange {
                filename: self.filename.to_string(),
                csv_row_number: self.csv_row_number,
                field_name: field.name.to_string(),
                field_type: field.field_type.as_str().to_string(),
                field_value: raw.to_string(),
            });
            return None;
        }
        Some(value)
    }

    fn parse_notice(&self, field: &FieldSchema, err: &ParseError) -> Notice {
        let filename = self.filename.to_string();
        let csv_row_number = self.csv_row_number;
        let field_name = field.name.to_string();
        let field_value = err.value().to_string();
        match err {
            ParseError::InvalidDate(_) => Notice::InvalidDate {
                filename,
                csv_row_number,
                field_name,
                field_value,
            },
            ParseError::InvalidTime(_) => Notice::InvalidTime {
                filename,
                csv_row_number,
                field_name,
                field_value,
            },
            ParseError::InvalidColor(_) => Notice::InvalidColor {
                filename,
                csv_row_number,
                field_name,
                field_value,
            },
            ParseError::InvalidInteger(_) => Notice::InvalidInteger {
                filename,
                csv_row_number,
                field_name,
                field_value,
            },
            ParseError::InvalidFloat(_) => Notice::InvalidFloat {
                filename,
                csv_row_number,
                field_name,
                field_value,
            },
            ParseError::UnexpectedEnumValue(_) => Notice::UnexpectedEnumValue {
                filename,
                csv_row_number,
                field_name,
                field_value,
            },
        }
    }
}
