//! CSV header validation against a table schema.

use std::collections::HashMap;

use gtfs_model::{Notice, NoticeContainer, TableSchema};

/// Column positions of the schema fields present in a header.
#[derive(Debug, Clone)]
pub struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
    header_count: usize,
}

impl ColumnIndex {
    /// Position of a schema column, `None` if the file does not have it.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Number of columns in the header, known or not.
    pub fn header_count(&self) -> usize {
        self.header_count
    }
}

/// Check a header line and map schema fields to column positions.
///
/// Duplicated columns, empty column names and missing required columns each
/// emit a notice; any of them makes the header invalid and returns `None`.
/// Columns the schema does not know are ignored.
pub fn validate_header<'a>(
    schema: &TableSchema,
    header: impl IntoIterator<Item = &'a str>,
    notices: &NoticeContainer,
) -> Option<ColumnIndex> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    let mut positions = HashMap::new();
    let mut header_count = 0;
    let mut valid = true;

    for (index, name) in header.into_iter().enumerate() {
        header_count += 1;
        if name.is_empty() {
            notices.add(Notice::EmptyColumnName {
                filename: schema.filename.to_string(),
                index,
            });
            valid = false;
            continue;
        }
        if let Some(&first_index) = seen.get(name) {
            notices.add(Notice::DuplicatedColumn {
                filename: schema.filename.to_string(),
                field_name: name.to_string(),
                first_index,
                second_index: index,
            });
            valid = false;
            continue;
        }
        seen.insert(name, index);
        match schema.field(name) {
            Some(field) => {
                positions.insert(field.name, index);
            }
            None => {
                tracing::debug!(filename = schema.filename, column = name, "Unknown column");
            }
        }
    }

    for field in schema.required_fields() {
        if !positions.contains_key(field.name) {
            notices.add(Notice::MissingRequiredColumn {
                filename: schema.filename.to_string(),
                field_name: field.name.to_string(),
            });
            valid = false;
        }
    }

    valid.then_some(ColumnIndex {
        positions,
        header_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gtfs_model::{CalendarDate, GtfsEntity};

    fn validate(header: &[&str]) -> (Option<ColumnIndex>, Vec<Notice>) {
        let notices = NoticeContainer::new();
        let index = validate_header(&CalendarDate::SCHEMA, header.iter().copied(), &notices);
        (index, notices.into_notices())
    }

    #[test]
    fn test_column_order_is_free() {
        let (index, notices) = validate(&["date", "exception_type", "service_id", "extra"]);
        let index = index.unwrap();
        assert!(notices.is_empty());
        assert_eq!(index.position("service_id"), Some(2));
        assert_eq!(index.position("date"), Some(0));
        assert_eq!(index.position("extra"), None);
        assert_eq!(index.header_count(), 4);
    }

    #[test]
    fn test_missing_required_column() {
        let (index, notices) = validate(&["service_id", "date"]);
        assert!(index.is_none());
        assert_eq!(
            notices,
            vec![Notice::MissingRequiredColumn {
                filename: "calendar_dates.txt".to_string(),
                field_name: "exception_type".to_string(),
            }]
        );
    }

    #[test]
    fn test_duplicated_and_empty_columns() {
        let (index, notices) = validate(&["service_id", "date", "", "exception_type", "date"]);
        assert!(index.is_none());
        assert_eq!(
            notices,
            vec![
                Notice::EmptyColumnName {
                    filename: "calendar_dates.txt".to_string(),
                    index: 2,
                },
                Notice::DuplicatedColumn {
                    filename: "calendar_dates.txt".to_string(),
                    field_name: "date".to_string(),
                    first_index: 1,
                    second_index: 4,
                },
            ]
        );
    }
}
