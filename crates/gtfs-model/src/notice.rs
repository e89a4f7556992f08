//! Structured validation notices.
//!
//! Every problem found while loading or validating a feed is reported as a
//! [`Notice`]. Each variant carries only the data needed to describe it,
//! exposes a stable snake_case code, and flattens into an ordered list of
//! context values for renderers.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Notice severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// The feed violates the format
    Error,
    /// Suspicious but legal
    Warning,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
        }
    }
}

/// A single value in a notice context.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for ContextValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<u64> for ContextValue {
    fn from(value: u64) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<usize> for ContextValue {
    fn from(value: usize) -> Self {
        Self::Integer(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl Serialize for ContextValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(value) => serializer.serialize_str(value),
            Self::Integer(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
        }
    }
}

/// Validation notice. Row numbers are 1-based with the header as row 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Notice {
    // Structural
    /// The file has no header line.
    EmptyFile { filename: String },
    /// The header line cannot be decoded.
    InvalidHeaders { filename: String, message: String },
    DuplicatedColumn {
        filename: String,
        field_name: String,
        first_index: usize,
        second_index: usize,
    },
    EmptyColumnName { filename: String, index: usize },
    MissingRequiredColumn { filename: String, field_name: String },
    MissingRequiredFile { filename: String },
    /// Neither `calendar.txt` nor `calendar_dates.txt` was provided.
    MissingCalendarAndCalendarDateFiles,

    // Row level
    MissingRequiredField {
        filename: String,
        csv_row_number: u64,
        field_name: String,
    },
    /// The CSV reader could not decode a data row.
    CsvParsingFailed {
        filename: String,
        csv_row_number: u64,
        message: String,
    },
    InvalidRowLength {
        filename: String,
        csv_row_number: u64,
        row_length: usize,
        header_count: usize,
    },
    InvalidDate {
        filename: String,
        csv_row_number: u64,
        field_name: String,
        field_value: String,
    },
    InvalidTime {
        filename: String,
        csv_row_number: u64,
        field_name: String,
        field_value: String,
    },
    InvalidColor {
        filename: String,
        csv_row_number: u64,
        field_name: String,
        field_value: String,
    },
    InvalidInteger {
        filename: String,
        csv_row_number: u64,
        field_name: String,
        field_value: String,
    },
    InvalidFloat {
        filename: String,
        csv_row_number: u64,
        field_name: String,
        field_value: String,
    },
    UnexpectedEnumValue {
        filename: String,
        csv_row_number: u64,
        field_name: String,
        field_value: String,
    },
    NumberOutOfRange {
        filename: String,
        csv_row_number: u64,
        field_name: String,
        field_type: String,
        field_value: String,
    },
    /// Composite keys list their field names and values comma-joined.
    DuplicateKey {
        filename: String,
        csv_row_number: u64,
        field_name: String,
        field_value: String,
    },

    // Semantic
    StartAndEndDateOutOfOrder {
        filename: String,
        csv_row_number: u64,
        entity_id: Option<String>,
        start_date: String,
        end_date: String,
    },
    StopTimeWithArrivalBeforePreviousDepartureTime {
        csv_row_number: u64,
        prev_csv_row_number: u64,
        trip_id: String,
        departure_time: String,
        arrival_time: String,
    },
    StopTimeWithDepartureBeforeArrivalTime {
        csv_row_number: u64,
        trip_id: String,
        stop_sequence: i32,
        arrival_time: String,
        departure_time: String,
    },
    ForeignKeyViolation {
        child_filename: String,
        child_field_name: String,
        parent_filename: String,
        parent_field_name: String,
        field_value: String,
        csv_row_number: u64,
    },
    RouteBothShortAndLongNameMissing {
        route_id: String,
        csv_row_number: u64,
    },

    // Engine
    /// A validator panicked or returned an error.
    RuntimeExceptionInValidator {
        validator: String,
        exception: String,
        message: String,
    },
}

impl Notice {
    /// Stable code used by renderers and tests.
    pub fn code(&self) -> &'static str {
        match self {
            Notice::EmptyFile { .. } => "empty_file",
            Notice::InvalidHeaders { .. } => "invalid_headers",
            Notice::DuplicatedColumn { .. } => "duplicated_column",
            Notice::EmptyColumnName { .. } => "empty_column_name",
            Notice::MissingRequiredColumn { .. } => "missing_required_column",
            Notice::MissingRequiredFile { .. } => "missing_required_file",
            Notice::MissingCalendarAndCalendarDateFiles => {
                "missing_calendar_and_calendar_date_files"
            }
            Notice::MissingRequiredField { .. } => "missing_required_field",
            Notice::CsvParsingFailed { .. } => "csv_parsing_failed",
            Notice::InvalidRowLength { .. } => "invalid_row_length",
            Notice::InvalidDate { .. } => "invalid_date",
            Notice::InvalidTime { .. } => "invalid_time",
            Notice::InvalidColor { .. } => "invalid_color",
            Notice::InvalidInteger { .. } => "invalid_integer",
            Notice::InvalidFloat { .. } => "invalid_float",
            Notice::UnexpectedEnumValue { .. } => "unexpected_enum_value",
            Notice::NumberOutOfRange { .. } => "number_out_of_range",
            Notice::DuplicateKey { .. } => "duplicate_key",
            Notice::StartAndEndDateOutOfOrder { .. } => "start_and_end_date_out_of_order",
            Notice::StopTimeWithArrivalBeforePreviousDepartureTime { .. } => {
                "stop_time_with_arrival_before_previous_departure_time"
            }
            Notice::StopTimeWithDepartureBeforeArrivalTime { .. } => {
                "stop_time_with_departure_before_arrival_time"
            }
            Notice::ForeignKeyViolation { .. } => "foreign_key_violation",
            Notice::RouteBothShortAndLongNameMissing { .. } => {
                "route_both_short_and_long_name_missing"
            }
            Notice::RuntimeExceptionInValidator { .. } => "runtime_exception_in_validator",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Notice::UnexpectedEnumValue { .. } | Notice::RouteBothShortAndLongNameMissing { .. } => {
                Severity::Warning
            }
            _ => Severity::Error,
        }
    }

    /// Filename the notice is about, if it names one.
    pub fn filename(&self) -> Option<&str> {
        match self {
            Notice::EmptyFile { filename }
            | Notice::InvalidHeaders { filename, .. }
            | Notice::DuplicatedColumn { filename, .. }
            | Notice::EmptyColumnName { filename, .. }
            | Notice::MissingRequiredColumn { filename, .. }
            | Notice::MissingRequiredFile { filename }
            | Notice::MissingRequiredField { filename, .. }
            | Notice::CsvParsingFailed { filename, .. }
            | Notice::InvalidRowLength { filename, .. }
            | Notice::InvalidDate { filename, .. }
            | Notice::InvalidTime { filename, .. }
            | Notice::InvalidColor { filename, .. }
            | Notice::InvalidInteger { filename, .. }
            | Notice::InvalidFloat { filename, .. }
            | Notice::UnexpectedEnumValue { filename, .. }
            | Notice::NumberOutOfRange { filename, .. }
            | Notice::DuplicateKey { filename, .. }
            | Notice::StartAndEndDateOutOfOrder { filename, .. } => Some(filename),
            Notice::ForeignKeyViolation { child_filename, .. } => Some(child_filename),
            _ => None,
        }
    }

    /// Ordered context entries with camelCase keys.
    pub fn context(&self) -> Vec<(&'static str, ContextValue)> {
        match self {
            Notice::EmptyFile { filename } | Notice::MissingRequiredFile { filename } => {
                vec![("filename", filename.into())]
            }
            Notice::InvalidHeaders { filename, message } => vec![
                ("filename", filename.into()),
                ("message", message.into()),
            ],
            Notice::DuplicatedColumn {
                filename,
                field_name,
                first_index,
                second_index,
            } => vec![
                ("filename", filename.into()),
                ("fieldName", field_name.into()),
                ("firstIndex", (*first_index).into()),
                ("secondIndex", (*second_index).into()),
            ],
            Notice::EmptyColumnName { filename, index } => vec![
                ("filename", filename.into()),
                ("index", (*index).into()),
            ],
            Notice::MissingRequiredColumn {
                filename,
                field_name,
            } => vec![
                ("filename", filename.into()),
                ("fieldName", field_name.into()),
            ],
            Notice::MissingCalendarAndCalendarDateFiles => Vec::new(),
            Notice::MissingRequiredField {
                filename,
                csv_row_number,
                field_name,
            } => vec![
                ("filename", filename.into()),
                ("csvRowNumber", (*csv_row_number).into()),
                ("fieldName", field_name.into()),
            ],
            Notice::CsvParsingFailed {
                filename,
                csv_row_number,
                message,
            } => vec![
                ("filename", filename.into()),
                ("csvRowNumber", (*csv_row_number).into()),
                ("message", message.into()),
            ],
            Notice::InvalidRowLength {
                filename,
                csv_row_number,
                row_length,
                header_count,
            } => vec![
                ("filename", filename.into()),
                ("csvRowNumber", (*csv_row_number).into()),
                ("rowLength", (*row_length).into()),
                ("headerCount", (*header_count).into()),
            ],
            Notice::InvalidDate {
                filename,
                csv_row_number,
                field_name,
                field_value,
            }
            | Notice::InvalidTime {
                filename,
                csv_row_number,
                field_name,
                field_value,
            }
            | Notice::InvalidColor {
                filename,
                csv_row_number,
                field_name,
                field_value,
            }
            | Notice::InvalidInteger {
                filename,
                csv_row_number,
                field_name,
                field_value,
            }
            | Notice::InvalidFloat {
                filename,
                csv_row_number,
                field_name,
                field_value,
            }
            | Notice::UnexpectedEnumValue {
                filename,
                csv_row_number,
                field_name,
                field_value,
            }
            | Notice::DuplicateKey {
                filename,
                csv_row_number,
                field_name,
                field_value,
            } => vec![
                ("filename", filename.into()),
                ("csvRowNumber", (*csv_row_number).into()),
                ("fieldName", field_name.into()),
                ("fieldValue", field_value.into()),
            ],
            Notice::NumberOutOfRange {
                filename,
                csv_row_number,
                field_name,
                field_type,
                field_value,
            } => vec![
                ("filename", filename.into()),
                ("csvRowNumber", (*csv_row_number).into()),
                ("fieldName", field_name.into()),
                ("fieldType", field_type.into()),
                ("fieldValue", field_value.into()),
            ],
            Notice::StartAndEndDateOutOfOrder {
                filename,
                csv_row_number,
                entity_id,
                start_date,
                end_date,
            } => {
                let mut context = vec![
                    ("filename", filename.into()),
                    ("csvRowNumber", (*csv_row_number).into()),
                ];
                if let Some(entity_id) = entity_id {
                    context.push(("entityId", entity_id.into()));
                }
                context.push(("startDate", start_date.into()));
                context.push(("endDate", end_date.into()));
                context
            }
            Notice::StopTimeWithArrivalBeforePreviousDepartureTime {
                csv_row_number,
                prev_csv_row_number,
                trip_id,
                departure_time,
                arrival_time,
            } => vec![
                ("csvRowNumber", (*csv_row_number).into()),
                ("prevCsvRowNumber", (*prev_csv_row_number).into()),
                ("tripId", trip_id.into()),
                ("departureTime", departure_time.into()),
                ("arrivalTime", arrival_time.into()),
            ],
            Notice::StopTimeWithDepartureBeforeArrivalTime {
                csv_row_number,
                trip_id,
                stop_sequence,
                arrival_time,
                departure_time,
            } => vec![
                ("csvRowNumber", (*csv_row_number).into()),
                ("tripId", trip_id.into()),
                ("stopSequence", (*stop_sequence).into()),
                ("arrivalTime", arrival_time.into()),
                ("departureTime", departure_time.into()),
            ],
            Notice::ForeignKeyViolation {
                child_filename,
                child_field_name,
                parent_filename,
                parent_field_name,
                field_value,
                csv_row_number,
            } => vec![
                ("childFilename", child_filename.into()),
                ("childFieldName", child_field_name.into()),
                ("parentFilename", parent_filename.into()),
                ("parentFieldName", parent_field_name.into()),
                ("fieldValue", field_value.into()),
                ("csvRowNumber", (*csv_row_number).into()),
            ],
            Notice::RouteBothShortAndLongNameMissing {
                route_id,
                csv_row_number,
            } => vec![
                ("routeId", route_id.into()),
                ("csvRowNumber", (*csv_row_number).into()),
            ],
            Notice::RuntimeExceptionInValidator {
                validator,
                exception,
                message,
            } => vec![
                ("validator", validator.into()),
                ("exception", exception.into()),
                ("message", message.into()),
            ],
        }
    }
}

/// Serialized as `{code, severity, ...context}`.
impl Serialize for Notice {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let context = self.context();
        let mut map = serializer.serialize_map(Some(context.len() + 2))?;
        map.serialize_entry("code", self.code())?;
        map.serialize_entry("severity", &self.severity())?;
        for (key, value) in &context {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Append-only collection of notices shared by loaders and validators.
///
/// `add` may be called concurrently from several threads. Notices are kept
/// in insertion order and never deduplicated.
#[derive(Debug, Default)]
pub struct NoticeContainer {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeContainer {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Notice>> {
        self.notices.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, notice: Notice) {
        self.lock().push(notice);
    }

    pub fn extend(&self, notices: impl IntoIterator<Item = Notice>) {
        self.lock().extend(notices);
    }

    /// Move every notice of `other` to the end of this container.
    pub fn merge(&self, other: NoticeContainer) {
        self.extend(other.into_notices());
    }

    /// Snapshot of the accumulated notices.
    pub fn notices(&self) -> Vec<Notice> {
        self.lock().clone()
    }

    pub fn into_notices(self) -> Vec<Notice> {
        self.notices
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.lock()
            .iter()
            .filter(|notice| notice.severity() == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_errors(&self) -> bool {
        self.lock()
            .iter()
            .any(|notice| notice.severity() == Severity::Error)
    }

    /// Codes of all notices, in order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.lock().iter().map(Notice::code).collect()
    }
}

impl From<Vec<Notice>> for NoticeContainer {
    fn from(notices: Vec<Notice>) -> Self {
        Self {
            notices: Mutex::new(notices),
        }
    }
}

impl Serialize for NoticeContainer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let notices = self.lock();
        let mut state = serializer.serialize_struct("NoticeContainer", 1)?;
        state.serialize_field("notices", &*notices)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn missing_monday() -> Notice {
        Notice::MissingRequiredField {
            filename: "calendar.txt".to_string(),
            csv_row_number: 2,
            field_name: "monday".to_string(),
        }
    }

    #[test]
    fn test_code_and_severity() {
        let notice = missing_monday();
        assert_eq!(notice.code(), "missing_required_field");
        assert_eq!(notice.severity(), Severity::Error);
        assert_eq!(notice.filename(), Some("calendar.txt"));

        let warning = Notice::RouteBothShortAndLongNameMissing {
            route_id: "r1".to_string(),
            csv_row_number: 3,
        };
        assert_eq!(warning.severity(), Severity::Warning);
    }

    #[test]
    fn test_severity_label_matches_serialized_form() {
        for severity in [Severity::Error, Severity::Warning] {
            assert_eq!(
                serde_json::to_value(severity).unwrap(),
                serde_json::Value::from(severity.label())
            );
        }
        assert_eq!(Severity::Warning.label(), "WARNING");
    }

    #[test]
    fn test_context_omits_absent_entity_id() {
        let notice = Notice::StartAndEndDateOutOfOrder {
            filename: "feed_info.txt".to_string(),
            csv_row_number: 2,
            entity_id: None,
            start_date: "20201210".to_string(),
            end_date: "20201122".to_string(),
        };
        let keys: Vec<&str> = notice.context().iter().map(|(key, _)| *key).collect();
        assert_eq!(keys, ["filename", "csvRowNumber", "startDate", "endDate"]);
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(missing_monday(), missing_monday());
        assert_ne!(
            missing_monday(),
            Notice::MissingRequiredField {
                filename: "calendar.txt".to_string(),
                csv_row_number: 3,
                field_name: "monday".to_string(),
            }
        );
    }

    #[test]
    fn test_container_counts_and_merge() {
        let container = NoticeContainer::new();
        container.add(missing_monday());
        let other = NoticeContainer::new();
        other.add(Notice::UnexpectedEnumValue {
            filename: "routes.txt".to_string(),
            csv_row_number: 4,
            field_name: "route_type".to_string(),
            field_value: "42".to_string(),
        });
        container.merge(other);

        assert_eq!(container.len(), 2);
        assert_eq!(container.error_count(), 1);
        assert_eq!(container.warning_count(), 1);
        assert!(container.has_errors());
        assert_eq!(
            container.codes(),
            ["missing_required_field", "unexpected_enum_value"]
        );
    }

    #[test]
    fn test_concurrent_add() {
        let container = Arc::new(NoticeContainer::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let container = Arc::clone(&container);
                thread::spawn(move || {
                    for _ in 0..100 {
                        container.add(missing_monday());
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(container.len(), 400);
    }

    #[test]
    fn test_serialize_notice() {
        let json = serde_json::to_value(missing_monday()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "missing_required_field",
                "severity": "ERROR",
                "filename": "calendar.txt",
                "csvRowNumber": 2,
                "fieldName": "monday",
            })
        );
    }
}
