use serde::Serialize;

use crate::enums::ExceptionType;
use crate::schema::{FieldSchema, FieldType, Presence, TableSchema};
use crate::tables::GtfsEntity;
use crate::types::GtfsDate;

/// A service exception on a single date, `calendar_dates.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CalendarDate {
    pub csv_row_number: u64,
    pub service_id: String,
    pub date: GtfsDate,
    pub exception_type: ExceptionType,
}

impl CalendarDate {
    pub const FILENAME: &'static str = "calendar_dates.txt";

    pub const SERVICE_ID: FieldSchema =
        FieldSchema::required("service_id", FieldType::Id).primary_key();
    pub const DATE: FieldSchema = FieldSchema::required("date", FieldType::Date).primary_key();
    pub const EXCEPTION_TYPE: FieldSchema =
        FieldSchema::required("exception_type", FieldType::Enum);
}

impl GtfsEntity for CalendarDate {
    type Key = (String, GtfsDate);

    const SCHEMA: TableSchema = TableSchema {
        filename: Self::FILENAME,
        presence: Presence::ConditionallyRequired,
        fields: &[Self::SERVICE_ID, Self::DATE, Self::EXCEPTION_TYPE],
    };

    fn csv_row_number(&self) -> u64 {
        self.csv_row_number
    }

    fn primary_key(&self) -> Option<(String, GtfsDate)> {
        Some((self.service_id.clone(), self.date))
    }

    fn format_key((service_id, date): &(String, GtfsDate)) -> String {
        format!("{service_id},{date}")
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "service_id" => Some(&self.service_id),
            _ => None,
        }
    }
}
