use chrono::Weekday;
use serde::Serialize;

use crate::enums::CalendarService;
use crate::schema::{FieldSchema, FieldType, Presence, TableSchema};
use crate::tables::GtfsEntity;
use crate::types::GtfsDate;

/// Weekly service pattern over a date range, `calendar.txt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Calendar {
    pub csv_row_number: u64,
    pub service_id: String,
    pub monday: CalendarService,
    pub tuesday: CalendarService,
    pub wednesday: CalendarService,
    pub thursday: CalendarService,
    pub friday: CalendarService,
    pub saturday: CalendarService,
    pub sunday: CalendarService,
    pub start_date: GtfsDate,
    pub end_date: GtfsDate,
}

impl Calendar {
    pub const FILENAME: &'static str = "calendar.txt";

    pub const SERVICE_ID: FieldSchema =
        FieldSchema::required("service_id", FieldType::Id).primary_key();
    pub const MONDAY: FieldSchema = FieldSchema::required("monday", FieldType::Enum);
    pub const TUESDAY: FieldSchema = FieldSchema::required("tuesday", FieldType::Enum);
    pub const WEDNESDAY: FieldSchema = FieldSchema::required("wednesday", FieldType::Enum);
    pub const THURSDAY: FieldSchema = FieldSchema::required("thursday", FieldType::Enum);
    pub const FRIDAY: FieldSchema = FieldSchema::required("friday", FieldType::Enum);
    pub const SATURDAY: FieldSchema = FieldSchema::required("saturday", FieldType::Enum);
    pub const SUNDAY: FieldSchema = FieldSchema::required("sunday", FieldType::Enum);
    pub const START_DATE: FieldSchema = FieldSchema::required("start_date", FieldType::Date);
    pub const END_DATE: FieldSchema = FieldSchema::required("end_date", FieldType::Date);

    pub fn service_on(&self, weekday: Weekday) -> CalendarService {
        match weekday {
            Weekday::Mon => self.monday,
            Weekday::Tue => self.tuesday,
            Weekday::Wed => self.wednesday,
            Weekday::Thu => self.thursday,
            Weekday::Fri => self.friday,
            Weekday::Sat => self.saturday,
            Weekday::Sun => self.sunday,
        }
    }

    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.service_on(weekday) == CalendarService::Available
    }

    /// Whether the weekly pattern covers `date`, ignoring `calendar_dates.txt`.
    pub fn is_active_on(&self, date: GtfsDate) -> bool {
        self.start_date <= date && date <= self.end_date && self.runs_on(date.weekday())
    }
}

impl GtfsEntity for Calendar {
    type Key = String;

    const SCHEMA: TableSchema = TableSchema {
        filename: Self::FILENAME,
        presence: Presence::ConditionallyRequired,
        fields: &[
            Self::SERVICE_ID,
            Self::MONDAY,
            Self::TUESDAY,
            Self::WEDNESDAY,
            Self::THURSDAY,
            Self::FRIDAY,
            Self::SATURDAY,
            Self::SUNDAY,
            Self::START_DATE,
            Self::END_DATE,
        ],
    };

    fn csv_row_number(&self) -> u64 {
        self.csv_row_number
    }

    fn primary_key(&self) -> Option<String> {
        Some(self.service_id.clone())
    }

    fn format_key(key: &String) -> String {
        key.clone()
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "service_id" => Some(&self.service_id),
            _ => None,
        }
    }
}
