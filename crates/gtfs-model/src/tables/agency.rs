use serde::Serialize;

use crate::schema::{FieldSchema, FieldType, Presence, TableSchema};
use crate::tables::GtfsEntity;

/// A transit agency, `agency.txt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Agency {
    pub csv_row_number: u64,
    /// Only required when the feed has several agencies.
    pub agency_id: Option<String>,
    pub agency_name: String,
    pub agency_url: String,
    pub agency_timezone: String,
    pub agency_lang: Option<String>,
    pub agency_phone: Option<String>,
    pub agency_fare_url: Option<String>,
    pub agency_email: Option<String>,
}

impl Agency {
    pub const FILENAME: &'static str = "agency.txt";

    pub const AGENCY_ID: FieldSchema =
        FieldSchema::conditionally_required("agency_id", FieldType::Id).primary_key();
    pub const AGENCY_NAME: FieldSchema = FieldSchema::required("agency_name", FieldType::Text);
    pub const AGENCY_URL: FieldSchema = FieldSchema::required("agency_url", FieldType::Url);
    pub const AGENCY_TIMEZONE: FieldSchema =
        FieldSchema::required("agency_timezone", FieldType::Timezone);
    pub const AGENCY_LANG: FieldSchema =
        FieldSchema::optional("agency_lang", FieldType::LanguageCode);
    pub const AGENCY_PHONE: FieldSchema =
        FieldSchema::optional("agency_phone", FieldType::PhoneNumber);
    pub const AGENCY_FARE_URL: FieldSchema = FieldSchema::optional("agency_fare_url", FieldType::Url);
    pub const AGENCY_EMAIL: FieldSchema = FieldSchema::optional("agency_email", FieldType::Email);
}

impl GtfsEntity for Agency {
    type Key = String;

    const SCHEMA: TableSchema = TableSchema {
        filename: Self::FILENAME,
        presence: Presence::Required,
        fields: &[
            Self::AGENCY_ID,
            Self::AGENCY_NAME,
            Self::AGENCY_URL,
            Self::AGENCY_TIMEZONE,
            Self::AGENCY_LANG,
            Self::AGENCY_PHONE,
            Self::AGENCY_FARE_URL,
            Self::AGENCY_EMAIL,
        ],
    };

    fn csv_row_number(&self) -> u64 {
        self.csv_row_number
    }

    fn primary_key(&self) -> Option<String> {
        self.agency_id.clone()
    }

    fn format_key(key: &String) -> String {
        key.clone()
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "agency_id" => self.agency_id.as_deref(),
            "agency_name" => Some(&self.agency_name),
            "agency_url" => Some(&self.agency_url),
            "agency_timezone" => Some(&self.agency_timezone),
            "agency_lang" => self.agency_lang.as_deref(),
            "agency_phone" => self.agency_phone.as_deref(),
            "agency_fare_url" => self.agency_fare_url.as_deref(),
            "agency_email" => self.agency_email.as_deref(),
            _ => None,
        }
    }
}
