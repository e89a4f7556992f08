use serde::Serialize;

use crate::schema::{FieldSchema, FieldType, Presence, TableSchema};
use crate::tables::GtfsEntity;
use crate::types::GtfsDate;

/// Dataset metadata, `feed_info.txt`. The table has no primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedInfo {
    pub csv_row_number: u64,
    pub feed_publisher_name: String,
    pub feed_publisher_url: String,
    pub feed_lang: String,
    pub default_lang: Option<String>,
    pub feed_start_date: Option<GtfsDate>,
    pub feed_end_date: Option<GtfsDate>,
    pub feed_version: Option<String>,
    pub feed_contact_email: Option<String>,
    pub feed_contact_url: Option<String>,
}

impl FeedInfo {
    pub const FILENAME: &'static str = "feed_info.txt";

    pub const FEED_PUBLISHER_NAME: FieldSchema =
        FieldSchema::required("feed_publisher_name", FieldType::Text);
    pub const FEED_PUBLISHER_URL: FieldSchema =
        FieldSchema::required("feed_publisher_url", FieldType::Url);
    pub const FEED_LANG: FieldSchema = FieldSchema::required("feed_lang", FieldType::LanguageCode);
    pub const DEFAULT_LANG: FieldSchema =
        FieldSchema::optional("default_lang", FieldType::LanguageCode);
    pub const FEED_START_DATE: FieldSchema =
        FieldSchema::optional("feed_start_date", FieldType::Date);
    pub const FEED_END_DATE: FieldSchema = FieldSchema::optional("feed_end_date", FieldType::Date);
    pub const FEED_VERSION: FieldSchema = FieldSchema::optional("feed_version", FieldType::Text);
    pub const FEED_CONTACT_EMAIL: FieldSchema =
        FieldSchema::optional("feed_contact_email", FieldType::Email);
    pub const FEED_CONTACT_URL: FieldSchema =
        FieldSchema::optional("feed_contact_url", FieldType::Url);
}

impl GtfsEntity for FeedInfo {
    type Key = String;

    const SCHEMA: TableSchema = TableSchema {
        filename: Self::FILENAME,
        presence: Presence::Optional,
        fields: &[
            Self::FEED_PUBLISHER_NAME,
            Self::FEED_PUBLISHER_URL,
            Self::FEED_LANG,
            Self::DEFAULT_LANG,
            Self::FEED_START_DATE,
            Self::FEED_END_DATE,
            Self::FEED_VERSION,
            Self::FEED_CONTACT_EMAIL,
            Self::FEED_CONTACT_URL,
        ],
    };

    fn csv_row_number(&self) -> u64 {
        self.csv_row_number
    }

    fn primary_key(&self) -> Option<String> {
        None
    }

    fn format_key(key: &String) -> String {
        key.clone()
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "feed_publisher_name" => Some(&self.feed_publisher_name),
            "feed_publisher_url" => Some(&self.feed_publisher_url),
            "feed_lang" => Some(&self.feed_lang),
            "default_lang" => self.default_lang.as_deref(),
            "feed_version" => self.feed_version.as_deref(),
            "feed_contact_email" => self.feed_contact_email.as_deref(),
            "feed_contact_url" => self.feed_contact_url.as_deref(),
            _ => None,
        }
    }
}
