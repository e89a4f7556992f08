use serde::Serialize;

use crate::enums::{LocationType, WheelchairBoarding};
use crate::schema::{FieldSchema, FieldType, Presence, TableSchema};
use crate::tables::GtfsEntity;

/// A stop, station, entrance or other location, `stops.txt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub csv_row_number: u64,
    pub stop_id: String,
    pub stop_code: Option<String>,
    pub stop_name: Option<String>,
    pub stop_desc: Option<String>,
    pub stop_lat: Option<f64>,
    pub stop_lon: Option<f64>,
    pub zone_id: Option<String>,
    pub stop_url: Option<String>,
    pub location_type: LocationType,
    pub parent_station: Option<String>,
    pub stop_timezone: Option<String>,
    pub wheelchair_boarding: WheelchairBoarding,
    pub platform_code: Option<String>,
}

impl Stop {
    pub const FILENAME: &'static str = "stops.txt";

    pub const STOP_ID: FieldSchema = FieldSchema::required("stop_id", FieldType::Id).primary_key();
    pub const STOP_CODE: FieldSchema = FieldSchema::optional("stop_code", FieldType::Text);
    pub const STOP_NAME: FieldSchema =
        FieldSchema::conditionally_required("stop_name", FieldType::Text);
    pub const STOP_DESC: FieldSchema = FieldSchema::optional("stop_desc", FieldType::Text);
    pub const STOP_LAT: FieldSchema =
        FieldSchema::conditionally_required("stop_lat", FieldType::Latitude);
    pub const STOP_LON: FieldSchema =
        FieldSchema::conditionally_required("stop_lon", FieldType::Longitude);
    pub const ZONE_ID: FieldSchema = FieldSchema::optional("zone_id", FieldType::Id);
    pub const STOP_URL: FieldSchema = FieldSchema::optional("stop_url", FieldType::Url);
    pub const LOCATION_TYPE: FieldSchema =
        FieldSchema::optional("location_type", FieldType::Enum).with_default("0");
    pub const PARENT_STATION: FieldSchema =
        FieldSchema::conditionally_required("parent_station", FieldType::Id)
            .foreign_key("stops.txt", "stop_id");
    pub const STOP_TIMEZONE: FieldSchema =
        FieldSchema::optional("stop_timezone", FieldType::Timezone);
    pub const WHEELCHAIR_BOARDING: FieldSchema =
        FieldSchema::optional("wheelchair_boarding", FieldType::Enum).with_default("0");
    pub const PLATFORM_CODE: FieldSchema = FieldSchema::optional("platform_code", FieldType::Text);

    /// Stations and platforms carry coordinates; generic nodes and boarding
    /// areas may omit them.
    pub fn has_location(&self) -> bool {
        self.stop_lat.is_some() && self.stop_lon.is_some()
    }
}

impl GtfsEntity for Stop {
    type Key = String;

    const SCHEMA: TableSchema = TableSchema {
        filename: Self::FILENAME,
        presence: Presence::Required,
        fields: &[
            Self::STOP_ID,
            Self::STOP_CODE,
            Self::STOP_NAME,
            Self::STOP_DESC,
            Self::STOP_LAT,
            Self::STOP_LON,
            Self::ZONE_ID,
            Self::STOP_URL,
            Self::LOCATION_TYPE,
            Self::PARENT_STATION,
            Self::STOP_TIMEZONE,
            Self::WHEELCHAIR_BOARDING,
            Self::PLATFORM_CODE,
        ],
    };

    fn csv_row_number(&self) -> u64 {
        self.csv_row_number
    }

    fn primary_key(&self) -> Option<String> {
        Some(self.stop_id.clone())
    }

    fn format_key(key: &String) -> String {
        key.clone()
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "stop_id" => Some(&self.stop_id),
            "stop_code" => self.stop_code.as_deref(),
            "stop_name" => self.stop_name.as_deref(),
            "stop_desc" => self.stop_desc.as_deref(),
            "zone_id" => self.zone_id.as_deref(),
            "stop_url" => self.stop_url.as_deref(),
            "parent_station" => self.parent_station.as_deref(),
            "stop_timezone" => self.stop_timezone.as_deref(),
            "platform_code" => self.platform_code.as_deref(),
            _ => None,
        }
    }
}
