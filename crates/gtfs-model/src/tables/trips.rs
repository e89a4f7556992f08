use serde::Serialize;

use crate::enums::{BikesAllowed, DirectionId, WheelchairBoarding};
use crate::schema::{FieldSchema, FieldType, Presence, TableSchema};
use crate::tables::GtfsEntity;

/// A trip on a route, `trips.txt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub csv_row_number: u64,
    pub route_id: String,
    pub service_id: String,
    pub trip_id: String,
    pub trip_headsign: Option<String>,
    pub trip_short_name: Option<String>,
    pub direction_id: Option<DirectionId>,
    pub block_id: Option<String>,
    pub shape_id: Option<String>,
    pub wheelchair_accessible: WheelchairBoarding,
    pub bikes_allowed: BikesAllowed,
}

impl Trip {
    pub const FILENAME: &'static str = "trips.txt";

    pub const ROUTE_ID: FieldSchema =
        FieldSchema::required("route_id", FieldType::Id).foreign_key("routes.txt", "route_id");
    /// References `calendar.txt` or `calendar_dates.txt`, which a single
    /// foreign key cannot express.
    pub const SERVICE_ID: FieldSchema = FieldSchema::required("service_id", FieldType::Id);
    pub const TRIP_ID: FieldSchema = FieldSchema::required("trip_id", FieldType::Id).primary_key();
    pub const TRIP_HEADSIGN: FieldSchema = FieldSchema::optional("trip_headsign", FieldType::Text);
    pub const TRIP_SHORT_NAME: FieldSchema =
        FieldSchema::optional("trip_short_name", FieldType::Text);
    pub const DIRECTION_ID: FieldSchema = FieldSchema::optional("direction_id", FieldType::Enum);
    pub const BLOCK_ID: FieldSchema = FieldSchema::optional("block_id", FieldType::Id);
    pub const SHAPE_ID: FieldSchema = FieldSchema::conditionally_required("shape_id", FieldType::Id);
    pub const WHEELCHAIR_ACCESSIBLE: FieldSchema =
        FieldSchema::optional("wheelchair_accessible", FieldType::Enum).with_default("0");
    pub const BIKES_ALLOWED: FieldSchema =
        FieldSchema::optional("bikes_allowed", FieldType::Enum).with_default("0");
}

impl GtfsEntity for Trip {
    type Key = String;

    const SCHEMA: TableSchema = TableSchema {
        filename: Self::FILENAME,
        presence: Presence::Required,
        fields: &[
            Self::ROUTE_ID,
            Self::SERVICE_ID,
            Self::TRIP_ID,
            Self::TRIP_HEADSIGN,
            Self::TRIP_SHORT_NAME,
            Self::DIRECTION_ID,
            Self::BLOCK_ID,
            Self::SHAPE_ID,
            Self::WHEELCHAIR_ACCESSIBLE,
            Self::BIKES_ALLOWED,
        ],
    };

    fn csv_row_number(&self) -> u64 {
        self.csv_row_number
    }

    fn primary_key(&self) -> Option<String> {
        Some(self.trip_id.clone())
    }

    fn format_key(key: &String) -> String {
        key.clone()
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "route_id" => Some(&self.route_id),
            "service_id" => Some(&self.service_id),
            "trip_id" => Some(&self.trip_id),
            "trip_headsign" => self.trip_headsign.as_deref(),
            "trip_short_name" => self.trip_short_name.as_deref(),
            "block_id" => self.block_id.as_deref(),
            "shape_id" => self.shape_id.as_deref(),
            _ => None,
        }
    }
}
