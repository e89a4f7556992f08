use serde::Serialize;

use crate::enums::{ContinuousPickupDropOff, PickupDropOffType, Timepoint};
use crate::schema::{FieldSchema, FieldType, Presence, TableSchema};
use crate::tables::GtfsEntity;
use crate::types::GtfsTime;

/// A vehicle's arrival at and departure from a stop, `stop_times.txt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StopTime {
    pub csv_row_number: u64,
    pub trip_id: String,
    pub arrival_time: Option<GtfsTime>,
    pub departure_time: Option<GtfsTime>,
    pub stop_id: String,
    pub stop_sequence: i32,
    pub stop_headsign: Option<String>,
    pub pickup_type: PickupDropOffType,
    pub drop_off_type: PickupDropOffType,
    /// Inherits the route's behavior when empty.
    pub continuous_pickup: Option<ContinuousPickupDropOff>,
    pub continuous_drop_off: Option<ContinuousPickupDropOff>,
    pub shape_dist_traveled: Option<f64>,
    pub timepoint: Timepoint,
}

impl StopTime {
    pub const FILENAME: &'static str = "stop_times.txt";

    pub const TRIP_ID: FieldSchema = FieldSchema::required("trip_id", FieldType::Id)
        .primary_key()
        .foreign_key("trips.txt", "trip_id");
    pub const ARRIVAL_TIME: FieldSchema =
        FieldSchema::conditionally_required("arrival_time", FieldType::Time);
    pub const DEPARTURE_TIME: FieldSchema =
        FieldSchema::conditionally_required("departure_time", FieldType::Time);
    pub const STOP_ID: FieldSchema =
        FieldSchema::required("stop_id", FieldType::Id).foreign_key("stops.txt", "stop_id");
    pub const STOP_SEQUENCE: FieldSchema =
        FieldSchema::required("stop_sequence", FieldType::NonNegativeInteger).primary_key();
    pub const STOP_HEADSIGN: FieldSchema = FieldSchema::optional("stop_headsign", FieldType::Text);
    pub const PICKUP_TYPE: FieldSchema =
        FieldSchema::optional("pickup_type", FieldType::Enum).with_default("0");
    pub const DROP_OFF_TYPE: FieldSchema =
        FieldSchema::optional("drop_off_type", FieldType::Enum).with_default("0");
    pub const CONTINUOUS_PICKUP: FieldSchema =
        FieldSchema::optional("continuous_pickup", FieldType::Enum);
    pub const CONTINUOUS_DROP_OFF: FieldSchema =
        FieldSchema::optional("continuous_drop_off", FieldType::Enum);
    pub const SHAPE_DIST_TRAVELED: FieldSchema =
        FieldSchema::optional("shape_dist_traveled", FieldType::NonNegativeFloat);
    pub const TIMEPOINT: FieldSchema =
        FieldSchema::optional("timepoint", FieldType::Enum).with_default("1");
}

impl GtfsEntity for StopTime {
    type Key = (String, i32);

    const SCHEMA: TableSchema = TableSchema {
        filename: Self::FILENAME,
        presence: Presence::Required,
        fields: &[
            Self::TRIP_ID,
            Self::ARRIVAL_TIME,
            Self::DEPARTURE_TIME,
            Self::STOP_ID,
            Self::STOP_SEQUENCE,
            Self::STOP_HEADSIGN,
            Self::PICKUP_TYPE,
            Self::DROP_OFF_TYPE,
            Self::CONTINUOUS_PICKUP,
            Self::CONTINUOUS_DROP_OFF,
            Self::SHAPE_DIST_TRAVELED,
            Self::TIMEPOINT,
        ],
    };

    fn csv_row_number(&self) -> u64 {
        self.csv_row_number
    }

    fn primary_key(&self) -> Option<(String, i32)> {
        Some((self.trip_id.clone(), self.stop_sequence))
    }

    fn format_key((trip_id, stop_sequence): &(String, i32)) -> String {
        format!("{trip_id},{stop_sequence}")
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "trip_id" => Some(&self.trip_id),
            "stop_id" => Some(&self.stop_id),
            "stop_headsign" => self.stop_headsign.as_deref(),
            _ => None,
        }
    }
}
