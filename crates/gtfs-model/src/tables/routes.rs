use serde::Serialize;

use crate::enums::{ContinuousPickupDropOff, RouteType};
use crate::schema::{FieldSchema, FieldType, Presence, TableSchema};
use crate::tables::GtfsEntity;
use crate::types::GtfsColor;

/// A transit route, `routes.txt`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub csv_row_number: u64,
    pub route_id: String,
    pub agency_id: Option<String>,
    pub route_short_name: Option<String>,
    pub route_long_name: Option<String>,
    pub route_desc: Option<String>,
    pub route_type: RouteType,
    pub route_url: Option<String>,
    pub route_color: GtfsColor,
    pub route_text_color: GtfsColor,
    pub route_sort_order: Option<i32>,
    pub continuous_pickup: ContinuousPickupDropOff,
    pub continuous_drop_off: ContinuousPickupDropOff,
}

impl Route {
    pub const FILENAME: &'static str = "routes.txt";

    pub const ROUTE_ID: FieldSchema =
        FieldSchema::required("route_id", FieldType::Id).primary_key();
    pub const AGENCY_ID: FieldSchema =
        FieldSchema::conditionally_required("agency_id", FieldType::Id)
            .foreign_key("agency.txt", "agency_id");
    pub const ROUTE_SHORT_NAME: FieldSchema =
        FieldSchema::conditionally_required("route_short_name", FieldType::Text);
    pub const ROUTE_LONG_NAME: FieldSchema =
        FieldSchema::conditionally_required("route_long_name", FieldType::Text);
    pub const ROUTE_DESC: FieldSchema = FieldSchema::optional("route_desc", FieldType::Text);
    pub const ROUTE_TYPE: FieldSchema = FieldSchema::required("route_type", FieldType::Enum);
    pub const ROUTE_URL: FieldSchema = FieldSchema::optional("route_url", FieldType::Url);
    pub const ROUTE_COLOR: FieldSchema =
        FieldSchema::optional("route_color", FieldType::Color).with_default("FFFFFF");
    pub const ROUTE_TEXT_COLOR: FieldSchema =
        FieldSchema::optional("route_text_color", FieldType::Color).with_default("000000");
    pub const ROUTE_SORT_ORDER: FieldSchema =
        FieldSchema::optional("route_sort_order", FieldType::NonNegativeInteger);
    pub const CONTINUOUS_PICKUP: FieldSchema =
        FieldSchema::optional("continuous_pickup", FieldType::Enum).with_default("1");
    pub const CONTINUOUS_DROP_OFF: FieldSchema =
        FieldSchema::optional("continuous_drop_off", FieldType::Enum).with_default("1");
}

impl GtfsEntity for Route {
    type Key = String;

    const SCHEMA: TableSchema = TableSchema {
        filename: Self::FILENAME,
        presence: Presence::Required,
        fields: &[
            Self::ROUTE_ID,
            Self::AGENCY_ID,
            Self::ROUTE_SHORT_NAME,
            Self::ROUTE_LONG_NAME,
            Self::ROUTE_DESC,
            Self::ROUTE_TYPE,
            Self::ROUTE_URL,
            Self::ROUTE_COLOR,
            Self::ROUTE_TEXT_COLOR,
            Self::ROUTE_SORT_ORDER,
            Self::CONTINUOUS_PICKUP,
            Self::CONTINUOUS_DROP_OFF,
        ],
    };

    fn csv_row_number(&self) -> u64 {
        self.csv_row_number
    }

    fn primary_key(&self) -> Option<String> {
        Some(self.route_id.clone())
    }

    fn format_key(key: &String) -> String {
        key.clone()
    }

    fn text_field(&self, name: &str) -> Option<&str> {
        match name {
            "route_id" => Some(&self.route_id),
            "agency_id" => self.agency_id.as_deref(),
            "route_short_name" => self.route_short_name.as_deref(),
            "route_long_name" => self.route_long_name.as_deref(),
            "route_desc" => self.route_desc.as_deref(),
            "route_url" => self.route_url.as_deref(),
            _ => None,
        }
    }
}
