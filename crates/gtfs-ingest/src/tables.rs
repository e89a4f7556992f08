//! Row-to-entity constructors for every supported table.
//!
//! All fields are read before the entity is assembled so that every problem
//! of a row is reported, not only the first one.

use gtfs_model::{
    Agency, Calendar, CalendarDate, FeedInfo, GtfsEntity, Route, Stop, StopTime, Trip,
};

use crate::row::RowParser;

/// An entity that can be built from a CSV row.
pub trait FromRow: GtfsEntity {
    /// Build the entity, `None` if a required field is missing or invalid.
    fn from_row(row: &RowParser<'_>) -> Option<Self>;
}

impl FromRow for Agency {
    fn from_row(row: &RowParser<'_>) -> Option<Self> {
        let agency_id = row.optional(&Self::AGENCY_ID);
        let agency_name = row.required(&Self::AGENCY_NAME);
        let agency_url = row.required(&Self::AGENCY_URL);
        let agency_timezone = row.required(&Self::AGENCY_TIMEZONE);
        let agency_lang = row.optional(&Self::AGENCY_LANG);
        let agency_phone = row.optional(&Self::AGENCY_PHONE);
        let agency_fare_url = row.optional(&Self::AGENCY_FARE_URL);
        let agency_email = row.optional(&Self::AGENCY_EMAIL);
        Some(Agency {
            csv_row_number: row.csv_row_number(),
            agency_id,
            agency_name: agency_name?,
            agency_url: agency_url?,
            agency_timezone: agency_timezone?,
            agency_lang,
            agency_phone,
            agency_fare_url,
            agency_email,
        })
    }
}

impl FromRow for Stop {
    fn from_row(row: &RowParser<'_>) -> Option<Self> {
        let stop_id = row.required(&Self::STOP_ID);
        let stop_code = row.optional(&Self::STOP_CODE);
        let stop_name = row.optional(&Self::STOP_NAME);
        let stop_desc = row.optional(&Self::STOP_DESC);
        let stop_lat = row.optional(&Self::STOP_LAT);
        let stop_lon = row.optional(&Self::STOP_LON);
        let zone_id = row.optional(&Self::ZONE_ID);
        let stop_url = row.optional(&Self::STOP_URL);
        let location_type = row.optional(&Self::LOCATION_TYPE);
        let parent_station = row.optional(&Self::PARENT_STATION);
        let stop_timezone = row.optional(&Self::STOP_TIMEZONE);
        let wheelchair_boarding = row.optional(&Self::WHEELCHAIR_BOARDING);
        let platform_code = row.optional(&Self::PLATFORM_CODE);
        Some(Stop {
            csv_row_number: row.csv_row_number(),
            stop_id: stop_id?,
            stop_code,
            stop_name,
            stop_desc,
            stop_lat,
            stop_lon,
            zone_id,
            stop_url,
            location_type: location_type?,
            parent_station,
            stop_timezone,
            wheelchair_boarding: wheelchair_boarding?,
            platform_code,
        })
    }
}

impl FromRow for Route {
    fn from_row(row: &RowParser<'_>) -> Option<Self> {
        let route_id = row.required(&Self::ROUTE_ID);
        let agency_id = row.optional(&Self::AGENCY_ID);
        let route_short_name = row.optional(&Self::ROUTE_SHORT_NAME);
        let route_long_name = row.optional(&Self::ROUTE_LONG_NAME);
        let route_desc = row.optional(&Self::ROUTE_DESC);
        let route_type = row.required(&Self::ROUTE_TYPE);
        let route_url = row.optional(&Self::ROUTE_URL);
        let route_color = row.optional(&Self::ROUTE_COLOR);
        let route_text_color = row.optional(&Self::ROUTE_TEXT_COLOR);
        let route_sort_order = row.optional(&Self::ROUTE_SORT_ORDER);
        let continuous_pickup = row.optional(&Self::CONTINUOUS_PICKUP);
        let continuous_drop_off = row.optional(&Self::CONTINUOUS_DROP_OFF);
        Some(Route {
            csv_row_number: row.csv_row_number(),
            route_id: route_id?,
            agency_id,
            route_short_name,
            route_long_name,
            route_desc,
            route_type: route_type?,
            route_url,
            route_color: route_color?,
            route_text_color: route_text_color?,
            route_sort_order,
            continuous_pickup: continuous_pickup?,
            continuous_drop_off: continuous_drop_off?,
        })
    }
}

impl FromRow for Trip {
    fn from_row(row: &RowParser<'_>) -> Option<Self> {
        let route_id = row.required(&Self::ROUTE_ID);
        let service_id = row.required(&Self::SERVICE_ID);
        let trip_id = row.required(&Self::TRIP_ID);
        let trip_headsign = row.optional(&Self::TRIP_HEADSIGN);
        let trip_short_name = row.optional(&Self::TRIP_SHORT_NAME);
        let direction_id = row.optional(&Self::DIRECTION_ID);
        let block_id = row.optional(&Self::BLOCK_ID);
        let shape_id = row.optional(&Self::SHAPE_ID);
        let wheelchair_accessible = row.optional(&Self::WHEELCHAIR_ACCESSIBLE);
        let bikes_allowed = row.optional(&Self::BIKES_ALLOWED);
        Some(Trip {
            csv_row_number: row.csv_row_number(),
            route_id: route_id?,
            service_id: service_id?,
            trip_id: trip_id?,
            trip_headsign,
            trip_short_name,
            direction_id,
            block_id,
            shape_id,
            wheelchair_accessible: wheelchair_accessible?,
            bikes_allowed: bikes_allowed?,
        })
    }
}

impl FromRow for StopTime {
    fn from_row(row: &RowParser<'_>) -> Option<Self> {
        let trip_id = row.required(&Self::TRIP_ID);
        let arrival_time = row.optional(&Self::ARRIVAL_TIME);
        let departure_time = row.optional(&Self::DEPARTURE_TIME);
        let stop_id = row.required(&Self::STOP_ID);
        let stop_sequence = row.required(&Self::STOP_SEQUENCE);
        let stop_headsign = row.optional(&Self::STOP_HEADSIGN);
        let pickup_type = row.optional(&Self::PICKUP_TYPE);
        let drop_off_type = row.optional(&Self::DROP_OFF_TYPE);
        let continuous_pickup = row.optional(&Self::CONTINUOUS_PICKUP);
        let continuous_drop_off = row.optional(&Self::CONTINUOUS_DROP_OFF);
        let shape_dist_traveled = row.optional(&Self::SHAPE_DIST_TRAVELED);
        let timepoint = row.optional(&Self::TIMEPOINT);
        Some(StopTime {
            csv_row_number: row.csv_row_number(),
            trip_id: trip_id?,
            arrival_time,
            departure_time,
            stop_id: stop_id?,
            stop_sequence: stop_sequence?,
            stop_headsign,
            pickup_type: pickup_type?,
            drop_off_type: drop_off_type?,
            continuous_pickup,
            continuous_drop_off,
            shape_dist_traveled,
            timepoint: timepoint?,
        })
    }
}

impl FromRow for Calendar {
    fn from_row(row: &RowParser<'_>) -> Option<Self> {
        let service_id = row.required(&Self::SERVICE_ID);
        let monday = row.required(&Self::MONDAY);
        let tuesday = row.required(&Self::TUESDAY);
        let wednesday = row.required(&Self::WEDNESDAY);
        let thursday = row.required(&Self::THURSDAY);
        let friday = row.required(&Self::FRIDAY);
        let saturday = row.required(&Self::SATURDAY);
        let sunday = row.required(&Self::SUNDAY);
        let start_date = row.required(&Self::START_DATE);
        let end_date = row.required(&Self::END_DATE);
        Some(Calendar {
            csv_row_number: row.csv_row_number(),
            service_id: service_id?,
            monday: monday?,
            tuesday: tuesday?,
            wednesday: wednesday?,
            thursday: thursday?,
            friday: friday?,
            saturday: saturday?,
            sunday: sunday?,
            start_date: start_date?,
            end_date: end_date?,
        })
    }
}

impl FromRow for CalendarDate {
    fn from_row(row: &RowParser<'_>) -> Option<Self> {
        let service_id = row.required(&Self::SERVICE_ID);
        let date = row.required(&Self::DATE);
        let exception_type = row.required(&Self::EXCEPTION_TYPE);
        Some(CalendarDate {
            csv_row_number: row.csv_row_number(),
            service_id: service_id?,
            date: date?,
            exception_type: exception_type?,
        })
    }
}

impl FromRow for FeedInfo {
    fn from_row(row: &RowParser<'_>) -> Option<Self> {
        let feed_publisher_name = row.required(&Self::FEED_PUBLISHER_NAME);
        let feed_publisher_url = row.required(&Self::FEED_PUBLISHER_URL);
        let feed_lang = row.required(&Self::FEED_LANG);
        let default_lang = row.optional(&Self::DEFAULT_LANG);
        let feed_start_date = row.optional(&Self::FEED_START_DATE);
        let feed_end_date = row.optional(&Self::FEED_END_DATE);
        let feed_version = row.optional(&Self::FEED_VERSION);
        let feed_contact_email = row.optional(&Self::FEED_CONTACT_EMAIL);
        let feed_contact_url = row.optional(&Self::FEED_CONTACT_URL);
        Some(FeedInfo {
            csv_row_number: row.csv_row_number(),
            feed_publisher_name: feed_publisher_name?,
            feed_publisher_url: feed_publisher_url?,
            feed_lang: feed_lang?,
            default_lang,
            feed_start_date,
            feed_end_date,
            feed_version,
            feed_contact_email,
            feed_contact_url,
        })
    }
}
