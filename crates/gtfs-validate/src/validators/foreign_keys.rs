//! Referential integrity between tables.
//!
//! Every field that declares a [`ForeignKey`](gtfs_model::ForeignKey) in its
//! schema gets one registration here. `trips.service_id` has no single parent
//! table and is checked against the union of `calendar.txt` and
//! `calendar_dates.txt`.

use std::collections::HashSet;

use anyhow::{Result, anyhow};
use gtfs_ingest::{GtfsFeedContainer, TableContainer};
use gtfs_model::{
    Agency, Calendar, CalendarDate, FieldSchema, GtfsEntity, Notice, NoticeContainer, Route, Stop,
    StopTime, Trip,
};

use crate::validator::{Validator, ValidatorRegistration};

pub const REGISTRATIONS: &[ValidatorRegistration] = &[
    ValidatorRegistration {
        name: "routes_agency_id_foreign_key",
        tables: &[Route::FILENAME, Agency::FILENAME],
        build: build_route_agency,
    },
    ValidatorRegistration {
        name: "trips_route_id_foreign_key",
        tables: &[Trip::FILENAME, Route::FILENAME],
        build: build_trip_route,
    },
    ValidatorRegistration {
        name: "trips_service_id_foreign_key",
        tables: &[Trip::FILENAME, Calendar::FILENAME, CalendarDate::FILENAME],
        build: build_trip_service,
    },
    ValidatorRegistration {
        name: "stop_times_trip_id_foreign_key",
        tables: &[StopTime::FILENAME, Trip::FILENAME],
        build: build_stop_time_trip,
    },
    ValidatorRegistration {
        name: "stop_times_stop_id_foreign_key",
        tables: &[StopTime::FILENAME, Stop::FILENAME],
        build: build_stop_time_stop,
    },
    ValidatorRegistration {
        name: "stops_parent_station_foreign_key",
        tables: &[Stop::FILENAME],
        build: build_parent_station,
    },
];

fn build_route_agency(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(ForeignKeyValidator::new(
        feed.routes(),
        feed.agency(),
        &Route::AGENCY_ID,
    ))
}

fn build_trip_route(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(ForeignKeyValidator::new(
        feed.trips(),
        feed.routes(),
        &Trip::ROUTE_ID,
    ))
}

fn build_trip_service(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(ServiceIdValidator::new(feed))
}

fn build_stop_time_trip(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(ForeignKeyValidator::new(
        feed.stop_times(),
        feed.trips(),
        &StopTime::TRIP_ID,
    ))
}

fn build_stop_time_stop(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(ForeignKeyValidator::new(
        feed.stop_times(),
        feed.stops(),
        &StopTime::STOP_ID,
    ))
}

fn build_parent_station(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(ForeignKeyValidator::new(
        feed.stops(),
        feed.stops(),
        &Stop::PARENT_STATION,
    ))
}

/// Checks that every non-empty `field` value of `child` is a primary key of
/// `parent`.
///
/// Nothing is reported when the parent file is missing; the loader already
/// flagged it.
pub struct ForeignKeyValidator<'a, C: GtfsEntity, P: GtfsEntity<Key = String>> {
    child: &'a TableContainer<C>,
    parent: &'a TableContainer<P>,
    field: &'static FieldSchema,
}

impl<'a, C, P> ForeignKeyValidator<'a, C, P>
where
    C: GtfsEntity,
    P: GtfsEntity<Key = String>,
{
    pub fn new(
        child: &'a TableContainer<C>,
        parent: &'a TableContainer<P>,
        field: &'static FieldSchema,
    ) -> Self {
        Self {
            child,
            parent,
            field,
        }
    }
}

impl<C, P> Validator for ForeignKeyValidator<'_, C, P>
where
    C: GtfsEntity,
    P: GtfsEntity<Key = String>,
{
    fn validate(&self, notices: &NoticeContainer) -> Result<()> {
        let target = self.field.foreign_key.ok_or_else(|| {
            anyhow!(
                "{}.{} does not reference another table",
                self.child.filename(),
                self.field.name
            )
        })?;
        if self.parent.is_missing_file() {
            return Ok(());
        }

        for entity in self.child.entities() {
            if let Some(value) = entity.text_field(self.field.name)
                && !self.parent.contains_key(value)
            {
                notices.add(Notice::ForeignKeyViolation {
                    child_filename: self.child.filename().to_string(),
                    child_field_name: self.field.name.to_string(),
                    parent_filename: target.table.to_string(),
                    parent_field_name: target.field.to_string(),
                    field_value: value.to_string(),
                    csv_row_number: entity.csv_row_number(),
                });
            }
        }
        Ok(())
    }
}

/// `trips.service_id` must be defined by `calendar.txt` or
/// `calendar_dates.txt`.
pub struct ServiceIdValidator<'a> {
    trips: &'a TableContainer<Trip>,
    calendar: &'a TableContainer<Calendar>,
    calendar_dates: &'a TableContainer<CalendarDate>,
}

impl<'a> ServiceIdValidator<'a> {
    pub const PARENT_FILENAME: &'static str = "calendar.txt or calendar_dates.txt";

    pub fn new(feed: &'a GtfsFeedContainer) -> Self {
        Self {
            trips: feed.trips(),
            calendar: feed.calendar(),
            calendar_dates: feed.calendar_dates(),
        }
    }
}

impl Validator for ServiceIdValidator<'_> {
    fn validate(&self, notices: &NoticeContainer) -> Result<()> {
        if self.calendar.is_missing_file() && self.calendar_dates.is_missing_file() {
            return Ok(());
        }

        let dated: HashSet<&str> = self
            .calendar_dates
            .entities()
            .iter()
            .map(|date| date.service_id.as_str())
            .collect();
        for trip in self.trips.entities() {
            let service_id = trip.service_id.as_str();
            if !self.calendar.contains_key(service_id) && !dated.contains(service_id) {
                notices.add(Notice::ForeignKeyViolation {
                    child_filename: Trip::FILENAME.to_string(),
                    child_field_name: Trip::SERVICE_ID.name.to_string(),
                    parent_filename: Self::PARENT_FILENAME.to_string(),
                    parent_field_name: Calendar::SERVICE_ID.name.to_string(),
                    field_value: service_id.to_string(),
                    csv_row_number: trip.csv_row_number,
                });
            }
        }
        Ok(())
    }
}
