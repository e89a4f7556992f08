//! Typed entities for each supported GTFS file.
//!
//! Every entity carries its static [`TableSchema`] and the CSV row it was
//! read from. Optional columns without a schema default are `Option`s;
//! columns with a default hold the default when the cell was empty.

use std::fmt::Debug;
use std::hash::Hash;

use crate::schema::TableSchema;

mod agency;
mod calendar;
mod calendar_dates;
mod feed_info;
mod routes;
mod stop_times;
mod stops;
mod trips;

pub use agency::Agency;
pub use calendar::Calendar;
pub use calendar_dates::CalendarDate;
pub use feed_info::FeedInfo;
pub use routes::Route;
pub use stop_times::StopTime;
pub use stops::Stop;
pub use trips::Trip;

/// Shared behavior of all GTFS entities.
pub trait GtfsEntity: Debug + Clone + Send + Sync + 'static {
    /// Key type of the primary key index.
    type Key: Debug + Clone + Eq + Hash + Send + Sync;

    const SCHEMA: TableSchema;

    /// 1-based row in the source file (the header is row 1).
    fn csv_row_number(&self) -> u64;

    /// Primary key of this entity, `None` if the table is unkeyed or the
    /// key column was left empty.
    fn primary_key(&self) -> Option<Self::Key>;

    /// Key values in schema order, comma-joined.
    fn format_key(key: &Self::Key) -> String;

    /// Value of a textual column by name, used by reference checks.
    fn text_field(&self, name: &str) -> Option<&str>;
}

/// Every schema the loader knows about, in loading order.
pub const ALL_SCHEMAS: &[TableSchema] = &[
    Agency::SCHEMA,
    Stop::SCHEMA,
    Route::SCHEMA,
    Trip::SCHEMA,
    StopTime::SCHEMA,
    Calendar::SCHEMA,
    CalendarDate::SCHEMA,
    FeedInfo::SCHEMA,
];

/// Look up a known schema by filename.
pub fn schema_for(filename: &str) -> Option<&'static TableSchema> {
    ALL_SCHEMAS.iter().find(|schema| schema.filename == filename)
}
