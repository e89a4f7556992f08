//! GTFS data model for feed validation.
//!
//! This crate holds everything that is pure data:
//! - **Value types**: dates, service times, colors and integer enumerations
//! - **Notices**: the closed set of problems a validation run can report
//! - **Schemas**: static per-table descriptions of columns and keys
//! - **Entities**: typed records for each supported GTFS file
//! - **Options**: loader and validation configuration
//!
//! # Example
//!
//! ```
//! use gtfs_model::{GtfsTime, Notice, NoticeContainer};
//!
//! let time: GtfsTime = "25:10:00".parse().unwrap();
//! assert_eq!(time.to_string(), "25:10:00");
//!
//! let notices = NoticeContainer::new();
//! notices.add(Notice::EmptyFile { filename: "stops.txt".to_string() });
//! assert!(notices.has_errors());
//! ```

pub mod enums;
pub mod error;
pub mod notice;
pub mod options;
pub mod schema;
pub mod tables;
pub mod types;

// === Errors ===
pub use error::{ConfigError, ParseError};

// === Value Types ===
pub use enums::{
    BikesAllowed, CalendarService, ContinuousPickupDropOff, DirectionId, ExceptionType, GtfsEnum,
    LocationType, PickupDropOffType, RouteType, Timepoint, WheelchairBoarding,
};
pub use types::{FieldValue, GtfsColor, GtfsDate, GtfsTime};

// === Notices ===
pub use notice::{ContextValue, Notice, NoticeContainer, Severity};

// === Schemas & Entities ===
pub use schema::{FieldSchema, FieldType, ForeignKey, Presence, TableSchema};
pub use tables::{
    ALL_SCHEMAS, Agency, Calendar, CalendarDate, FeedInfo, GtfsEntity, Route, Stop, StopTime, Trip,
    schema_for,
};

// === Options ===
pub use options::{LoaderOptions, ValidationConfig};
