//! GTFS table loading.
//!
//! This crate turns the raw CSV content of a feed into typed, indexed
//! entity containers while reporting every problem as a notice.
//!
//! # Features
//!
//! - **Header validation**: columns are matched by name against the table schema
//! - **Row parsing**: typed extraction with defaults and range checks
//! - **Containers**: entities in file order with an O(1) primary key index
//! - **Feed loading**: all tables at once, optionally on the rayon pool
//!
//! # Example
//!
//! ```
//! use gtfs_ingest::{TableContainer, TableLoader};
//! use gtfs_model::{NoticeContainer, Stop};
//!
//! let content = "stop_id,stop_name,stop_lat,stop_lon\ns1,Main St,23.45,-50.55\n";
//! let notices = NoticeContainer::new();
//! let stops: TableContainer<Stop> = TableLoader::default().load(Some(content.as_bytes()), &notices);
//!
//! assert!(notices.is_empty());
//! assert_eq!(stops.by_stop_id("s1").and_then(|stop| stop.stop_lat), Some(23.45));
//! ```

mod container;
mod csv;
mod feed;
mod loader;
mod row;
mod tables;

// === Containers ===
pub use container::{TableContainer, TableStatus};

// === Loading ===
pub use feed::{FeedInput, GtfsFeedContainer, GtfsFeedLoader};
pub use loader::TableLoader;
pub use row::RowParser;
pub use tables::FromRow;

// === CSV ===
pub use crate::csv::{ColumnIndex, validate_header};
