//! GTFS feed validation.
//!
//! Validators check cross-row and cross-table rules over a loaded
//! [`GtfsFeedContainer`](gtfs_ingest::GtfsFeedContainer). The
//! [`ValidationEngine`] runs them in isolation, optionally on the rayon pool,
//! and merges their notices deterministically.
//!
//! # Example
//!
//! ```
//! use gtfs_ingest::FeedInput;
//! use gtfs_model::ValidationConfig;
//! use gtfs_validate::validate_feed;
//!
//! let input = FeedInput::new()
//!     .with_file("routes.txt", "route_id,route_type\nr1,3\n");
//! let report = validate_feed(&input, ValidationConfig::default());
//!
//! let codes = report.notices.codes();
//! assert!(codes.contains(&"missing_required_file"));
//! assert!(codes.contains(&"route_both_short_and_long_name_missing"));
//! assert_eq!(report.summary.validators_failed, 0);
//! ```

pub mod engine;
pub mod validator;
pub mod validators;

pub use engine::{ValidationEngine, ValidationReport, ValidationSummary, validate_feed};
pub use validator::{
    BuildValidator, Validator, ValidatorRegistration, ValidatorRegistry, default_registry,
};
