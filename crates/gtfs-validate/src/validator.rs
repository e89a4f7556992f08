//! Validator trait and registry.
//!
//! A [`Validator`] checks one rule over the tables it was built from and
//! reports violations as notices. Validators are registered explicitly in a
//! [`ValidatorRegistry`] together with the tables they read, so the engine
//! can skip them when a dependency could not be loaded.
//!
//! # Example
//!
//! ```
//! use gtfs_ingest::GtfsFeedContainer;
//! use gtfs_model::NoticeContainer;
//! use gtfs_validate::{Validator, ValidatorRegistration, ValidatorRegistry};
//!
//! struct AlwaysValid;
//!
//! impl Validator for AlwaysValid {
//!     fn validate(&self, _notices: &NoticeContainer) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! fn build(_feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
//!     Box::new(AlwaysValid)
//! }
//!
//! let mut registry = ValidatorRegistry::new();
//! registry.register(ValidatorRegistration {
//!     name: "always_valid",
//!     tables: &[],
//!     build,
//! });
//! assert_eq!(registry.len(), 1);
//! ```

use std::fmt;
use std::sync::OnceLock;

use anyhow::Result;
use gtfs_ingest::GtfsFeedContainer;
use gtfs_model::NoticeContainer;

use crate::validators::{
    date_range, foreign_keys, route_names, stop_time_departure, stop_time_increasing_times,
};

/// A single validation rule bound to its tables.
///
/// Returning `Err` (or panicking) is reported by the engine as a
/// `runtime_exception_in_validator` notice; other validators keep running.
pub trait Validator {
    fn validate(&self, notices: &NoticeContainer) -> Result<()>;
}

/// Constructor of a validator for a loaded feed.
pub type BuildValidator = for<'a> fn(&'a GtfsFeedContainer) -> Box<dyn Validator + 'a>;

/// A named validator with its declared table dependencies.
#[derive(Clone, Copy)]
pub struct ValidatorRegistration {
    /// Unique name, used in notices, logs and `disabled_validators`.
    pub name: &'static str,
    /// Filenames of the tables the validator reads.
    pub tables: &'static [&'static str],
    pub build: BuildValidator,
}

impl fmt::Debug for ValidatorRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorRegistration")
            .field("name", &self.name)
            .field("tables", &self.tables)
            .finish_non_exhaustive()
    }
}

/// Ordered list of validators. Notices are merged in this order.
#[derive(Debug, Clone, Default)]
pub struct ValidatorRegistry {
    registrations: Vec<ValidatorRegistration>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator.
    ///
    /// A registration whose name is already present replaces the earlier one
    /// in place.
    pub fn register(&mut self, registration: ValidatorRegistration) {
        match self
            .registrations
            .iter_mut()
            .find(|existing| existing.name == registration.name)
        {
            Some(existing) => *existing = registration,
            None => self.registrations.push(registration),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ValidatorRegistration> {
        self.registrations
            .iter()
            .find(|registration| registration.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidatorRegistration> {
        self.registrations.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registrations.iter().map(|registration| registration.name)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

static DEFAULT_REGISTRY: OnceLock<ValidatorRegistry> = OnceLock::new();

/// Registry with every built-in validator.
///
/// # Registered Validators
///
/// - Date ranges of `calendar.txt` and `feed_info.txt`
/// - Stop time chronology within a trip and within a row
/// - Every declared foreign key, plus `trips.service_id`
/// - Route names
pub fn default_registry() -> &'static ValidatorRegistry {
    DEFAULT_REGISTRY.get_or_init(build_default_registry)
}

fn build_default_registry() -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::new();
    registry.register(date_range::CALENDAR);
    registry.register(date_range::FEED_INFO);
    registry.register(stop_time_increasing_times::REGISTRATION);
    registry.register(stop_time_departure::REGISTRATION);
    for registration in foreign_keys::REGISTRATIONS {
        registry.register(*registration);
    }
    registry.register(route_names::REGISTRATION);
    registry
}
