//! Built-in domain validators.
//!
//! Each module exposes the registration constant(s) that bind its validator
//! to the tables it reads.

pub mod date_range;
pub mod foreign_keys;
pub mod route_names;
pub mod stop_time_departure;
pub mod stop_time_increasing_times;
