//! Type-safe enumerations for GTFS integer codes.
//!
//! Many GTFS columns are integers drawn from a closed set. Each enum maps
//! those integers to variants with `from_number`, which returns `None` for
//! values outside of the set instead of falling back to a default member.
//! Callers treat `None` the same way as a missing or invalid field.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::FieldValue;

/// Shared behavior of every GTFS enumeration.
pub trait GtfsEnum: Sized + Copy {
    /// Map an integer code to a variant, `None` if the code is unknown.
    fn from_number(value: i32) -> Option<Self>;

    /// The integer code of this variant.
    fn number(self) -> i32;
}

macro_rules! gtfs_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident = $value:literal,
            )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                $variant,
            )+
        }

        impl $name {
            pub fn from_number(value: i32) -> Option<Self> {
                match value {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            pub fn number(self) -> i32 {
                match self {
                    $( Self::$variant => $value, )+
                }
            }
        }

        impl GtfsEnum for $name {
            fn from_number(value: i32) -> Option<Self> {
                $name::from_number(value)
            }

            fn number(self) -> i32 {
                $name::number(self)
            }
        }

        impl FieldValue for $name {
            fn parse_field(raw: &str) -> Result<Self, ParseError> {
                let value: i32 = raw
                    .parse()
                    .map_err(|_| ParseError::InvalidInteger(raw.to_string()))?;
                $name::from_number(value)
                    .ok_or_else(|| ParseError::UnexpectedEnumValue(raw.to_string()))
            }
        }
    };
}

gtfs_enum! {
    /// Kind of transportation used on a route. See `routes.txt` `route_type`.
    pub enum RouteType {
        /// Tram, streetcar, light rail.
        LightRail = 0,
        /// Subway, metro.
        Subway = 1,
        /// Intercity or long-distance rail.
        Rail = 2,
        /// Short- and long-distance bus routes.
        Bus = 3,
        /// Short- and long-distance boat service.
        Ferry = 4,
        /// Street-level rail cars where the cable runs beneath the vehicle.
        CableTram = 5,
        /// Gondola, aerial tramway.
        AerialLift = 6,
        /// Rail system designed for steep inclines.
        Funicular = 7,
        /// Electric buses that draw power from overhead wires.
        Trolleybus = 11,
        /// Railway in which the track consists of a single rail or beam.
        Monorail = 12,
    }
}

gtfs_enum! {
    /// Kind of location described by a `stops.txt` row.
    pub enum LocationType {
        /// Stop or platform (default when empty).
        StopOrPlatform = 0,
        /// A physical structure containing one or more platforms.
        Station = 1,
        /// Where passengers enter or exit a station from the street.
        EntranceOrExit = 2,
        /// A location within a station used to link pathways.
        GenericNode = 3,
        /// A specific location on a platform.
        BoardingArea = 4,
    }
}

gtfs_enum! {
    /// Whether a service runs on a given weekday. See `calendar.txt`.
    pub enum CalendarService {
        NotAvailable = 0,
        Available = 1,
    }
}

gtfs_enum! {
    /// Whether a `calendar_dates.txt` row adds or removes a service date.
    pub enum ExceptionType {
        Added = 1,
        Removed = 2,
    }
}

gtfs_enum! {
    /// Pickup or drop off method at a stop. See `stop_times.txt`.
    pub enum PickupDropOffType {
        /// Regularly scheduled (default when empty).
        Regular = 0,
        NotAvailable = 1,
        /// Must phone agency to arrange.
        MustPhone = 2,
        /// Must coordinate with driver to arrange.
        MustCoordinateWithDriver = 3,
    }
}

gtfs_enum! {
    /// Whether a rider can board or alight anywhere along the vehicle's path.
    pub enum ContinuousPickupDropOff {
        Allowed = 0,
        /// No continuous stopping (default when empty).
        NotAvailable = 1,
        MustPhone = 2,
        OnRequestToDriver = 3,
    }
}

gtfs_enum! {
    /// Whether the stop times are exact or approximate.
    pub enum Timepoint {
        Approximate = 0,
        /// Times are considered exact (default when empty).
        Exact = 1,
    }
}

gtfs_enum! {
    /// Direction of travel of a trip, only for display.
    pub enum DirectionId {
        Outbound = 0,
        Inbound = 1,
    }
}

gtfs_enum! {
    /// Wheelchair accessibility of a stop or a trip.
    pub enum WheelchairBoarding {
        /// No accessibility information (default when empty).
        NoInformation = 0,
        Accessible = 1,
        NotAccessible = 2,
    }
}

gtfs_enum! {
    /// Whether bikes are allowed on a trip.
    pub enum BikesAllowed {
        /// No bike information (default when empty).
        NoInformation = 0,
        Allowed = 1,
        NotAllowed = 2,
    }
}
