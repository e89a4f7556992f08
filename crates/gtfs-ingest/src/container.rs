//! Typed, indexed entity collections.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use gtfs_model::{
    Agency, Calendar, CalendarDate, GtfsEntity, Notice, NoticeContainer, Route, Stop, StopTime,
    Trip,
};

/// Load outcome of a table. Exactly one holds per container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableStatus {
    /// The header was valid; rows may still have been discarded.
    Normal,
    EmptyFile,
    MissingFile,
    InvalidHeaders,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Normal => "normal",
            TableStatus::EmptyFile => "empty_file",
            TableStatus::MissingFile => "missing_file",
            TableStatus::InvalidHeaders => "invalid_headers",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The entities of one table, in file order, indexed by primary key.
///
/// On duplicate keys the first entity stays in the index while every entity
/// is kept in [`entities`](Self::entities).
#[derive(Debug, Clone)]
pub struct TableContainer<T: GtfsEntity> {
    entities: Vec<T>,
    index: HashMap<T::Key, usize>,
    status: TableStatus,
}

impl<T: GtfsEntity> TableContainer<T> {
    fn with_status(status: TableStatus) -> Self {
        Self {
            entities: Vec::new(),
            index: HashMap::new(),
            status,
        }
    }

    pub fn for_missing_file() -> Self {
        Self::with_status(TableStatus::MissingFile)
    }

    pub fn for_empty_file() -> Self {
        Self::with_status(TableStatus::EmptyFile)
    }

    pub fn for_invalid_headers() -> Self {
        Self::with_status(TableStatus::InvalidHeaders)
    }

    /// Index `entities` by primary key, reporting `duplicate_key` on collisions.
    pub fn for_entities(entities: Vec<T>, notices: &NoticeContainer) -> Self {
        let mut index = HashMap::with_capacity(entities.len());
        for (position, entity) in entities.iter().enumerate() {
            let Some(key) = entity.primary_key() else {
                continue;
            };
            if index.contains_key(&key) {
                notices.add(Notice::DuplicateKey {
                    filename: T::SCHEMA.filename.to_string(),
                    csv_row_number: entity.csv_row_number(),
                    field_name: T::SCHEMA.primary_key_name().unwrap_or_default(),
                    field_value: T::format_key(&key),
                });
            } else {
                index.insert(key, position);
            }
        }
        Self {
            entities,
            index,
            status: TableStatus::Normal,
        }
    }

    pub fn filename(&self) -> &'static str {
        T::SCHEMA.filename
    }

    pub fn status(&self) -> TableStatus {
        self.status
    }

    pub fn is_normal(&self) -> bool {
        self.status == TableStatus::Normal
    }

    pub fn is_missing_file(&self) -> bool {
        self.status == TableStatus::MissingFile
    }

    pub fn is_empty_file(&self) -> bool {
        self.status == TableStatus::EmptyFile
    }

    pub fn has_invalid_headers(&self) -> bool {
        self.status == TableStatus::InvalidHeaders
    }

    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Entity with the given primary key; the first one on duplicates.
    pub fn get<Q>(&self, key: &Q) -> Option<&T>
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index
            .get(key)
            .and_then(|&position| self.entities.get(position))
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        T::Key: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }
}

impl<T: GtfsEntity> Default for TableContainer<T> {
    fn default() -> Self {
        Self::for_missing_file()
    }
}

impl TableContainer<Agency> {
    pub fn by_agency_id(&self, agency_id: &str) -> Option<&Agency> {
        self.get(agency_id)
    }
}

impl TableContainer<Stop> {
    pub fn by_stop_id(&self, stop_id: &str) -> Option<&Stop> {
        self.get(stop_id)
    }
}

impl TableContainer<Route> {
    pub fn by_route_id(&self, route_id: &str) -> Option<&Route> {
        self.get(route_id)
    }
}

impl TableContainer<Trip> {
    pub fn by_trip_id(&self, trip_id: &str) -> Option<&Trip> {
        self.get(trip_id)
    }
}

impl TableContainer<Calendar> {
    pub fn by_service_id(&self, service_id: &str) -> Option<&Calendar> {
        self.get(service_id)
    }
}

impl TableContainer<CalendarDate> {
    /// Every exception of a service, in file order.
    pub fn by_service_id<'a>(
        &'a self,
        service_id: &'a str,
    ) -> impl Iterator<Item = &'a CalendarDate> + 'a {
        self.entities
            .iter()
            .filter(move |date| date.service_id == service_id)
    }
}

impl TableContainer<StopTime> {
    pub fn by_trip_id_and_stop_sequence(
        &self,
        trip_id: &str,
        stop_sequence: i32,
    ) -> Option<&StopTime> {
        self.get(&(trip_id.to_string(), stop_sequence))
    }
}
