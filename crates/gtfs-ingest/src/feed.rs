//! Loading a whole feed into typed containers.

use std::collections::BTreeMap;
use std::sync::OnceLock;
use std::time::Instant;

use gtfs_model::{
    ALL_SCHEMAS, Agency, Calendar, CalendarDate, FeedInfo, LoaderOptions, Notice, NoticeContainer,
    Presence, Route, Stop, StopTime, Trip, schema_for,
};

use crate::container::{TableContainer, TableStatus};
use crate::loader::TableLoader;
use crate::tables::FromRow;

/// Raw feed content keyed by canonical filename, e.g. `stops.txt`.
///
/// Unpacking archives or walking directories is left to the caller.
#[derive(Debug, Clone, Default)]
pub struct FeedInput {
    files: BTreeMap<String, Vec<u8>>,
}

impl FeedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, filename: impl Into<String>, content: impl Into<Vec<u8>>) {
        self.files.insert(filename.into(), content.into());
    }

    pub fn with_file(mut self, filename: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(filename, content);
        self
    }

    pub fn get(&self, filename: &str) -> Option<&[u8]> {
        self.files.get(filename).map(Vec::as_slice)
    }

    pub fn filenames(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

/// Every table of a feed after loading.
///
/// Containers are immutable once built, so validators may share the feed
/// across threads.
#[derive(Debug, Default)]
pub struct GtfsFeedContainer {
    agency: TableContainer<Agency>,
    stops: TableContainer<Stop>,
    routes: TableContainer<Route>,
    trips: TableContainer<Trip>,
    stop_times: TableContainer<StopTime>,
    calendar: TableContainer<Calendar>,
    calendar_dates: TableContainer<CalendarDate>,
    feed_info: TableContainer<FeedInfo>,
    stop_times_by_trip: OnceLock<BTreeMap<String, Vec<usize>>>,
}

impl GtfsFeedContainer {
    pub fn agency(&self) -> &TableContainer<Agency> {
        &self.agency
    }

    pub fn stops(&self) -> &TableContainer<Stop> {
        &self.stops
    }

    pub fn routes(&self) -> &TableContainer<Route> {
        &self.routes
    }

    pub fn trips(&self) -> &TableContainer<Trip> {
        &self.trips
    }

    pub fn stop_times(&self) -> &TableContainer<StopTime> {
        &self.stop_times
    }

    pub fn calendar(&self) -> &TableContainer<Calendar> {
        &self.calendar
    }

    pub fn calendar_dates(&self) -> &TableContainer<CalendarDate> {
        &self.calendar_dates
    }

    pub fn feed_info(&self) -> &TableContainer<FeedInfo> {
        &self.feed_info
    }

    /// Load status of a table by filename, `None` for unknown files.
    pub fn table_status(&self, filename: &str) -> Option<TableStatus> {
        let status = match filename {
            Agency::FILENAME => self.agency.status(),
            Stop::FILENAME => self.stops.status(),
            Route::FILENAME => self.routes.status(),
            Trip::FILENAME => self.trips.status(),
            StopTime::FILENAME => self.stop_times.status(),
            Calendar::FILENAME => self.calendar.status(),
            CalendarDate::FILENAME => self.calendar_dates.status(),
            FeedInfo::FILENAME => self.feed_info.status(),
            _ => return None,
        };
        Some(status)
    }

    /// Stop time positions grouped by trip and sorted by `stop_sequence`.
    ///
    /// Built on first use and shared by every caller afterwards.
    fn stop_times_by_trip(&self) -> &BTreeMap<String, Vec<usize>> {
        self.stop_times_by_trip.get_or_init(|| {
            let entities = self.stop_times.entities();
            let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
            for (position, stop_time) in entities.iter().enumerate() {
                groups
                    .entry(stop_time.trip_id.clone())
                    .or_default()
                    .push(position);
            }
            for positions in groups.values_mut() {
                positions.sort_by_key(|&position| entities[position].stop_sequence);
            }
            groups
        })
    }

    /// Trip ids that have stop times, in lexical order.
    pub fn trip_ids_with_stop_times(&self) -> impl Iterator<Item = &str> {
        self.stop_times_by_trip().keys().map(String::as_str)
    }

    /// Stop times of a trip sorted by `stop_sequence`; file order on ties.
    pub fn stop_times_for_trip(&self, trip_id: &str) -> Vec<&StopTime> {
        let entities = self.stop_times.entities();
        self.stop_times_by_trip()
            .get(trip_id)
            .map(|positions| positions.iter().map(|&position| &entities[position]).collect())
            .unwrap_or_default()
    }
}

/// Loads every known table of a feed and applies file-level policy.
#[derive(Debug, Clone, Default)]
pub struct GtfsFeedLoader {
    loader: TableLoader,
}

impl GtfsFeedLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            loader: TableLoader::new(options),
        }
    }

    /// Load all tables; notices are appended in table order, followed by
    /// feed-level notices.
    pub fn load(&self, input: &FeedInput, notices: &NoticeContainer) -> GtfsFeedContainer {
        let _span = tracing::info_span!("load_feed").entered();
        let start = Instant::now();
        let parallel = self.loader.options().parallel;

        for filename in input.filenames() {
            if schema_for(filename).is_none() {
                tracing::debug!(filename, "Ignoring unsupported file");
            }
        }

        let local: [NoticeContainer; 8] = Default::default();
        let (((agency, stops), (routes, trips)), ((stop_times, calendar), (calendar_dates, feed_info))) =
            join(
                parallel,
                || {
                    join(
                        parallel,
                        || {
                            join(
                                parallel,
                                || self.load_table::<Agency>(input, &local[0]),
                                || self.load_table::<Stop>(input, &local[1]),
                            )
                        },
                        || {
                            join(
                                parallel,
                                || self.load_table::<Route>(input, &local[2]),
                                || self.load_table::<Trip>(input, &local[3]),
                            )
                        },
                    )
                },
                || {
                    join(
                        parallel,
                        || {
                            join(
                                parallel,
                                || self.load_table::<StopTime>(input, &local[4]),
                                || self.load_table::<Calendar>(input, &local[5]),
                            )
                        },
                        || {
                            join(
                                parallel,
                                || self.load_table::<CalendarDate>(input, &local[6]),
                                || self.load_table::<FeedInfo>(input, &local[7]),
                            )
                        },
                    )
                },
            );
        for table_notices in local {
            notices.merge(table_notices);
        }

        let feed = GtfsFeedContainer {
            agency,
            stops,
            routes,
            trips,
            stop_times,
            calendar,
            calendar_dates,
            feed_info,
            stop_times_by_trip: OnceLock::new(),
        };
        check_required_files(&feed, notices);

        tracing::info!(
            notices = notices.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Loaded feed"
        );
        feed
    }

    fn load_table<T: FromRow>(&self, input: &FeedInput, notices: &NoticeContainer) -> TableContainer<T> {
        self.loader.load(input.get(T::SCHEMA.filename), notices)
    }
}

fn join<A, B, RA, RB>(parallel: bool, a: A, b: B) -> (RA, RB)
where
    A: FnOnce() -> RA + Send,
    B: FnOnce() -> RB + Send,
    RA: Send,
    RB: Send,
{
    if parallel {
        rayon::join(a, b)
    } else {
        (a(), b())
    }
}

fn check_required_files(feed: &GtfsFeedContainer, notices: &NoticeContainer) {
    let required = ALL_SCHEMAS
        .iter()
        .filter(|schema| schema.presence == Presence::Required);
    for schema in required {
        if feed.table_status(schema.filename) == Some(TableStatus::MissingFile) {
            notices.add(Notice::MissingRequiredFile {
                filename: schema.filename.to_string(),
            });
        }
    }
    if feed.calendar.is_missing_file() && feed.calendar_dates.is_missing_file() {
        notices.add(Notice::MissingCalendarAndCalendarDateFiles);
    }
}
