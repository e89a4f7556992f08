//! Arrival times must not go backwards along a trip.

use anyhow::Result;
use gtfs_ingest::GtfsFeedContainer;
use gtfs_model::{Notice, NoticeContainer, StopTime};

use crate::validator::{Validator, ValidatorRegistration};

pub const REGISTRATION: ValidatorRegistration = ValidatorRegistration {
    name: "stop_time_increasing_times",
    tables: &[StopTime::FILENAME],
    build,
};

fn build(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(StopTimeIncreasingTimesValidator { feed })
}

/// Compares each arrival with the departure of the closest earlier stop
/// time of the same trip that has one.
///
/// A stop time without a departure never becomes the previous stop time, so
/// untimed stops in the middle of a trip are stepped over rather than
/// breaking the comparison chain.
pub struct StopTimeIncreasingTimesValidator<'a> {
    feed: &'a GtfsFeedContainer,
}

impl Validator for StopTimeIncreasingTimesValidator<'_> {
    fn validate(&self, notices: &NoticeContainer) -> Result<()> {
        for trip_id in self.feed.trip_ids_with_stop_times() {
            let mut previous: Option<&StopTime> = None;
            for stop_time in self.feed.stop_times_for_trip(trip_id) {
                if let (Some(arrival), Some(prev)) = (stop_time.arrival_time, previous)
                    && let Some(prev_departure) = prev.departure_time
                    && arrival < prev_departure
                {
                    notices.add(Notice::StopTimeWithArrivalBeforePreviousDepartureTime {
                        csv_row_number: stop_time.csv_row_number,
                        prev_csv_row_number: prev.csv_row_number,
                        trip_id: trip_id.to_string(),
                        departure_time: prev_departure.to_string(),
                        arrival_time: arrival.to_string(),
                    });
                }
                if stop_time.departure_time.is_some() {
                    previous = Some(stop_time);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::run;

    const HEADER: &str = "trip_id,arrival_time,departure_time,stop_id,stop_sequence";

    fn stop_times(rows: &str) -> String {
        format!("{HEADER}\n{rows}")
    }

    #[test]
    fn test_arrival_before_previous_departure() {
        let content = stop_times("t1,08:00:00,08:05:00,s1,1\nt1,08:03:00,08:06:00,s2,2\n");
        let notices = run(&REGISTRATION, &[("stop_times.txt", &content)]);
        assert_eq!(
            notices,
            vec![Notice::StopTimeWithArrivalBeforePreviousDepartureTime {
                csv_row_number: 3,
                prev_csv_row_number: 2,
                trip_id: "t1".to_string(),
                departure_time: "08:05:00".to_string(),
                arrival_time: "08:03:00".to_string(),
            }]
        );
    }

    #[test]
    fn test_order_follows_stop_sequence_not_file_order() {
        let content = stop_times("t1,08:10:00,08:11:00,s2,2\nt1,08:00:00,08:01:00,s1,1\n");
        assert!(run(&REGISTRATION, &[("stop_times.txt", &content)]).is_empty());
    }

    #[test]
    fn test_untimed_stop_keeps_previous_departure() {
        let content = stop_times(
            "t1,08:00:00,08:10:00,s1,1\n\
             t1,,,s2,2\n\
             t1,08:05:00,08:06:00,s3,3\n",
        );
        let notices = run(&REGISTRATION, &[("stop_times.txt", &content)]);
        assert_eq!(notices.len(), 1);
        assert!(matches!(
            &notices[0],
            Notice::StopTimeWithArrivalBeforePreviousDepartureTime {
                csv_row_number: 4,
                prev_csv_row_number: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_trips_are_checked_independently() {
        let content = stop_times("t1,09:00:00,09:00:00,s1,1\nt2,08:00:00,08:00:00,s1,1\n");
        assert!(run(&REGISTRATION, &[("stop_times.txt", &content)]).is_empty());
    }

    #[test]
    fn test_equal_times_are_valid() {
        let content = stop_times("t1,08:00:00,08:05:00,s1,1\nt1,08:05:00,08:05:00,s2,2\n");
        assert!(run(&REGISTRATION, &[("stop_times.txt", &content)]).is_empty());
    }
}
