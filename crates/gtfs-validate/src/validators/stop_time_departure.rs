//! A stop time must not depart before it arrives.

use anyhow::Result;
use gtfs_ingest::{GtfsFeedContainer, TableContainer};
use gtfs_model::{Notice, NoticeContainer, StopTime};

use crate::validator::{Validator, ValidatorRegistration};

pub const REGISTRATION: ValidatorRegistration = ValidatorRegistration {
    name: "stop_time_departure",
    tables: &[StopTime::FILENAME],
    build,
};

fn build(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(StopTimeDepartureValidator::new(feed))
}

pub struct StopTimeDepartureValidator<'a> {
    stop_times: &'a TableContainer<StopTime>,
}

impl<'a> StopTimeDepartureValidator<'a> {
    pub fn new(feed: &'a GtfsFeedContainer) -> Self {
        Self {
            stop_times: feed.stop_times(),
        }
    }
}

impl Validator for StopTimeDepartureValidator<'_> {
    fn validate(&self, notices: &NoticeContainer) -> Result<()> {
        for stop_time in self.stop_times.entities() {
            if let (Some(arrival), Some(departure)) = (stop_time.arrival_time, stop_time.departure_time)
                && departure < arrival
            {
                notices.add(Notice::StopTimeWithDepartureBeforeArrivalTime {
                    csv_row_number: stop_time.csv_row_number,
                    trip_id: stop_time.trip_id.clone(),
                    stop_sequence: stop_time.stop_sequence,
                    arrival_time: arrival.to_string(),
                    departure_time: departure.to_string(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::run;

    #[test]
    fn test_departure_before_arrival() {
        let content = "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
                       t1,08:00:00,08:00:00,s1,1\n\
                       t1,08:10:00,08:09:59,s2,2\n";
        let notices = run(&REGISTRATION, &[("stop_times.txt", content)]);
        assert_eq!(
            notices,
            vec![Notice::StopTimeWithDepartureBeforeArrivalTime {
                csv_row_number: 3,
                trip_id: "t1".to_string(),
                stop_sequence: 2,
                arrival_time: "08:10:00".to_string(),
                departure_time: "08:09:59".to_string(),
            }]
        );
    }

    #[test]
    fn test_one_sided_times_are_ignored() {
        let content = "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
                       t1,08:10:00,,s1,1\n\
                       t1,,08:00:00,s2,2\n";
        assert!(run(&REGISTRATION, &[("stop_times.txt", content)]).is_empty());
    }
}
