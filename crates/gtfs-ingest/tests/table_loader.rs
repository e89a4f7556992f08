//! Table loading scenarios for individual GTFS files.

use gtfs_ingest::{TableContainer, TableLoader, TableStatus};
use gtfs_model::{
    Calendar, CalendarService, ContinuousPickupDropOff, GtfsColor, GtfsDate, GtfsTime,
    LocationType, Notice, NoticeContainer, PickupDropOffType, Route, RouteType, Stop, StopTime,
    Timepoint,
};

fn load<T: gtfs_ingest::FromRow>(content: &str) -> (TableContainer<T>, Vec<Notice>) {
    let notices = NoticeContainer::new();
    let container = TableLoader::default().load(Some(content.as_bytes()), &notices);
    (container, notices.into_notices())
}

#[test]
fn calendar_valid_row() {
    let (calendar, notices) = load::<Calendar>(
        "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n\
         WEEK,1,1,1,1,1,0,0,20201122,20201210\n",
    );

    assert!(notices.is_empty(), "{notices:?}");
    assert_eq!(calendar.status(), TableStatus::Normal);
    assert_eq!(calendar.entity_count(), 1);
    let week = calendar.by_service_id("WEEK").unwrap();
    assert_eq!(week.monday, CalendarService::Available);
    assert_eq!(week.sunday, CalendarService::NotAvailable);
    assert_eq!(week.start_date, GtfsDate::from_ymd(2020, 11, 22).unwrap());
    assert_eq!(week.end_date.to_string(), "20201210");
    assert_eq!(week.csv_row_number, 2);
}

#[test]
fn calendar_missing_monday_discards_the_row() {
    let (calendar, notices) = load::<Calendar>(
        "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n\
         WEEK,,1,1,1,1,0,0,20201122,20201210\n",
    );

    assert_eq!(calendar.entity_count(), 0);
    assert!(calendar.is_normal());
    assert_eq!(
        notices,
        vec![Notice::MissingRequiredField {
            filename: "calendar.txt".to_string(),
            csv_row_number: 2,
            field_name: "monday".to_string(),
        }]
    );
}

#[test]
fn route_missing_route_type() {
    let (routes, notices) = load::<Route>(
        "route_id,agency_id,route_short_name,route_long_name,route_type\n\
         r1,a1,10,Main Line,\n",
    );

    assert_eq!(routes.entity_count(), 0);
    assert_eq!(
        notices,
        vec![Notice::MissingRequiredField {
            filename: "routes.txt".to_string(),
            csv_row_number: 2,
            field_name: "route_type".to_string(),
        }]
    );
}

#[test]
fn route_defaults_fill_empty_optional_fields() {
    let (routes, notices) = load::<Route>(
        "route_id,route_short_name,route_type,route_color,continuous_pickup\n\
         r1,10,3,,\n\
         r2,11,3,00ff00,0\n",
    );

    assert!(notices.is_empty(), "{notices:?}");
    let r1 = routes.by_route_id("r1").unwrap();
    assert_eq!(r1.route_type, RouteType::Bus);
    assert_eq!(r1.route_color, GtfsColor::WHITE);
    assert_eq!(r1.route_text_color, GtfsColor::BLACK);
    assert_eq!(r1.continuous_pickup, ContinuousPickupDropOff::NotAvailable);
    assert_eq!(r1.agency_id, None);

    let r2 = routes.by_route_id("r2").unwrap();
    assert_eq!(r2.route_color.to_string(), "00FF00");
    assert_eq!(r2.continuous_pickup, ContinuousPickupDropOff::Allowed);
}

#[test]
fn route_unknown_enum_on_required_field_discards_the_row() {
    let (routes, notices) = load::<Route>("route_id,route_type\nr1,42\nr2,1\n");

    assert_eq!(routes.entity_count(), 1);
    assert!(routes.by_route_id("r1").is_none());
    assert_eq!(
        notices,
        vec![Notice::UnexpectedEnumValue {
            filename: "routes.txt".to_string(),
            csv_row_number: 2,
            field_name: "route_type".to_string(),
            field_value: "42".to_string(),
        }]
    );
}

#[test]
fn stop_valid_row_with_columns_in_any_order() {
    let (stops, notices) = load::<Stop>(
        "stop_lon,stop_name,stop_id,stop_lat,zone_id\n\
         -50.55,Main St,s1,23.45,z1\n",
    );

    assert!(notices.is_empty(), "{notices:?}");
    let stop = stops.by_stop_id("s1").unwrap();
    assert_eq!(stop.stop_lat, Some(23.45));
    assert_eq!(stop.stop_lon, Some(-50.55));
    assert_eq!(stop.stop_name.as_deref(), Some("Main St"));
    assert_eq!(stop.location_type, LocationType::StopOrPlatform);
    assert!(stop.has_location());
}

#[test]
fn stop_missing_stop_id() {
    let (stops, notices) = load::<Stop>("stop_id,stop_name\n,Main St\ns2,Other\n");

    assert_eq!(stops.entity_count(), 1);
    assert_eq!(notices.len(), 1);
    assert!(matches!(
        &notices[0],
        Notice::MissingRequiredField { field_name, csv_row_number: 2, .. } if field_name == "stop_id"
    ));
}

#[test]
fn stop_invalid_optional_field_keeps_the_row() {
    let (stops, notices) = load::<Stop>("stop_id,stop_lat\ns1,north\n");

    assert_eq!(stops.entity_count(), 1);
    assert_eq!(stops.by_stop_id("s1").unwrap().stop_lat, None);
    assert_eq!(
        notices,
        vec![Notice::InvalidFloat {
            filename: "stops.txt".to_string(),
            csv_row_number: 2,
            field_name: "stop_lat".to_string(),
            field_value: "north".to_string(),
        }]
    );
}

#[test]
fn empty_stops_file() {
    let (stops, notices) = load::<Stop>("");

    assert!(stops.is_empty_file());
    assert_eq!(stops.entity_count(), 0);
    assert_eq!(
        notices,
        vec![Notice::EmptyFile {
            filename: "stops.txt".to_string(),
        }]
    );
}

#[test]
fn missing_file_emits_nothing() {
    let notices = NoticeContainer::new();
    let stops: TableContainer<Stop> = TableLoader::default().load(None::<&[u8]>, &notices);

    assert!(stops.is_missing_file());
    assert!(notices.is_empty());
}

#[test]
fn invalid_headers_stop_row_processing() {
    let (stops, notices) = load::<Stop>("stop_name,stop_lat\nMain St,23.45\n");

    assert!(stops.has_invalid_headers());
    assert_eq!(stops.entity_count(), 0);
    assert_eq!(
        notices,
        vec![Notice::MissingRequiredColumn {
            filename: "stops.txt".to_string(),
            field_name: "stop_id".to_string(),
        }]
    );
}

#[test]
fn row_length_mismatch_is_reported_and_skipped() {
    let (stops, notices) = load::<Stop>("stop_id,stop_name\ns1,Main,extra\ns2,Other\n");

    assert_eq!(stops.entity_count(), 1);
    assert_eq!(
        notices,
        vec![Notice::InvalidRowLength {
            filename: "stops.txt".to_string(),
            csv_row_number: 2,
            row_length: 3,
            header_count: 2,
        }]
    );
}

#[test]
fn duplicate_stop_id_keeps_both_rows_and_first_in_index() {
    let (stops, notices) = load::<Stop>("stop_id,stop_name\ns1,First\ns1,Second\n");

    assert_eq!(stops.entity_count(), 2);
    assert_eq!(
        stops.by_stop_id("s1").unwrap().stop_name.as_deref(),
        Some("First")
    );
    assert_eq!(
        notices,
        vec![Notice::DuplicateKey {
            filename: "stops.txt".to_string(),
            csv_row_number: 3,
            field_name: "stop_id".to_string(),
            field_value: "s1".to_string(),
        }]
    );
}

#[test]
fn stop_times_with_times_past_midnight() {
    let (stop_times, notices) = load::<StopTime>(
        "trip_id,arrival_time,departure_time,stop_id,stop_sequence,pickup_type\n\
         t1,23:50:00,23:55:00,s1,1,\n\
         t1,25:10:00,,s2,2,1\n",
    );

    assert!(notices.is_empty(), "{notices:?}");
    let second = stop_times.by_trip_id_and_stop_sequence("t1", 2).unwrap();
    assert_eq!(second.arrival_time, Some(GtfsTime::from_hms(25, 10, 0).unwrap()));
    assert_eq!(second.departure_time, None);
    assert_eq!(second.pickup_type, PickupDropOffType::NotAvailable);
    assert_eq!(second.timepoint, Timepoint::Exact);

    let first = stop_times.by_trip_id_and_stop_sequence("t1", 1).unwrap();
    assert_eq!(first.pickup_type, PickupDropOffType::Regular);
}

#[test]
fn negative_stop_sequence_is_out_of_range() {
    let (stop_times, notices) = load::<StopTime>("trip_id,stop_id,stop_sequence\nt1,s1,-1\n");

    assert_eq!(stop_times.entity_count(), 0);
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].code(), "number_out_of_range");
}

#[test]
fn every_problem_of_a_row_is_reported() {
    let (calendar, notices) = load::<Calendar>(
        "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date\n\
         WEEK,,1,1,1,1,0,7,2020-11-22,20201210\n",
    );

    assert_eq!(calendar.entity_count(), 0);
    let codes: Vec<&str> = notices.iter().map(Notice::code).collect();
    assert_eq!(
        codes,
        ["missing_required_field", "unexpected_enum_value", "invalid_date"]
    );
}

#[test]
fn row_numbers_count_physical_lines() {
    let (stops, notices) = load::<Stop>("stop_id,stop_name\ns1,A\n\n,B\ns3,C\n");

    assert_eq!(stops.by_stop_id("s3").unwrap().csv_row_number, 5);
    assert_eq!(
        notices,
        vec![Notice::MissingRequiredField {
            filename: "stops.txt".to_string(),
            csv_row_number: 4,
            field_name: "stop_id".to_string(),
        }]
    );
}

#[test]
fn quoted_line_break_advances_row_numbers() {
    let (stops, notices) = load::<Stop>("stop_id,stop_name\ns1,\"A\nB\"\n,C\n");

    assert_eq!(stops.by_stop_id("s1").unwrap().stop_name.as_deref(), Some("A\nB"));
    assert!(matches!(
        &notices[..],
        [Notice::MissingRequiredField { csv_row_number: 4, .. }]
    ));
}

#[test]
fn whitespace_only_line_is_skipped_like_an_empty_one() {
    let (stops, notices) = load::<Stop>("stop_id,stop_name\ns1,A\n   \ns2,B\n");

    assert!(notices.is_empty(), "{notices:?}");
    assert_eq!(stops.entity_count(), 2);
    assert_eq!(stops.by_stop_id("s2").unwrap().csv_row_number, 4);
}

#[test]
fn undecodable_record_is_skipped_and_loading_continues() {
    let notices = NoticeContainer::new();
    let stop_times: TableContainer<StopTime> = TableLoader::default().load_bytes(
        b"trip_id,stop_id,stop_sequence\nt1,s\xFF,1\nt1,s2,2\n",
        &notices,
    );
    let notices = notices.into_notices();

    assert_eq!(stop_times.entity_count(), 1);
    let loaded = stop_times.by_trip_id_and_stop_sequence("t1", 2).unwrap();
    assert_eq!(loaded.csv_row_number, 3);
    assert_eq!(notices.len(), 1);
    assert!(matches!(
        &notices[0],
        Notice::CsvParsingFailed { filename, csv_row_number: 2, .. } if filename == "stop_times.txt"
    ));
}

#[test]
fn stop_time_invalid_arrival_time_keeps_the_row() {
    let (stop_times, notices) = load::<StopTime>(
        "trip_id,arrival_time,departure_time,stop_id,stop_sequence\n\
         t1,8h00,08:05:00,s1,1\n",
    );

    let stop_time = stop_times.by_trip_id_and_stop_sequence("t1", 1).unwrap();
    assert_eq!(stop_time.arrival_time, None);
    assert_eq!(stop_time.departure_time, Some(GtfsTime::from_hms(8, 5, 0).unwrap()));
    assert_eq!(
        notices,
        vec![Notice::InvalidTime {
            filename: "stop_times.txt".to_string(),
            csv_row_number: 2,
            field_name: "arrival_time".to_string(),
            field_value: "8h00".to_string(),
        }]
    );
}
