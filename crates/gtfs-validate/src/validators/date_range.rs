//! Start dates must not come after end dates.

use anyhow::Result;
use gtfs_ingest::{GtfsFeedContainer, TableContainer};
use gtfs_model::{Calendar, FeedInfo, GtfsDate, Notice, NoticeContainer};

use crate::validator::{Validator, ValidatorRegistration};

pub const CALENDAR: ValidatorRegistration = ValidatorRegistration {
    name: "calendar_date_range",
    tables: &[Calendar::FILENAME],
    build: build_calendar,
};

pub const FEED_INFO: ValidatorRegistration = ValidatorRegistration {
    name: "feed_info_date_range",
    tables: &[FeedInfo::FILENAME],
    build: build_feed_info,
};

fn build_calendar(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(CalendarDateRangeValidator::new(feed))
}

fn build_feed_info(feed: &GtfsFeedContainer) -> Box<dyn Validator + '_> {
    Box::new(FeedInfoDateRangeValidator::new(feed))
}

fn out_of_order(
    filename: &str,
    csv_row_number: u64,
    entity_id: Option<&str>,
    start_date: GtfsDate,
    end_date: GtfsDate,
) -> Notice {
    Notice::StartAndEndDateOutOfOrder {
        filename: filename.to_string(),
        csv_row_number,
        entity_id: entity_id.map(str::to_string),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
    }
}

/// `calendar.txt`: `start_date` must not be after `end_date`.
pub struct CalendarDateRangeValidator<'a> {
    calendar: &'a TableContainer<Calendar>,
}

impl<'a> CalendarDateRangeValidator<'a> {
    pub fn new(feed: &'a GtfsFeedContainer) -> Self {
        Self {
            calendar: feed.calendar(),
        }
    }
}

impl Validator for CalendarDateRangeValidator<'_> {
    fn validate(&self, notices: &NoticeContainer) -> Result<()> {
        for calendar in self.calendar.entities() {
            if calendar.start_date > calendar.end_date {
                notices.add(out_of_order(
                    Calendar::FILENAME,
                    calendar.csv_row_number,
                    Some(&calendar.service_id),
                    calendar.start_date,
                    calendar.end_date,
                ));
            }
        }
        Ok(())
    }
}

/// `feed_info.txt`: `feed_start_date` must not be after `feed_end_date`
/// when both are given.
pub struct FeedInfoDateRangeValidator<'a> {
    feed_info: &'a TableContainer<FeedInfo>,
}

impl<'a> FeedInfoDateRangeValidator<'a> {
    pub fn new(feed: &'a GtfsFeedContainer) -> Self {
        Self {
            feed_info: feed.feed_info(),
        }
    }
}

impl Validator for FeedInfoDateRangeValidator<'_> {
    fn validate(&self, notices: &NoticeContainer) -> Result<()> {
        for info in self.feed_info.entities() {
            if let (Some(start), Some(end)) = (info.feed_start_date, info.feed_end_date)
                && start > end
            {
                notices.add(out_of_order(
                    FeedInfo::FILENAME,
                    info.csv_row_number,
                    None,
                    start,
                    end,
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::test_support::run;

    const CALENDAR_HEADER: &str =
        "service_id,monday,tuesday,wednesday,thursday,friday,saturday,sunday,start_date,end_date";

    #[test]
    fn test_calendar_start_after_end() {
        let content = format!("{CALENDAR_HEADER}\nWEEK,1,1,1,1,1,0,0,20201210,20201122\n");
        let notices = run(&CALENDAR, &[("calendar.txt", &content)]);
        assert_eq!(
            notices,
            vec![Notice::StartAndEndDateOutOfOrder {
                filename: "calendar.txt".to_string(),
                csv_row_number: 2,
                entity_id: Some("WEEK".to_string()),
                start_date: "20201210".to_string(),
                end_date: "20201122".to_string(),
            }]
        );
    }

    #[test]
    fn test_calendar_same_day_is_valid() {
        let content = format!(
            "{CALENDAR_HEADER}\nDAY,1,1,1,1,1,0,0,20201122,20201122\nWEEK,1,1,1,1,1,0,0,20201101,20201130\n"
        );
        assert!(run(&CALENDAR, &[("calendar.txt", &content)]).is_empty());
    }

    #[test]
    fn test_feed_info_without_entity_id() {
        let content = "feed_publisher_name,feed_publisher_url,feed_lang,feed_start_date,feed_end_date\n\
                       Metro,http://metro.example,en,20201210,20201122\n";
        let notices = run(&FEED_INFO, &[("feed_info.txt", content)]);
        assert_eq!(notices.len(), 1);
        assert!(matches!(
            &notices[0],
            Notice::StartAndEndDateOutOfOrder { entity_id: None, csv_row_number: 2, .. }
        ));
    }

    #[test]
    fn test_feed_info_open_range() {
        let content = "feed_publisher_name,feed_publisher_url,feed_lang,feed_end_date\n\
                       Metro,http://metro.example,en,20201122\n";
        assert!(run(&FEED_INFO, &[("feed_info.txt", content)]).is_empty());
    }
}
